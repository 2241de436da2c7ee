//! Input handling subsystem
//!
//! - `buttons`: Linux button codes and the tool-to-pointer button lookup
//! - `emulate`: The pointer emulation seam tablets drive
//! - `tablet`: Tablet device lifecycle and event dispatch

pub mod buttons;
pub mod emulate;
pub mod tablet;

// Re-export commonly used types
pub use buttons::ButtonMapper;
pub use emulate::CursorEmulation;
pub use tablet::{DeviceId, TabletDescriptor, TabletError, TabletEvent, TabletInput};
