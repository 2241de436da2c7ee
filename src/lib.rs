//! Drawing tablet support for the otto shell: turns absolute tablet tool input
//! into calibrated pointer motion and buttons.

pub mod config;
pub mod input;

pub use config::{Config, ConfigStore};
pub use input::{CursorEmulation, TabletInput};
