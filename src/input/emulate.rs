use smithay::backend::input::ButtonState;

use super::tablet::DeviceId;

/// Turns tablet input into pointer input on a seat.
///
/// Positions are normalized output coordinates and may fall outside `[0, 1]`
/// when the tool leaves the active area; clamping and output mapping are up
/// to the implementation.
pub trait CursorEmulation<S> {
    fn emulate_move_absolute(&mut self, seat: &S, device: DeviceId, x: f64, y: f64, time_msec: u32);

    fn emulate_button(&mut self, seat: &S, button: u32, state: ButtonState, time_msec: u32);
}
