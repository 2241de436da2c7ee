use std::fmt;

use super::{events::AxisMask, signal::TabletListeners};

/// Stable identifier of an input device, assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u64);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What device discovery tells us about a new tablet.
#[derive(Debug, Clone, PartialEq)]
pub struct TabletDescriptor {
    pub id: DeviceId,
    pub name: String,
    /// Physical size of the surface, zero when the device does not report it.
    pub width_mm: f64,
    pub height_mm: f64,
}

/// Per-device state of a tablet in use.
#[derive(Debug)]
pub struct DrawingTablet<S> {
    id: DeviceId,
    name: String,
    seat: S,
    width_mm: f64,
    height_mm: f64,
    x: f64,
    y: f64,
    listeners: TabletListeners,
}

impl<S> DrawingTablet<S> {
    pub(crate) fn new(seat: S, device: &TabletDescriptor, listeners: TabletListeners) -> Self {
        Self {
            id: device.id,
            name: device.name.clone(),
            seat,
            width_mm: device.width_mm,
            height_mm: device.height_mm,
            x: 0.0,
            y: 0.0,
            listeners,
        }
    }

    pub fn id(&self) -> DeviceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seat(&self) -> &S {
        &self.seat
    }

    pub fn size_mm(&self) -> (f64, f64) {
        (self.width_mm, self.height_mm)
    }

    /// Last raw position, normalized to the tablet surface.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn listeners(&self) -> &TabletListeners {
        &self.listeners
    }

    /// Stores the axes flagged in `updated`, keeping the other one.
    /// Returns whether the position changed at all.
    pub(crate) fn update_position(&mut self, updated: AxisMask, x: f64, y: f64) -> bool {
        if updated.contains(AxisMask::X) {
            self.x = x;
        }
        if updated.contains(AxisMask::Y) {
            self.y = y;
        }
        updated.intersects(AxisMask::X | AxisMask::Y)
    }
}
