use bitflags::bitflags;
use smithay::backend::input::{
    ButtonState, ProximityState, TabletToolDescriptor, TabletToolTipState, TabletToolType,
};

use super::device::DeviceId;

/// Physical kind of a tablet tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pen,
    Eraser,
    Brush,
    Pencil,
    Airbrush,
    Mouse,
    Lens,
    Unknown,
}

impl ToolKind {
    /// Whether the tool reports a usable position on the tablet surface.
    ///
    /// Pucks and lenses are relative devices in disguise; anything else,
    /// including kinds we do not know about, is treated as absolute.
    pub fn supports_absolute_motion(self) -> bool {
        !matches!(self, ToolKind::Mouse | ToolKind::Lens)
    }
}

impl From<TabletToolType> for ToolKind {
    #[allow(unreachable_patterns)]
    fn from(tool_type: TabletToolType) -> Self {
        match tool_type {
            TabletToolType::Pen => ToolKind::Pen,
            TabletToolType::Eraser => ToolKind::Eraser,
            TabletToolType::Brush => ToolKind::Brush,
            TabletToolType::Pencil => ToolKind::Pencil,
            TabletToolType::Airbrush => ToolKind::Airbrush,
            TabletToolType::Mouse => ToolKind::Mouse,
            TabletToolType::Lens => ToolKind::Lens,
            _ => ToolKind::Unknown,
        }
    }
}

/// The tool an event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabletTool {
    pub kind: ToolKind,
    pub hardware_serial: u64,
}

impl TabletTool {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            hardware_serial: 0,
        }
    }

    pub fn supports_absolute_motion(&self) -> bool {
        self.kind.supports_absolute_motion()
    }
}

impl From<&TabletToolDescriptor> for TabletTool {
    fn from(descriptor: &TabletToolDescriptor) -> Self {
        Self {
            kind: descriptor.tool_type.into(),
            hardware_serial: descriptor.hardware_serial,
        }
    }
}

bitflags! {
    /// Axes that changed in an [`AxisEvent`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AxisMask: u32 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const DISTANCE = 1 << 2;
        const PRESSURE = 1 << 3;
        const TILT_X = 1 << 4;
        const TILT_Y = 1 << 5;
        const ROTATION = 1 << 6;
        const SLIDER = 1 << 7;
        const WHEEL = 1 << 8;
    }
}

/// Tool motion. `x` and `y` are normalized to the tablet surface and only
/// meaningful for the axes flagged in `updated`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEvent {
    pub device: DeviceId,
    pub tool: TabletTool,
    pub updated: AxisMask,
    pub x: f64,
    pub y: f64,
    pub time_msec: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityEvent {
    pub device: DeviceId,
    pub tool: TabletTool,
    pub state: ProximityState,
    pub time_msec: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TipEvent {
    pub device: DeviceId,
    pub tool: TabletTool,
    pub state: TabletToolTipState,
    pub time_msec: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonEvent {
    pub device: DeviceId,
    pub tool: TabletTool,
    pub button: u32,
    pub state: ButtonState,
    pub time_msec: u32,
}

/// Everything a tablet device can emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabletEvent {
    Axis(AxisEvent),
    Proximity(ProximityEvent),
    Tip(TipEvent),
    Button(ButtonEvent),
    /// The device is gone. Delivered once, and last.
    Destroyed(DeviceId),
}

impl TabletEvent {
    pub fn device(&self) -> DeviceId {
        match self {
            TabletEvent::Axis(evt) => evt.device,
            TabletEvent::Proximity(evt) => evt.device,
            TabletEvent::Tip(evt) => evt.device,
            TabletEvent::Button(evt) => evt.device,
            TabletEvent::Destroyed(device) => *device,
        }
    }
}
