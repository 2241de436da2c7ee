//! Drawing tablets driving the pointer.
//!
//! Tool positions are cropped to the configured active area, rotated, and fed
//! to the seat as absolute pointer motion. The tip and the tool buttons become
//! pointer buttons through the button map.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use smithay::backend::input::{ButtonState, ProximityState, TabletToolTipState};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::ConfigStore;

use super::{
    buttons::{ButtonMapper, BTN_TOOL_PEN},
    emulate::CursorEmulation,
};

pub mod device;
pub mod events;
pub mod signal;
pub mod transform;

pub use device::{DeviceId, DrawingTablet, TabletDescriptor};
pub use events::{
    AxisEvent, AxisMask, ButtonEvent, ProximityEvent, TabletEvent, TabletTool, TipEvent, ToolKind,
};
pub use signal::{Signal, TabletListeners};

#[derive(Debug, Error)]
pub enum TabletError {
    #[error("tablet {0} is already set up")]
    AlreadyTracked(DeviceId),
}

/// Owns every tablet on the event thread and routes their events.
pub struct TabletInput<S> {
    tablets: HashMap<DeviceId, DrawingTablet<S>>,
    hub: Rc<RefCell<signal::SignalHub>>,
    config: ConfigStore,
    buttons: Box<dyn ButtonMapper>,
}

impl<S> TabletInput<S> {
    /// Buttons are mapped with the `[tablet.map]` of `config`.
    pub fn new(config: ConfigStore) -> Self {
        Self {
            tablets: HashMap::new(),
            hub: Rc::default(),
            buttons: Box::new(config.clone()),
            config,
        }
    }

    pub fn with_button_mapper(mut self, mapper: impl ButtonMapper + 'static) -> Self {
        self.buttons = Box::new(mapper);
        self
    }

    pub fn on_device_added(&mut self, seat: S, device: &TabletDescriptor) -> Result<(), TabletError> {
        if self.tablets.contains_key(&device.id) {
            return Err(TabletError::AlreadyTracked(device.id));
        }

        debug!(device = %device.id, name = %device.name, "setting up tablet");
        let listeners = TabletListeners::connect(&self.hub, device.id);
        let tablet = DrawingTablet::new(seat, device, listeners);
        info!(
            device = %device.id,
            "tablet dimensions: {:.2}mm x {:.2}mm",
            device.width_mm,
            device.height_mm
        );
        self.tablets.insert(device.id, tablet);
        Ok(())
    }

    /// Delivers `event` if its device still listens for that kind of event.
    pub fn dispatch<C: CursorEmulation<S>>(&mut self, event: TabletEvent, cursor: &mut C) {
        let device = event.device();
        let signal = Signal::of(&event);
        if !self.hub.borrow().is_connected(device, signal) {
            trace!(device = %device, ?signal, "no listener, dropping tablet event");
            return;
        }

        match event {
            TabletEvent::Axis(evt) => self.on_tablet_tool_axis(evt, cursor),
            TabletEvent::Proximity(evt) => self.on_tablet_tool_proximity(evt),
            TabletEvent::Tip(evt) => self.on_tablet_tool_tip(evt, cursor),
            TabletEvent::Button(evt) => self.on_tablet_button(evt, cursor),
            TabletEvent::Destroyed(device) => self.on_device_destroyed(device),
        }
    }

    fn on_tablet_tool_proximity(&self, evt: ProximityEvent) {
        if !evt.tool.supports_absolute_motion() && evt.state == ProximityState::In {
            info!(device = %evt.device, tool = ?evt.tool.kind, "ignoring tablet tool without absolute positioning");
        }
    }

    fn on_tablet_tool_axis<C: CursorEmulation<S>>(&mut self, evt: AxisEvent, cursor: &mut C) {
        if !evt.tool.supports_absolute_motion() {
            return;
        }
        let Some(tablet) = self.tablets.get_mut(&evt.device) else {
            return;
        };
        if !tablet.update_position(evt.updated, evt.x, evt.y) {
            // pressure, tilt and friends are not forwarded
            trace!(device = %evt.device, axes = ?evt.updated, "ignoring tablet axes");
            return;
        }

        let (area, rotation) = self
            .config
            .with(|config| (config.tablet.area, config.tablet.rotation));
        let (width_mm, height_mm) = tablet.size_mm();
        let (x, y) = tablet.position();
        let (x, y) = transform::apply_active_area(width_mm, height_mm, area, x, y);
        let (x, y) = transform::apply_rotation(rotation, x, y);

        cursor.emulate_move_absolute(tablet.seat(), evt.device, x, y, evt.time_msec);
    }

    fn on_tablet_tool_tip<C: CursorEmulation<S>>(&self, evt: TipEvent, cursor: &mut C) {
        let Some(tablet) = self.tablets.get(&evt.device) else {
            return;
        };
        let Some(button) = self.buttons.mapped_button(BTN_TOOL_PEN) else {
            trace!(device = %evt.device, "tablet tip is not mapped");
            return;
        };

        let state = if evt.state == TabletToolTipState::Down {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        };
        cursor.emulate_button(tablet.seat(), button, state, evt.time_msec);
    }

    fn on_tablet_button<C: CursorEmulation<S>>(&self, evt: ButtonEvent, cursor: &mut C) {
        let Some(tablet) = self.tablets.get(&evt.device) else {
            return;
        };
        let Some(button) = self.buttons.mapped_button(evt.button) else {
            trace!(device = %evt.device, button = evt.button, "tablet button is not mapped");
            return;
        };

        cursor.emulate_button(tablet.seat(), button, evt.state, evt.time_msec);
    }

    fn on_device_destroyed(&mut self, device: DeviceId) {
        // the record leaves the map first so nothing can reach it mid-teardown;
        // dropping it revokes its listeners
        if let Some(tablet) = self.tablets.remove(&device) {
            debug!(device = %device, name = %tablet.name(), "tablet removed");
            drop(tablet);
        }
    }

    pub fn tablet(&self, device: DeviceId) -> Option<&DrawingTablet<S>> {
        self.tablets.get(&device)
    }

    pub fn len(&self) -> usize {
        self.tablets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tablets.is_empty()
    }

    pub fn listener_count(&self, device: DeviceId) -> usize {
        self.hub.borrow().listener_count(device)
    }

    /// Listeners revoked over the lifetime of this instance.
    pub fn revoked_listeners(&self) -> u64 {
        self.hub.borrow().revoked()
    }
}
