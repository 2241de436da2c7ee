use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use tracing::{trace, warn};

use super::{device::DeviceId, events::TabletEvent};

/// The streams a tablet can be listened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Axis,
    Proximity,
    Tip,
    Button,
    Destroy,
}

impl Signal {
    pub const ALL: [Signal; 5] = [
        Signal::Axis,
        Signal::Proximity,
        Signal::Tip,
        Signal::Button,
        Signal::Destroy,
    ];

    pub fn of(event: &TabletEvent) -> Self {
        match event {
            TabletEvent::Axis(_) => Signal::Axis,
            TabletEvent::Proximity(_) => Signal::Proximity,
            TabletEvent::Tip(_) => Signal::Tip,
            TabletEvent::Button(_) => Signal::Button,
            TabletEvent::Destroyed(_) => Signal::Destroy,
        }
    }
}

/// Book-keeping of which device streams currently have a listener.
/// Events on a stream without one are not delivered.
#[derive(Debug, Default)]
pub struct SignalHub {
    next_id: u64,
    listeners: HashMap<u64, (DeviceId, Signal)>,
    connected: HashMap<(DeviceId, Signal), usize>,
    revoked: u64,
}

impl SignalHub {
    fn connect(&mut self, device: DeviceId, signal: Signal) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, (device, signal));
        *self.connected.entry((device, signal)).or_default() += 1;
        id
    }

    fn disconnect(&mut self, id: u64) -> bool {
        let Some(key) = self.listeners.remove(&id) else {
            return false;
        };
        if let Some(count) = self.connected.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.connected.remove(&key);
            }
        }
        self.revoked += 1;
        true
    }

    pub fn is_connected(&self, device: DeviceId, signal: Signal) -> bool {
        self.connected.contains_key(&(device, signal))
    }

    pub fn listener_count(&self, device: DeviceId) -> usize {
        Signal::ALL
            .iter()
            .filter_map(|&signal| self.connected.get(&(device, signal)))
            .sum()
    }

    /// Listeners disconnected since the hub was created.
    pub fn revoked(&self) -> u64 {
        self.revoked
    }
}

/// A connected listener. Dropping it disconnects it.
#[derive(Debug)]
pub struct Listener {
    id: u64,
    device: DeviceId,
    signal: Signal,
    hub: Weak<RefCell<SignalHub>>,
}

impl Listener {
    pub(crate) fn connect(hub: &Rc<RefCell<SignalHub>>, device: DeviceId, signal: Signal) -> Self {
        let id = hub.borrow_mut().connect(device, signal);
        Self {
            id,
            device,
            signal,
            hub: Rc::downgrade(hub),
        }
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        // hub already gone, nothing left to disconnect from
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        if hub.borrow_mut().disconnect(self.id) {
            trace!(device = %self.device, signal = ?self.signal, "listener revoked");
        } else {
            warn!(device = %self.device, signal = ?self.signal, "listener was already revoked");
        }
    }
}

/// Every listener a tablet holds.
///
/// Field order is drop order: the destroy listener is revoked last.
#[derive(Debug)]
pub struct TabletListeners {
    axis: Listener,
    proximity: Listener,
    tip: Listener,
    button: Listener,
    destroy: Listener,
}

impl TabletListeners {
    pub(crate) fn connect(hub: &Rc<RefCell<SignalHub>>, device: DeviceId) -> Self {
        Self {
            axis: Listener::connect(hub, device, Signal::Axis),
            proximity: Listener::connect(hub, device, Signal::Proximity),
            tip: Listener::connect(hub, device, Signal::Tip),
            button: Listener::connect(hub, device, Signal::Button),
            destroy: Listener::connect(hub, device, Signal::Destroy),
        }
    }

    pub fn signals(&self) -> [Signal; 5] {
        [
            self.axis.signal(),
            self.proximity.signal(),
            self.tip.signal(),
            self.button.signal(),
            self.destroy.signal(),
        ]
    }
}
