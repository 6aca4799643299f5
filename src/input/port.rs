//! Input port: the single entry point for host input.
//!
//! Hosts call [`InputPort::register`] to obtain an [`InputRegistration`]
//! and push events through it from any thread. Events queue on a channel
//! until the scheduler drains them at the next frame boundary. Dropping a
//! registration deregisters it; closing the port deregisters every
//! listener at once, so nothing outlives the scheduler that owns the port.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};

use rustc_hash::FxHashSet;

use super::event::InputEvent;

#[derive(Debug)]
struct PortShared {
    next_id: AtomicU64,
    listeners: Mutex<FxHashSet<u64>>,
    open: AtomicBool,
}

impl PortShared {
    fn is_registered(&self, id: u64) -> bool {
        self.open.load(Ordering::Acquire)
            && self
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(&id)
    }

    fn deregister(&self, id: u64) -> bool {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }
}

/// Receiving end of host input, owned by the scheduler.
#[derive(Debug)]
pub struct InputPort {
    shared: Arc<PortShared>,
    sender: mpsc::Sender<InputEvent>,
    receiver: mpsc::Receiver<InputEvent>,
}

impl InputPort {
    /// Create an open port with no listeners.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            shared: Arc::new(PortShared {
                next_id: AtomicU64::new(1),
                listeners: Mutex::new(FxHashSet::default()),
                open: AtomicBool::new(true),
            }),
            sender,
            receiver,
        }
    }

    /// Register a new listener. Registrations made after [`close`](Self::close)
    /// are inert: their sends fail.
    #[must_use]
    pub fn register(&self) -> InputRegistration {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        if self.is_open() {
            let _ = self
                .shared
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(id);
            log::debug!("input listener {id} registered");
        } else {
            log::warn!("input listener {id} registered on a closed port");
        }
        InputRegistration {
            id,
            shared: Arc::clone(&self.shared),
            sender: self.sender.clone(),
        }
    }

    /// Number of live registrations.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the port still accepts input.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::Acquire)
    }

    /// Drain queued events without blocking.
    pub fn drain(&self) -> impl Iterator<Item = InputEvent> + '_ {
        self.receiver.try_iter()
    }

    /// Deregister every listener and refuse further input. Queued events
    /// are discarded.
    pub fn close(&self) {
        if !self.shared.open.swap(false, Ordering::AcqRel) {
            return;
        }
        let count = {
            let mut listeners = self
                .shared
                .listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let count = listeners.len();
            listeners.clear();
            count
        };
        let discarded = self.receiver.try_iter().count();
        log::debug!(
            "input port closed: {count} listener(s) deregistered, {discarded} event(s) discarded"
        );
    }
}

impl Default for InputPort {
    fn default() -> Self {
        Self::new()
    }
}

/// A host's handle for sending input. Deregisters itself on drop.
#[derive(Debug)]
pub struct InputRegistration {
    id: u64,
    shared: Arc<PortShared>,
    sender: mpsc::Sender<InputEvent>,
}

impl InputRegistration {
    /// Listener id, unique per port.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether this registration can still deliver input.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.shared.is_registered(self.id)
    }

    /// Queue an event for the next frame. Returns `false` if the
    /// registration was revoked or the port is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        self.is_active() && self.sender.send(event).is_ok()
    }
}

impl Drop for InputRegistration {
    fn drop(&mut self) {
        if self.shared.deregister(self.id) {
            log::debug!("input listener {} deregistered", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn events_flow_from_registration_to_port() {
        let port = InputPort::new();
        let reg = port.register();
        assert!(reg.send(InputEvent::Wheel { delta: 1.0 }));
        assert!(reg.send(InputEvent::Key(KeyAction::ResetCamera)));
        let events: Vec<_> = port.drain().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::Wheel { delta: 1.0 },
                InputEvent::Key(KeyAction::ResetCamera)
            ]
        );
        assert_eq!(port.drain().count(), 0);
    }

    #[test]
    fn dropping_registration_deregisters() {
        let port = InputPort::new();
        let a = port.register();
        let b = port.register();
        assert_ne!(a.id(), b.id());
        assert_eq!(port.listener_count(), 2);
        drop(a);
        assert_eq!(port.listener_count(), 1);
        drop(b);
        assert_eq!(port.listener_count(), 0);
    }

    #[test]
    fn close_revokes_all_registrations() {
        let port = InputPort::new();
        let reg = port.register();
        assert!(reg.send(InputEvent::Wheel { delta: 1.0 }));
        port.close();
        assert!(!port.is_open());
        assert_eq!(port.listener_count(), 0);
        assert!(!reg.is_active());
        assert!(!reg.send(InputEvent::Wheel { delta: 1.0 }));
        assert_eq!(port.drain().count(), 0);

        let late = port.register();
        assert!(!late.send(InputEvent::Wheel { delta: 1.0 }));
        assert_eq!(port.listener_count(), 0);
    }

    #[test]
    fn sends_fail_once_port_is_dropped() {
        let port = InputPort::new();
        let reg = port.register();
        drop(port);
        assert!(!reg.send(InputEvent::Wheel { delta: 1.0 }));
    }

    #[test]
    fn registration_sends_from_another_thread() {
        let port = InputPort::new();
        let reg = port.register();
        let handle = std::thread::spawn(move || {
            reg.send(InputEvent::Click { x: 1.0, y: 2.0 })
        });
        assert!(handle.join().unwrap());
        assert_eq!(
            port.drain().next(),
            Some(InputEvent::Click { x: 1.0, y: 2.0 })
        );
        assert_eq!(port.listener_count(), 0);
    }
}
