use std::sync::{Arc, Condvar, Mutex};

/// The sender was dropped before publishing a carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Disconnected;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    disconnected: bool,
}

#[derive(Debug)]
struct Shared<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

/// One-shot single-producer/single-consumer carry handoff.
///
/// Each worker boundary gets exactly one channel: the left worker publishes
/// its running total once, the right worker awaits it once. Both operations
/// consume their endpoint, so double publish and double await cannot be
/// written. Dropping the sender without publishing wakes the receiver with
/// `Disconnected` instead of leaving it blocked.
pub(crate) fn carry_channel<T>() -> (CarrySender<T>, CarryReceiver<T>) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            value: None,
            disconnected: false,
        }),
        ready: Condvar::new(),
    });
    (
        CarrySender {
            shared: Arc::clone(&shared),
        },
        CarryReceiver { shared },
    )
}

#[derive(Debug)]
pub(crate) struct CarrySender<T> {
    shared: Arc<Shared<T>>,
}

impl<T> CarrySender<T> {
    /// Stores the carry and wakes the consumer. Consumes the sender, so a
    /// second publish on the same boundary is unrepresentable.
    pub(crate) fn publish(self, value: T) {
        if let Ok(mut slot) = self.shared.slot.lock() {
            slot.value = Some(value);
        }
        self.shared.ready.notify_one();
    }
}

impl<T> Drop for CarrySender<T> {
    fn drop(&mut self) {
        if let Ok(mut slot) = self.shared.slot.lock() {
            slot.disconnected = true;
        }
        self.shared.ready.notify_one();
    }
}

#[derive(Debug)]
pub(crate) struct CarryReceiver<T> {
    shared: Arc<Shared<T>>,
}

impl<T> CarryReceiver<T> {
    /// Blocks until the carry is published, then returns it. A publish that
    /// completed before this call is observed on the first slot check, so a
    /// wakeup cannot be lost. A poisoned lock means the producer panicked
    /// and is treated as a disconnect.
    pub(crate) fn await_value(self) -> Result<T, Disconnected> {
        let mut slot = self.shared.slot.lock().map_err(|_| Disconnected)?;
        loop {
            if let Some(value) = slot.value.take() {
                return Ok(value);
            }
            if slot.disconnected {
                return Err(Disconnected);
            }
            slot = self.shared.ready.wait(slot).map_err(|_| Disconnected)?;
        }
    }
}
