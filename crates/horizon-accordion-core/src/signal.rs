//! Signal/slot system for Horizon Accordion.
//!
//! Signals are how accordion and section controllers tell the host that
//! state it renders from has changed. A host typically connects one slot
//! per controller that schedules a new render pass.
//!
//! # Key Types
//!
//! - [`Signal<Args>`]: the notification itself
//! - [`ConnectionId`]: handle for disconnecting one slot
//!
//! # Re-entrancy
//!
//! Accordion state transitions run synchronously inside input handlers, and
//! slots are allowed to call back into the controllers that emitted them.
//! [`Signal::emit`] therefore snapshots the connected slots and releases its
//! lock before invoking any of them. A slot may connect or disconnect slots,
//! or emit the same signal again, without deadlocking.
//!
//! # Example
//!
//! ```
//! use horizon_accordion_core::Signal;
//!
//! let expanded_changed = Signal::<bool>::new();
//!
//! let rerender = expanded_changed.connect(|expanded| {
//!     println!("re-render, expanded = {expanded}");
//! });
//!
//! expanded_changed.emit(true);
//! assert!(expanded_changed.disconnect(rerender));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle for one connected slot; pass it to [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A change notification carrying a value of type `Args` to every
/// connected slot.
///
/// Slots run on the emitting thread, in no particular order.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Connect `slot`; it runs on every later emission until disconnected.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Returns `false` if `id` was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Run every connected slot with `args`.
    ///
    /// A slot connected during an emission first runs on the next one.
    #[tracing::instrument(skip_all, target = "horizon_accordion_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emit");

        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<bool>: Send, Sync);
