//! Effect registry.
//!
//! Owns every device-resident effect created on the slotted path and the
//! mapping from a caller's stable [`EffectId`] to the hardware handle
//! backing it. The registry decides create-vs-update, assigns handles, and
//! tears resources down; the device itself is only borrowed for the calls
//! that need it.
//!
//! ## Handle discipline
//! Handles are drawn from a monotonically increasing counter. A handle is
//! bound to an id on the first *successful* creation and reused for every
//! later upload of the same id. A failed creation burns the drawn number
//! (the counter never moves backwards) but binds nothing, so the next
//! attempt draws fresh.
//!
//! ## Removal and the unload-retry case
//! Hardware may refuse to unload an effect (the device can report it is
//! still busy with it). Removal then keeps the registry entry: the slot has
//! already been stopped, and a later remove, or an upload reusing the
//! entry, can retry. Dropping the registry force-cleans everything and
//! ignores unload failures.

use std::collections::HashMap;

use crate::driver::{CreateError, EffectSlot, FfDevice};
use crate::effect::EffectId;
use crate::error::{FeedbackError, Result};
use crate::translate::EffectParams;

/// Registry-assigned identity of a realized effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub u32);

/// Mapping from abstract effect identities to device-resident slots.
#[derive(Debug)]
pub struct EffectRegistry<S: EffectSlot> {
    handles: HashMap<EffectId, EffectHandle>,
    slots: HashMap<EffectHandle, S>,
    next_handle: u32,
}

impl<S: EffectSlot> Default for EffectRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EffectSlot> EffectRegistry<S> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            slots: HashMap::new(),
            next_handle: 0,
        }
    }

    /// Number of live device-resident effects.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Handle currently bound to `id`, if any.
    pub fn handle_of(&self, id: EffectId) -> Option<EffectHandle> {
        self.handles.get(&id).copied()
    }

    /// Realize an effect on the device: create it if `id` has no live
    /// slot, otherwise update the existing slot in place.
    ///
    /// On creation the new slot is immediately started for indefinite
    /// looping playback; a start failure is ignored (the effect exists and
    /// the next parameter write restarts it). Slot exhaustion reports
    /// [`FeedbackError::DeviceFull`], any other creation failure
    /// [`FeedbackError::General`], and a rejected update
    /// [`FeedbackError::InvalidParameter`].
    pub fn realize<D>(
        &mut self,
        device: &mut D,
        id: EffectId,
        params: &EffectParams,
    ) -> Result<EffectHandle>
    where
        D: FfDevice<Slot = S>,
    {
        if let Some(&handle) = self.handles.get(&id) {
            if let Some(slot) = self.slots.get_mut(&handle) {
                slot.set_parameters(params)
                    .map_err(|_| FeedbackError::InvalidParameter)?;
                return Ok(handle);
            }
        }

        // No live slot: draw the next handle. The number is consumed even
        // if creation fails below.
        let handle = EffectHandle(self.next_handle);
        self.next_handle += 1;

        let mut slot = device.create_effect(params).map_err(|err| match err {
            CreateError::DeviceFull => FeedbackError::DeviceFull,
            CreateError::Other(msg) => FeedbackError::General(msg),
        })?;
        let _ = slot.start();

        self.handles.insert(id, handle);
        self.slots.insert(handle, slot);
        Ok(handle)
    }

    /// Remove the effect bound to `id`, if any.
    ///
    /// The slot is stopped, then unloaded; only a successful unload
    /// releases it and clears the entry. On unload failure the (stopped)
    /// slot stays registered so a later attempt can retry; an upload in
    /// the meantime updates it in place rather than creating a duplicate.
    pub fn remove(&mut self, id: EffectId) {
        let Some(&handle) = self.handles.get(&id) else {
            return;
        };
        let Some(mut slot) = self.slots.remove(&handle) else {
            self.handles.remove(&id);
            return;
        };

        let _ = slot.stop();
        if slot.unload().is_ok() {
            // Slot drops here, releasing the device-side resource.
            self.handles.remove(&id);
        } else {
            // Device still holds the effect: keep the (stopped) slot so a
            // later attempt can retry.
            self.slots.insert(handle, slot);
        }
    }

    /// Forced cleanup: stop and unload every remaining slot, ignoring
    /// failures, and clear all entries. Also runs on drop.
    pub fn teardown(&mut self) {
        for (_, mut slot) in self.slots.drain() {
            let _ = slot.stop();
            let _ = slot.unload();
        }
        self.handles.clear();
    }
}

impl<S: EffectSlot> Drop for EffectRegistry<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
