//! The effect-management surface.
//!
//! [`ForceFeedback`] is what a higher-level input-device abstraction holds
//! per device: upload/modify/remove plus the device-global knobs. Which
//! hardware path backs it is decided at construction by picking the
//! implementation: [`SlottedFeedback`](crate::slotted::SlottedFeedback)
//! for multi-effect devices, [`RumbleFeedback`](crate::rumble::RumbleFeedback)
//! for dual-motor controllers.
//!
//! All operations are synchronous calls into the hardware layer; callers
//! serialize access (typically one feedback object driven from one polling
//! thread).

use crate::capability::SupportMatrix;
use crate::effect::{Effect, EffectId};
use crate::error::Result;
use crate::registry::EffectHandle;

/// Per-device force-feedback control surface.
pub trait ForceFeedback {
    /// Number of force-capable axes the device reported during setup.
    fn ff_axis_count(&self) -> u16;

    /// Device-reported effect-memory load percentage. The dual-motor path
    /// has no effect memory and reports 0.
    fn memory_load(&mut self) -> Result<u16>;

    /// Realize `effect` on the device under the caller-stable `id`:
    /// create it on first upload, update it in place afterwards.
    ///
    /// `Ok(Some(handle))` echoes the registry handle backing the effect.
    /// `Ok(None)` means the effect was accepted but not realized: either
    /// the documented silent drop of an unrecognized waveform on the
    /// slotted path, or the dual-motor path, which has no handles.
    fn upload(&mut self, id: EffectId, effect: &Effect) -> Result<Option<EffectHandle>>;

    /// Update an effect. Modifying is the same operation as uploading, so
    /// this just forwards.
    fn modify(&mut self, id: EffectId, effect: &Effect) -> Result<Option<EffectHandle>> {
        self.upload(id, effect)
    }

    /// Remove the effect bound to `id`. Unknown ids are ignored.
    fn remove(&mut self, id: EffectId);

    /// Device-wide gain. `level` is `0.0..=1.0`, mapped linearly onto the
    /// device range `0..=10_000` and clamped at both ends. Ignored by the
    /// dual-motor path.
    fn set_master_gain(&mut self, level: f32);

    /// Device-wide auto-center spring. Ignored by the dual-motor path.
    fn set_autocenter(&mut self, enabled: bool);

    /// What the device said it supports during setup. Advisory: uploads
    /// are not gated on it.
    fn support_matrix(&self) -> &SupportMatrix;
}
