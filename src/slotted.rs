//! Slotted-path feedback.
//!
//! [`SlottedFeedback`] drives a multi-effect device through the
//! [`FfDevice`] seam: effects are translated to parameter blocks, realized
//! as device-resident slots by the [`EffectRegistry`], and updated in place
//! on re-upload. Dropping the value tears down every remaining slot.

use crate::capability::{SupportMatrix, TimingCaps};
use crate::driver::FfDevice;
use crate::effect::{Effect, EffectId};
use crate::error::{FeedbackError, Result};
use crate::feedback::ForceFeedback;
use crate::registry::{EffectHandle, EffectRegistry};
use crate::translate;

/// Feedback surface over a slotted (multi-effect) device.
pub struct SlottedFeedback<D: FfDevice> {
    device: D,
    registry: EffectRegistry<D::Slot>,
    matrix: SupportMatrix,
    timing: TimingCaps,
}

impl<D: FfDevice> SlottedFeedback<D> {
    /// Wrap an acquired device together with the results of its capability
    /// enumeration pass.
    pub fn new(device: D, timing: TimingCaps, matrix: SupportMatrix) -> Self {
        Self {
            device,
            registry: EffectRegistry::new(),
            matrix,
            timing,
        }
    }

    /// Timing capabilities snapshotted at construction.
    pub fn timing(&self) -> TimingCaps {
        self.timing
    }

    /// Number of effects currently resident on the device.
    pub fn live_effects(&self) -> usize {
        self.registry.len()
    }
}

impl<D: FfDevice> ForceFeedback for SlottedFeedback<D> {
    fn ff_axis_count(&self) -> u16 {
        self.matrix.ff_axis_count()
    }

    fn memory_load(&mut self) -> Result<u16> {
        self.device
            .ff_memory_load()
            .map_err(|err| FeedbackError::General(format!("memory-load query failed: {err}")))
    }

    fn upload(&mut self, id: EffectId, effect: &Effect) -> Result<Option<EffectHandle>> {
        let Some(params) = translate::effect_params(effect)? else {
            // Unrecognized waveform: silently not realized.
            #[cfg(feature = "debug-log")]
            eprintln!("[FF/UPLOAD] id={:?} dropped: unrecognized waveform", id);
            return Ok(None);
        };

        self.registry.realize(&mut self.device, id, &params).map(Some)
    }

    fn remove(&mut self, id: EffectId) {
        self.registry.remove(id);
    }

    fn set_master_gain(&mut self, level: f32) {
        let device_gain = ((10_000.0 * level) as i32).clamp(0, 10_000) as u32;

        #[cfg(feature = "debug-log")]
        eprintln!("[FF/GAIN] level={} => {}", level, device_gain);

        if let Err(_err) = self.device.set_gain(device_gain) {
            #[cfg(feature = "debug-log")]
            eprintln!("[FF/GAIN] device rejected gain write: {}", _err);
        }
    }

    fn set_autocenter(&mut self, enabled: bool) {
        if let Err(_err) = self.device.set_autocenter(enabled) {
            #[cfg(feature = "debug-log")]
            eprintln!("[FF/AUTOCENTER] device rejected write: {}", _err);
        }
    }

    fn support_matrix(&self) -> &SupportMatrix {
        &self.matrix
    }
}
