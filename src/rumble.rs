//! Dual-motor-path feedback.
//!
//! [`RumbleFeedback`] maps the effect model onto a device that only knows
//! two motor power levels. There are no device-resident resources and no
//! handles: uploading writes the motor pair, removing (any id) stops the
//! vibration, and so does dropping the value. Device-global properties
//! (gain, auto-center) do not exist on this path and are ignored.

use crate::capability::SupportMatrix;
use crate::driver::RumbleOutput;
use crate::effect::{Effect, EffectId};
use crate::error::Result;
use crate::feedback::ForceFeedback;
use crate::registry::EffectHandle;
use crate::translate;

/// Feedback surface over a dual-motor (vibration-only) device.
pub struct RumbleFeedback<R: RumbleOutput> {
    output: R,
    matrix: SupportMatrix,
}

impl<R: RumbleOutput> RumbleFeedback<R> {
    pub fn new(output: R) -> Self {
        Self {
            output,
            matrix: SupportMatrix::dual_motor(),
        }
    }
}

impl<R: RumbleOutput> ForceFeedback for RumbleFeedback<R> {
    fn ff_axis_count(&self) -> u16 {
        self.matrix.ff_axis_count()
    }

    fn memory_load(&mut self) -> Result<u16> {
        // No effect memory on this path.
        Ok(0)
    }

    fn upload(&mut self, _id: EffectId, effect: &Effect) -> Result<Option<EffectHandle>> {
        let (left, right) = translate::rumble_levels(effect)?;
        self.output.set_levels(left, right);
        Ok(None)
    }

    fn remove(&mut self, _id: EffectId) {
        // Only one effect type exists here, so removing anything stops the
        // vibration outright.
        self.output.set_levels(0, 0);
    }

    fn set_master_gain(&mut self, _level: f32) {}

    fn set_autocenter(&mut self, _enabled: bool) {}

    fn support_matrix(&self) -> &SupportMatrix {
        &self.matrix
    }
}

impl<R: RumbleOutput> Drop for RumbleFeedback<R> {
    fn drop(&mut self) {
        self.output.set_levels(0, 0);
    }
}
