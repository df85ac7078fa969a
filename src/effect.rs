//! Abstract force-feedback effect model.
//!
//! An [`Effect`] is a platform-neutral description of a haptic effect: a
//! force shape plus the shared playback fields (direction, trigger, replay
//! timing, envelope). Callers build one, hand it to a
//! [`ForceFeedback`](crate::feedback::ForceFeedback) implementation under a
//! stable [`EffectId`], and keep re-uploading the *same id* to update the
//! effect in place.
//!
//! ## Value conventions
//! - **Levels and magnitudes** use the nominal signed range `-10_000..=10_000`
//!   (force) or `0..=10_000` (unsigned magnitudes, envelope levels).
//! - **Times** are microseconds (`*_us` fields).
//! - **Direction** is an 8-way compass heading. The slotted path currently
//!   translates every effect onto a single axis; direction only shapes the
//!   motor split on the dual-motor path.
//!
//! ## Identity
//! [`EffectId`] is chosen by the caller and never interpreted; it is the key
//! the registry uses to find the hardware resource backing an effect. The
//! handle assigned on first realization stays internal to the registry and
//! is only echoed back for diagnostics.

use serde::{Deserialize, Serialize};

/// Caller-supplied stable identity for an effect.
///
/// Two uploads with the same id address the same hardware resource; a new id
/// realizes a new resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

/// 8-way compass direction of an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Concrete waveform identity.
///
/// This is the full list of shapes hardware descriptors are matched against
/// during capability discovery. Only a subset is meaningful per force
/// category: `Square`..`SawtoothDown` for periodic forces,
/// `Spring`..`Friction` for conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Waveform {
    Constant,
    Ramp,
    Square,
    Triangle,
    Sine,
    SawtoothUp,
    SawtoothDown,
    Spring,
    Damper,
    Inertia,
    Friction,
    Custom,
}

/// Broad force-shape classification.
///
/// Used by the capability table; the effect itself carries its category
/// implicitly through the [`ForceKind`] variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ForceCategory {
    Constant,
    Ramp,
    Periodic,
    Conditional,
    Custom,
}

/// Attack/fade shaping applied to an effect's amplitude over its duration.
///
/// An effect without an envelope simply leaves [`Effect::envelope`] as
/// `None`; there is no separate "unused" flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Amplitude at the start of the attack ramp (`0..=10_000`).
    pub attack_level: u32,
    /// Attack ramp length in microseconds.
    pub attack_time_us: u32,
    /// Amplitude at the end of the fade ramp (`0..=10_000`).
    pub fade_level: u32,
    /// Fade ramp length in microseconds.
    pub fade_time_us: u32,
}

/// Force-specific payload, tagged by category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ForceKind {
    /// Steady force of a fixed level.
    Constant {
        /// Signed force level, `-10_000..=10_000`.
        level: i32,
    },

    /// Force ramping linearly between two levels over the replay length.
    Ramp {
        /// Level at the start of playback.
        start_level: i32,
        /// Level at the end of playback.
        end_level: i32,
    },

    /// Oscillating force.
    Periodic {
        /// Wave shape; only `Square`, `Triangle`, `Sine`, `SawtoothUp` and
        /// `SawtoothDown` are realizable. Anything else is silently not
        /// realized (see [`translate::effect_params`]).
        ///
        /// [`translate::effect_params`]: crate::translate::effect_params
        waveform: Waveform,
        /// Peak amplitude, `0..=10_000`.
        magnitude: u32,
        /// Baseline offset the wave oscillates around.
        offset: i32,
        /// Phase shift at playback start, in hundredths of a degree.
        phase: u32,
        /// Wave period in microseconds.
        period_us: u32,
    },

    /// Position/velocity dependent force (spring, damper, inertia,
    /// friction).
    Condition {
        /// Condition shape; only `Spring`, `Damper`, `Inertia` and
        /// `Friction` are realizable.
        waveform: Waveform,
        /// Axis position the condition is centered on.
        center: i32,
        /// Coefficient applied on the negative side of the center.
        left_coeff: i32,
        /// Coefficient applied on the positive side of the center.
        right_coeff: i32,
        /// Force cap on the negative side (`0..=10_000`).
        left_saturation: u32,
        /// Force cap on the positive side (`0..=10_000`).
        right_saturation: u32,
        /// Region around the center where the condition is inactive.
        deadband: i32,
    },

    /// Arbitrary sampled waveform. Deliberately not implemented: uploading
    /// one reports [`FeedbackError::NotImplemented`] on both hardware
    /// paths and creates nothing device-side.
    ///
    /// [`FeedbackError::NotImplemented`]: crate::error::FeedbackError::NotImplemented
    Custom {
        /// Number of interleaved channels in `samples`.
        channel_count: u16,
        /// Playback rate of the sample data, in microseconds per sample.
        sample_period_us: u32,
        /// Interleaved force samples.
        samples: Vec<i16>,
    },
}

impl ForceKind {
    /// Category of this payload.
    pub fn category(&self) -> ForceCategory {
        match self {
            ForceKind::Constant { .. } => ForceCategory::Constant,
            ForceKind::Ramp { .. } => ForceCategory::Ramp,
            ForceKind::Periodic { .. } => ForceCategory::Periodic,
            ForceKind::Condition { .. } => ForceCategory::Conditional,
            ForceKind::Custom { .. } => ForceCategory::Custom,
        }
    }
}

/// Platform-neutral description of a haptic effect.
///
/// Immutable per call: the library never writes back into it. Identity is
/// supplied separately as an [`EffectId`] when uploading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Force shape and its category-specific parameters.
    pub force: ForceKind,

    /// Compass direction of the force.
    pub direction: Direction,

    /// Button that (re)triggers the effect.
    ///
    /// Not translated on the slotted path: triggers stay disabled
    /// device-side regardless of this field; only the repeat interval is
    /// forwarded. Kept in the model so descriptions round-trip.
    pub trigger_button: Option<u16>,

    /// Interval between trigger repeats, in microseconds.
    pub trigger_repeat_interval_us: u32,

    /// Playback duration in microseconds.
    pub replay_length_us: u32,

    /// Delay before playback starts, in microseconds.
    pub replay_delay_us: u32,

    /// Optional amplitude envelope. Ignored for `Condition` forces, which
    /// never carry an envelope device-side.
    pub envelope: Option<Envelope>,
}

impl Effect {
    /// Convenience constructor for the common "play this force forever,
    /// right now" shape: no trigger, no delay, no envelope.
    pub fn new(force: ForceKind, direction: Direction, replay_length_us: u32) -> Self {
        Self {
            force,
            direction,
            trigger_button: None,
            trigger_repeat_interval_us: 0,
            replay_length_us,
            replay_delay_us: 0,
            envelope: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Effect presets are stored as JSON by tooling; keep the model stable
    // under serde.
    #[test]
    fn preset_json_deserializes() {
        let json = r#"{
            "force": { "Periodic": {
                "waveform": "Sine",
                "magnitude": 8000,
                "offset": 0,
                "phase": 0,
                "period_us": 50000
            }},
            "direction": "North",
            "trigger_button": null,
            "trigger_repeat_interval_us": 0,
            "replay_length_us": 2000000,
            "replay_delay_us": 0,
            "envelope": {
                "attack_level": 0,
                "attack_time_us": 250000,
                "fade_level": 0,
                "fade_time_us": 250000
            }
        }"#;

        let effect: Effect = serde_json::from_str(json).expect("preset parses");
        assert_eq!(effect.force.category(), ForceCategory::Periodic);
        assert_eq!(
            effect.envelope,
            Some(Envelope {
                attack_level: 0,
                attack_time_us: 250_000,
                fade_level: 0,
                fade_time_us: 250_000,
            })
        );
    }

    #[test]
    fn category_follows_variant() {
        let kinds = [
            (ForceKind::Constant { level: 1 }, ForceCategory::Constant),
            (
                ForceKind::Ramp {
                    start_level: 0,
                    end_level: 1,
                },
                ForceCategory::Ramp,
            ),
            (
                ForceKind::Custom {
                    channel_count: 1,
                    sample_period_us: 1000,
                    samples: vec![],
                },
                ForceCategory::Custom,
            ),
        ];
        for (kind, category) in kinds {
            assert_eq!(kind.category(), category);
        }
    }
}
