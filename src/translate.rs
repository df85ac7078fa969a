//! Effect translation.
//!
//! Pure mapping from the abstract [`Effect`] model onto the two hardware
//! parameter shapes: a full [`EffectParams`] block for the slotted path, or
//! a left/right motor power pair for the dual-motor path. No side effects;
//! everything device-facing happens in the registry and the backends.
//!
//! ## Slotted-path header
//! Every translated block fixes the parts of the header this engine does
//! not vary:
//! - single-axis Cartesian offset coordinates, regardless of how many axes
//!   capability discovery found (a stated limitation, not device-derived);
//! - gain pinned at [`NOMINAL_GAIN`]: per-effect attenuation comes from
//!   the payload levels, device-wide attenuation from the master gain;
//! - the trigger button disabled; only the repeat interval is forwarded.
//!
//! Duration, start delay and the envelope are copied from the effect.
//! Condition forces never carry an envelope, even when the effect declares
//! one.

use crate::capability::EffectTypeId;
use crate::effect::{Direction, Effect, ForceKind, Waveform};
use crate::error::{FeedbackError, Result};

/// Fixed per-effect gain on the slotted path (the device's nominal
/// maximum).
pub const NOMINAL_GAIN: u32 = 10_000;

/// Scale factor from the abstract level range (`0..=10_000` after `abs`)
/// to the dual-motor power range (`0..=65_535`).
const MOTOR_SCALE: f32 = 6.5536;

/// Envelope block in device terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnvelopeParams {
    pub attack_level: u32,
    pub attack_time_us: u32,
    pub fade_level: u32,
    pub fade_time_us: u32,
}

impl From<&crate::effect::Envelope> for EnvelopeParams {
    fn from(env: &crate::effect::Envelope) -> Self {
        Self {
            attack_level: env.attack_level,
            attack_time_us: env.attack_time_us,
            fade_level: env.fade_level,
            fade_time_us: env.fade_time_us,
        }
    }
}

/// Category-specific payload in device terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeParams {
    Constant {
        magnitude: i32,
    },
    Ramp {
        start: i32,
        end: i32,
    },
    Periodic {
        magnitude: u32,
        offset: i32,
        phase: u32,
        period_us: u32,
    },
    /// Positive = right of center, negative = left of center.
    Condition {
        offset: i32,
        positive_coefficient: i32,
        negative_coefficient: i32,
        positive_saturation: u32,
        negative_saturation: u32,
        dead_band: i32,
    },
}

/// Translated parameter block for the slotted path.
///
/// Backend adapters turn this into the native effect structure; test rigs
/// inspect it directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectParams {
    /// Which hardware effect type to instantiate.
    pub type_id: EffectTypeId,
    /// Per-effect gain; always [`NOMINAL_GAIN`].
    pub gain: u32,
    /// Trigger repeat interval in microseconds. The trigger button itself
    /// is always disabled device-side.
    pub trigger_repeat_interval_us: u32,
    /// Playback duration in microseconds.
    pub duration_us: u32,
    /// Start delay in microseconds.
    pub start_delay_us: u32,
    /// Envelope, when the effect carries one and the category accepts one.
    pub envelope: Option<EnvelopeParams>,
    /// Category-specific payload.
    pub shape: ShapeParams,
}

/// Translate an effect for the slotted path.
///
/// Returns `Ok(None)` when the effect names a periodic or condition
/// waveform outside the realizable set: the effect is silently not
/// realized, a documented non-error. Custom forces report
/// [`FeedbackError::NotImplemented`].
pub fn effect_params(effect: &Effect) -> Result<Option<EffectParams>> {
    let (type_id, shape, envelope) = match &effect.force {
        ForceKind::Constant { level } => (
            EffectTypeId::CONSTANT_FORCE,
            ShapeParams::Constant { magnitude: *level },
            effect.envelope.as_ref().map(EnvelopeParams::from),
        ),

        ForceKind::Ramp {
            start_level,
            end_level,
        } => (
            EffectTypeId::RAMP_FORCE,
            ShapeParams::Ramp {
                start: *start_level,
                end: *end_level,
            },
            effect.envelope.as_ref().map(EnvelopeParams::from),
        ),

        ForceKind::Periodic {
            waveform,
            magnitude,
            offset,
            phase,
            period_us,
        } => {
            let type_id = match waveform {
                Waveform::Square => EffectTypeId::SQUARE,
                Waveform::Triangle => EffectTypeId::TRIANGLE,
                Waveform::Sine => EffectTypeId::SINE,
                Waveform::SawtoothUp => EffectTypeId::SAWTOOTH_UP,
                Waveform::SawtoothDown => EffectTypeId::SAWTOOTH_DOWN,
                _ => return Ok(None),
            };
            (
                type_id,
                ShapeParams::Periodic {
                    magnitude: *magnitude,
                    offset: *offset,
                    phase: *phase,
                    period_us: *period_us,
                },
                effect.envelope.as_ref().map(EnvelopeParams::from),
            )
        }

        ForceKind::Condition {
            waveform,
            center,
            left_coeff,
            right_coeff,
            left_saturation,
            right_saturation,
            deadband,
        } => {
            let type_id = match waveform {
                Waveform::Spring => EffectTypeId::SPRING,
                Waveform::Damper => EffectTypeId::DAMPER,
                Waveform::Inertia => EffectTypeId::INERTIA,
                Waveform::Friction => EffectTypeId::FRICTION,
                _ => return Ok(None),
            };
            // Conditions never take an envelope, even when one is set.
            (
                type_id,
                ShapeParams::Condition {
                    offset: *center,
                    positive_coefficient: *right_coeff,
                    negative_coefficient: *left_coeff,
                    positive_saturation: *right_saturation,
                    negative_saturation: *left_saturation,
                    dead_band: *deadband,
                },
                None,
            )
        }

        ForceKind::Custom { .. } => return Err(FeedbackError::NotImplemented),
    };

    Ok(Some(EffectParams {
        type_id,
        gain: NOMINAL_GAIN,
        trigger_repeat_interval_us: effect.trigger_repeat_interval_us,
        duration_us: effect.replay_length_us,
        start_delay_us: effect.replay_delay_us,
        envelope,
        shape,
    }))
}

/// Translate an effect for the dual-motor path.
///
/// Only constant forces can be expressed as motor power; everything else
/// reports [`FeedbackError::NotImplemented`]. The direction picks the
/// left/right power split; the level's sign is discarded (both motors only
/// know magnitude).
pub fn rumble_levels(effect: &Effect) -> Result<(u16, u16)> {
    let level = match effect.force {
        ForceKind::Constant { level } => level,
        _ => return Err(FeedbackError::NotImplemented),
    };

    let (left_mult, right_mult) = match effect.direction {
        Direction::North | Direction::South => (1.0, 1.0),
        Direction::East => (0.0, 1.0),
        Direction::West => (1.0, 0.0),
        Direction::NorthEast | Direction::SouthEast => (0.5, 1.0),
        Direction::NorthWest | Direction::SouthWest => (1.0, 0.5),
    };

    let left = (level as f32 * MOTOR_SCALE * left_mult).abs() as u16;
    let right = (level as f32 * MOTOR_SCALE * right_mult).abs() as u16;
    Ok((left, right))
}
