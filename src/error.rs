//! Crate-wide error types.
//!
//! Every failure surfaces synchronously to the caller of the triggering
//! operation; there is no internal retry except the removal path keeping a
//! slot alive after a failed unload (see [`EffectRegistry::remove`]).
//! Teardown never reports errors.
//!
//! [`EffectRegistry::remove`]: crate::registry::EffectRegistry::remove

/// Errors reported by the force-feedback surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackError {
    /// The requested force category or waveform is not implemented on the
    /// active hardware path (custom forces everywhere; everything but a
    /// constant force on the dual-motor path).
    #[error("requested force type is not implemented on this device path")]
    NotImplemented,

    /// The device ran out of effect slots while creating a new effect.
    #[error("device effect slots are full; remove an effect before adding more")]
    DeviceFull,

    /// The device rejected a parameter update for an existing effect.
    #[error("device rejected the updated effect parameters")]
    InvalidParameter,

    /// Unclassified hardware failure, with whatever context the device
    /// layer reported (e.g. a memory-load query on a device that is not
    /// acquired in exclusive mode).
    #[error("{0}")]
    General(String),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FeedbackError>;
