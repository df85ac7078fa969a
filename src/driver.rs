//! Hardware seams.
//!
//! The core never talks to an OS API directly; it drives one of two trait
//! surfaces and lets a backend (or a test rig) provide the implementation:
//!
//! - [`FfDevice`] + [`EffectSlot`] — the slotted path. The device creates
//!   effect slots; each slot is a device-resident resource supporting
//!   start/stop/unload and in-place parameter updates. Releasing a slot is
//!   dropping it.
//! - [`RumbleOutput`] — the dual-motor path. Two power levels, written
//!   whole; nothing is allocated device-side.
//!
//! Seam errors stay deliberately untyped ([`HwError`] carries only a
//! message): classifying failures into caller-visible error kinds is the
//! registry's contract, not the adapter's.

use crate::translate::EffectParams;

/// Unclassified hardware failure reported by a seam implementation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HwError(pub String);

/// Failure modes of effect creation the registry needs to tell apart.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateError {
    /// The device has no free effect slots.
    #[error("no free effect slots")]
    DeviceFull,
    /// Any other creation failure.
    #[error("{0}")]
    Other(String),
}

/// A device-resident effect resource on the slotted path.
///
/// Dropping a slot releases the device-side resource; implementations tie
/// release to `Drop` so the registry cannot leak one.
pub trait EffectSlot {
    /// Begin indefinite looping playback.
    fn start(&mut self) -> Result<(), HwError>;

    /// Stop playback. Idempotent: stopping a stopped effect succeeds.
    fn stop(&mut self) -> Result<(), HwError>;

    /// Unload the effect from device memory. May fail while the device
    /// still holds the effect; the slot stays usable for a retry.
    fn unload(&mut self) -> Result<(), HwError>;

    /// Replace the effect's parameters in place, restarting playback.
    fn set_parameters(&mut self, params: &EffectParams) -> Result<(), HwError>;
}

/// A slotted force-feedback device.
pub trait FfDevice {
    type Slot: EffectSlot;

    /// Create a new device-resident effect from a translated parameter
    /// block. Does not start playback.
    fn create_effect(&mut self, params: &EffectParams) -> Result<Self::Slot, CreateError>;

    /// Device-wide gain, `0..=10_000`.
    fn set_gain(&mut self, device_gain: u32) -> Result<(), HwError>;

    /// Device-wide auto-center spring.
    fn set_autocenter(&mut self, enabled: bool) -> Result<(), HwError>;

    /// Device-reported effect-memory load percentage.
    fn ff_memory_load(&mut self) -> Result<u16, HwError>;
}

/// A dual-motor vibration sink.
///
/// Implementations treat a disconnected device as a transient condition and
/// swallow it; there is nothing useful a caller could do with the failure.
pub trait RumbleOutput {
    /// Write both motor power levels (`0..=65_535` each).
    fn set_levels(&mut self, left: u16, right: u16);
}
