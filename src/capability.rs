//! Device capability discovery results.
//!
//! During setup the device enumerator reports one [`EffectTypeInfo`] per
//! effect type the hardware supports, plus one call per force-capable axis.
//! Those land in a [`SupportMatrixBuilder`] and are frozen into an immutable
//! [`SupportMatrix`] before the feedback object is constructed.
//!
//! The matrix is **advisory**: callers query it to decide what to offer in a
//! UI or profile, but translation does not consult it to gate uploads; an
//! unsupported request is rejected by the hardware call itself.
//!
//! ## Descriptor matching
//! Hardware describes an effect type by a 128-bit identity
//! ([`EffectTypeId`], GUID layout) and a flag word whose low byte is the
//! coarse category code. Identities outside the twelve known shapes, and
//! category codes outside `1..=5`, are silently skipped (devices routinely
//! report vendor-specific types we cannot drive).

use std::collections::BTreeSet;

use crate::effect::{ForceCategory, Waveform};

/// 128-bit hardware effect-type identity, in GUID field layout.
///
/// The associated constants are the identities of the twelve standard
/// shapes; adapters convert the platform GUID type to this field-for-field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EffectTypeId {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl EffectTypeId {
    /// The standard effect-type identities share everything but the leading
    /// dword.
    const fn standard(data1: u32) -> Self {
        Self {
            data1,
            data2: 0x8E33,
            data3: 0x11D0,
            data4: [0x9A, 0xD0, 0x00, 0xA0, 0xC9, 0xA0, 0x6E, 0x35],
        }
    }

    pub const CONSTANT_FORCE: Self = Self::standard(0x13541C20);
    pub const RAMP_FORCE: Self = Self::standard(0x13541C21);
    pub const SQUARE: Self = Self::standard(0x13541C22);
    pub const SINE: Self = Self::standard(0x13541C23);
    pub const TRIANGLE: Self = Self::standard(0x13541C24);
    pub const SAWTOOTH_UP: Self = Self::standard(0x13541C25);
    pub const SAWTOOTH_DOWN: Self = Self::standard(0x13541C26);
    pub const SPRING: Self = Self::standard(0x13541C27);
    pub const DAMPER: Self = Self::standard(0x13541C28);
    pub const INERTIA: Self = Self::standard(0x13541C29);
    pub const FRICTION: Self = Self::standard(0x13541C2A);
    pub const CUSTOM_FORCE: Self = Self::standard(0x13541C2B);

    /// Waveform this identity names, if it is one of the twelve standard
    /// shapes.
    pub fn waveform(&self) -> Option<Waveform> {
        match *self {
            Self::CONSTANT_FORCE => Some(Waveform::Constant),
            Self::RAMP_FORCE => Some(Waveform::Ramp),
            Self::SQUARE => Some(Waveform::Square),
            Self::SINE => Some(Waveform::Sine),
            Self::TRIANGLE => Some(Waveform::Triangle),
            Self::SAWTOOTH_UP => Some(Waveform::SawtoothUp),
            Self::SAWTOOTH_DOWN => Some(Waveform::SawtoothDown),
            Self::SPRING => Some(Waveform::Spring),
            Self::DAMPER => Some(Waveform::Damper),
            Self::INERTIA => Some(Waveform::Inertia),
            Self::FRICTION => Some(Waveform::Friction),
            Self::CUSTOM_FORCE => Some(Waveform::Custom),
            _ => None,
        }
    }
}

/// Raw effect-type descriptor delivered by the capability enumeration
/// callback.
#[derive(Clone, Copy, Debug)]
pub struct EffectTypeInfo {
    /// Effect-type identity.
    pub type_id: EffectTypeId,
    /// Device-reported type flags; the low byte is the category code.
    pub effect_flags: u32,
}

impl EffectTypeInfo {
    /// Coarse category code (low byte of the flag word).
    pub fn category_code(&self) -> u32 {
        self.effect_flags & 0xFF
    }
}

/// Classify a raw category code. Codes match the slotted hardware's type
/// codes: 1 constant, 2 ramp, 3 periodic, 4 condition, 5 custom.
fn classify(code: u32) -> Option<ForceCategory> {
    match code {
        0x01 => Some(ForceCategory::Constant),
        0x02 => Some(ForceCategory::Ramp),
        0x03 => Some(ForceCategory::Periodic),
        0x04 => Some(ForceCategory::Conditional),
        0x05 => Some(ForceCategory::Custom),
        _ => None,
    }
}

/// Timing capabilities snapshotted from the device at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimingCaps {
    /// Minimum time between consecutive force updates, in microseconds.
    pub sample_period_us: u32,
    /// Granularity of effect durations and delays, in microseconds.
    pub min_time_resolution_us: u32,
}

/// Sparse matrix of `(category, waveform)` pairs the device supports, plus
/// the number of force-capable axes. Write-once: built during a single
/// enumeration pass, read-only afterward.
#[derive(Clone, Debug, Default)]
pub struct SupportMatrix {
    entries: BTreeSet<(ForceCategory, Waveform)>,
    ff_axes: u16,
}

impl SupportMatrix {
    /// The fixed matrix of the dual-motor path: a single rumble axis that
    /// only plays constant forces.
    pub fn dual_motor() -> Self {
        let mut entries = BTreeSet::new();
        entries.insert((ForceCategory::Constant, Waveform::Constant));
        Self { entries, ff_axes: 1 }
    }

    /// Whether the device reported support for this `(category, waveform)`
    /// pair.
    pub fn supports(&self, category: ForceCategory, waveform: Waveform) -> bool {
        self.entries.contains(&(category, waveform))
    }

    /// Number of recorded `(category, waveform)` pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate recorded pairs in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (ForceCategory, Waveform)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of force-capable axes discovered on the device.
    pub fn ff_axis_count(&self) -> u16 {
        self.ff_axes
    }
}

/// One-shot builder filled by the capability enumeration pass.
#[derive(Debug, Default)]
pub struct SupportMatrixBuilder {
    entries: BTreeSet<(ForceCategory, Waveform)>,
    ff_axes: u16,
}

impl SupportMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one device-reported effect type.
    ///
    /// Descriptors with an unknown category code or an unknown identity are
    /// skipped without error.
    pub fn record_effect_type(&mut self, info: &EffectTypeInfo) {
        let Some(category) = classify(info.category_code()) else {
            return;
        };
        let Some(waveform) = info.type_id.waveform() else {
            return;
        };
        self.entries.insert((category, waveform));
    }

    /// Record one force-capable axis.
    pub fn record_axis(&mut self) {
        self.ff_axes += 1;
    }

    /// Freeze into the immutable matrix.
    pub fn build(self) -> SupportMatrix {
        SupportMatrix {
            entries: self.entries,
            ff_axes: self.ff_axes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_descriptor_records_one_periodic_entry() {
        let mut builder = SupportMatrixBuilder::new();
        builder.record_effect_type(&EffectTypeInfo {
            type_id: EffectTypeId::SINE,
            effect_flags: 0x03 | 0x0200, // periodic, plus unrelated high bits
        });
        let matrix = builder.build();

        assert_eq!(matrix.len(), 1);
        assert!(matrix.supports(ForceCategory::Periodic, Waveform::Sine));
    }

    #[test]
    fn unknown_category_code_is_skipped() {
        let mut builder = SupportMatrixBuilder::new();
        // 0xFF is the hardware-specific code; documented non-error.
        builder.record_effect_type(&EffectTypeInfo {
            type_id: EffectTypeId::SINE,
            effect_flags: 0xFF,
        });
        assert!(builder.build().is_empty());
    }

    #[test]
    fn unknown_identity_is_skipped() {
        let mut builder = SupportMatrixBuilder::new();
        builder.record_effect_type(&EffectTypeInfo {
            type_id: EffectTypeId {
                data1: 0xDEAD_BEEF,
                data2: 0,
                data3: 0,
                data4: [0; 8],
            },
            effect_flags: 0x03,
        });
        assert!(builder.build().is_empty());
    }

    #[test]
    fn axes_accumulate() {
        let mut builder = SupportMatrixBuilder::new();
        builder.record_axis();
        builder.record_axis();
        assert_eq!(builder.build().ff_axis_count(), 2);
    }

    #[test]
    fn dual_motor_matrix_is_constant_only() {
        let matrix = SupportMatrix::dual_motor();
        assert_eq!(matrix.ff_axis_count(), 1);
        assert!(matrix.supports(ForceCategory::Constant, Waveform::Constant));
        assert!(!matrix.supports(ForceCategory::Periodic, Waveform::Sine));
    }
}
