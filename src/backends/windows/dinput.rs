#![cfg(target_os = "windows")]

//! Windows DirectInput effect backend.
//!
//! Implements the slotted-path seams over an acquired
//! `IDirectInputDevice8W`:
//! - [`DinputFfDevice`] creates device-resident effects and carries the
//!   device-wide property writes (gain, auto-center, memory load);
//! - [`DinputEffectSlot`] wraps one `IDirectInputEffect`; dropping it
//!   releases the COM object and with it the device-side resource;
//! - [`probe_support`] runs the effect-type and actuator-axis enumeration
//!   that fills a [`SupportMatrixBuilder`];
//! - [`timing_caps`] snapshots the device's force-feedback timing.
//!
//! The hosting input library owns device creation, cooperative level and
//! acquisition. Effect creation and the memory-load query require the
//! device to be acquired in exclusive mode; DirectInput reports the
//! violation and it is surfaced through the seam error.
//!
//! # Translation notes
//! The parameter block is mapped onto `DIEFFECT` with the fixed header the
//! translator prescribes: one Cartesian axis (the X object offset), a zero
//! direction vector, nominal gain, and the trigger button disabled. This
//! uses the COM-capable `windows` crate rather than `windows-sys`, which
//! does not generate COM interfaces.

use core::ffi::c_void;
use core::mem::size_of;

use windows::core::GUID;
use windows::Win32::Devices::HumanInterfaceDevice::*;
use windows::Win32::Foundation::BOOL;

use crate::capability::{EffectTypeId, EffectTypeInfo, SupportMatrix, SupportMatrixBuilder, TimingCaps};
use crate::driver::{CreateError, EffectSlot, FfDevice, HwError};
use crate::translate::{EffectParams, ShapeParams};

/// Object offset of the X axis in the joystick data format; the single
/// axis every effect is mapped onto.
const DIJOFS_X: u32 = 0;

/// `dwIterations` value for endless playback.
const INFINITE: u32 = u32::MAX;

// MAKEDIPROP values from the DirectInput headers; the property "GUID"
// argument is really a small integer smuggled through the pointer.
const PROP_FFGAIN: u32 = 7;
const PROP_FFLOAD: u32 = 8;
const PROP_AUTOCENTER: u32 = 9;

const AUTOCENTER_OFF: u32 = 0;
const AUTOCENTER_ON: u32 = 1;

/// Parameter set updated in place on re-upload; playback restarts as part
/// of the same call.
const UPDATE_FLAGS: u32 = DIEP_DIRECTION
    | DIEP_DURATION
    | DIEP_ENVELOPE
    | DIEP_STARTDELAY
    | DIEP_TRIGGERBUTTON
    | DIEP_TRIGGERREPEATINTERVAL
    | DIEP_TYPESPECIFICPARAMS
    | DIEP_START;

fn prop_guid(prop: u32) -> *const GUID {
    prop as usize as *const GUID
}

fn guid_of(id: EffectTypeId) -> GUID {
    GUID {
        data1: id.data1,
        data2: id.data2,
        data3: id.data3,
        data4: id.data4,
    }
}

fn type_id_of(guid: &GUID) -> EffectTypeId {
    EffectTypeId {
        data1: guid.data1,
        data2: guid.data2,
        data3: guid.data3,
        data4: guid.data4,
    }
}

/// Assemble a `DIEFFECT` for `params` and run `f` on it.
///
/// The native structure points into stack locals (axis array, direction
/// vector, envelope, type-specific payload), so it only exists for the
/// duration of the callback.
fn with_dieffect<T>(params: &EffectParams, f: impl FnOnce(*const DIEFFECT) -> T) -> T {
    let mut axes: [u32; 1] = [DIJOFS_X];
    let mut direction: [i32; 1] = [0];

    let mut envelope = DIENVELOPE {
        dwSize: size_of::<DIENVELOPE>() as u32,
        dwAttackLevel: 0,
        dwAttackTime: 0,
        dwFadeLevel: 0,
        dwFadeTime: 0,
    };
    let lp_envelope = match &params.envelope {
        Some(env) => {
            envelope.dwAttackLevel = env.attack_level;
            envelope.dwAttackTime = env.attack_time_us;
            envelope.dwFadeLevel = env.fade_level;
            envelope.dwFadeTime = env.fade_time_us;
            &mut envelope as *mut DIENVELOPE
        }
        None => std::ptr::null_mut(),
    };

    let mut effect = DIEFFECT {
        dwSize: size_of::<DIEFFECT>() as u32,
        dwFlags: DIEFF_CARTESIAN | DIEFF_OBJECTOFFSETS,
        dwDuration: params.duration_us,
        dwSamplePeriod: 0,
        dwGain: params.gain,
        dwTriggerButton: DIEB_NOTRIGGER,
        dwTriggerRepeatInterval: params.trigger_repeat_interval_us,
        cAxes: 1,
        rgdwAxes: axes.as_mut_ptr(),
        rglDirection: direction.as_mut_ptr(),
        lpEnvelope: lp_envelope,
        cbTypeSpecificParams: 0,
        lpvTypeSpecificParams: std::ptr::null_mut(),
        dwStartDelay: params.start_delay_us,
    };

    match params.shape {
        ShapeParams::Constant { magnitude } => {
            let mut cf = DICONSTANTFORCE { lMagnitude: magnitude };
            effect.cbTypeSpecificParams = size_of::<DICONSTANTFORCE>() as u32;
            effect.lpvTypeSpecificParams = &mut cf as *mut _ as *mut c_void;
            f(&effect)
        }
        ShapeParams::Ramp { start, end } => {
            let mut rf = DIRAMPFORCE {
                lStart: start,
                lEnd: end,
            };
            effect.cbTypeSpecificParams = size_of::<DIRAMPFORCE>() as u32;
            effect.lpvTypeSpecificParams = &mut rf as *mut _ as *mut c_void;
            f(&effect)
        }
        ShapeParams::Periodic {
            magnitude,
            offset,
            phase,
            period_us,
        } => {
            let mut pf = DIPERIODIC {
                dwMagnitude: magnitude,
                lOffset: offset,
                dwPhase: phase,
                dwPeriod: period_us,
            };
            effect.cbTypeSpecificParams = size_of::<DIPERIODIC>() as u32;
            effect.lpvTypeSpecificParams = &mut pf as *mut _ as *mut c_void;
            f(&effect)
        }
        ShapeParams::Condition {
            offset,
            positive_coefficient,
            negative_coefficient,
            positive_saturation,
            negative_saturation,
            dead_band,
        } => {
            let mut cond = DICONDITION {
                lOffset: offset,
                lPositiveCoefficient: positive_coefficient,
                lNegativeCoefficient: negative_coefficient,
                dwPositiveSaturation: positive_saturation,
                dwNegativeSaturation: negative_saturation,
                lDeadBand: dead_band,
            };
            effect.cbTypeSpecificParams = size_of::<DICONDITION>() as u32;
            effect.lpvTypeSpecificParams = &mut cond as *mut _ as *mut c_void;
            f(&effect)
        }
    }
}

/// One device-resident DirectInput effect.
pub struct DinputEffectSlot {
    effect: IDirectInputEffect,
}

impl EffectSlot for DinputEffectSlot {
    fn start(&mut self) -> Result<(), HwError> {
        unsafe { self.effect.Start(INFINITE, 0) }
            .map_err(|e| HwError(format!("effect start failed: {e}")))
    }

    fn stop(&mut self) -> Result<(), HwError> {
        unsafe { self.effect.Stop() }.map_err(|e| HwError(format!("effect stop failed: {e}")))
    }

    fn unload(&mut self) -> Result<(), HwError> {
        unsafe { self.effect.Unload() }
            .map_err(|e| HwError(format!("effect unload failed: {e}")))
    }

    fn set_parameters(&mut self, params: &EffectParams) -> Result<(), HwError> {
        with_dieffect(params, |eff| unsafe {
            self.effect.SetParameters(eff, UPDATE_FLAGS)
        })
        .map_err(|e| HwError(format!("effect update failed: {e}")))
    }
}

/// Slotted force-feedback device over an acquired `IDirectInputDevice8W`.
pub struct DinputFfDevice {
    device: IDirectInputDevice8W,
}

impl DinputFfDevice {
    /// Wrap an acquired device. Run [`probe_support`] and [`timing_caps`]
    /// on the same interface before constructing the feedback surface.
    pub fn new(device: IDirectInputDevice8W) -> Self {
        Self { device }
    }

    fn set_dword_property(&self, prop: u32, value: u32) -> Result<(), HwError> {
        let mut dipdw = DIPROPDWORD {
            diph: DIPROPHEADER {
                dwSize: size_of::<DIPROPDWORD>() as u32,
                dwHeaderSize: size_of::<DIPROPHEADER>() as u32,
                dwObj: 0, // device-wide property
                dwHow: DIPH_DEVICE,
            },
            dwData: value,
        };
        unsafe { self.device.SetProperty(prop_guid(prop), &mut dipdw.diph) }
            .map_err(|e| HwError(format!("property write failed: {e}")))
    }
}

impl FfDevice for DinputFfDevice {
    type Slot = DinputEffectSlot;

    fn create_effect(&mut self, params: &EffectParams) -> Result<Self::Slot, CreateError> {
        let guid = guid_of(params.type_id);
        let mut created: Option<IDirectInputEffect> = None;

        let result = with_dieffect(params, |eff| unsafe {
            self.device.CreateEffect(&guid, eff, &mut created, None)
        });

        match result {
            Ok(()) => created
                .map(|effect| DinputEffectSlot { effect })
                .ok_or_else(|| CreateError::Other("device returned no effect object".into())),
            Err(e) if e.code() == DIERR_DEVICEFULL => Err(CreateError::DeviceFull),
            Err(e) => Err(CreateError::Other(format!("effect creation failed: {e}"))),
        }
    }

    fn set_gain(&mut self, device_gain: u32) -> Result<(), HwError> {
        self.set_dword_property(PROP_FFGAIN, device_gain)
    }

    fn set_autocenter(&mut self, enabled: bool) -> Result<(), HwError> {
        let value = if enabled { AUTOCENTER_ON } else { AUTOCENTER_OFF };
        self.set_dword_property(PROP_AUTOCENTER, value)
    }

    fn ff_memory_load(&mut self) -> Result<u16, HwError> {
        let mut dipdw = DIPROPDWORD {
            diph: DIPROPHEADER {
                dwSize: size_of::<DIPROPDWORD>() as u32,
                dwHeaderSize: size_of::<DIPROPHEADER>() as u32,
                dwObj: 0,
                dwHow: DIPH_DEVICE,
            },
            dwData: 0,
        };

        match unsafe { self.device.GetProperty(prop_guid(PROP_FFLOAD), &mut dipdw.diph) } {
            Ok(()) => Ok(dipdw.dwData as u16),
            Err(e) if e.code() == DIERR_NOTEXCLUSIVEACQUIRED => Err(HwError(
                "device is not acquired in exclusive mode".to_string(),
            )),
            Err(e) => Err(HwError(format!("memory-load query failed: {e}"))),
        }
    }
}

unsafe extern "system" fn effect_type_thunk(pdei: *const DIEFFECTINFOW, pvref: *mut c_void) -> BOOL {
    let builder = unsafe { &mut *(pvref as *mut SupportMatrixBuilder) };
    let info = unsafe { &*pdei };

    #[cfg(feature = "debug-log")]
    eprintln!(
        "[DINPUT/PROBE] effect type {:08x} flags {:#x}",
        info.guid.data1, info.dwEffType
    );

    builder.record_effect_type(&EffectTypeInfo {
        type_id: type_id_of(&info.guid),
        effect_flags: info.dwEffType,
    });
    BOOL::from(true) // DIENUM_CONTINUE
}

unsafe extern "system" fn axis_thunk(
    lpddoi: *const DIDEVICEOBJECTINSTANCEW,
    pvref: *mut c_void,
) -> BOOL {
    let builder = unsafe { &mut *(pvref as *mut SupportMatrixBuilder) };
    let object = unsafe { &*lpddoi };

    // Only axes wired to a force actuator count.
    if object.dwFlags & DIDOI_FFACTUATOR != 0 {
        builder.record_axis();
    }
    BOOL::from(true)
}

/// Enumerate the device's supported effect types and force-capable axes
/// into an immutable [`SupportMatrix`].
///
/// Enumeration failures leave the matrix partially filled (possibly
/// empty); the probe is best-effort, matching how the capability table is
/// only advisory.
pub fn probe_support(device: &IDirectInputDevice8W) -> SupportMatrix {
    let mut builder = SupportMatrixBuilder::new();

    let pvref = &mut builder as *mut SupportMatrixBuilder as *mut c_void;
    if let Err(_err) = unsafe { device.EnumEffects(Some(effect_type_thunk), pvref, DIEFT_ALL) } {
        #[cfg(feature = "debug-log")]
        eprintln!("[DINPUT/PROBE] effect enumeration failed: {}", _err);
    }
    if let Err(_err) = unsafe { device.EnumObjects(Some(axis_thunk), pvref, DIDFT_AXIS) } {
        #[cfg(feature = "debug-log")]
        eprintln!("[DINPUT/PROBE] axis enumeration failed: {}", _err);
    }

    builder.build()
}

/// Snapshot the device's force-feedback timing capabilities.
pub fn timing_caps(device: &IDirectInputDevice8W) -> Result<TimingCaps, HwError> {
    let mut caps: DIDEVCAPS = unsafe { std::mem::zeroed() };
    caps.dwSize = size_of::<DIDEVCAPS>() as u32;

    unsafe { device.GetCapabilities(&mut caps) }
        .map_err(|e| HwError(format!("capability query failed: {e}")))?;

    Ok(TimingCaps {
        sample_period_us: caps.dwFFSamplePeriod,
        min_time_resolution_us: caps.dwFFMinTimeResolution,
    })
}
