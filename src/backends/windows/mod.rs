#![cfg(target_os = "windows")]

//! Windows force-feedback backends.
//!
//! - **DirectInput** ([`dinput`]): the slotted path. Wraps an acquired
//!   `IDirectInputDevice8W` as an [`FfDevice`](crate::driver::FfDevice)
//!   and its effects as [`EffectSlot`](crate::driver::EffectSlot)s, and
//!   provides the capability probe that feeds a
//!   [`SupportMatrixBuilder`](crate::capability::SupportMatrixBuilder).
//! - **XInput** ([`xinput`]): the dual-motor path. A thin
//!   [`RumbleOutput`](crate::driver::RumbleOutput) over slot-indexed
//!   vibration state.
//!
//! Both expect the hosting input library to have acquired the device; the
//! slotted path additionally needs exclusive acquisition for effect
//! creation and the memory-load query to succeed.

#[cfg(feature = "dinput")]
#[cfg_attr(docsrs, doc(cfg(feature = "dinput")))]
pub mod dinput;

#[cfg(feature = "xinput")]
#[cfg_attr(docsrs, doc(cfg(feature = "xinput")))]
pub mod xinput;
