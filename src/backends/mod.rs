//! Hardware output backends for `kickback`.
//!
//! Implementations of the [`driver`](crate::driver) seams for
//! platform-specific force-feedback interfaces.
//!
//! # Feature flags
//! - **`dinput`** — the Windows slotted backend (DirectInput effects).
//! - **`xinput`** — the Windows dual-motor backend (XInput vibration).
//!
//! Kickback writes to devices it is handed; it does not enumerate or
//! acquire them. Acquisition (and for the slotted path, running the
//! capability enumeration) belongs to the hosting input library.

#[cfg(all(any(feature = "dinput", feature = "xinput"), target_os = "windows"))]
#[cfg_attr(
    docsrs,
    doc(cfg(all(any(feature = "dinput", feature = "xinput"), target_os = "windows")))
)]
pub mod windows;
