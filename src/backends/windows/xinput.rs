#![cfg(target_os = "windows")]

//! Windows XInput vibration output.
//!
//! [`XInputRumble`] implements [`RumbleOutput`] for a gamepad in one of
//! the four XInput slots. XInput exposes exactly two motors with 16-bit
//! power levels and no further effect model, which is why the dual-motor
//! path exists at all.
//!
//! # Disconnect behavior
//! An empty or disconnected slot swallows writes: vibration state is
//! meaningless without a controller, and the controller re-applies
//! whatever the next upload writes once it is back. This mirrors how the
//! input side treats a disconnected slot (poll returns nothing rather
//! than erroring).

use crate::driver::RumbleOutput;

// Windows XInput FFI.
use windows_sys::Win32::Foundation::ERROR_DEVICE_NOT_CONNECTED;
use windows_sys::Win32::UI::Input::XboxController::*;

/// Dual-motor output for an XInput slot (0–3).
pub struct XInputRumble {
    /// XInput slot index in `0..4`.
    index: u32,
}

impl XInputRumble {
    /// Wrap an XInput slot. The slot does not need to be connected yet;
    /// writes to an empty slot are silently dropped.
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    /// Slot index this output writes to.
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl RumbleOutput for XInputRumble {
    fn set_levels(&mut self, left: u16, right: u16) {
        // FFI struct: must be manually zeroed.
        let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };

        // NOTE: XInputGetState returns 0 on success.
        let res = unsafe { XInputGetState(self.index, &mut state) };
        if res == ERROR_DEVICE_NOT_CONNECTED {
            // Disconnected or empty slot: deliberately not an error.
            return;
        }

        let mut vibration = XINPUT_VIBRATION {
            wLeftMotorSpeed: left,
            wRightMotorSpeed: right,
        };

        #[cfg(feature = "debug-log")]
        eprintln!(
            "[XINPUT/RUMBLE] slot={} left={} right={}",
            self.index, left, right
        );

        unsafe { XInputSetState(self.index, &mut vibration) };
    }
}
