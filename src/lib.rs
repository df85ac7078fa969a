//! Kickback — force-feedback output manager for Rust.
//!
//! Translates platform-neutral effect descriptions into device-specific
//! commands for slotted (DirectInput-style) and dual-motor (XInput-style)
//! hardware, and tracks the device-side resources so effects can be
//! updated or removed without leaks.

pub mod backends;
pub mod capability;
pub mod driver;
pub mod effect;
pub mod error;
pub mod feedback;
pub mod registry;
pub mod rumble;
pub mod slotted;
pub mod translate;

pub use capability::*;
pub use effect::*;
pub use error::*;
pub use feedback::*;
pub use registry::*;
pub use rumble::RumbleFeedback;
pub use slotted::SlottedFeedback;
