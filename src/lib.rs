//! vuinput - virtual input devices through Linux uinput
//!
//! Declares a device's identity and capabilities, registers them with the
//! kernel's uinput control file, and then emits synchronized event batches
//! (key presses, absolute axis moves, relative motion) as if they came from
//! real hardware.

pub mod client;
pub mod config;
pub mod error;
pub mod manager;
pub mod protocol;
pub mod templates;
pub mod uinput;

// Re-export commonly used types
pub use client::{Gamepad, InputDevice, Keyboard, Mouse, TouchPad};
pub use error::{CreateStep, DeviceState, Error, Result};
pub use manager::{EventBatch, UinputFile, UinputHandle, VirtualDevice};
pub use protocol::{
    Axis, AxisConfig, BusType, Button, CapabilitySet, CodeRange, DeviceConfig, EV_ABS, EV_KEY,
    EV_REL, EV_SYN, InputEvent,
};
pub use templates::DeviceTemplates;
