//! Per-kind device facades over [`VirtualDevice`].

use crate::error::Result;
use crate::manager::{UinputHandle, VirtualDevice};
use crate::protocol::InputEvent;

macro_rules! facade_input_device {
    ($facade:ident) => {
        impl<H: $crate::manager::UinputHandle> $crate::client::InputDevice for $facade<H> {
            fn name(&self) -> &str {
                self.device.name()
            }

            fn emit(&mut self, events: &[$crate::protocol::InputEvent]) -> $crate::error::Result<()> {
                self.device.emit("emit", events)
            }

            fn close(&mut self) -> $crate::error::Result<()> {
                self.device.destroy()
            }

            fn is_created(&self) -> bool {
                self.device.is_created()
            }
        }
    };
}

mod gamepad;
mod keyboard;
mod mouse;
mod touchpad;

pub use gamepad::Gamepad;
pub use keyboard::Keyboard;
pub use mouse::Mouse;
pub use touchpad::TouchPad;

/// What every virtual device can do, whatever its kind.
pub trait InputDevice {
    fn name(&self) -> &str;

    /// Writes raw logical events as one synchronized batch.
    fn emit(&mut self, events: &[InputEvent]) -> Result<()>;

    /// Destroys the device. A second call fails.
    fn close(&mut self) -> Result<()>;

    fn is_created(&self) -> bool;
}

impl<H: UinputHandle> InputDevice for VirtualDevice<H> {
    fn name(&self) -> &str {
        VirtualDevice::name(self)
    }

    fn emit(&mut self, events: &[InputEvent]) -> Result<()> {
        VirtualDevice::emit(self, "emit", events)
    }

    fn close(&mut self) -> Result<()> {
        self.destroy()
    }

    fn is_created(&self) -> bool {
        VirtualDevice::is_created(self)
    }
}
