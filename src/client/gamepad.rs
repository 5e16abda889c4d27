use crate::error::{Error, Result};
use crate::manager::{UinputFile, UinputHandle, VirtualDevice};
use crate::protocol::*;
use crate::templates::DeviceTemplates;
use std::path::Path;

/// Virtual gamepad with every button in [`GAMEPAD_BUTTONS`] and two sticks.
#[derive(Debug)]
pub struct Gamepad<H: UinputHandle = UinputFile> {
    device: VirtualDevice<H>,
}

impl Gamepad<UinputFile> {
    /// Creates a gamepad through the uinput control file at `path`.
    pub fn create(path: impl AsRef<Path>, name: &str) -> Result<Self> {
        let device = VirtualDevice::create(path, DeviceTemplates::gamepad(name))?;
        Ok(Self { device })
    }
}

impl<H: UinputHandle> Gamepad<H> {
    pub fn from_handle(handle: H, name: &str) -> Result<Self> {
        let device = VirtualDevice::from_handle(handle, DeviceTemplates::gamepad(name))?;
        Ok(Self { device })
    }

    /// Presses a button. Accepts a [`Button`] or a raw code.
    pub fn button_down(&mut self, button: impl Into<u16>) -> Result<()> {
        self.button("button_down", button.into(), true)
    }

    pub fn button_up(&mut self, button: impl Into<u16>) -> Result<()> {
        self.button("button_up", button.into(), false)
    }

    fn button(&mut self, operation: &'static str, code: u16, pressed: bool) -> Result<()> {
        if !GAMEPAD_BUTTONS.contains(code) {
            return Err(Error::InvalidCode {
                operation,
                code,
                range: GAMEPAD_BUTTONS,
            });
        }
        self.device
            .emit(operation, &[InputEvent::Key { code, pressed }])
    }

    /// Moves the left stick.
    pub fn set_axis(&mut self, x: i32, y: i32) -> Result<()> {
        self.device.emit(
            "set_axis",
            &[
                InputEvent::Abs { code: ABS_X, value: x },
                InputEvent::Abs { code: ABS_Y, value: y },
            ],
        )
    }

    /// Moves the right stick.
    pub fn set_axis_r(&mut self, x: i32, y: i32) -> Result<()> {
        self.device.emit(
            "set_axis_r",
            &[
                InputEvent::Abs { code: ABS_RX, value: x },
                InputEvent::Abs { code: ABS_RY, value: y },
            ],
        )
    }

    pub fn close(&mut self) -> Result<()> {
        self.device.destroy()
    }

    pub fn device(&self) -> &VirtualDevice<H> {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut VirtualDevice<H> {
        &mut self.device
    }
}

facade_input_device!(Gamepad);
