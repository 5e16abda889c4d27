use crate::error::Result;
use crate::manager::{UinputFile, UinputHandle, VirtualDevice};
use crate::protocol::*;
use crate::templates::DeviceTemplates;
use std::path::Path;

/// Relative pointing device: motion is reported as deltas.
#[derive(Debug)]
pub struct Mouse<H: UinputHandle = UinputFile> {
    device: VirtualDevice<H>,
}

impl Mouse<UinputFile> {
    pub fn create(path: impl AsRef<Path>, name: &str) -> Result<Self> {
        Ok(Self {
            device: VirtualDevice::create(path, DeviceTemplates::mouse(name))?,
        })
    }
}

impl<H: UinputHandle> Mouse<H> {
    pub fn from_handle(handle: H, name: &str) -> Result<Self> {
        Ok(Self {
            device: VirtualDevice::from_handle(handle, DeviceTemplates::mouse(name))?,
        })
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.device.emit(
            "move_by",
            &[
                InputEvent::Rel { code: REL_X, value: dx },
                InputEvent::Rel { code: REL_Y, value: dy },
            ],
        )
    }

    /// Vertical wheel, in detents. Positive scrolls up.
    pub fn wheel(&mut self, delta: i32) -> Result<()> {
        self.device
            .emit("wheel", &[InputEvent::Rel { code: REL_WHEEL, value: delta }])
    }

    /// Horizontal wheel, in detents. Positive scrolls right.
    pub fn hwheel(&mut self, delta: i32) -> Result<()> {
        self.device
            .emit("hwheel", &[InputEvent::Rel { code: REL_HWHEEL, value: delta }])
    }

    fn button(&mut self, operation: &'static str, code: u16, pressed: bool) -> Result<()> {
        self.device
            .emit(operation, &[InputEvent::Key { code, pressed }])
    }

    fn click(&mut self, operation: &'static str, code: u16) -> Result<()> {
        self.button(operation, code, true)?;
        self.button(operation, code, false)
    }

    pub fn left_click(&mut self) -> Result<()> {
        self.click("left_click", BTN_LEFT)
    }

    pub fn right_click(&mut self) -> Result<()> {
        self.click("right_click", BTN_RIGHT)
    }

    pub fn middle_click(&mut self) -> Result<()> {
        self.click("middle_click", BTN_MIDDLE)
    }

    pub fn left_press(&mut self) -> Result<()> {
        self.button("left_press", BTN_LEFT, true)
    }

    pub fn left_release(&mut self) -> Result<()> {
        self.button("left_release", BTN_LEFT, false)
    }

    pub fn right_press(&mut self) -> Result<()> {
        self.button("right_press", BTN_RIGHT, true)
    }

    pub fn right_release(&mut self) -> Result<()> {
        self.button("right_release", BTN_RIGHT, false)
    }

    pub fn close(&mut self) -> Result<()> {
        self.device.destroy()
    }

    pub fn device(&self) -> &VirtualDevice<H> {
        &self.device
    }
}

facade_input_device!(Mouse);
