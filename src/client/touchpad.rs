use crate::error::Result;
use crate::manager::{UinputFile, UinputHandle, VirtualDevice};
use crate::protocol::*;
use crate::templates::DeviceTemplates;
use std::path::Path;

/// Absolute pointing device.
///
/// Positions are absolute, so the rectangle the cursor may move in is fixed
/// when the device is created.
#[derive(Debug)]
pub struct TouchPad<H: UinputHandle = UinputFile> {
    device: VirtualDevice<H>,
}

impl TouchPad<UinputFile> {
    pub fn create(
        path: impl AsRef<Path>,
        name: &str,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) -> Result<Self> {
        let config = DeviceTemplates::touchpad(name, min_x, max_x, min_y, max_y);
        Ok(Self {
            device: VirtualDevice::create(path, config)?,
        })
    }
}

impl<H: UinputHandle> TouchPad<H> {
    pub fn from_handle(
        handle: H,
        name: &str,
        min_x: i32,
        max_x: i32,
        min_y: i32,
        max_y: i32,
    ) -> Result<Self> {
        let config = DeviceTemplates::touchpad(name, min_x, max_x, min_y, max_y);
        Ok(Self {
            device: VirtualDevice::from_handle(handle, config)?,
        })
    }

    /// Moves the cursor to `(x, y)`.
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.device.emit(
            "move_to",
            &[
                InputEvent::Abs { code: ABS_X, value: x },
                InputEvent::Abs { code: ABS_Y, value: y },
            ],
        )
    }

    fn buttons(&mut self, operation: &'static str, codes: &[u16], pressed: bool) -> Result<()> {
        let events: Vec<_> = codes
            .iter()
            .map(|&code| InputEvent::Key { code, pressed })
            .collect();
        self.device.emit(operation, &events)
    }

    /// Press and release, as two batches.
    pub fn left_click(&mut self) -> Result<()> {
        self.buttons("left_click", &[BTN_LEFT], true)?;
        self.buttons("left_click", &[BTN_LEFT], false)
    }

    pub fn right_click(&mut self) -> Result<()> {
        self.buttons("right_click", &[BTN_RIGHT], true)?;
        self.buttons("right_click", &[BTN_RIGHT], false)
    }

    /// Holds the left button until [`TouchPad::left_release`].
    pub fn left_press(&mut self) -> Result<()> {
        self.buttons("left_press", &[BTN_LEFT], true)
    }

    pub fn left_release(&mut self) -> Result<()> {
        self.buttons("left_release", &[BTN_LEFT], false)
    }

    pub fn right_press(&mut self) -> Result<()> {
        self.buttons("right_press", &[BTN_RIGHT], true)
    }

    pub fn right_release(&mut self) -> Result<()> {
        self.buttons("right_release", &[BTN_RIGHT], false)
    }

    /// Puts a finger down: BTN_TOUCH and BTN_TOOL_FINGER in one batch.
    pub fn touch_down(&mut self) -> Result<()> {
        self.buttons("touch_down", &[BTN_TOUCH, BTN_TOOL_FINGER], true)
    }

    pub fn touch_up(&mut self) -> Result<()> {
        self.buttons("touch_up", &[BTN_TOUCH, BTN_TOOL_FINGER], false)
    }

    pub fn close(&mut self) -> Result<()> {
        self.device.destroy()
    }

    pub fn device(&self) -> &VirtualDevice<H> {
        &self.device
    }
}

facade_input_device!(TouchPad);
