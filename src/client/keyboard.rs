use crate::error::{Error, Result};
use crate::manager::{UinputFile, UinputHandle, VirtualDevice};
use crate::protocol::*;
use crate::templates::DeviceTemplates;
use std::path::Path;

#[derive(Debug)]
pub struct Keyboard<H: UinputHandle = UinputFile> {
    device: VirtualDevice<H>,
}

impl Keyboard<UinputFile> {
    pub fn create(path: impl AsRef<Path>, name: &str) -> Result<Self> {
        Ok(Self {
            device: VirtualDevice::create(path, DeviceTemplates::keyboard(name))?,
        })
    }
}

impl<H: UinputHandle> Keyboard<H> {
    pub fn from_handle(handle: H, name: &str) -> Result<Self> {
        Ok(Self {
            device: VirtualDevice::from_handle(handle, DeviceTemplates::keyboard(name))?,
        })
    }

    fn check(operation: &'static str, key: u16) -> Result<()> {
        if KEYBOARD_KEYS.contains(key) {
            Ok(())
        } else {
            Err(Error::InvalidCode {
                operation,
                code: key,
                range: KEYBOARD_KEYS,
            })
        }
    }

    /// Down then up, as two batches.
    pub fn key_press(&mut self, key: u16) -> Result<()> {
        Self::check("key_press", key)?;
        self.device
            .emit("key_press", &[InputEvent::Key { code: key, pressed: true }])?;
        self.device
            .emit("key_press", &[InputEvent::Key { code: key, pressed: false }])
    }

    pub fn key_down(&mut self, key: u16) -> Result<()> {
        Self::check("key_down", key)?;
        self.device
            .emit("key_down", &[InputEvent::Key { code: key, pressed: true }])
    }

    pub fn key_up(&mut self, key: u16) -> Result<()> {
        Self::check("key_up", key)?;
        self.device
            .emit("key_up", &[InputEvent::Key { code: key, pressed: false }])
    }

    /// Presses `keys` in order in one batch, then releases them in reverse in
    /// a second one. For shortcuts such as Ctrl+C.
    pub fn key_combo(&mut self, keys: &[u16]) -> Result<()> {
        for &key in keys {
            Self::check("key_combo", key)?;
        }
        let mut batch = self.device.batch("key_combo");
        for &key in keys {
            batch = batch.press(key);
        }
        batch.commit()?;

        let mut batch = self.device.batch("key_combo");
        for &key in keys.iter().rev() {
            batch = batch.release(key);
        }
        batch.commit()
    }

    pub fn close(&mut self) -> Result<()> {
        self.device.destroy()
    }

    pub fn device(&self) -> &VirtualDevice<H> {
        &self.device
    }
}

facade_input_device!(Keyboard);
