use crate::error::Result;
use crate::manager::device::VirtualDevice;
use crate::manager::handle::UinputHandle;
use crate::protocol::InputEvent;
use tracing::trace;

/// Events queued for one device, committed under a single SYN_REPORT.
///
/// Nothing reaches the device until [`EventBatch::commit`]. Dropping an
/// uncommitted batch discards it.
#[must_use = "a batch does nothing until committed"]
pub struct EventBatch<'a, H: UinputHandle> {
    device: &'a mut VirtualDevice<H>,
    operation: &'static str,
    events: Vec<InputEvent>,
}

impl<'a, H: UinputHandle> EventBatch<'a, H> {
    pub(crate) fn new(device: &'a mut VirtualDevice<H>, operation: &'static str) -> Self {
        Self {
            device,
            operation,
            events: Vec::new(),
        }
    }

    pub fn key(mut self, code: impl Into<u16>, pressed: bool) -> Self {
        self.events.push(InputEvent::Key {
            code: code.into(),
            pressed,
        });
        self
    }

    pub fn press(self, code: impl Into<u16>) -> Self {
        self.key(code, true)
    }

    pub fn release(self, code: impl Into<u16>) -> Self {
        self.key(code, false)
    }

    pub fn abs(mut self, code: u16, value: i32) -> Self {
        self.events.push(InputEvent::Abs { code, value });
        self
    }

    pub fn rel(mut self, code: u16, value: i32) -> Self {
        self.events.push(InputEvent::Rel { code, value });
        self
    }

    pub fn event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Writes the queued events. An empty batch writes nothing, but
    /// committing to a destroyed device fails either way.
    pub fn commit(self) -> Result<()> {
        trace!("{}: committing {} events", self.operation, self.events.len());
        self.device.emit(self.operation, &self.events)
    }
}
