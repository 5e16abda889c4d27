//! In-memory uinput handle that records every call.
//!
//! [`MockHandle`] stands in for `/dev/uinput` so device code can be exercised
//! without the kernel module or root. The paired [`MockRecorder`] stays with
//! the test after the handle has been moved into a device, and can inject
//! failures.
//!
//! ```ignore
//! let (handle, recorder) = MockHandle::new();
//! let mut pad = Gamepad::from_handle(handle, "test pad")?;
//! pad.button_down(Button::A)?;
//! assert_eq!(recorder.event_batches().len(), 1);
//! ```

use crate::manager::handle::{ControlRequest, UinputHandle};
use crate::protocol::{EV_SYN, SYN_REPORT};
use crate::uinput::{INPUT_EVENT_SIZE, input_event};
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleCall {
    Control { request: ControlRequest, arg: u64 },
    Write(Vec<u8>),
}

/// A decoded `input_event` record, without its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

impl RawEvent {
    pub fn new(event_type: u16, code: u16, value: i32) -> Self {
        Self {
            event_type,
            code,
            value,
        }
    }

    pub fn is_sync(&self) -> bool {
        self.event_type == EV_SYN && self.code == SYN_REPORT && self.value == 0
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<HandleCall>,
    closed: bool,
    failing_controls: HashSet<ControlRequest>,
    fail_writes: bool,
    /// Accept at most this many bytes per write.
    write_limit: Option<usize>,
}

#[derive(Debug)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

/// Test-side view of a [`MockHandle`].
#[derive(Debug, Clone)]
pub struct MockRecorder {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    pub fn new() -> (MockHandle, MockRecorder) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (
            MockHandle {
                state: Arc::clone(&state),
            },
            MockRecorder { state },
        )
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl UinputHandle for MockHandle {
    fn control(&mut self, request: ControlRequest, arg: u64) -> io::Result<()> {
        let mut state = self.state();
        state.calls.push(HandleCall::Control { request, arg });
        if state.failing_controls.contains(&request) {
            return Err(io::Error::from_raw_os_error(libc::EINVAL));
        }
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state();
        if state.fail_writes {
            return Err(io::Error::from_raw_os_error(libc::ENODEV));
        }
        let accepted = state.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        state.calls.push(HandleCall::Write(buf[..accepted].to_vec()));
        Ok(accepted)
    }
}

impl Drop for MockHandle {
    fn drop(&mut self) {
        self.state().closed = true;
    }
}

impl MockRecorder {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes every later `request` fail with EINVAL.
    pub fn fail_control(&self, request: ControlRequest) {
        self.state().failing_controls.insert(request);
    }

    /// Makes later writes fail with ENODEV.
    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// Caps how many bytes a single write accepts.
    pub fn limit_writes(&self, limit: Option<usize>) {
        self.state().write_limit = limit;
    }

    pub fn calls(&self) -> Vec<HandleCall> {
        self.state().calls.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    pub fn control_count(&self, request: ControlRequest) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, HandleCall::Control { request: r, .. } if *r == request))
            .count()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                HandleCall::Write(bytes) => Some(bytes.clone()),
                HandleCall::Control { .. } => None,
            })
            .collect()
    }

    /// Writes issued after `UI_DEV_CREATE`, each decoded into its records.
    pub fn event_batches(&self) -> Vec<Vec<RawEvent>> {
        let state = self.state();
        let created_at = state.calls.iter().position(|c| {
            matches!(
                c,
                HandleCall::Control {
                    request: ControlRequest::DevCreate,
                    ..
                }
            )
        });
        let Some(created_at) = created_at else {
            return Vec::new();
        };

        state.calls[created_at + 1..]
            .iter()
            .filter_map(|c| match c {
                HandleCall::Write(bytes) => Some(decode(bytes)),
                HandleCall::Control { .. } => None,
            })
            .collect()
    }
}

fn decode(bytes: &[u8]) -> Vec<RawEvent> {
    bytes
        .chunks(INPUT_EVENT_SIZE)
        .filter_map(input_event::from_bytes)
        .map(|ev| RawEvent::new(ev.type_, ev.code, ev.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_sees_calls_after_handle_moves() {
        let (handle, recorder) = MockHandle::new();
        let mut boxed: Box<dyn UinputHandle> = Box::new(handle);

        boxed.control(ControlRequest::DevCreate, 0).unwrap();
        let ev = input_event::new(EV_SYN, SYN_REPORT, 0);
        assert_eq!(boxed.write(ev.as_bytes()).unwrap(), INPUT_EVENT_SIZE);

        assert_eq!(recorder.event_batches(), vec![vec![RawEvent::new(EV_SYN, SYN_REPORT, 0)]]);
        assert!(!recorder.is_closed());
        drop(boxed);
        assert!(recorder.is_closed());
    }

    #[test]
    fn injected_failures() {
        let (mut handle, recorder) = MockHandle::new();
        recorder.fail_control(ControlRequest::DevDestroy);
        recorder.limit_writes(Some(3));

        assert!(handle.control(ControlRequest::DevDestroy, 0).is_err());
        assert_eq!(handle.write(&[1, 2, 3, 4, 5]).unwrap(), 3);

        recorder.fail_writes(true);
        assert_eq!(
            handle.write(&[1]).unwrap_err().raw_os_error(),
            Some(libc::ENODEV)
        );
        assert_eq!(recorder.writes(), vec![vec![1, 2, 3]]);
    }
}
