use crate::error::{Error, Result};
use crate::manager::handle::UinputHandle;
use crate::protocol::{EV_SYN, InputEvent, SYN_REPORT};
use crate::uinput::{INPUT_EVENT_SIZE, input_event};
use std::io;
use tracing::trace;

/// Encodes `events` followed by one SYN_REPORT into a single buffer.
pub fn encode_batch(events: &[InputEvent]) -> Vec<u8> {
    let mut data = Vec::with_capacity((events.len() + 1) * INPUT_EVENT_SIZE);
    for event in events {
        let raw = input_event::new(event.event_type(), event.code(), event.value());
        data.extend_from_slice(raw.as_bytes());
    }
    data.extend_from_slice(input_event::new(EV_SYN, SYN_REPORT, 0).as_bytes());
    data
}

/// Writes one encoded batch in a single write.
///
/// A short write is an error: the driver may hold events without their SYN.
pub fn write_batch<H: UinputHandle>(
    handle: &mut H,
    operation: &'static str,
    data: &[u8],
) -> Result<()> {
    let written = handle
        .write(data)
        .map_err(|source| Error::EventWrite { operation, source })?;

    if written != data.len() {
        return Err(Error::EventWrite {
            operation,
            source: io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", written, data.len()),
            ),
        });
    }

    trace!(
        "{}: wrote {} records",
        operation,
        data.len() / INPUT_EVENT_SIZE
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::handle::ControlRequest;
    use crate::manager::mock::{MockHandle, RawEvent};
    use crate::protocol::{ABS_X, ABS_Y, BTN_TOOL_FINGER, BTN_TOUCH, EV_ABS};

    #[test]
    fn batch_ends_in_sync() {
        let data = encode_batch(&[
            InputEvent::Key { code: BTN_TOUCH, pressed: true },
            InputEvent::Key { code: BTN_TOOL_FINGER, pressed: true },
        ]);
        assert_eq!(data.len(), 3 * INPUT_EVENT_SIZE);

        let last = input_event::from_bytes(&data[2 * INPUT_EVENT_SIZE..]).unwrap();
        assert_eq!((last.type_, last.code, last.value), (EV_SYN, SYN_REPORT, 0));
    }

    #[test]
    fn empty_batch_is_just_sync() {
        assert_eq!(encode_batch(&[]).len(), INPUT_EVENT_SIZE);
    }

    #[test]
    fn one_write_per_batch() {
        let (mut handle, recorder) = MockHandle::new();
        handle.control(ControlRequest::DevCreate, 0).unwrap();

        let data = encode_batch(&[
            InputEvent::Abs { code: ABS_X, value: i32::MIN },
            InputEvent::Abs { code: ABS_Y, value: i32::MAX },
        ]);
        write_batch(&mut handle, "move", &data).unwrap();

        assert_eq!(
            recorder.event_batches(),
            vec![vec![
                RawEvent::new(EV_ABS, ABS_X, i32::MIN),
                RawEvent::new(EV_ABS, ABS_Y, i32::MAX),
                RawEvent::new(EV_SYN, SYN_REPORT, 0),
            ]]
        );
    }

    #[test]
    fn short_write_is_an_error() {
        let (mut handle, recorder) = MockHandle::new();
        recorder.limit_writes(Some(INPUT_EVENT_SIZE));

        let data = encode_batch(&[InputEvent::Key { code: 0x130, pressed: true }]);
        let err = write_batch(&mut handle, "button_down", &data).unwrap_err();
        match err {
            Error::EventWrite { operation, source } => {
                assert_eq!(operation, "button_down");
                assert_eq!(source.kind(), io::ErrorKind::WriteZero);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
