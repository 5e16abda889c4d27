use crate::error::{CreateStep, DeviceState, Error, Result};
use crate::manager::batch::EventBatch;
use crate::manager::emitter;
use crate::manager::handle::{ControlRequest, UinputFile, UinputHandle};
use crate::manager::registrar;
use crate::protocol::*;
use crate::uinput::{UINPUT_MAX_NAME_SIZE, input_id, uinput_user_dev};
use std::path::Path;
use tracing::{debug, info, trace, warn};

/// A kernel-visible input device backed by uinput.
///
/// The device exclusively owns its handle. Emitting takes `&mut self`, so
/// calls on one device are serialized by the borrow checker; sharing a device
/// between threads needs the caller's own lock around it, otherwise records of
/// two batches could interleave on the wire.
///
/// Dropping a device that was never destroyed destroys it on a best-effort
/// basis.
#[derive(Debug)]
pub struct VirtualDevice<H: UinputHandle = UinputFile> {
    config: DeviceConfig,
    capabilities: CapabilitySet,
    handle: Option<H>,
}

impl VirtualDevice<UinputFile> {
    /// Opens the control file at `path` and brings a device up from `config`.
    pub fn create(path: impl AsRef<Path>, config: DeviceConfig) -> Result<Self> {
        let path = path.as_ref();
        validate_config(&config)?;
        validate_path(path)?;

        debug!("Creating device {:?} via {}", config.name, path.display());

        let handle = UinputFile::open(path).map_err(|source| Error::DeviceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        trace!("{}: {} -> {}", config.name, DeviceState::Unopened, DeviceState::Opened);

        Self::configure(handle, config)
    }
}

impl<H: UinputHandle> VirtualDevice<H> {
    /// Brings a device up on an already opened handle.
    ///
    /// Validation happens before the handle sees a single call.
    pub fn from_handle(handle: H, config: DeviceConfig) -> Result<Self> {
        validate_config(&config)?;
        Self::configure(handle, config)
    }

    fn configure(mut handle: H, config: DeviceConfig) -> Result<Self> {
        let capabilities = config.capabilities();
        trace!(
            "{}: {} -> {}",
            config.name,
            DeviceState::Opened,
            DeviceState::Configuring
        );

        let result = registrar::register(&mut handle, &capabilities)
            .and_then(|()| write_descriptor(&mut handle, &config))
            .and_then(|()| {
                handle
                    .control(ControlRequest::DevCreate, 0)
                    .map_err(|source| Error::DeviceCreate {
                        step: CreateStep::Create,
                        source,
                    })
            });

        if let Err(e) = result {
            // handle is dropped, and closed, on return
            warn!("Failed to create device {:?}: {}", config.name, e);
            return Err(e);
        }

        info!(
            "Created device {:?} ({:04x}:{:04x}, {} capabilities)",
            config.name,
            config.vendor_id,
            config.product_id,
            capabilities.len()
        );

        Ok(Self {
            config,
            capabilities,
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    pub fn state(&self) -> DeviceState {
        if self.handle.is_some() {
            DeviceState::Created
        } else {
            DeviceState::Destroyed
        }
    }

    pub fn is_created(&self) -> bool {
        self.handle.is_some()
    }

    /// Writes `events` and a closing SYN_REPORT as one batch.
    ///
    /// Every code is checked against its domain and the registered
    /// capabilities before anything is written. Values are not clamped.
    /// An empty `events` writes nothing, not even the SYN_REPORT, but still
    /// fails on a device that is not created.
    pub fn emit(&mut self, operation: &'static str, events: &[InputEvent]) -> Result<()> {
        if self.handle.is_none() {
            return Err(Error::InvalidState {
                operation,
                state: self.state(),
            });
        }
        if events.is_empty() {
            trace!("{}: no events, nothing to write", operation);
            return Ok(());
        }
        for event in events {
            self.check_event(operation, event)?;
        }

        let data = emitter::encode_batch(events);
        let handle = self.handle.as_mut().ok_or(Error::InvalidState {
            operation,
            state: DeviceState::Destroyed,
        })?;
        emitter::write_batch(handle, operation, &data)
    }

    /// Starts a batch of events that will share one SYN_REPORT.
    pub fn batch(&mut self, operation: &'static str) -> EventBatch<'_, H> {
        EventBatch::new(self, operation)
    }

    fn check_event(&self, operation: &'static str, event: &InputEvent) -> Result<()> {
        let event_type = event.event_type();
        let code = event.code();

        if let Some(range) = code_range(event_type) {
            if !range.contains(code) {
                return Err(Error::InvalidCode {
                    operation,
                    code,
                    range,
                });
            }
        }
        if !self.capabilities.contains(event_type, code) {
            return Err(Error::UndeclaredCode {
                operation,
                event_type,
                code,
            });
        }
        if let InputEvent::Abs { value, .. } = *event {
            match self.config.axis(code) {
                Some(axis) if !axis.contains(value) => debug!(
                    "{}: {:?} value {} outside declared range {}..={}",
                    operation, axis.axis, value, axis.min, axis.max
                ),
                _ => {}
            }
        }
        Ok(())
    }

    /// Issues UI_DEV_DESTROY and closes the handle.
    ///
    /// A failing UI_DEV_DESTROY is only logged; closing the file releases the
    /// device either way. Destroying twice is an error.
    pub fn destroy(&mut self) -> Result<()> {
        let Some(mut handle) = self.handle.take() else {
            return Err(Error::InvalidState {
                operation: "destroy",
                state: DeviceState::Destroyed,
            });
        };

        if let Err(e) = handle.control(ControlRequest::DevDestroy, 0) {
            warn!("UI_DEV_DESTROY failed for {:?}: {}", self.config.name, e);
        }
        drop(handle);

        info!("Device {:?} destroyed", self.config.name);
        Ok(())
    }
}

impl<H: UinputHandle> Drop for VirtualDevice<H> {
    fn drop(&mut self) {
        if self.handle.is_some() {
            debug!("Device {:?} dropped while created", self.config.name);
            let _ = self.destroy();
        }
    }
}

pub fn validate_name(name: &[u8]) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidName {
            len: 0,
            reason: "device name may not be empty",
        });
    }
    if name.len() > UINPUT_MAX_NAME_SIZE {
        return Err(Error::InvalidName {
            len: name.len(),
            reason: "device name is longer than 80 bytes",
        });
    }
    Ok(())
}

pub fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "path may not be empty",
        });
    }
    if std::fs::metadata(path).is_err() {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "no such device node",
        });
    }
    Ok(())
}

fn validate_config(config: &DeviceConfig) -> Result<()> {
    validate_name(config.name.as_bytes())?;
    registrar::validate(&config.capabilities())
}

fn descriptor(config: &DeviceConfig) -> uinput_user_dev {
    let mut dev = uinput_user_dev::new(
        config.name.as_bytes(),
        input_id {
            bustype: config.bustype as u16,
            vendor: config.vendor_id,
            product: config.product_id,
            version: config.version,
        },
    );
    for axis in &config.axes {
        let idx = axis.axis.to_code() as usize;
        dev.absmin[idx] = axis.min;
        dev.absmax[idx] = axis.max;
        dev.absfuzz[idx] = axis.fuzz;
        dev.absflat[idx] = axis.flat;
    }
    dev
}

fn write_descriptor<H: UinputHandle>(handle: &mut H, config: &DeviceConfig) -> Result<()> {
    let dev = descriptor(config);
    let bytes = dev.as_bytes();
    trace!("Writing descriptor {:?}", dev);

    let written = handle.write(bytes).map_err(|source| Error::DeviceCreate {
        step: CreateStep::WriteDescriptor,
        source,
    })?;
    if written != bytes.len() {
        return Err(Error::DeviceCreate {
            step: CreateStep::WriteDescriptor,
            source: std::io::Error::new(
                std::io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", written, bytes.len()),
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::mock::{HandleCall, MockHandle, RawEvent};
    use crate::uinput::ABS_CNT;

    fn pad_config() -> DeviceConfig {
        DeviceConfig {
            name: "unit pad".into(),
            vendor_id: 0x4711,
            product_id: 0x0817,
            version: 1,
            bustype: BusType::Usb,
            keys: vec![BTN_SOUTH, BTN_EAST],
            axes: vec![
                AxisConfig::new(Axis::X, -100, 100),
                AxisConfig::new(Axis::Y, -100, 100),
            ],
            rel_axes: vec![],
        }
    }

    #[test]
    fn descriptor_is_written_once_before_create() {
        let (handle, recorder) = MockHandle::new();
        let device = VirtualDevice::from_handle(handle, pad_config()).unwrap();
        assert_eq!(device.state(), DeviceState::Created);

        let calls = recorder.calls();
        let writes: Vec<_> = calls
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, HandleCall::Write(_)))
            .collect();
        assert_eq!(writes.len(), 1);
        let (write_idx, HandleCall::Write(bytes)) = writes[0] else {
            unreachable!()
        };
        assert_eq!(bytes.len(), std::mem::size_of::<uinput_user_dev>());
        assert_eq!(
            calls[write_idx + 1],
            HandleCall::Control {
                request: ControlRequest::DevCreate,
                arg: 0
            }
        );
        assert_eq!(write_idx + 2, calls.len());
    }

    #[test]
    fn descriptor_carries_axis_ranges() {
        let mut config = pad_config();
        config.axes[1].fuzz = 16;
        config.axes[1].flat = 128;
        let dev = descriptor(&config);

        assert_eq!(&dev.name[..8], b"unit pad");
        assert_eq!(dev.id.bustype, 0x03);
        assert_eq!((dev.absmin[0], dev.absmax[0]), (-100, 100));
        assert_eq!((dev.absfuzz[1], dev.absflat[1]), (16, 128));
        assert!(dev.absmax[2..ABS_CNT].iter().all(|&v| v == 0));
    }

    #[test]
    fn undeclared_code_writes_nothing() {
        let (handle, recorder) = MockHandle::new();
        let mut device = VirtualDevice::from_handle(handle, pad_config()).unwrap();

        let err = device
            .emit("button_down", &[InputEvent::Key { code: BTN_NORTH, pressed: true }])
            .unwrap_err();
        assert!(matches!(err, Error::UndeclaredCode { code: BTN_NORTH, .. }));

        let err = device
            .emit("button_down", &[InputEvent::Key { code: KEY_MAX + 1, pressed: true }])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCode { .. }));
        assert!(recorder.event_batches().is_empty());
    }

    #[test]
    fn values_outside_axis_range_pass_through() {
        let (handle, recorder) = MockHandle::new();
        let mut device = VirtualDevice::from_handle(handle, pad_config()).unwrap();

        device
            .emit("move", &[InputEvent::Abs { code: ABS_X, value: 5000 }])
            .unwrap();
        assert_eq!(
            recorder.event_batches(),
            vec![vec![
                RawEvent::new(EV_ABS, ABS_X, 5000),
                RawEvent::new(EV_SYN, SYN_REPORT, 0)
            ]]
        );
    }

    #[test]
    fn descriptor_short_write_fails_creation() {
        let (handle, recorder) = MockHandle::new();
        recorder.limit_writes(Some(100));

        let err = VirtualDevice::from_handle(handle, pad_config()).unwrap_err();
        assert!(matches!(
            err,
            Error::DeviceCreate {
                step: CreateStep::WriteDescriptor,
                ..
            }
        ));
        assert_eq!(recorder.control_count(ControlRequest::DevCreate), 0);
        assert!(recorder.is_closed());
    }

    #[test]
    fn drop_destroys_created_device() {
        let (handle, recorder) = MockHandle::new();
        let device = VirtualDevice::from_handle(handle, pad_config()).unwrap();
        drop(device);

        assert_eq!(recorder.control_count(ControlRequest::DevDestroy), 1);
        assert!(recorder.is_closed());
    }

    #[test]
    fn failed_destroy_call_still_closes() {
        let (handle, recorder) = MockHandle::new();
        recorder.fail_control(ControlRequest::DevDestroy);
        let mut device = VirtualDevice::from_handle(handle, pad_config()).unwrap();

        device.destroy().unwrap();
        assert!(recorder.is_closed());
        assert_eq!(device.state(), DeviceState::Destroyed);
    }

    #[test]
    fn empty_emit_writes_nothing_but_checks_state() {
        let (handle, recorder) = MockHandle::new();
        let mut device = VirtualDevice::from_handle(handle, pad_config()).unwrap();

        device.emit("noop", &[]).unwrap();
        assert!(recorder.event_batches().is_empty());

        device.destroy().unwrap();
        assert!(matches!(
            device.emit("noop", &[]),
            Err(Error::InvalidState {
                operation: "noop",
                state: DeviceState::Destroyed
            })
        ));
    }

    #[test]
    fn path_validation() {
        assert!(matches!(
            validate_path(Path::new("")),
            Err(Error::InvalidPath { .. })
        ));
        assert!(matches!(
            validate_path(Path::new("/nonexistent/vuinput/uinput")),
            Err(Error::InvalidPath { .. })
        ));
        assert!(validate_path(&std::env::temp_dir()).is_ok());
    }

    #[test]
    fn name_validation() {
        assert!(validate_name(b"").is_err());
        assert!(validate_name(&[b'a'; UINPUT_MAX_NAME_SIZE]).is_ok());
        assert!(validate_name(&[b'a'; UINPUT_MAX_NAME_SIZE + 1]).is_err());
    }
}
