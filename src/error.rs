use crate::protocol::{CodeRange, event_type_name};
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Where a device is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Unopened,
    Opened,
    Configuring,
    Created,
    Destroyed,
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceState::Unopened => "unopened",
            DeviceState::Opened => "opened",
            DeviceState::Configuring => "configuring",
            DeviceState::Created => "created",
            DeviceState::Destroyed => "destroyed",
        };
        f.write_str(s)
    }
}

/// Step of device creation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateStep {
    RegisterEventType { event_type: u16 },
    RegisterCode { event_type: u16, code: u16 },
    WriteDescriptor,
    Create,
}

impl fmt::Display for CreateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CreateStep::RegisterEventType { event_type } => {
                write!(f, "registering event type {}", event_type_name(event_type))
            }
            CreateStep::RegisterCode { event_type, code } => write!(
                f,
                "registering {} code {:#x}",
                event_type_name(event_type),
                code
            ),
            CreateStep::WriteDescriptor => f.write_str("writing the device descriptor"),
            CreateStep::Create => f.write_str("UI_DEV_CREATE"),
        }
    }
}

fn type_name(event_type: &u16) -> &'static str {
    event_type_name(*event_type)
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid control path {path:?}: {reason}")]
    InvalidPath { path: PathBuf, reason: &'static str },

    #[error("invalid device name ({len} bytes): {reason}")]
    InvalidName { len: usize, reason: &'static str },

    #[error("{operation}: code {code:#x} is not in the valid range {range}")]
    InvalidCode {
        operation: &'static str,
        code: u16,
        range: CodeRange,
    },

    #[error("{operation}: {} code {code:#x} was not registered at creation", type_name(.event_type))]
    UndeclaredCode {
        operation: &'static str,
        event_type: u16,
        code: u16,
    },

    #[error("failed to open {path:?}: {source}")]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("device creation failed while {step}: {source}")]
    DeviceCreate {
        step: CreateStep,
        #[source]
        source: io::Error,
    },

    #[error("{operation}: event write failed: {source}")]
    EventWrite {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{operation}: device is {state}")]
    InvalidState {
        operation: &'static str,
        state: DeviceState,
    },
}

impl Error {
    /// Caller-fixable problems, detected before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidPath { .. }
                | Error::InvalidName { .. }
                | Error::InvalidCode { .. }
                | Error::UndeclaredCode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{EV_KEY, GAMEPAD_BUTTONS};

    #[test]
    fn messages_name_the_operation_and_code() {
        let err = Error::InvalidCode {
            operation: "button_down",
            code: 0x200,
            range: GAMEPAD_BUTTONS,
        };
        assert_eq!(
            err.to_string(),
            "button_down: code 0x200 is not in the valid range 0x130..=0x13e"
        );
        assert!(err.is_validation());

        let err = Error::DeviceCreate {
            step: CreateStep::RegisterCode {
                event_type: EV_KEY,
                code: 0x130,
            },
            source: io::Error::from_raw_os_error(libc::EPERM),
        };
        assert!(err.to_string().starts_with("device creation failed while registering EV_KEY code 0x130"));
        assert!(!err.is_validation());
    }

    #[test]
    fn state_message() {
        let err = Error::InvalidState {
            operation: "destroy",
            state: DeviceState::Destroyed,
        };
        assert_eq!(err.to_string(), "destroy: device is destroyed");
    }
}
