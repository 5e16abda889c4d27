use crate::error::{CreateStep, Error, Result};
use crate::manager::handle::{ControlRequest, UinputHandle};
use crate::protocol::{CapabilitySet, EV_ABS, EV_KEY, EV_REL, code_range};
use tracing::trace;

/// Per-code request for an event type.
fn code_request(event_type: u16) -> Option<ControlRequest> {
    match event_type {
        EV_KEY => Some(ControlRequest::SetKeyBit),
        EV_REL => Some(ControlRequest::SetRelBit),
        EV_ABS => Some(ControlRequest::SetAbsBit),
        _ => None,
    }
}

/// Rejects codes outside their type's domain. Runs before any control call.
pub fn validate(caps: &CapabilitySet) -> Result<()> {
    for (event_type, code) in caps.iter() {
        match code_range(event_type) {
            Some(range) if range.contains(code) => {}
            Some(range) => {
                return Err(Error::InvalidCode {
                    operation: "register",
                    code,
                    range,
                });
            }
            None => {
                return Err(Error::UndeclaredCode {
                    operation: "register",
                    event_type,
                    code,
                });
            }
        }
    }
    Ok(())
}

/// Declares every type, then each of its codes, on a not-yet-created handle.
///
/// Stops at the first failing call; the caller must drop the handle.
pub fn register<H: UinputHandle>(handle: &mut H, caps: &CapabilitySet) -> Result<()> {
    for event_type in caps.event_types() {
        let Some(request) = code_request(event_type) else {
            continue;
        };

        trace!("UI_SET_EVBIT {}", event_type);
        handle
            .control(ControlRequest::SetEvBit, event_type.into())
            .map_err(|source| Error::DeviceCreate {
                step: CreateStep::RegisterEventType { event_type },
                source,
            })?;

        for code in caps.codes(event_type) {
            trace!("{:?} {:#x}", request, code);
            handle
                .control(request, code.into())
                .map_err(|source| Error::DeviceCreate {
                    step: CreateStep::RegisterCode { event_type, code },
                    source,
                })?;
        }
    }
    Ok(())
}
