//! Device lifecycle: capability registration, creation, emission, teardown.

mod batch;
mod device;
mod emitter;
mod handle;
pub mod mock;
mod registrar;

pub use batch::EventBatch;
pub use device::{VirtualDevice, validate_name, validate_path};
pub use emitter::encode_batch;
pub use handle::{ControlRequest, UinputFile, UinputHandle};
