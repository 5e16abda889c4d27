use crate::uinput;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::Path;
use tracing::trace;

/// Control calls understood by the uinput driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlRequest {
    SetEvBit,
    SetKeyBit,
    SetRelBit,
    SetAbsBit,
    DevCreate,
    DevDestroy,
}

impl ControlRequest {
    pub fn code(self) -> u64 {
        match self {
            ControlRequest::SetEvBit => uinput::UI_SET_EVBIT,
            ControlRequest::SetKeyBit => uinput::UI_SET_KEYBIT,
            ControlRequest::SetRelBit => uinput::UI_SET_RELBIT,
            ControlRequest::SetAbsBit => uinput::UI_SET_ABSBIT,
            ControlRequest::DevCreate => uinput::UI_DEV_CREATE,
            ControlRequest::DevDestroy => uinput::UI_DEV_DESTROY,
        }
    }
}

/// An open uinput control file.
///
/// Dropping the handle closes the underlying resource.
pub trait UinputHandle {
    fn control(&mut self, request: ControlRequest, arg: u64) -> io::Result<()>;

    /// One `write(2)`; returns how many bytes the driver accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
}

/// `/dev/uinput` opened write-only and non-blocking.
#[derive(Debug)]
pub struct UinputFile {
    file: File,
}

impl UinputFile {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(path)?;

        trace!("Opened {} as fd {}", path.display(), file.as_raw_fd());

        Ok(Self { file })
    }
}

impl UinputHandle for UinputFile {
    fn control(&mut self, request: ControlRequest, arg: u64) -> io::Result<()> {
        let fd = self.file.as_raw_fd();
        let ret = unsafe { libc::ioctl(fd, request.code() as _, arg as libc::c_ulong) };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }
}

impl Drop for UinputFile {
    fn drop(&mut self) {
        trace!("Closing uinput fd {}", self.file.as_raw_fd());
    }
}
