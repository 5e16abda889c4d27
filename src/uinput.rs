//! Kernel ABI for `/dev/uinput`.
//!
//! Control-call numbers and the `#[repr(C)]` records written to the device
//! file. The structs mirror `linux/uinput.h` and `linux/input.h` field for
//! field; nothing here validates its contents.
#![allow(non_camel_case_types)]

use std::{mem, slice};

// Uinput constants and structures
pub const UINPUT_MAX_NAME_SIZE: usize = 80;
pub const ABS_CNT: usize = 64;

pub const UI_DEV_CREATE: u64 = 0x5501;
pub const UI_DEV_DESTROY: u64 = 0x5502;
pub const UI_SET_EVBIT: u64 = 0x40045564;
pub const UI_SET_KEYBIT: u64 = 0x40045565;
pub const UI_SET_RELBIT: u64 = 0x40045566;
pub const UI_SET_ABSBIT: u64 = 0x40045567;

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct input_id {
    pub bustype: u16,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

/// Legacy setup record, written once before `UI_DEV_CREATE`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct uinput_user_dev {
    pub name: [u8; UINPUT_MAX_NAME_SIZE],
    pub id: input_id,
    pub ff_effects_max: u32,
    pub absmax: [i32; ABS_CNT],
    pub absmin: [i32; ABS_CNT],
    pub absfuzz: [i32; ABS_CNT],
    pub absflat: [i32; ABS_CNT],
}

impl uinput_user_dev {
    /// A zeroed descriptor carrying `name` (truncated to the name buffer) and `id`.
    pub fn new(name: &[u8], id: input_id) -> Self {
        let mut buf = [0u8; UINPUT_MAX_NAME_SIZE];
        let len = name.len().min(UINPUT_MAX_NAME_SIZE);
        buf[..len].copy_from_slice(&name[..len]);

        Self {
            name: buf,
            id,
            ff_effects_max: 0,
            absmax: [0; ABS_CNT],
            absmin: [0; ABS_CNT],
            absfuzz: [0; ABS_CNT],
            absflat: [0; ABS_CNT],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        // Safety: repr(C), integer fields only, no interior padding
        unsafe {
            slice::from_raw_parts(
                (self as *const Self).cast::<u8>(),
                mem::size_of::<Self>(),
            )
        }
    }
}

impl std::fmt::Debug for uinput_user_dev {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(UINPUT_MAX_NAME_SIZE);
        f.debug_struct("uinput_user_dev")
            .field("name", &String::from_utf8_lossy(&self.name[..end]))
            .field("id", &self.id)
            .field("ff_effects_max", &self.ff_effects_max)
            .finish_non_exhaustive()
    }
}

/// One record of the event stream.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct input_event {
    pub time: libc::timeval,
    pub type_: u16,
    pub code: u16,
    pub value: i32,
}

impl input_event {
    /// Zero timestamp: the kernel stamps events written through uinput.
    pub fn new(type_: u16, code: u16, value: i32) -> Self {
        Self {
            time: libc::timeval {
                tv_sec: 0,
                tv_usec: 0,
            },
            type_,
            code,
            value,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        // Safety: repr(C), integer fields only, no interior padding
        unsafe {
            slice::from_raw_parts(
                (self as *const Self).cast::<u8>(),
                mem::size_of::<Self>(),
            )
        }
    }

    /// Reads one record back out of a byte buffer written by [`input_event::as_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < mem::size_of::<Self>() {
            return None;
        }
        // Safety: length checked, every bit pattern is a valid input_event
        Some(unsafe { std::ptr::read_unaligned(bytes.as_ptr().cast::<Self>()) })
    }
}

impl std::fmt::Debug for input_event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("input_event")
            .field("type", &self.type_)
            .field("code", &self.code)
            .field("value", &self.value)
            .finish()
    }
}

pub const INPUT_EVENT_SIZE: usize = mem::size_of::<input_event>();

#[cfg(target_pointer_width = "64")]
const _: () = {
    assert!(mem::size_of::<input_id>() == 8);
    assert!(mem::size_of::<input_event>() == 24);
    assert!(mem::size_of::<uinput_user_dev>() == 1116);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_event_field_offsets() {
        let ev = input_event::new(0x03, 0x01, -32767);
        let bytes = ev.as_bytes();
        let tail = &bytes[mem::size_of::<libc::timeval>()..];

        assert_eq!(&tail[0..2], &0x03u16.to_ne_bytes());
        assert_eq!(&tail[2..4], &0x01u16.to_ne_bytes());
        assert_eq!(&tail[4..8], &(-32767i32).to_ne_bytes());
        assert!(bytes[..mem::size_of::<libc::timeval>()].iter().all(|&b| b == 0));
    }

    #[test]
    fn descriptor_layout() {
        let mut dev = uinput_user_dev::new(
            b"pad",
            input_id {
                bustype: 0x03,
                vendor: 0x4711,
                product: 0x0817,
                version: 1,
            },
        );
        dev.absmax[1] = 32767;
        dev.absmin[1] = -32767;

        let bytes = dev.as_bytes();
        assert_eq!(&bytes[..4], b"pad\0");
        assert!(bytes[3..UINPUT_MAX_NAME_SIZE].iter().all(|&b| b == 0));
        assert_eq!(&bytes[80..82], &0x03u16.to_ne_bytes());
        assert_eq!(&bytes[82..84], &0x4711u16.to_ne_bytes());
        assert_eq!(&bytes[84..86], &0x0817u16.to_ne_bytes());
        assert_eq!(&bytes[86..88], &1u16.to_ne_bytes());
        assert_eq!(&bytes[88..92], &0u32.to_ne_bytes());

        let absmax = 92;
        let absmin = absmax + 4 * ABS_CNT;
        assert_eq!(&bytes[absmax + 4..absmax + 8], &32767i32.to_ne_bytes());
        assert_eq!(&bytes[absmin + 4..absmin + 8], &(-32767i32).to_ne_bytes());
    }

    #[test]
    fn name_fills_whole_buffer() {
        let name = [b'n'; UINPUT_MAX_NAME_SIZE];
        let dev = uinput_user_dev::new(&name, input_id::default());
        assert_eq!(dev.name, name);
    }

    #[test]
    fn event_bytes_read_back() {
        let ev = input_event::new(0x01, 0x130, 1);
        let back = input_event::from_bytes(ev.as_bytes()).unwrap();
        assert_eq!((back.type_, back.code, back.value), (0x01, 0x130, 1));
        assert!(input_event::from_bytes(&[0u8; 4]).is_none());
    }
}
