use crate::protocol::*;

/// Identifiers used when a template is not given its own.
pub const DEFAULT_VENDOR_ID: u16 = 0x4711;
pub const DEFAULT_PRODUCT_ID: u16 = 0x0817;
pub const DEFAULT_VERSION: u16 = 1;

/// Stick travel for gamepad axes.
pub const STICK_MIN: i32 = -32767;
pub const STICK_MAX: i32 = 32767;

/// Pre-configured device templates
pub struct DeviceTemplates;

impl DeviceTemplates {
    fn base(name: &str) -> DeviceConfig {
        DeviceConfig {
            name: name.to_string(),
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
            version: DEFAULT_VERSION,
            bustype: BusType::Usb,
            keys: Vec::new(),
            axes: Vec::new(),
            rel_axes: Vec::new(),
        }
    }

    /// Every gamepad button plus six absolute axes.
    pub fn gamepad(name: &str) -> DeviceConfig {
        DeviceConfig {
            keys: GAMEPAD_BUTTONS.iter().collect(),
            axes: vec![
                AxisConfig::new(Axis::X, STICK_MIN, STICK_MAX),
                AxisConfig::new(Axis::Y, STICK_MIN, STICK_MAX),
                AxisConfig::new(Axis::Z, STICK_MIN, STICK_MAX),
                AxisConfig::new(Axis::RX, STICK_MIN, STICK_MAX),
                AxisConfig::new(Axis::RY, STICK_MIN, STICK_MAX),
                AxisConfig::new(Axis::RZ, STICK_MIN, STICK_MAX),
            ],
            ..Self::base(name)
        }
    }

    /// Xbox 360 identifiers over the generic gamepad layout
    pub fn xbox360(name: &str) -> DeviceConfig {
        DeviceConfig {
            vendor_id: 0x045e,
            product_id: 0x028e,
            version: 0x0110,
            ..Self::gamepad(name)
        }
    }

    /// Absolute pointer confined to the given rectangle, with left/right
    /// buttons and single-finger touch.
    pub fn touchpad(name: &str, min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> DeviceConfig {
        DeviceConfig {
            keys: vec![BTN_LEFT, BTN_RIGHT, BTN_TOUCH, BTN_TOOL_FINGER],
            axes: vec![
                AxisConfig::new(Axis::X, min_x, max_x),
                AxisConfig::new(Axis::Y, min_y, max_y),
            ],
            ..Self::base(name)
        }
    }

    pub fn keyboard(name: &str) -> DeviceConfig {
        DeviceConfig {
            keys: KEYBOARD_KEYS.iter().collect(),
            ..Self::base(name)
        }
    }

    /// Relative pointer with three buttons and both wheels.
    pub fn mouse(name: &str) -> DeviceConfig {
        DeviceConfig {
            keys: vec![BTN_LEFT, BTN_RIGHT, BTN_MIDDLE],
            rel_axes: vec![REL_X, REL_Y, REL_HWHEEL, REL_WHEEL],
            ..Self::base(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamepad_declares_every_button_and_axis() {
        let caps = DeviceTemplates::gamepad("pad").capabilities();
        for code in GAMEPAD_BUTTONS.iter() {
            assert!(caps.contains(EV_KEY, code));
        }
        for code in ABS_AXES.iter() {
            assert!(caps.contains(EV_ABS, code));
        }
        assert_eq!(caps.codes(EV_REL).count(), 0);
    }

    #[test]
    fn touchpad_uses_given_rectangle() {
        let config = DeviceTemplates::touchpad("pad", 0, 1920, 0, 1080);
        assert_eq!(config.axis(ABS_X).map(|a| (a.min, a.max)), Some((0, 1920)));
        assert_eq!(config.axis(ABS_Y).map(|a| (a.min, a.max)), Some((0, 1080)));
        assert_eq!(config.axis(ABS_RX), None);
    }

    #[test]
    fn xbox360_keeps_gamepad_layout() {
        let pad = DeviceTemplates::gamepad("a");
        let xbox = DeviceTemplates::xbox360("a");
        assert_eq!(xbox.keys, pad.keys);
        assert_eq!(xbox.vendor_id, 0x045e);
    }

    #[test]
    fn keyboard_and_mouse() {
        assert_eq!(DeviceTemplates::keyboard("kb").keys.len(), KEY_MICMUTE as usize);
        let mouse = DeviceTemplates::mouse("m").capabilities();
        assert!(mouse.contains(EV_REL, REL_WHEEL));
        assert!(mouse.contains(EV_KEY, BTN_MIDDLE));
    }
}
