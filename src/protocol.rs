use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::RangeInclusive;

// Event types, from input-event-codes.h
pub const EV_SYN: u16 = 0x00;
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const EV_ABS: u16 = 0x03;

pub const SYN_REPORT: u16 = 0;

pub const KEY_ESC: u16 = 1;
pub const KEY_1: u16 = 2;
pub const KEY_2: u16 = 3;
pub const KEY_3: u16 = 4;
pub const KEY_4: u16 = 5;
pub const KEY_5: u16 = 6;
pub const KEY_6: u16 = 7;
pub const KEY_7: u16 = 8;
pub const KEY_8: u16 = 9;
pub const KEY_9: u16 = 10;
pub const KEY_0: u16 = 11;
pub const KEY_MINUS: u16 = 12;
pub const KEY_EQUAL: u16 = 13;
pub const KEY_BACKSPACE: u16 = 14;
pub const KEY_TAB: u16 = 15;
pub const KEY_Q: u16 = 16;
pub const KEY_W: u16 = 17;
pub const KEY_E: u16 = 18;
pub const KEY_R: u16 = 19;
pub const KEY_T: u16 = 20;
pub const KEY_Y: u16 = 21;
pub const KEY_U: u16 = 22;
pub const KEY_I: u16 = 23;
pub const KEY_O: u16 = 24;
pub const KEY_P: u16 = 25;
pub const KEY_ENTER: u16 = 28;
pub const KEY_LEFTCTRL: u16 = 29;
pub const KEY_A: u16 = 30;
pub const KEY_S: u16 = 31;
pub const KEY_D: u16 = 32;
pub const KEY_F: u16 = 33;
pub const KEY_G: u16 = 34;
pub const KEY_H: u16 = 35;
pub const KEY_J: u16 = 36;
pub const KEY_K: u16 = 37;
pub const KEY_L: u16 = 38;
pub const KEY_LEFTSHIFT: u16 = 42;
pub const KEY_Z: u16 = 44;
pub const KEY_X: u16 = 45;
pub const KEY_C: u16 = 46;
pub const KEY_V: u16 = 47;
pub const KEY_B: u16 = 48;
pub const KEY_N: u16 = 49;
pub const KEY_M: u16 = 50;
pub const KEY_COMMA: u16 = 51;
pub const KEY_DOT: u16 = 52;
pub const KEY_SLASH: u16 = 53;
pub const KEY_RIGHTSHIFT: u16 = 54;
pub const KEY_LEFTALT: u16 = 56;
pub const KEY_SPACE: u16 = 57;
pub const KEY_CAPSLOCK: u16 = 58;
pub const KEY_F1: u16 = 59;
pub const KEY_F10: u16 = 68;
pub const KEY_F12: u16 = 88;
pub const KEY_UP: u16 = 103;
pub const KEY_LEFT: u16 = 105;
pub const KEY_RIGHT: u16 = 106;
pub const KEY_DOWN: u16 = 108;
pub const KEY_DELETE: u16 = 111;
pub const KEY_LEFTMETA: u16 = 125;
pub const KEY_MICMUTE: u16 = 248;
pub const KEY_MAX: u16 = 0x2ff;

pub const BTN_LEFT: u16 = 0x110;
pub const BTN_RIGHT: u16 = 0x111;
pub const BTN_MIDDLE: u16 = 0x112;
pub const BTN_SOUTH: u16 = 0x130;
pub const BTN_EAST: u16 = 0x131;
pub const BTN_C: u16 = 0x132;
pub const BTN_NORTH: u16 = 0x133;
pub const BTN_WEST: u16 = 0x134;
pub const BTN_Z: u16 = 0x135;
pub const BTN_TL: u16 = 0x136;
pub const BTN_TR: u16 = 0x137;
pub const BTN_TL2: u16 = 0x138;
pub const BTN_TR2: u16 = 0x139;
pub const BTN_SELECT: u16 = 0x13a;
pub const BTN_START: u16 = 0x13b;
pub const BTN_MODE: u16 = 0x13c;
pub const BTN_THUMBL: u16 = 0x13d;
pub const BTN_THUMBR: u16 = 0x13e;
pub const BTN_TOOL_FINGER: u16 = 0x145;
pub const BTN_TOUCH: u16 = 0x14a;

pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_DIAL: u16 = 0x07;
pub const REL_WHEEL: u16 = 0x08;
pub const REL_MAX: u16 = 0x0f;

pub const ABS_X: u16 = 0x00;
pub const ABS_Y: u16 = 0x01;
pub const ABS_Z: u16 = 0x02;
pub const ABS_RX: u16 = 0x03;
pub const ABS_RY: u16 = 0x04;
pub const ABS_RZ: u16 = 0x05;

pub const BTN_STATE_RELEASED: i32 = 0;
pub const BTN_STATE_PRESSED: i32 = 1;

/// Inclusive range of codes accepted for one purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub min: u16,
    pub max: u16,
}

impl CodeRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, code: u16) -> bool {
        code >= self.min && code <= self.max
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.min..=self.max
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}..={:#x}", self.min, self.max)
    }
}

/// Gamepad buttons, BTN_SOUTH through BTN_THUMBR.
pub const GAMEPAD_BUTTONS: CodeRange = CodeRange::new(BTN_SOUTH, BTN_THUMBR);
/// Ordinary keyboard keys, KEY_ESC through KEY_MICMUTE.
pub const KEYBOARD_KEYS: CodeRange = CodeRange::new(KEY_ESC, KEY_MICMUTE);
/// Anything the kernel accepts as an EV_KEY code.
pub const KEY_CODES: CodeRange = CodeRange::new(KEY_ESC, KEY_MAX);
/// ABS_X through ABS_RZ.
pub const ABS_AXES: CodeRange = CodeRange::new(ABS_X, ABS_RZ);
pub const REL_AXES: CodeRange = CodeRange::new(REL_X, REL_MAX);

/// Range of legal codes for an event type, or `None` for types this crate never emits.
pub fn code_range(event_type: u16) -> Option<CodeRange> {
    match event_type {
        EV_KEY => Some(KEY_CODES),
        EV_REL => Some(REL_AXES),
        EV_ABS => Some(ABS_AXES),
        _ => None,
    }
}

pub fn event_type_name(event_type: u16) -> &'static str {
    match event_type {
        EV_SYN => "EV_SYN",
        EV_KEY => "EV_KEY",
        EV_REL => "EV_REL",
        EV_ABS => "EV_ABS",
        _ => "EV_?",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum BusType {
    Usb = 0x03,
    Bluetooth = 0x05,
    Virtual = 0x06,
}

/// Gamepad buttons with their kernel codes.
///
/// `X` is BTN_X (BTN_NORTH, 0x133) and `Y` is BTN_Y (BTN_WEST, 0x134), as in
/// `input-event-codes.h`. Code that hardcoded 0x134 for X has them swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    A,
    B,
    C,
    X,
    Y,
    Z,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    Select,
    Start,
    Guide,
    LeftStick,
    RightStick,
}

impl Button {
    pub const ALL: [Button; 15] = [
        Button::A,
        Button::B,
        Button::C,
        Button::X,
        Button::Y,
        Button::Z,
        Button::LeftBumper,
        Button::RightBumper,
        Button::LeftTrigger,
        Button::RightTrigger,
        Button::Select,
        Button::Start,
        Button::Guide,
        Button::LeftStick,
        Button::RightStick,
    ];

    pub fn to_code(self) -> u16 {
        match self {
            Button::A => BTN_SOUTH,
            Button::B => BTN_EAST,
            Button::C => BTN_C,
            Button::X => BTN_NORTH,
            Button::Y => BTN_WEST,
            Button::Z => BTN_Z,
            Button::LeftBumper => BTN_TL,
            Button::RightBumper => BTN_TR,
            Button::LeftTrigger => BTN_TL2,
            Button::RightTrigger => BTN_TR2,
            Button::Select => BTN_SELECT,
            Button::Start => BTN_START,
            Button::Guide => BTN_MODE,
            Button::LeftStick => BTN_THUMBL,
            Button::RightStick => BTN_THUMBR,
        }
    }

    pub fn from_ev_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.to_code() == code)
    }
}

impl From<Button> for u16 {
    fn from(button: Button) -> u16 {
        button.to_code()
    }
}

/// Absolute axes a device may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    RX,
    RY,
    RZ,
}

impl Axis {
    pub fn to_code(self) -> u16 {
        match self {
            Axis::X => ABS_X,
            Axis::Y => ABS_Y,
            Axis::Z => ABS_Z,
            Axis::RX => ABS_RX,
            Axis::RY => ABS_RY,
            Axis::RZ => ABS_RZ,
        }
    }

    pub fn from_ev_code(code: u16) -> Option<Self> {
        match code {
            ABS_X => Some(Axis::X),
            ABS_Y => Some(Axis::Y),
            ABS_Z => Some(Axis::Z),
            ABS_RX => Some(Axis::RX),
            ABS_RY => Some(Axis::RY),
            ABS_RZ => Some(Axis::RZ),
            _ => None,
        }
    }
}

/// Declared range of one absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub axis: Axis,
    pub min: i32,
    pub max: i32,
    #[serde(default)]
    pub fuzz: i32,
    #[serde(default)]
    pub flat: i32,
}

impl AxisConfig {
    pub fn new(axis: Axis, min: i32, max: i32) -> Self {
        Self {
            axis,
            min,
            max,
            fuzz: 0,
            flat: 0,
        }
    }

    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

fn default_bustype() -> BusType {
    BusType::Usb
}

/// Everything needed to bring one virtual device up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub version: u16,
    #[serde(default = "default_bustype")]
    pub bustype: BusType,
    /// EV_KEY codes: keyboard keys and buttons alike.
    #[serde(default)]
    pub keys: Vec<u16>,
    #[serde(default)]
    pub axes: Vec<AxisConfig>,
    /// EV_REL codes.
    #[serde(default)]
    pub rel_axes: Vec<u16>,
}

impl DeviceConfig {
    pub fn capabilities(&self) -> CapabilitySet {
        let mut caps = CapabilitySet::default();
        for &code in &self.keys {
            caps.insert(EV_KEY, code);
        }
        for &code in &self.rel_axes {
            caps.insert(EV_REL, code);
        }
        for axis in &self.axes {
            caps.insert(EV_ABS, axis.axis.to_code());
        }
        caps
    }

    pub fn axis(&self, code: u16) -> Option<&AxisConfig> {
        self.axes.iter().find(|a| a.axis.to_code() == code)
    }
}

/// Logical input event, before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key { code: u16, pressed: bool },
    Abs { code: u16, value: i32 },
    Rel { code: u16, value: i32 },
}

impl InputEvent {
    pub fn event_type(&self) -> u16 {
        match self {
            InputEvent::Key { .. } => EV_KEY,
            InputEvent::Abs { .. } => EV_ABS,
            InputEvent::Rel { .. } => EV_REL,
        }
    }

    pub fn code(&self) -> u16 {
        match *self {
            InputEvent::Key { code, .. }
            | InputEvent::Abs { code, .. }
            | InputEvent::Rel { code, .. } => code,
        }
    }

    pub fn value(&self) -> i32 {
        match *self {
            InputEvent::Key { pressed: true, .. } => BTN_STATE_PRESSED,
            InputEvent::Key { pressed: false, .. } => BTN_STATE_RELEASED,
            InputEvent::Abs { value, .. } | InputEvent::Rel { value, .. } => value,
        }
    }
}

/// Event types and codes a device declared before creation.
///
/// Types iterate in numeric order (EV_KEY, EV_REL, EV_ABS), which is also the
/// order they are registered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    codes: BTreeMap<u16, BTreeSet<u16>>,
}

impl CapabilitySet {
    pub fn insert(&mut self, event_type: u16, code: u16) {
        self.codes.entry(event_type).or_default().insert(code);
    }

    pub fn contains(&self, event_type: u16, code: u16) -> bool {
        self.codes
            .get(&event_type)
            .is_some_and(|codes| codes.contains(&code))
    }

    pub fn event_types(&self) -> impl Iterator<Item = u16> + '_ {
        self.codes.keys().copied()
    }

    pub fn codes(&self, event_type: u16) -> impl Iterator<Item = u16> + '_ {
        self.codes.get(&event_type).into_iter().flatten().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.codes
            .iter()
            .flat_map(|(&ty, codes)| codes.iter().map(move |&code| (ty, code)))
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.values().map(BTreeSet::len).sum()
    }
}
