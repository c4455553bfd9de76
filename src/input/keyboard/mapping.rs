//! Translation of Windows scan codes and virtual keys into [`PhysicalKey`]s
//! and [`LogicalKey`]s.

use ::lazy_static::lazy_static;
use ::maplit::hashmap;
use ::std::collections::HashMap;
use ::tap::Pipe;

use super::{
    codes::*,
    keys::{
        logical, physical, LogicalKey, PhysicalKey, AUTOGENERATED_MASK, HID_PLANE, UNICODE_PLANE,
        WINDOWS_PLANE,
    },
};

/// Bit which marks an extended key in a normalized scan code. PageUp, for
/// instance, normalizes to `0xE049`.
const EXTENDED_SCANCODE_BIT: u16 = 0xE000;

lazy_static! {
    /// Normalized scan code to physical key.
    static ref SCANCODE_TO_PHYSICAL: HashMap<u16, PhysicalKey> = hashmap! {
        0x0001 => physical::ESCAPE,
        0x0002 => physical::DIGIT_1,
        0x0003 => physical::DIGIT_2,
        0x0004 => physical::DIGIT_3,
        0x0005 => physical::DIGIT_4,
        0x0006 => physical::DIGIT_5,
        0x0007 => physical::DIGIT_6,
        0x0008 => physical::DIGIT_7,
        0x0009 => physical::DIGIT_8,
        0x000a => physical::DIGIT_9,
        0x000b => physical::DIGIT_0,
        0x000c => physical::MINUS,
        0x000d => physical::EQUAL,
        0x000e => physical::BACKSPACE,
        0x000f => physical::TAB,
        0x0010 => physical::KEY_Q,
        0x0011 => physical::KEY_W,
        0x0012 => physical::KEY_E,
        0x0013 => physical::KEY_R,
        0x0014 => physical::KEY_T,
        0x0015 => physical::KEY_Y,
        0x0016 => physical::KEY_U,
        0x0017 => physical::KEY_I,
        0x0018 => physical::KEY_O,
        0x0019 => physical::KEY_P,
        0x001a => physical::BRACKET_LEFT,
        0x001b => physical::BRACKET_RIGHT,
        0x001c => physical::ENTER,
        0x001d => physical::CONTROL_LEFT,
        0x001e => physical::KEY_A,
        0x001f => physical::KEY_S,
        0x0020 => physical::KEY_D,
        0x0021 => physical::KEY_F,
        0x0022 => physical::KEY_G,
        0x0023 => physical::KEY_H,
        0x0024 => physical::KEY_J,
        0x0025 => physical::KEY_K,
        0x0026 => physical::KEY_L,
        0x0027 => physical::SEMICOLON,
        0x0028 => physical::QUOTE,
        0x0029 => physical::BACKQUOTE,
        0x002a => physical::SHIFT_LEFT,
        0x002b => physical::BACKSLASH,
        0x002c => physical::KEY_Z,
        0x002d => physical::KEY_X,
        0x002e => physical::KEY_C,
        0x002f => physical::KEY_V,
        0x0030 => physical::KEY_B,
        0x0031 => physical::KEY_N,
        0x0032 => physical::KEY_M,
        0x0033 => physical::COMMA,
        0x0034 => physical::PERIOD,
        0x0035 => physical::SLASH,
        0x0036 => physical::SHIFT_RIGHT,
        0x0037 => physical::NUMPAD_MULTIPLY,
        0x0038 => physical::ALT_LEFT,
        0x0039 => physical::SPACE,
        0x003a => physical::CAPS_LOCK,
        0x003b => physical::F1,
        0x003c => physical::F2,
        0x003d => physical::F3,
        0x003e => physical::F4,
        0x003f => physical::F5,
        0x0040 => physical::F6,
        0x0041 => physical::F7,
        0x0042 => physical::F8,
        0x0043 => physical::F9,
        0x0044 => physical::F10,
        0x0045 => physical::PAUSE,
        0x0046 => physical::SCROLL_LOCK,
        0x0047 => physical::NUMPAD_7,
        0x0048 => physical::NUMPAD_8,
        0x0049 => physical::NUMPAD_9,
        0x004a => physical::NUMPAD_SUBTRACT,
        0x004b => physical::NUMPAD_4,
        0x004c => physical::NUMPAD_5,
        0x004d => physical::NUMPAD_6,
        0x004e => physical::NUMPAD_ADD,
        0x004f => physical::NUMPAD_1,
        0x0050 => physical::NUMPAD_2,
        0x0051 => physical::NUMPAD_3,
        0x0052 => physical::NUMPAD_0,
        0x0053 => physical::NUMPAD_DECIMAL,
        0x0057 => physical::F11,
        0x0058 => physical::F12,
        0xe01c => physical::NUMPAD_ENTER,
        0xe01d => physical::CONTROL_RIGHT,
        0xe035 => physical::NUMPAD_DIVIDE,
        0xe037 => physical::PRINT_SCREEN,
        0xe038 => physical::ALT_RIGHT,
        0xe045 => physical::NUM_LOCK,
        0xe047 => physical::HOME,
        0xe048 => physical::ARROW_UP,
        0xe049 => physical::PAGE_UP,
        0xe04b => physical::ARROW_LEFT,
        0xe04d => physical::ARROW_RIGHT,
        0xe04f => physical::END,
        0xe050 => physical::ARROW_DOWN,
        0xe051 => physical::PAGE_DOWN,
        0xe052 => physical::INSERT,
        0xe053 => physical::DELETE,
        0xe05b => physical::META_LEFT,
        0xe05c => physical::META_RIGHT,
        0xe05d => physical::CONTEXT_MENU,
    };

    /// Keys whose virtual key is ambiguous (shared between both sides of the
    /// keyboard, or between the numpad and the navigation cluster), resolved
    /// by normalized scan code.
    static ref SCANCODE_TO_LOGICAL: HashMap<u16, LogicalKey> = hashmap! {
        0x001d => logical::CONTROL_LEFT,
        0xe01d => logical::CONTROL_RIGHT,
        0x002a => logical::SHIFT_LEFT,
        0x0036 => logical::SHIFT_RIGHT,
        0x0038 => logical::ALT_LEFT,
        0xe038 => logical::ALT_RIGHT,
        0xe05b => logical::META_LEFT,
        0xe05c => logical::META_RIGHT,
        0x0037 => logical::NUMPAD_MULTIPLY,
        0x004a => logical::NUMPAD_SUBTRACT,
        0x004e => logical::NUMPAD_ADD,
        0xe035 => logical::NUMPAD_DIVIDE,
        0xe01c => logical::NUMPAD_ENTER,
        0x0047 => logical::NUMPAD_7,
        0x0048 => logical::NUMPAD_8,
        0x0049 => logical::NUMPAD_9,
        0x004b => logical::NUMPAD_4,
        0x004c => logical::NUMPAD_5,
        0x004d => logical::NUMPAD_6,
        0x004f => logical::NUMPAD_1,
        0x0050 => logical::NUMPAD_2,
        0x0051 => logical::NUMPAD_3,
        0x0052 => logical::NUMPAD_0,
        0x0053 => logical::NUMPAD_DECIMAL,
    };

    /// Virtual key to logical key, for keys without a printable label.
    static ref VIRTUAL_KEY_TO_LOGICAL: HashMap<u32, LogicalKey> = hashmap! {
        VK_BACK => logical::BACKSPACE,
        VK_TAB => logical::TAB,
        VK_CLEAR => logical::CLEAR,
        VK_RETURN => logical::ENTER,
        VK_SHIFT => logical::SHIFT_LEFT,
        VK_CONTROL => logical::CONTROL_LEFT,
        VK_MENU => logical::ALT_LEFT,
        VK_PAUSE => logical::PAUSE,
        VK_CAPITAL => logical::CAPS_LOCK,
        VK_ESCAPE => logical::ESCAPE,
        VK_PRIOR => logical::PAGE_UP,
        VK_NEXT => logical::PAGE_DOWN,
        VK_END => logical::END,
        VK_HOME => logical::HOME,
        VK_LEFT => logical::ARROW_LEFT,
        VK_UP => logical::ARROW_UP,
        VK_RIGHT => logical::ARROW_RIGHT,
        VK_DOWN => logical::ARROW_DOWN,
        VK_SNAPSHOT => logical::PRINT_SCREEN,
        VK_INSERT => logical::INSERT,
        VK_DELETE => logical::DELETE,
        VK_LWIN => logical::META_LEFT,
        VK_RWIN => logical::META_RIGHT,
        VK_APPS => logical::CONTEXT_MENU,
        VK_NUMPAD0 => logical::NUMPAD_0,
        VK_NUMPAD1 => logical::NUMPAD_1,
        VK_NUMPAD2 => logical::NUMPAD_2,
        VK_NUMPAD3 => logical::NUMPAD_3,
        VK_NUMPAD4 => logical::NUMPAD_4,
        VK_NUMPAD5 => logical::NUMPAD_5,
        VK_NUMPAD6 => logical::NUMPAD_6,
        VK_NUMPAD7 => logical::NUMPAD_7,
        VK_NUMPAD8 => logical::NUMPAD_8,
        VK_NUMPAD9 => logical::NUMPAD_9,
        VK_MULTIPLY => logical::NUMPAD_MULTIPLY,
        VK_ADD => logical::NUMPAD_ADD,
        VK_SUBTRACT => logical::NUMPAD_SUBTRACT,
        VK_DECIMAL => logical::NUMPAD_DECIMAL,
        VK_DIVIDE => logical::NUMPAD_DIVIDE,
        VK_F1 => logical::F1,
        VK_F2 => logical::F2,
        VK_F3 => logical::F3,
        VK_F4 => logical::F4,
        VK_F5 => logical::F5,
        VK_F6 => logical::F6,
        VK_F7 => logical::F7,
        VK_F8 => logical::F8,
        VK_F9 => logical::F9,
        VK_F10 => logical::F10,
        VK_F11 => logical::F11,
        VK_F12 => logical::F12,
        VK_NUMLOCK => logical::NUM_LOCK,
        VK_SCROLL => logical::SCROLL_LOCK,
        VK_LSHIFT => logical::SHIFT_LEFT,
        VK_RSHIFT => logical::SHIFT_RIGHT,
        VK_LCONTROL => logical::CONTROL_LEFT,
        VK_RCONTROL => logical::CONTROL_RIGHT,
        VK_LMENU => logical::ALT_LEFT,
        VK_RMENU => logical::ALT_RIGHT,
    };
}

/// Folds the extended flag into the scan code, matching the numbering used by
/// Chromium (e.g. PageUp is `0xE049`).
pub fn normalize_scancode(scancode: u32, extended: bool) -> u16 {
    (scancode & 0xFF) as u16 | if extended { EXTENDED_SCANCODE_BIT } else { 0 }
}

fn is_ascii_printable(code: u32) -> bool {
    (0x20..=0x7F).contains(&code)
}

fn is_control_character(code: u32) -> bool {
    code <= 0x1F || (0x7F..=0x9F).contains(&code)
}

/// Maps Windows key identification onto platform independent key codes.
///
/// The lookup tables are immutable and built once per process. A
/// [`KeyMapper`] only borrows them, so it is cheap to copy.
#[derive(Clone, Copy, Debug)]
pub struct KeyMapper {
    scancode_to_physical: &'static HashMap<u16, PhysicalKey>,
    scancode_to_logical: &'static HashMap<u16, LogicalKey>,
    virtual_key_to_logical: &'static HashMap<u32, LogicalKey>,
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMapper {
    /// A mapper over the built-in Windows tables.
    pub fn new() -> Self {
        Self {
            scancode_to_physical: &SCANCODE_TO_PHYSICAL,
            scancode_to_logical: &SCANCODE_TO_LOGICAL,
            virtual_key_to_logical: &VIRTUAL_KEY_TO_LOGICAL,
        }
    }

    /// Resolves the physical key for a scan code.
    ///
    /// Scan codes missing from the table are passed through in the HID plane.
    pub fn physical_key(&self, scancode: u32, extended: bool) -> PhysicalKey {
        normalize_scancode(scancode, extended)
            .pipe(|code| self.scancode_to_physical.get(&code))
            .copied()
            .unwrap_or(PhysicalKey(u64::from(scancode) | HID_PLANE))
    }

    /// Resolves the logical key for a virtual key.
    ///
    /// Resolution order:
    ///
    /// 1. The normalized scan code, for virtual keys shared by several
    ///    physical keys (left/right modifiers, numpad).
    /// 2. The virtual key table.
    /// 3. ASCII printable virtual keys, folded to lower case.
    /// 4. Any other non-control value, taken as a code point.
    /// 5. Everything else is minted in the Windows plane and marked as
    ///    autogenerated.
    pub fn logical_key(&self, virtual_key: u32, extended: bool, scancode: u32) -> LogicalKey {
        if let Some(&key) = self
            .scancode_to_logical
            .get(&normalize_scancode(scancode, extended))
        {
            return key;
        }

        if let Some(&key) = self.virtual_key_to_logical.get(&virtual_key) {
            return key;
        }

        let code = u64::from(virtual_key);
        if is_ascii_printable(virtual_key) {
            LogicalKey(u64::from((virtual_key as u8).to_ascii_lowercase()))
        } else if !is_control_character(virtual_key) {
            LogicalKey(code | UNICODE_PLANE)
        } else {
            LogicalKey(code | WINDOWS_PLANE | AUTOGENERATED_MASK)
        }
    }
}
