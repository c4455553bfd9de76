//! Platform independent key identifiers.
//!
//! Both identifiers are 64-bit values split into a *plane* (the upper bits,
//! naming where the value came from) and a *value* within that plane (the
//! lower 32 bits).

use ::std::fmt;

/// Mask for the value portion of a key identifier.
pub const VALUE_MASK: u64 = 0x0_0000_FFFF_FFFF;

/// Plane for keys which have a Unicode representation. The value is the code
/// point itself.
pub const UNICODE_PLANE: u64 = 0x0_0000_0000_0000;

/// Plane for physical keys which have no entry in the scan code table. The
/// value is the raw Windows scan code.
pub const HID_PLANE: u64 = 0x0_0001_0000_0000;

/// Plane for logical keys minted from an unrecognized Windows virtual key.
pub const WINDOWS_PLANE: u64 = 0x0_0007_0000_0000;

/// Marks a logical key which was generated on the fly rather than taken from
/// a table. Such keys are not stable across runs or platforms.
pub const AUTOGENERATED_MASK: u64 = 0x0_0100_0000_0000;

/// Identifies a key by its position on the keyboard, regardless of the active
/// layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysicalKey(pub u64);

/// Identifies the meaning of a keystroke. Unlike [`PhysicalKey`], this depends
/// on the active layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalKey(pub u64);

macro_rules! key_id_impl {
    ($ty:ident) => {
        impl $ty {
            /// Placeholder for a key which has never been observed.
            pub const NONE: Self = Self(0);

            /// The raw 64-bit identifier.
            pub const fn value(self) -> u64 {
                self.0
            }

            /// The plane portion of the identifier.
            pub const fn plane(self) -> u64 {
                self.0 & !VALUE_MASK
            }

            /// Returns `true` for the [`NONE`](Self::NONE) placeholder.
            pub const fn is_none(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{:011x}", self.0)
            }
        }

        impl From<u64> for $ty {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

key_id_impl!(PhysicalKey);
key_id_impl!(LogicalKey);

impl LogicalKey {
    /// Returns `true` if the key was minted for an unrecognized virtual key.
    pub const fn is_autogenerated(self) -> bool {
        self.0 & AUTOGENERATED_MASK != 0
    }
}

/// Named physical keys. Values are USB HID usages (page 0x07).
pub mod physical {
    use super::PhysicalKey;

    pub const KEY_A: PhysicalKey = PhysicalKey(0x0007_0004);
    pub const KEY_B: PhysicalKey = PhysicalKey(0x0007_0005);
    pub const KEY_C: PhysicalKey = PhysicalKey(0x0007_0006);
    pub const KEY_D: PhysicalKey = PhysicalKey(0x0007_0007);
    pub const KEY_E: PhysicalKey = PhysicalKey(0x0007_0008);
    pub const KEY_F: PhysicalKey = PhysicalKey(0x0007_0009);
    pub const KEY_G: PhysicalKey = PhysicalKey(0x0007_000a);
    pub const KEY_H: PhysicalKey = PhysicalKey(0x0007_000b);
    pub const KEY_I: PhysicalKey = PhysicalKey(0x0007_000c);
    pub const KEY_J: PhysicalKey = PhysicalKey(0x0007_000d);
    pub const KEY_K: PhysicalKey = PhysicalKey(0x0007_000e);
    pub const KEY_L: PhysicalKey = PhysicalKey(0x0007_000f);
    pub const KEY_M: PhysicalKey = PhysicalKey(0x0007_0010);
    pub const KEY_N: PhysicalKey = PhysicalKey(0x0007_0011);
    pub const KEY_O: PhysicalKey = PhysicalKey(0x0007_0012);
    pub const KEY_P: PhysicalKey = PhysicalKey(0x0007_0013);
    pub const KEY_Q: PhysicalKey = PhysicalKey(0x0007_0014);
    pub const KEY_R: PhysicalKey = PhysicalKey(0x0007_0015);
    pub const KEY_S: PhysicalKey = PhysicalKey(0x0007_0016);
    pub const KEY_T: PhysicalKey = PhysicalKey(0x0007_0017);
    pub const KEY_U: PhysicalKey = PhysicalKey(0x0007_0018);
    pub const KEY_V: PhysicalKey = PhysicalKey(0x0007_0019);
    pub const KEY_W: PhysicalKey = PhysicalKey(0x0007_001a);
    pub const KEY_X: PhysicalKey = PhysicalKey(0x0007_001b);
    pub const KEY_Y: PhysicalKey = PhysicalKey(0x0007_001c);
    pub const KEY_Z: PhysicalKey = PhysicalKey(0x0007_001d);
    pub const DIGIT_1: PhysicalKey = PhysicalKey(0x0007_001e);
    pub const DIGIT_2: PhysicalKey = PhysicalKey(0x0007_001f);
    pub const DIGIT_3: PhysicalKey = PhysicalKey(0x0007_0020);
    pub const DIGIT_4: PhysicalKey = PhysicalKey(0x0007_0021);
    pub const DIGIT_5: PhysicalKey = PhysicalKey(0x0007_0022);
    pub const DIGIT_6: PhysicalKey = PhysicalKey(0x0007_0023);
    pub const DIGIT_7: PhysicalKey = PhysicalKey(0x0007_0024);
    pub const DIGIT_8: PhysicalKey = PhysicalKey(0x0007_0025);
    pub const DIGIT_9: PhysicalKey = PhysicalKey(0x0007_0026);
    pub const DIGIT_0: PhysicalKey = PhysicalKey(0x0007_0027);
    pub const ENTER: PhysicalKey = PhysicalKey(0x0007_0028);
    pub const ESCAPE: PhysicalKey = PhysicalKey(0x0007_0029);
    pub const BACKSPACE: PhysicalKey = PhysicalKey(0x0007_002a);
    pub const TAB: PhysicalKey = PhysicalKey(0x0007_002b);
    pub const SPACE: PhysicalKey = PhysicalKey(0x0007_002c);
    pub const MINUS: PhysicalKey = PhysicalKey(0x0007_002d);
    pub const EQUAL: PhysicalKey = PhysicalKey(0x0007_002e);
    pub const BRACKET_LEFT: PhysicalKey = PhysicalKey(0x0007_002f);
    pub const BRACKET_RIGHT: PhysicalKey = PhysicalKey(0x0007_0030);
    pub const BACKSLASH: PhysicalKey = PhysicalKey(0x0007_0031);
    pub const SEMICOLON: PhysicalKey = PhysicalKey(0x0007_0033);
    pub const QUOTE: PhysicalKey = PhysicalKey(0x0007_0034);
    pub const BACKQUOTE: PhysicalKey = PhysicalKey(0x0007_0035);
    pub const COMMA: PhysicalKey = PhysicalKey(0x0007_0036);
    pub const PERIOD: PhysicalKey = PhysicalKey(0x0007_0037);
    pub const SLASH: PhysicalKey = PhysicalKey(0x0007_0038);
    pub const CAPS_LOCK: PhysicalKey = PhysicalKey(0x0007_0039);
    pub const F1: PhysicalKey = PhysicalKey(0x0007_003a);
    pub const F2: PhysicalKey = PhysicalKey(0x0007_003b);
    pub const F3: PhysicalKey = PhysicalKey(0x0007_003c);
    pub const F4: PhysicalKey = PhysicalKey(0x0007_003d);
    pub const F5: PhysicalKey = PhysicalKey(0x0007_003e);
    pub const F6: PhysicalKey = PhysicalKey(0x0007_003f);
    pub const F7: PhysicalKey = PhysicalKey(0x0007_0040);
    pub const F8: PhysicalKey = PhysicalKey(0x0007_0041);
    pub const F9: PhysicalKey = PhysicalKey(0x0007_0042);
    pub const F10: PhysicalKey = PhysicalKey(0x0007_0043);
    pub const F11: PhysicalKey = PhysicalKey(0x0007_0044);
    pub const F12: PhysicalKey = PhysicalKey(0x0007_0045);
    pub const PRINT_SCREEN: PhysicalKey = PhysicalKey(0x0007_0046);
    pub const SCROLL_LOCK: PhysicalKey = PhysicalKey(0x0007_0047);
    pub const PAUSE: PhysicalKey = PhysicalKey(0x0007_0048);
    pub const INSERT: PhysicalKey = PhysicalKey(0x0007_0049);
    pub const HOME: PhysicalKey = PhysicalKey(0x0007_004a);
    pub const PAGE_UP: PhysicalKey = PhysicalKey(0x0007_004b);
    pub const DELETE: PhysicalKey = PhysicalKey(0x0007_004c);
    pub const END: PhysicalKey = PhysicalKey(0x0007_004d);
    pub const PAGE_DOWN: PhysicalKey = PhysicalKey(0x0007_004e);
    pub const ARROW_RIGHT: PhysicalKey = PhysicalKey(0x0007_004f);
    pub const ARROW_LEFT: PhysicalKey = PhysicalKey(0x0007_0050);
    pub const ARROW_DOWN: PhysicalKey = PhysicalKey(0x0007_0051);
    pub const ARROW_UP: PhysicalKey = PhysicalKey(0x0007_0052);
    pub const NUM_LOCK: PhysicalKey = PhysicalKey(0x0007_0053);
    pub const NUMPAD_DIVIDE: PhysicalKey = PhysicalKey(0x0007_0054);
    pub const NUMPAD_MULTIPLY: PhysicalKey = PhysicalKey(0x0007_0055);
    pub const NUMPAD_SUBTRACT: PhysicalKey = PhysicalKey(0x0007_0056);
    pub const NUMPAD_ADD: PhysicalKey = PhysicalKey(0x0007_0057);
    pub const NUMPAD_ENTER: PhysicalKey = PhysicalKey(0x0007_0058);
    pub const NUMPAD_1: PhysicalKey = PhysicalKey(0x0007_0059);
    pub const NUMPAD_2: PhysicalKey = PhysicalKey(0x0007_005a);
    pub const NUMPAD_3: PhysicalKey = PhysicalKey(0x0007_005b);
    pub const NUMPAD_4: PhysicalKey = PhysicalKey(0x0007_005c);
    pub const NUMPAD_5: PhysicalKey = PhysicalKey(0x0007_005d);
    pub const NUMPAD_6: PhysicalKey = PhysicalKey(0x0007_005e);
    pub const NUMPAD_7: PhysicalKey = PhysicalKey(0x0007_005f);
    pub const NUMPAD_8: PhysicalKey = PhysicalKey(0x0007_0060);
    pub const NUMPAD_9: PhysicalKey = PhysicalKey(0x0007_0061);
    pub const NUMPAD_0: PhysicalKey = PhysicalKey(0x0007_0062);
    pub const NUMPAD_DECIMAL: PhysicalKey = PhysicalKey(0x0007_0063);
    pub const CONTEXT_MENU: PhysicalKey = PhysicalKey(0x0007_0065);
    pub const CONTROL_LEFT: PhysicalKey = PhysicalKey(0x0007_00e0);
    pub const SHIFT_LEFT: PhysicalKey = PhysicalKey(0x0007_00e1);
    pub const ALT_LEFT: PhysicalKey = PhysicalKey(0x0007_00e2);
    pub const META_LEFT: PhysicalKey = PhysicalKey(0x0007_00e3);
    pub const CONTROL_RIGHT: PhysicalKey = PhysicalKey(0x0007_00e4);
    pub const SHIFT_RIGHT: PhysicalKey = PhysicalKey(0x0007_00e5);
    pub const ALT_RIGHT: PhysicalKey = PhysicalKey(0x0007_00e6);
    pub const META_RIGHT: PhysicalKey = PhysicalKey(0x0007_00e7);
}

/// Named logical keys for non-printable and side-specific keys. Printable keys
/// use their lower case code point in the Unicode plane instead.
pub mod logical {
    use super::LogicalKey;

    pub const BACKSPACE: LogicalKey = LogicalKey(0x01_0000_0008);
    pub const TAB: LogicalKey = LogicalKey(0x01_0000_0009);
    pub const ENTER: LogicalKey = LogicalKey(0x01_0000_000d);
    pub const ESCAPE: LogicalKey = LogicalKey(0x01_0000_001b);
    pub const DELETE: LogicalKey = LogicalKey(0x01_0000_007f);
    pub const CAPS_LOCK: LogicalKey = LogicalKey(0x01_0000_0104);
    pub const NUM_LOCK: LogicalKey = LogicalKey(0x01_0000_010a);
    pub const SCROLL_LOCK: LogicalKey = LogicalKey(0x01_0000_010c);
    pub const ARROW_DOWN: LogicalKey = LogicalKey(0x01_0000_0301);
    pub const ARROW_LEFT: LogicalKey = LogicalKey(0x01_0000_0302);
    pub const ARROW_RIGHT: LogicalKey = LogicalKey(0x01_0000_0303);
    pub const ARROW_UP: LogicalKey = LogicalKey(0x01_0000_0304);
    pub const END: LogicalKey = LogicalKey(0x01_0000_0305);
    pub const HOME: LogicalKey = LogicalKey(0x01_0000_0306);
    pub const PAGE_DOWN: LogicalKey = LogicalKey(0x01_0000_0307);
    pub const PAGE_UP: LogicalKey = LogicalKey(0x01_0000_0308);
    pub const CLEAR: LogicalKey = LogicalKey(0x01_0000_0401);
    pub const INSERT: LogicalKey = LogicalKey(0x01_0000_0407);
    pub const CONTEXT_MENU: LogicalKey = LogicalKey(0x01_0000_0505);
    pub const PAUSE: LogicalKey = LogicalKey(0x01_0000_0509);
    pub const PRINT_SCREEN: LogicalKey = LogicalKey(0x01_0000_0608);
    pub const F1: LogicalKey = LogicalKey(0x01_0000_0801);
    pub const F2: LogicalKey = LogicalKey(0x01_0000_0802);
    pub const F3: LogicalKey = LogicalKey(0x01_0000_0803);
    pub const F4: LogicalKey = LogicalKey(0x01_0000_0804);
    pub const F5: LogicalKey = LogicalKey(0x01_0000_0805);
    pub const F6: LogicalKey = LogicalKey(0x01_0000_0806);
    pub const F7: LogicalKey = LogicalKey(0x01_0000_0807);
    pub const F8: LogicalKey = LogicalKey(0x01_0000_0808);
    pub const F9: LogicalKey = LogicalKey(0x01_0000_0809);
    pub const F10: LogicalKey = LogicalKey(0x01_0000_080a);
    pub const F11: LogicalKey = LogicalKey(0x01_0000_080b);
    pub const F12: LogicalKey = LogicalKey(0x01_0000_080c);

    pub const CONTROL_LEFT: LogicalKey = LogicalKey(0x02_0000_0100);
    pub const CONTROL_RIGHT: LogicalKey = LogicalKey(0x02_0000_0101);
    pub const SHIFT_LEFT: LogicalKey = LogicalKey(0x02_0000_0102);
    pub const SHIFT_RIGHT: LogicalKey = LogicalKey(0x02_0000_0103);
    pub const ALT_LEFT: LogicalKey = LogicalKey(0x02_0000_0104);
    pub const ALT_RIGHT: LogicalKey = LogicalKey(0x02_0000_0105);
    pub const META_LEFT: LogicalKey = LogicalKey(0x02_0000_0106);
    pub const META_RIGHT: LogicalKey = LogicalKey(0x02_0000_0107);
    pub const NUMPAD_ENTER: LogicalKey = LogicalKey(0x02_0000_020d);
    pub const NUMPAD_MULTIPLY: LogicalKey = LogicalKey(0x02_0000_022a);
    pub const NUMPAD_ADD: LogicalKey = LogicalKey(0x02_0000_022b);
    pub const NUMPAD_SUBTRACT: LogicalKey = LogicalKey(0x02_0000_022d);
    pub const NUMPAD_DECIMAL: LogicalKey = LogicalKey(0x02_0000_022e);
    pub const NUMPAD_DIVIDE: LogicalKey = LogicalKey(0x02_0000_022f);
    pub const NUMPAD_0: LogicalKey = LogicalKey(0x02_0000_0230);
    pub const NUMPAD_1: LogicalKey = LogicalKey(0x02_0000_0231);
    pub const NUMPAD_2: LogicalKey = LogicalKey(0x02_0000_0232);
    pub const NUMPAD_3: LogicalKey = LogicalKey(0x02_0000_0233);
    pub const NUMPAD_4: LogicalKey = LogicalKey(0x02_0000_0234);
    pub const NUMPAD_5: LogicalKey = LogicalKey(0x02_0000_0235);
    pub const NUMPAD_6: LogicalKey = LogicalKey(0x02_0000_0236);
    pub const NUMPAD_7: LogicalKey = LogicalKey(0x02_0000_0237);
    pub const NUMPAD_8: LogicalKey = LogicalKey(0x02_0000_0238);
    pub const NUMPAD_9: LogicalKey = LogicalKey(0x02_0000_0239);
}
