//! Win32 keyboard message identifiers and virtual-key codes.
//!
//! These mirror the values in `WinUser.h`. They are defined here rather than
//! taken from the `windows` crate so that the key handling logic builds and
//! runs on every host.

use ::strum::{Display, EnumIter};

pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_CHAR: u32 = 0x0102;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;

/// Defines the [`KeyCode`] enum together with a `VK_*` constant for each
/// variant, named after the variant in upper case.
macro_rules! virtual_keys {
    ($( $(#[$meta:meta])* $name:ident = $value:literal ),* $(,)?) => {
        ::paste::paste! {
            $(
                $(#[$meta])*
                pub const [<VK_ $name:upper>]: u32 = $value;
            )*
        }

        /// A Win32 virtual-key code known to this crate.
        ///
        /// Key handling accepts any `u32` virtual key, including values which
        /// have no variant here. The enum exists for the keys the crate gives
        /// special treatment to, and for readable tests.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display)]
        #[repr(u8)]
        pub enum KeyCode {
            $( $(#[$meta])* $name = $value, )*
        }

        impl KeyCode {
            /// The raw Win32 virtual-key value.
            pub const fn value(self) -> u32 {
                self as u32
            }
        }

        impl TryFrom<u32> for KeyCode {
            type Error = u32;

            /// Converts a raw virtual key, returning the raw value back if it
            /// has no variant.
            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $( $value => Ok(Self::$name), )*
                    other => Err(other),
                }
            }
        }

        impl TryFrom<usize> for KeyCode {
            type Error = usize;

            fn try_from(value: usize) -> Result<Self, Self::Error> {
                u32::try_from(value)
                    .ok()
                    .and_then(|v| Self::try_from(v).ok())
                    .ok_or(value)
            }
        }
    };
}

virtual_keys! {
    /// BACKSPACE key
    Back = 0x08,
    Tab = 0x09,
    Clear = 0x0C,
    /// ENTER key
    Return = 0x0D,
    Shift = 0x10,
    Control = 0x11,
    /// ALT key
    Menu = 0x12,
    Pause = 0x13,
    /// CAPS LOCK key
    Capital = 0x14,
    Escape = 0x1B,
    Space = 0x20,
    /// PAGE UP key
    Prior = 0x21,
    /// PAGE DOWN key
    Next = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    /// PRINT SCREEN key
    Snapshot = 0x2C,
    Insert = 0x2D,
    Delete = 0x2E,
    Key0 = 0x30,
    Key1 = 0x31,
    Key2 = 0x32,
    Key3 = 0x33,
    Key4 = 0x34,
    Key5 = 0x35,
    Key6 = 0x36,
    Key7 = 0x37,
    Key8 = 0x38,
    Key9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    LWin = 0x5B,
    RWin = 0x5C,
    /// Context menu key
    Apps = 0x5D,
    Numpad0 = 0x60,
    Numpad1 = 0x61,
    Numpad2 = 0x62,
    Numpad3 = 0x63,
    Numpad4 = 0x64,
    Numpad5 = 0x65,
    Numpad6 = 0x66,
    Numpad7 = 0x67,
    Numpad8 = 0x68,
    Numpad9 = 0x69,
    Multiply = 0x6A,
    Add = 0x6B,
    Subtract = 0x6D,
    Decimal = 0x6E,
    Divide = 0x6F,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    NumLock = 0x90,
    /// SCROLL LOCK key
    Scroll = 0x91,
    LShift = 0xA0,
    RShift = 0xA1,
    LControl = 0xA2,
    RControl = 0xA3,
    LMenu = 0xA4,
    RMenu = 0xA5,
    /// Reported in place of the real key while an IME is processing input.
    ProcessKey = 0xE5,
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::strum::IntoEnumIterator;

    #[test]
    fn test_constants_match_variants() {
        assert_eq!(VK_CAPITAL, KeyCode::Capital.value());
        assert_eq!(VK_LSHIFT, 0xA0);
        assert_eq!(VK_NUMLOCK, 0x90);
        assert_eq!(VK_PROCESSKEY, 0xE5);
        assert_eq!(VK_A, u32::from(b'A'));
    }

    #[test]
    fn test_try_from_round_trips_every_variant() {
        for key_code in KeyCode::iter() {
            assert_eq!(KeyCode::try_from(key_code.value()), Ok(key_code));
        }
    }

    #[test]
    fn test_try_from_unknown() {
        assert_eq!(KeyCode::try_from(0xFFu32), Err(0xFF));
        assert_eq!(KeyCode::try_from(0x1_0048usize), Err(0x1_0048));
        assert_eq!(KeyCode::try_from(0x48usize), Ok(KeyCode::H));
    }
}
