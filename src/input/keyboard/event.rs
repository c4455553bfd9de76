//! Adapter for Win32 keystroke messages into raw key notifications.

use ::deku::prelude::*;
use ::strum::Display;

use super::codes::{WM_KEYDOWN, WM_KEYUP, WM_SYSKEYDOWN, WM_SYSKEYUP};
use crate::errors::{self, Error};

/// Whether a raw notification reports a key going down or coming up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum KeyAction {
    Down,
    Up,
}

impl TryFrom<u32> for KeyAction {
    type Error = Error;

    /// Converts a keystroke message identifier. System keystrokes (those made
    /// while ALT is held) map to the same actions as regular keystrokes.
    fn try_from(msg: u32) -> errors::Result<Self> {
        match msg {
            WM_KEYDOWN | WM_SYSKEYDOWN => Ok(Self::Down),
            WM_KEYUP | WM_SYSKEYUP => Ok(Self::Up),
            other => Err(Error::UnknownAction(other)),
        }
    }
}

/// The parameters of a window procedure message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyMessage {
    pub umsg: u32,
    pub wparam: usize,
    pub lparam: isize,
}

/// Struct representation of the Win32 keystroke message flags.
///
/// Message flag bitfield definition:
/// <https://learn.microsoft.com/en-us/windows/win32/inputdev/about-keyboard-input#keystroke-message-flags>
#[derive(Clone, Copy, Debug, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct KeystrokeFlags {
    /// Bit 31. The transition state. The value is 1 if the key is being
    /// released, or it is 0 if the key is being pressed.
    #[deku(bits = "1")]
    pub is_key_release: bool,

    /// Bit 30. The previous key state. The value is 1 if the key is down
    /// before the message is sent, or it is 0 if the key is up.
    #[deku(bits = "1")]
    pub was_previous_state_down: bool,

    /// Bit 29. The context code. 1 if the ALT key is held down while the key
    /// is pressed, always 0 for a WM_KEYUP event.
    #[deku(bits = "1")]
    pub is_alt_pressed: bool,

    /// Bit 24. Set for extended keys, such as the right-hand ALT and CTRL
    /// keys or the navigation cluster.
    #[deku(pad_bits_before = "4", bits = "1")]
    pub is_extended_key: bool,

    /// Bits 16-23. The scan code. The value depends on the OEM.
    pub scan_code: u8,

    /// Bits 0-15. The repeat count for the current message.
    #[deku(bits = "16")]
    pub repeat_count: u16,
}

impl From<isize> for KeystrokeFlags {
    fn from(lparam: isize) -> Self {
        // Any 32-bit pattern is a valid set of flags.
        Self::from_bytes((&(lparam as u32).to_be_bytes(), 0))
            .expect("keystroke flags are decoded from exactly 32 bits")
            .1
    }
}

/// A key notification as received from the platform, before classification.
///
/// These are the arguments to [`Keyboard::keyboard_hook`], bundled together.
///
/// [`Keyboard::keyboard_hook`]: crate::input::keyboard::Keyboard::keyboard_hook
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub virtual_key: u32,
    pub scancode: u32,
    pub action: KeyAction,
    /// The UTF-32 character the keystroke produced, or 0 for none.
    pub character: u32,
    pub extended: bool,
    /// The OS considers this down a repeat of a key which is already down.
    pub was_down: bool,
}

impl RawKeyEvent {
    /// Attaches the character a keystroke produced. On Windows the character
    /// arrives separately in the `WM_CHAR` message which follows a key down.
    pub fn with_character(self, character: char) -> Self {
        Self {
            character: u32::from(character),
            ..self
        }
    }
}

impl TryFrom<KeyMessage> for RawKeyEvent {
    type Error = Error;

    fn try_from(msg: KeyMessage) -> errors::Result<Self> {
        let action =
            KeyAction::try_from(msg.umsg).map_err(|_| Error::NotAKeyMessage(msg.umsg))?;
        let flags = KeystrokeFlags::from(msg.lparam);

        Ok(Self {
            virtual_key: msg.wparam as u32,
            scancode: u32::from(flags.scan_code),
            action,
            character: 0,
            extended: flags.is_extended_key,
            was_down: flags.was_previous_state_down,
        })
    }
}
