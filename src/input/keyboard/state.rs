//! Queries against the authoritative (OS) keyboard state.

use ::std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::codes::*;

/// The state of a virtual key as reported by the OS, in the bit layout of
/// Win32 `GetKeyState`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState(pub i16);

impl KeyState {
    /// Bit 0: the key is toggled on (lock keys).
    pub const TOGGLED: i16 = 0x01;
    /// Bit 7: the key is held down.
    pub const PRESSED: i16 = 0x80;

    pub const fn new(pressed: bool, toggled: bool) -> Self {
        let mut bits = 0;
        if pressed {
            bits |= Self::PRESSED;
        }
        if toggled {
            bits |= Self::TOGGLED;
        }
        Self(bits)
    }

    pub const fn is_toggled(self) -> bool {
        self.0 & Self::TOGGLED != 0
    }

    pub const fn is_pressed(self) -> bool {
        self.0 & Self::PRESSED != 0
    }
}

/// Source of the authoritative keyboard state, consulted to correct drift in
/// the tracked state of modifier and lock keys.
///
/// Queries are made synchronously on the thread which drives the keyboard and
/// must be cheap.
pub trait KeyboardState {
    /// The current state of the virtual key.
    fn key_state(&self, virtual_key: u32) -> KeyState;

    /// The scan code which produces the virtual key, or `0` if it cannot be
    /// determined.
    ///
    /// Used once per key when building a [`Keyboard`], to learn the identity
    /// of the modifier and lock keys before they are first pressed. The
    /// default implementation knows the standard scan codes of those keys.
    ///
    /// [`Keyboard`]: crate::input::keyboard::Keyboard
    fn scan_code_for(&self, virtual_key: u32) -> u32 {
        standard_scan_code(virtual_key).unwrap_or(0)
    }
}

/// The set 1 scan code of a modifier or lock key on a standard keyboard.
pub fn standard_scan_code(virtual_key: u32) -> Option<u32> {
    match virtual_key {
        VK_SHIFT | VK_LSHIFT => Some(0x2A),
        VK_RSHIFT => Some(0x36),
        VK_CONTROL | VK_LCONTROL | VK_RCONTROL => Some(0x1D),
        VK_MENU | VK_LMENU | VK_RMENU => Some(0x38),
        VK_CAPITAL => Some(0x3A),
        VK_NUMLOCK => Some(0x45),
        VK_SCROLL => Some(0x46),
        _ => None,
    }
}

impl<K> KeyboardState for &K
where
    K: KeyboardState + ?Sized,
{
    fn key_state(&self, virtual_key: u32) -> KeyState {
        (**self).key_state(virtual_key)
    }

    fn scan_code_for(&self, virtual_key: u32) -> u32 {
        (**self).scan_code_for(virtual_key)
    }
}

impl<K> KeyboardState for Rc<K>
where
    K: KeyboardState + ?Sized,
{
    fn key_state(&self, virtual_key: u32) -> KeyState {
        (**self).key_state(virtual_key)
    }

    fn scan_code_for(&self, virtual_key: u32) -> u32 {
        (**self).scan_code_for(virtual_key)
    }
}

/// An in-memory [`KeyboardState`], for hosts which have no OS key state to
/// query and for driving a [`Keyboard`] in tests.
///
/// Keys which were never set report neither pressed nor toggled. The table
/// uses interior mutability so it can be shared (e.g. via [`Rc`]) with the
/// [`Keyboard`] while still being updated.
///
/// [`Keyboard`]: crate::input::keyboard::Keyboard
#[derive(Debug)]
pub struct KeyStateTable {
    states: RefCell<HashMap<u32, KeyState>>,
    resolve_scan_codes: bool,
}

impl Default for KeyStateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyStateTable {
    pub fn new() -> Self {
        Self {
            states: RefCell::new(HashMap::new()),
            resolve_scan_codes: true,
        }
    }

    /// A table which cannot map virtual keys to scan codes, so modifier and
    /// lock keys stay unidentified until they are first seen in an event.
    pub fn without_scan_codes() -> Self {
        Self {
            resolve_scan_codes: false,
            ..Self::new()
        }
    }

    pub fn set(&self, virtual_key: u32, state: KeyState) {
        self.states.borrow_mut().insert(virtual_key, state);
    }

    pub fn set_pressed(&self, virtual_key: u32, pressed: bool) {
        let toggled = self.key_state(virtual_key).is_toggled();
        self.set(virtual_key, KeyState::new(pressed, toggled));
    }

    pub fn set_toggled(&self, virtual_key: u32, toggled: bool) {
        let pressed = self.key_state(virtual_key).is_pressed();
        self.set(virtual_key, KeyState::new(pressed, toggled));
    }

    /// Forgets all key state.
    pub fn clear(&self) {
        self.states.borrow_mut().clear();
    }
}

impl KeyboardState for KeyStateTable {
    fn key_state(&self, virtual_key: u32) -> KeyState {
        self.states
            .borrow()
            .get(&virtual_key)
            .copied()
            .unwrap_or_default()
    }

    fn scan_code_for(&self, virtual_key: u32) -> u32 {
        if self.resolve_scan_codes {
            standard_scan_code(virtual_key).unwrap_or(0)
        } else {
            0
        }
    }
}

#[cfg(windows)]
pub use win32::Win32KeyboardState;

#[cfg(windows)]
mod win32 {
    use super::{KeyState, KeyboardState};

    use ::windows::Win32::UI::Input::KeyboardAndMouse::{
        GetKeyState, MapVirtualKeyW, MAPVK_VK_TO_VSC,
    };

    /// [`KeyboardState`] backed by the Win32 thread key state.
    ///
    /// `GetKeyState` reflects the key state as of the message currently being
    /// processed, so this must be queried on the thread which owns the window
    /// receiving the key messages.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Win32KeyboardState;

    impl KeyboardState for Win32KeyboardState {
        fn key_state(&self, virtual_key: u32) -> KeyState {
            KeyState(unsafe { GetKeyState(virtual_key as i32) })
        }

        fn scan_code_for(&self, virtual_key: u32) -> u32 {
            unsafe { MapVirtualKeyW(virtual_key, MAPVK_VK_TO_VSC) }
        }
    }
}
