//! Modifier and lock keys whose state is checked against the OS.

use super::{codes::KeyCode, mapping::KeyMapper, state::KeyboardState, LogicalKey, PhysicalKey};

/// Describes a modifier or lock key whose state must not drift from the OS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CriticalKeySpec {
    key: KeyCode,
    extended: bool,
    check_pressed: bool,
    check_toggled: bool,
}

impl CriticalKeySpec {
    /// Keys checked for their toggle state are always checked for their
    /// pressed state too.
    pub const fn new(key: KeyCode, extended: bool, check_pressed: bool, check_toggled: bool) -> Self {
        Self {
            key,
            extended,
            check_pressed: check_pressed || check_toggled,
            check_toggled,
        }
    }

    pub const fn key(&self) -> KeyCode {
        self.key
    }

    pub const fn extended(&self) -> bool {
        self.extended
    }

    pub const fn check_pressed(&self) -> bool {
        self.check_pressed
    }

    pub const fn check_toggled(&self) -> bool {
        self.check_toggled
    }
}

/// The keys a [`Keyboard`] synchronizes unless configured otherwise.
///
/// [`Keyboard`]: crate::input::keyboard::Keyboard
pub const DEFAULT_CRITICAL_KEYS: [CriticalKeySpec; 7] = [
    CriticalKeySpec::new(KeyCode::LShift, false, true, false),
    CriticalKeySpec::new(KeyCode::RShift, false, true, false),
    CriticalKeySpec::new(KeyCode::LControl, false, true, false),
    CriticalKeySpec::new(KeyCode::RControl, true, true, false),
    CriticalKeySpec::new(KeyCode::Capital, false, true, true),
    CriticalKeySpec::new(KeyCode::Scroll, false, true, true),
    CriticalKeySpec::new(KeyCode::NumLock, true, true, true),
];

/// The tracked state of one critical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CriticalKey {
    pub(crate) virtual_key: u32,
    /// The identity last seen for the key. [`PhysicalKey::NONE`] until the
    /// key is identified, either up front from its scan code or by a real
    /// event.
    pub(crate) physical_key: PhysicalKey,
    pub(crate) logical_key: LogicalKey,
    pub(crate) check_pressed: bool,
    pub(crate) check_toggled: bool,
    /// The last known toggle state. Always `false` for keys which are not
    /// toggle checked.
    pub(crate) toggled_on: bool,
}

impl CriticalKey {
    /// Builds the entry for a spec, identifying the key through its scan code
    /// and sampling its initial toggle state.
    pub(crate) fn new<K>(spec: &CriticalKeySpec, mapper: &KeyMapper, state: &K) -> Self
    where
        K: KeyboardState + ?Sized,
    {
        let virtual_key = spec.key.value();
        let scan_code = state.scan_code_for(virtual_key);
        let (physical_key, logical_key) = if scan_code == 0 {
            (PhysicalKey::NONE, LogicalKey::NONE)
        } else {
            (
                mapper.physical_key(scan_code, spec.extended),
                mapper.logical_key(virtual_key, spec.extended, scan_code),
            )
        };

        Self {
            virtual_key,
            physical_key,
            logical_key,
            check_pressed: spec.check_pressed,
            check_toggled: spec.check_toggled,
            toggled_on: spec.check_toggled && state.key_state(virtual_key).is_toggled(),
        }
    }

    pub fn virtual_key(&self) -> u32 {
        self.virtual_key
    }

    pub fn physical_key(&self) -> PhysicalKey {
        self.physical_key
    }

    pub fn logical_key(&self) -> LogicalKey {
        self.logical_key
    }

    pub fn check_pressed(&self) -> bool {
        self.check_pressed
    }

    pub fn check_toggled(&self) -> bool {
        self.check_toggled
    }

    pub fn toggled_on(&self) -> bool {
        self.toggled_on
    }

    /// Returns `true` once the key's identity is known.
    pub fn is_identified(&self) -> bool {
        !self.physical_key.is_none()
    }
}

/// The fixed table of critical keys.
///
/// The table never grows or shrinks after construction; synchronization only
/// updates entries in place.
#[derive(Clone, Debug)]
pub struct CriticalKeys {
    entries: Box<[CriticalKey]>,
}

impl CriticalKeys {
    pub(crate) fn new<'a, K>(
        specs: impl IntoIterator<Item = &'a CriticalKeySpec>,
        mapper: &KeyMapper,
        state: &K,
    ) -> Self
    where
        K: KeyboardState + ?Sized,
    {
        Self {
            entries: specs
                .into_iter()
                .map(|spec| CriticalKey::new(spec, mapper, state))
                .collect(),
        }
    }

    /// Records the identity a critical key was last seen with. Does nothing if
    /// the virtual key is not critical.
    pub(crate) fn update_last_seen(
        &mut self,
        virtual_key: u32,
        physical_key: PhysicalKey,
        logical_key: LogicalKey,
    ) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.virtual_key == virtual_key) {
            entry.physical_key = physical_key;
            entry.logical_key = logical_key;
        }
    }

    pub fn get(&self, virtual_key: u32) -> Option<&CriticalKey> {
        self.entries.iter().find(|e| e.virtual_key == virtual_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriticalKey> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut CriticalKey> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
