//! Builder object which constructs [`Keyboard`]s
//!
//! [`Keyboard`]: crate::input::keyboard::Keyboard

use super::{
    critical::{CriticalKeySpec, CriticalKeys, DEFAULT_CRITICAL_KEYS},
    keyboard::{system_clock, Clock, Keyboard},
    mapping::KeyMapper,
    sink::KeyEventSink,
    state::KeyboardState,
};

/// A builder pattern object which simplifies the process of creating a
/// [`Keyboard`].
///
/// The same builder can be re-used to create multiple keyboards with the same
/// configuration, as a type of prototype.
///
/// ```
/// use ::keysync::input::keyboard::{
///     Builder, ChannelSink, CriticalKeySpec, KeyCode, KeyStateTable,
/// };
///
/// // Only keep caps lock synchronized.
/// let builder = Builder::new()
///     .with_critical_keys([CriticalKeySpec::new(KeyCode::Capital, false, true, true)]);
///
/// let (sink, _events) = ChannelSink::new();
/// let keyboard = builder.build(sink, KeyStateTable::new());
/// assert_eq!(keyboard.critical_keys().len(), 1);
/// ```
///
/// [`Keyboard`]: crate::input::keyboard::Keyboard
#[derive(Clone, Debug)]
pub struct Builder {
    clock: Clock,
    critical_keys: Vec<CriticalKeySpec>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    /// Construct a new builder. Default values will be used for all properties
    /// until explicitly set.
    pub fn new() -> Self {
        Self {
            clock: system_clock,
            critical_keys: DEFAULT_CRITICAL_KEYS.to_vec(),
        }
    }

    /// Set the clock used to timestamp events.
    ///
    /// Defaults to [`system_clock`] if not set.
    ///
    /// [`system_clock`]: crate::input::keyboard::system_clock
    pub fn with_clock(self, clock: Clock) -> Self {
        Self { clock, ..self }
    }

    /// Set the modifier and lock keys which are kept synchronized with the OS.
    ///
    /// Defaults to [`DEFAULT_CRITICAL_KEYS`] if not set.
    ///
    /// [`DEFAULT_CRITICAL_KEYS`]: crate::input::keyboard::DEFAULT_CRITICAL_KEYS
    pub fn with_critical_keys(self, keys: impl IntoIterator<Item = CriticalKeySpec>) -> Self {
        Self {
            critical_keys: keys.into_iter().collect(),
            ..self
        }
    }

    /// Gets the currently set clock.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Gets the currently set critical keys.
    pub fn critical_keys(&self) -> &[CriticalKeySpec] {
        &self.critical_keys
    }

    /// Build a new [`Keyboard`] with the properties of the builder.
    ///
    /// Critical keys are identified, and their toggle state sampled, from
    /// `state` at this point.
    ///
    /// [`Keyboard`]: crate::input::keyboard::Keyboard
    pub fn build<S, K>(&self, sink: S, state: K) -> Keyboard<S, K>
    where
        S: KeyEventSink,
        K: KeyboardState,
    {
        let mapper = KeyMapper::new();
        let critical_keys = CriticalKeys::new(&self.critical_keys, &mapper, &state);
        Keyboard::from_parts(sink, state, self.clock, mapper, critical_keys)
    }
}
