//! Key event normalization and modifier state synchronization.

use ::std::{
    char::REPLACEMENT_CHARACTER,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use ::tracing::{debug, trace};

use super::{
    builder::Builder,
    codes::VK_PROCESSKEY,
    critical::{CriticalKey, CriticalKeys},
    event::{KeyAction, RawKeyEvent},
    mapping::KeyMapper,
    pending::{PendingResponses, ResponseId},
    pressing::PressingRecords,
    sequencer::{DropReason, Transition},
    sink::{KeyEvent, KeyEventSink, KeyEventType},
    state::KeyboardState,
    LogicalKey, PhysicalKey,
};

/// Source of event timestamps.
pub type Clock = fn() -> Duration;

/// The default [`Clock`]: time elapsed since the UNIX epoch.
pub fn system_clock() -> Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// What became of a raw key notification passed to [`Keyboard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    /// The notification was noise and was acknowledged as handled without
    /// being dispatched.
    Dropped(DropReason),
    /// The key is being processed by an input method editor. The notification
    /// was acknowledged as handled without being dispatched.
    ConsumedByIme,
    /// A canonical event was dispatched and awaits the given response.
    Dispatched(ResponseId),
}

/// The central object which turns raw platform key notifications into a
/// canonical stream of [`KeyEvent`]s.
///
/// # Press Tracking
///
/// Windows reports key presses and releases as individual messages, and does
/// not guarantee that they pair up. A key released while another window had
/// focus never reports its up; two keyboards pressing the same key report two
/// downs. The [`Keyboard`] records which physical keys are down, and with
/// which logical key, and classifies every notification against that record:
///
/// * A down for a key which is not down is a [`KeyEventType::Down`].
/// * A down for a key which is down is a [`KeyEventType::Repeat`] if Windows
///   flags it as a repeat, and dropped otherwise.
/// * An up for a key which is down is a [`KeyEventType::Up`], and dropped
///   otherwise.
///
/// Repeats and ups always report the logical key of the original down, so a
/// consumer sees a consistent identity for the whole press.
///
/// # Modifier Synchronization
///
/// Shift, control and the lock keys can change state without the window ever
/// seeing an event: focus changes, remote input injection, or the OS toggling
/// a lock key. After every event the [`Keyboard`] compares what it believes
/// about these keys to the [`KeyboardState`] and sends synthesized events to
/// correct any difference. Synthesized events are sent before the event which
/// triggered the check and are never acknowledged.
///
/// # Responses
///
/// Every dispatched event is paired with a [`ResponseId`]. The completion
/// passed alongside the raw notification is called exactly once: immediately
/// if the notification is dropped or consumed by an IME, otherwise when the
/// consumer reports the response through [`handle_response`].
///
/// All methods must be called from one thread, the one which receives the key
/// messages.
///
/// # Example
///
/// ```
/// use ::keysync::input::keyboard::{ChannelSink, KeyAction, KeyStateTable, Keyboard, VK_A};
///
/// let (sink, mut events) = ChannelSink::new();
/// let mut keyboard = Keyboard::new(sink, KeyStateTable::new());
///
/// // Forward the key down for 'a', along with the character it produced.
/// keyboard.keyboard_hook(VK_A, 0x1E, KeyAction::Down, 'a' as u32, false, false, |handled| {
///     println!("handled: {handled}");
/// });
///
/// // Later, in the consumer's update loop, handle the event and respond.
/// let dispatched = events.try_recv().unwrap();
/// assert_eq!(dispatched.event.character, "a");
/// keyboard.handle_response(dispatched.response.unwrap(), true);
/// ```
///
/// [`handle_response`]: Self::handle_response
pub struct Keyboard<S, K> {
    sink: S,
    state: K,
    clock: Clock,
    mapper: KeyMapper,
    /// Physical keys currently down. Mutated only by the hook and the
    /// synchronization passes.
    pressing: PressingRecords,
    critical_keys: CriticalKeys,
    pending: PendingResponses,
}

impl<S, K> Keyboard<S, K>
where
    S: KeyEventSink,
    K: KeyboardState,
{
    /// Constructs a keyboard with the default configuration. See [`Builder`]
    /// to change it.
    pub fn new(sink: S, state: K) -> Self {
        Builder::new().build(sink, state)
    }

    pub(crate) fn from_parts(
        sink: S,
        state: K,
        clock: Clock,
        mapper: KeyMapper,
        critical_keys: CriticalKeys,
    ) -> Self {
        Self {
            sink,
            state,
            clock,
            mapper,
            pressing: PressingRecords::new(),
            critical_keys,
            pending: PendingResponses::new(),
        }
    }

    /// Processes one raw key notification.
    ///
    /// `character` is the UTF-32 character produced by the key, or 0.
    /// `was_down` is the OS flag marking the down as an auto-repeat.
    /// `completion` is called exactly once with whether the event was
    /// handled.
    #[allow(clippy::too_many_arguments)]
    pub fn keyboard_hook<C>(
        &mut self,
        virtual_key: u32,
        scancode: u32,
        action: KeyAction,
        character: u32,
        extended: bool,
        was_down: bool,
        completion: C,
    ) -> HookOutcome
    where
        C: FnOnce(bool) + 'static,
    {
        self.handle_raw_event(
            RawKeyEvent {
                virtual_key,
                scancode,
                action,
                character,
                extended,
                was_down,
            },
            completion,
        )
    }

    /// Processes one raw key notification. Equivalent to
    /// [`keyboard_hook`](Self::keyboard_hook).
    pub fn handle_raw_event<C>(&mut self, raw: RawKeyEvent, completion: C) -> HookOutcome
    where
        C: FnOnce(bool) + 'static,
    {
        let physical = self.mapper.physical_key(raw.scancode, raw.extended);
        let transition = Transition::classify(raw.action, self.pressing.get(physical), raw.was_down);

        let (event_type, logical) = match transition {
            Transition::Drop(reason) => {
                debug!(
                    %reason,
                    virtual_key = raw.virtual_key,
                    %physical,
                    "Dropping key event"
                );
                completion(true);
                return HookOutcome::Dropped(reason);
            }
            Transition::Down => (
                KeyEventType::Down,
                self.mapper
                    .logical_key(raw.virtual_key, raw.extended, raw.scancode),
            ),
            Transition::Repeat(logical) => (KeyEventType::Repeat, logical),
            Transition::Up(logical) => (KeyEventType::Up, logical),
        };

        self.critical_keys
            .update_last_seen(raw.virtual_key, physical, logical);
        self.synchronize_toggled_states(
            (event_type == KeyEventType::Down).then_some(raw.virtual_key),
        );

        if event_type == KeyEventType::Up {
            self.pressing.release(physical);
        } else {
            self.pressing.press(physical, logical);
        }

        self.synchronize_pressed_states();

        // The IME reports its own keys with the sentinel virtual key, but the
        // matching up reports the original virtual key. Checking the recorded
        // logical key catches both.
        if logical == LogicalKey(u64::from(VK_PROCESSKEY)) {
            debug!(%event_type, %physical, "Key event consumed by IME");
            completion(true);
            return HookOutcome::ConsumedByIme;
        }

        let event = KeyEvent {
            timestamp: (self.clock)(),
            event_type,
            physical,
            logical,
            character: match event_type {
                KeyEventType::Up => String::new(),
                KeyEventType::Down | KeyEventType::Repeat => character_string(raw.character),
            },
            synthesized: false,
        };

        let response = self.pending.register(Box::new(completion));
        trace!(%event_type, %physical, %logical, %response, "Dispatching key event");
        self.sink.send(event, Some(response));

        HookOutcome::Dispatched(response)
    }

    /// Delivers the consumer's response for a dispatched event, calling the
    /// completion registered with it.
    ///
    /// Returns `false` if there is no event awaiting this response. Repeated
    /// or unknown responses are ignored.
    pub fn handle_response(&mut self, response: ResponseId, handled: bool) -> bool {
        self.pending.complete(response, handled)
    }

    /// Brings the tracked toggle state of the lock keys in line with the OS.
    ///
    /// `toggled_virtual_key` is the virtual key of the down event being
    /// processed, if any. Lock keys change their OS toggle state as soon as
    /// they go down, so the tracked state of that key is flipped before
    /// comparing.
    fn synchronize_toggled_states(&mut self, toggled_virtual_key: Option<u32>) {
        let timestamp = (self.clock)();
        let Self {
            sink,
            state,
            pressing,
            critical_keys,
            ..
        } = self;

        for key in critical_keys
            .iter_mut()
            .filter(|key| key.is_identified() && key.check_toggled)
        {
            let should_toggled = state.key_state(key.virtual_key).is_toggled();
            if toggled_virtual_key == Some(key.virtual_key) {
                key.toggled_on = !key.toggled_on;
            }

            if key.toggled_on != should_toggled {
                debug!(
                    virtual_key = key.virtual_key,
                    physical = %key.physical_key,
                    toggled_on = should_toggled,
                    "Synthesizing toggle of lock key"
                );

                // A pressed key is released first so that the toggle is a
                // complete down.
                if pressing.is_pressed(key.physical_key) {
                    send_synthesized(sink, timestamp, KeyEventType::Up, key);
                } else {
                    pressing.press(key.physical_key, key.logical_key);
                }
                send_synthesized(sink, timestamp, KeyEventType::Down, key);
            }

            key.toggled_on = should_toggled;
        }
    }

    /// Brings the tracked pressed state of the critical keys in line with the
    /// OS.
    fn synchronize_pressed_states(&mut self) {
        let timestamp = (self.clock)();
        let Self {
            sink,
            state,
            pressing,
            critical_keys,
            ..
        } = self;

        for key in critical_keys
            .iter()
            .filter(|key| key.is_identified() && key.check_pressed)
        {
            let should_pressed = state.key_state(key.virtual_key).is_pressed();
            if pressing.is_pressed(key.physical_key) == should_pressed {
                continue;
            }

            debug!(
                virtual_key = key.virtual_key,
                physical = %key.physical_key,
                pressed = should_pressed,
                "Synthesizing press state of critical key"
            );

            let event_type = if should_pressed {
                pressing.press(key.physical_key, key.logical_key);
                KeyEventType::Down
            } else {
                pressing.release(key.physical_key);
                KeyEventType::Up
            };
            send_synthesized(sink, timestamp, event_type, key);
        }
    }
}

impl<S, K> Keyboard<S, K> {
    /// Returns `true` if the physical key is currently down.
    pub fn is_physical_key_pressed(&self, physical: PhysicalKey) -> bool {
        self.pressing.is_pressed(physical)
    }

    /// The logical key the physical key was pressed as, if it is down.
    pub fn pressed_logical_key(&self, physical: PhysicalKey) -> Option<LogicalKey> {
        self.pressing.get(physical)
    }

    /// All keys which are currently down, in no particular order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = (PhysicalKey, LogicalKey)> + '_ {
        self.pressing.iter()
    }

    /// The number of dispatched events still awaiting a response.
    pub fn pending_response_count(&self) -> usize {
        self.pending.len()
    }

    /// The tracked state of the modifier and lock keys.
    pub fn critical_keys(&self) -> &CriticalKeys {
        &self.critical_keys
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn key_state(&self) -> &K {
        &self.state
    }
}

fn send_synthesized<S>(sink: &mut S, timestamp: Duration, event_type: KeyEventType, key: &CriticalKey)
where
    S: KeyEventSink,
{
    sink.send(
        KeyEvent::synthesized(timestamp, event_type, key.physical_key, key.logical_key),
        None,
    );
}

/// Encodes a UTF-32 character for a key event. Zero means no character, and
/// invalid code points are replaced.
fn character_string(code_point: u32) -> String {
    match code_point {
        0 => String::new(),
        cp => char::from_u32(cp)
            .unwrap_or(REPLACEMENT_CHARACTER)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::{
        codes::*,
        critical::CriticalKeySpec,
        event::KeyMessage,
        keys::{logical, physical},
        sink::{ChannelSink, DispatchedEvent},
        state::{KeyState, KeyStateTable},
    };

    use ::pretty_assertions::assert_eq;
    use ::std::{cell::RefCell, rc::Rc};
    use ::tokio::sync::mpsc::UnboundedReceiver;

    const NOW: Duration = Duration::from_millis(5);

    fn fixed_clock() -> Duration {
        NOW
    }

    /// A keyboard wired to an in-memory OS state and a channel sink, plus a
    /// log of every completion call.
    struct Harness {
        keyboard: Keyboard<ChannelSink, Rc<KeyStateTable>>,
        os: Rc<KeyStateTable>,
        events: UnboundedReceiver<DispatchedEvent>,
        completions: Rc<RefCell<Vec<bool>>>,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_os(KeyStateTable::new())
        }

        fn with_os(os: KeyStateTable) -> Self {
            let os = Rc::new(os);
            let (sink, events) = ChannelSink::new();
            let keyboard = Builder::new()
                .with_clock(fixed_clock)
                .build(sink, Rc::clone(&os));

            Self {
                keyboard,
                os,
                events,
                completions: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn hook(
            &mut self,
            virtual_key: u32,
            scancode: u32,
            action: KeyAction,
            character: char,
            extended: bool,
            was_down: bool,
        ) -> HookOutcome {
            let completions = Rc::clone(&self.completions);
            self.keyboard.keyboard_hook(
                virtual_key,
                scancode,
                action,
                u32::from(character),
                extended,
                was_down,
                move |handled| completions.borrow_mut().push(handled),
            )
        }

        fn press(&mut self, virtual_key: u32, scancode: u32, character: char) -> HookOutcome {
            self.hook(virtual_key, scancode, KeyAction::Down, character, false, false)
        }

        fn release(&mut self, virtual_key: u32, scancode: u32) -> HookOutcome {
            self.hook(virtual_key, scancode, KeyAction::Up, '\0', false, true)
        }

        fn drain(&mut self) -> Vec<DispatchedEvent> {
            let mut drained = Vec::new();
            while let Ok(event) = self.events.try_recv() {
                drained.push(event);
            }
            drained
        }

        fn completions(&self) -> Vec<bool> {
            self.completions.borrow().clone()
        }
    }

    fn real(
        event_type: KeyEventType,
        physical: PhysicalKey,
        logical: LogicalKey,
        character: &str,
        response: u64,
    ) -> DispatchedEvent {
        DispatchedEvent {
            event: KeyEvent {
                timestamp: NOW,
                event_type,
                physical,
                logical,
                character: character.to_owned(),
                synthesized: false,
            },
            response: Some(ResponseId(response)),
        }
    }

    fn synthesized(
        event_type: KeyEventType,
        physical: PhysicalKey,
        logical: LogicalKey,
    ) -> DispatchedEvent {
        DispatchedEvent {
            event: KeyEvent::synthesized(NOW, event_type, physical, logical),
            response: None,
        }
    }

    const LOGICAL_A: LogicalKey = LogicalKey(0x61);

    #[test]
    fn test_key_down_dispatched() {
        let mut harness = Harness::new();

        let outcome = harness.press(VK_A, 0x1E, 'a');

        assert_eq!(outcome, HookOutcome::Dispatched(ResponseId(1)));
        assert_eq!(
            harness.drain(),
            vec![real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 1)]
        );
        assert_eq!(
            harness.keyboard.pressed_logical_key(physical::KEY_A),
            Some(LOGICAL_A)
        );
        // Completion waits for the response.
        assert!(harness.completions().is_empty());
        assert_eq!(harness.keyboard.pending_response_count(), 1);
    }

    #[test]
    fn test_down_then_up_clears_record() {
        let mut harness = Harness::new();

        harness.press(VK_A, 0x1E, 'a');
        harness.release(VK_A, 0x1E);

        assert_eq!(
            harness.drain(),
            vec![
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 1),
                real(KeyEventType::Up, physical::KEY_A, LOGICAL_A, "", 2),
            ]
        );
        assert!(!harness.keyboard.is_physical_key_pressed(physical::KEY_A));
        assert_eq!(harness.keyboard.pressed_keys().count(), 0);
    }

    #[test]
    fn test_repeat_keeps_original_logical_key() {
        let mut harness = Harness::new();

        harness.press(VK_A, 0x1E, 'a');
        // Same physical key, but the layout now reports 'q' for it.
        let outcome = harness.hook(VK_Q, 0x1E, KeyAction::Down, 'q', false, true);

        assert_eq!(outcome, HookOutcome::Dispatched(ResponseId(2)));
        assert_eq!(
            harness.drain(),
            vec![
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 1),
                real(KeyEventType::Repeat, physical::KEY_A, LOGICAL_A, "q", 2),
            ]
        );

        // The release also reports the logical key of the original down.
        harness.release(VK_Q, 0x1E);
        assert_eq!(
            harness.drain(),
            vec![real(KeyEventType::Up, physical::KEY_A, LOGICAL_A, "", 3)]
        );
    }

    #[test]
    fn test_duplicate_down_dropped() {
        let mut harness = Harness::new();

        harness.press(VK_A, 0x1E, 'a');
        harness.drain();

        let outcome = harness.press(VK_A, 0x1E, 'a');

        assert_eq!(outcome, HookOutcome::Dropped(DropReason::DuplicateDown));
        assert_eq!(harness.completions(), vec![true]);
        assert!(harness.drain().is_empty());
        assert_eq!(
            harness.keyboard.pressed_logical_key(physical::KEY_A),
            Some(LOGICAL_A)
        );
        assert_eq!(harness.keyboard.pending_response_count(), 1);
    }

    #[test]
    fn test_unmatched_up_dropped() {
        let mut harness = Harness::new();

        let outcome = harness.release(VK_A, 0x1E);

        assert_eq!(outcome, HookOutcome::Dropped(DropReason::UnmatchedUp));
        assert_eq!(harness.completions(), vec![true]);
        assert!(harness.drain().is_empty());
        assert_eq!(harness.keyboard.pending_response_count(), 0);
    }

    #[test]
    fn test_response_completes_once() {
        let mut harness = Harness::new();

        let outcome = harness.press(VK_A, 0x1E, 'a');
        let HookOutcome::Dispatched(response) = outcome else {
            panic!("expected a dispatched event, got {outcome:?}");
        };

        assert!(harness.keyboard.handle_response(response, false));
        assert!(!harness.keyboard.handle_response(response, true));
        assert!(!harness.keyboard.handle_response(ResponseId(99), true));

        assert_eq!(harness.completions(), vec![false]);
        assert_eq!(harness.keyboard.pending_response_count(), 0);
    }

    #[test]
    fn test_characters() {
        let mut harness = Harness::new();

        harness.press(VK_E, 0x12, 'é');
        harness.hook(VK_E, 0x12, KeyAction::Down, '\0', false, true);
        // An invalid code point is replaced rather than dropped.
        harness.keyboard.keyboard_hook(
            VK_B,
            0x30,
            KeyAction::Down,
            0xD800,
            false,
            false,
            |_| (),
        );

        let characters: Vec<String> = harness
            .drain()
            .into_iter()
            .map(|dispatched| dispatched.event.character)
            .collect();
        assert_eq!(characters, vec!["é", "", "\u{FFFD}"]);
    }

    #[test]
    fn test_ime_keys_consumed() {
        let mut harness = Harness::new();

        let outcome = harness.press(VK_PROCESSKEY, 0x1E, '\0');
        assert_eq!(outcome, HookOutcome::ConsumedByIme);
        assert!(harness.keyboard.is_physical_key_pressed(physical::KEY_A));

        // The release reports the original virtual key.
        let outcome = harness.release(VK_A, 0x1E);
        assert_eq!(outcome, HookOutcome::ConsumedByIme);

        assert!(harness.drain().is_empty());
        assert_eq!(harness.completions(), vec![true, true]);
        assert!(!harness.keyboard.is_physical_key_pressed(physical::KEY_A));
        assert_eq!(harness.keyboard.pending_response_count(), 0);
    }

    #[test]
    fn test_caps_lock_toggled_elsewhere() {
        let mut harness = Harness::new();
        assert!(!harness.keyboard.critical_keys().get(VK_CAPITAL).unwrap().toggled_on());

        // Caps lock is turned on without the window seeing it.
        harness.os.set_toggled(VK_CAPITAL, true);
        harness.press(VK_A, 0x1E, 'A');

        assert_eq!(
            harness.drain(),
            vec![
                synthesized(KeyEventType::Down, physical::CAPS_LOCK, logical::CAPS_LOCK),
                // Caps lock is not physically held, so the pressed state check
                // releases it again.
                synthesized(KeyEventType::Up, physical::CAPS_LOCK, logical::CAPS_LOCK),
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "A", 1),
            ]
        );
        assert!(harness.keyboard.critical_keys().get(VK_CAPITAL).unwrap().toggled_on());
        assert!(!harness.keyboard.is_physical_key_pressed(physical::CAPS_LOCK));

        // Synthesized events are never awaited.
        assert_eq!(harness.keyboard.pending_response_count(), 1);
    }

    #[test]
    fn test_caps_lock_pressed_in_window() {
        let mut harness = Harness::new();

        // The OS toggles the key as it goes down.
        harness.os.set(VK_CAPITAL, KeyState::new(true, true));
        harness.press(VK_CAPITAL, 0x3A, '\0');
        harness.os.set(VK_CAPITAL, KeyState::new(false, true));
        harness.release(VK_CAPITAL, 0x3A);

        assert_eq!(
            harness.drain(),
            vec![
                real(KeyEventType::Down, physical::CAPS_LOCK, logical::CAPS_LOCK, "", 1),
                real(KeyEventType::Up, physical::CAPS_LOCK, logical::CAPS_LOCK, "", 2),
            ]
        );
        assert!(harness.keyboard.critical_keys().get(VK_CAPITAL).unwrap().toggled_on());

        // Pressing again toggles it off.
        harness.os.set(VK_CAPITAL, KeyState::new(true, false));
        harness.press(VK_CAPITAL, 0x3A, '\0');
        assert_eq!(
            harness.drain(),
            vec![real(KeyEventType::Down, physical::CAPS_LOCK, logical::CAPS_LOCK, "", 3)]
        );
        assert!(!harness.keyboard.critical_keys().get(VK_CAPITAL).unwrap().toggled_on());
    }

    #[test]
    fn test_caps_lock_toggled_elsewhere_while_held() {
        let mut harness = Harness::new();

        harness.os.set(VK_CAPITAL, KeyState::new(true, true));
        harness.press(VK_CAPITAL, 0x3A, '\0');
        harness.drain();

        // Still held, but the toggle is turned off without the window seeing
        // an event.
        harness.os.set(VK_CAPITAL, KeyState::new(true, false));
        harness.press(VK_A, 0x1E, 'a');

        assert_eq!(
            harness.drain(),
            vec![
                synthesized(KeyEventType::Up, physical::CAPS_LOCK, logical::CAPS_LOCK),
                synthesized(KeyEventType::Down, physical::CAPS_LOCK, logical::CAPS_LOCK),
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 2),
            ]
        );
        assert!(!harness.keyboard.critical_keys().get(VK_CAPITAL).unwrap().toggled_on());
        assert_eq!(
            harness.keyboard.pressed_logical_key(physical::CAPS_LOCK),
            Some(logical::CAPS_LOCK)
        );
        assert_eq!(harness.keyboard.pending_response_count(), 2);
    }

    #[test]
    fn test_num_lock_pressed_in_window() {
        let mut harness = Harness::new();

        // Num lock is an extended key.
        harness.os.set(VK_NUMLOCK, KeyState::new(true, true));
        harness.hook(VK_NUMLOCK, 0x45, KeyAction::Down, '\0', true, false);
        harness.os.set(VK_NUMLOCK, KeyState::new(false, true));
        harness.hook(VK_NUMLOCK, 0x45, KeyAction::Up, '\0', true, true);

        assert_eq!(
            harness.drain(),
            vec![
                real(KeyEventType::Down, physical::NUM_LOCK, logical::NUM_LOCK, "", 1),
                real(KeyEventType::Up, physical::NUM_LOCK, logical::NUM_LOCK, "", 2),
            ]
        );
        assert!(harness.keyboard.critical_keys().get(VK_NUMLOCK).unwrap().toggled_on());
    }

    #[test]
    fn test_num_lock_toggled_elsewhere() {
        let mut harness = Harness::new();

        harness.os.set_toggled(VK_NUMLOCK, true);
        harness.press(VK_A, 0x1E, 'a');

        assert_eq!(
            harness.drain(),
            vec![
                synthesized(KeyEventType::Down, physical::NUM_LOCK, logical::NUM_LOCK),
                synthesized(KeyEventType::Up, physical::NUM_LOCK, logical::NUM_LOCK),
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 1),
            ]
        );
        assert!(harness.keyboard.critical_keys().get(VK_NUMLOCK).unwrap().toggled_on());
    }

    #[test]
    fn test_scroll_lock_turned_off_elsewhere() {
        let os = KeyStateTable::new();
        os.set_toggled(VK_SCROLL, true);
        let mut harness = Harness::with_os(os);
        assert!(harness.keyboard.critical_keys().get(VK_SCROLL).unwrap().toggled_on());

        harness.os.set_toggled(VK_SCROLL, false);
        harness.press(VK_A, 0x1E, 'a');

        assert_eq!(
            harness.drain(),
            vec![
                synthesized(KeyEventType::Down, physical::SCROLL_LOCK, logical::SCROLL_LOCK),
                synthesized(KeyEventType::Up, physical::SCROLL_LOCK, logical::SCROLL_LOCK),
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 1),
            ]
        );
        assert!(!harness.keyboard.critical_keys().get(VK_SCROLL).unwrap().toggled_on());
    }

    #[test]
    fn test_shift_released_elsewhere() {
        let mut harness = Harness::new();

        harness.os.set_pressed(VK_LSHIFT, true);
        harness.press(VK_SHIFT, 0x2A, '\0');
        assert_eq!(
            harness.drain(),
            vec![real(KeyEventType::Down, physical::SHIFT_LEFT, logical::SHIFT_LEFT, "", 1)]
        );

        // Shift is released while another window has focus.
        harness.os.set_pressed(VK_LSHIFT, false);
        harness.press(VK_A, 0x1E, 'a');

        assert_eq!(
            harness.drain(),
            vec![
                synthesized(KeyEventType::Up, physical::SHIFT_LEFT, logical::SHIFT_LEFT),
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 2),
            ]
        );
        assert!(!harness.keyboard.is_physical_key_pressed(physical::SHIFT_LEFT));
    }

    #[test]
    fn test_control_pressed_elsewhere() {
        let mut harness = Harness::new();

        harness.os.set_pressed(VK_RCONTROL, true);
        harness.press(VK_A, 0x1E, '\u{1}');

        assert_eq!(
            harness.drain(),
            vec![
                synthesized(KeyEventType::Down, physical::CONTROL_RIGHT, logical::CONTROL_RIGHT),
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "\u{1}", 1),
            ]
        );
        assert_eq!(
            harness.keyboard.pressed_logical_key(physical::CONTROL_RIGHT),
            Some(logical::CONTROL_RIGHT)
        );
    }

    #[test]
    fn test_unidentified_keys_not_synchronized() {
        let mut harness = Harness::with_os(KeyStateTable::without_scan_codes());

        harness.os.set_toggled(VK_CAPITAL, true);
        harness.os.set_pressed(VK_LSHIFT, true);
        harness.press(VK_A, 0x1E, 'a');

        assert_eq!(
            harness.drain(),
            vec![real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 1)]
        );
        assert!(!harness.keyboard.critical_keys().get(VK_CAPITAL).unwrap().is_identified());
    }

    #[test]
    fn test_critical_key_identified_by_event() {
        let mut harness = Harness::with_os(KeyStateTable::without_scan_codes());

        harness.os.set_pressed(VK_LSHIFT, true);
        harness.press(VK_LSHIFT, 0x2A, '\0');
        harness.drain();

        let shift = harness.keyboard.critical_keys().get(VK_LSHIFT).unwrap();
        assert!(shift.is_identified());
        assert_eq!(shift.physical_key(), physical::SHIFT_LEFT);
        assert_eq!(shift.logical_key(), logical::SHIFT_LEFT);

        // From now on the key is synchronized.
        harness.os.set_pressed(VK_LSHIFT, false);
        harness.press(VK_A, 0x1E, 'a');
        assert_eq!(
            harness.drain(),
            vec![
                synthesized(KeyEventType::Up, physical::SHIFT_LEFT, logical::SHIFT_LEFT),
                real(KeyEventType::Down, physical::KEY_A, LOGICAL_A, "a", 2),
            ]
        );
    }

    #[test]
    fn test_without_critical_keys() {
        let os = Rc::new(KeyStateTable::new());
        let (sink, mut events) = ChannelSink::new();
        let mut keyboard = Builder::new()
            .with_clock(fixed_clock)
            .with_critical_keys(std::iter::empty::<CriticalKeySpec>())
            .build(sink, Rc::clone(&os));

        os.set_toggled(VK_CAPITAL, true);
        keyboard.keyboard_hook(VK_A, 0x1E, KeyAction::Down, 0x61, false, false, |_| ());

        assert!(keyboard.critical_keys().is_empty());
        assert_eq!(events.try_recv().unwrap().event.event_type, KeyEventType::Down);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_raw_message() {
        let mut harness = Harness::new();

        // Right arrow, an extended key.
        let raw = RawKeyEvent::try_from(KeyMessage {
            umsg: WM_KEYDOWN,
            wparam: 0x27,
            lparam: 0x014D0001,
        })
        .unwrap();
        harness.keyboard.handle_raw_event(raw, |_| ());

        assert_eq!(
            harness.drain(),
            vec![real(KeyEventType::Down, physical::ARROW_RIGHT, logical::ARROW_RIGHT, "", 1)]
        );
    }

    #[test]
    fn test_closure_sink() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&received);
        let mut keyboard = Builder::new().with_clock(fixed_clock).build(
            move |event: KeyEvent, response: Option<ResponseId>| {
                log.borrow_mut().push((event.event_type, response))
            },
            KeyStateTable::new(),
        );

        keyboard.keyboard_hook(VK_A, 0x1E, KeyAction::Down, 0x61, false, false, |_| ());
        keyboard.keyboard_hook(VK_A, 0x1E, KeyAction::Up, 0, false, true, |_| ());

        assert_eq!(
            *received.borrow(),
            vec![
                (KeyEventType::Down, Some(ResponseId(1))),
                (KeyEventType::Up, Some(ResponseId(2))),
            ]
        );
    }
}
