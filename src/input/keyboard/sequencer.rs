//! Classification of raw key notifications into canonical events.

use ::strum::Display;

use super::{event::KeyAction, sink::KeyEventType, LogicalKey};

/// Why a raw notification was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum DropReason {
    /// A fresh (non-repeat) down for a physical key which is already down.
    /// Happens when two keyboards press the same key, or when the up was lost
    /// while the window did not have focus.
    DuplicateDown,
    /// An up for a physical key which is not down.
    UnmatchedUp,
}

/// The outcome of classifying one raw notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The key goes down. The logical key must be freshly computed.
    Down,
    /// An auto-repeat, reporting the logical key of the original press.
    Repeat(LogicalKey),
    /// The key is released, reporting the logical key of the original press.
    Up(LogicalKey),
    Drop(DropReason),
}

impl Transition {
    /// Decides the transition for a notification, given the logical key
    /// recorded for its physical key (if it is down) and the OS repeat hint.
    pub fn classify(action: KeyAction, record: Option<LogicalKey>, was_down: bool) -> Self {
        match (action, record) {
            (KeyAction::Down, None) => Self::Down,
            (KeyAction::Down, Some(logical)) if was_down => Self::Repeat(logical),
            (KeyAction::Down, Some(_)) => Self::Drop(DropReason::DuplicateDown),
            (KeyAction::Up, None) => Self::Drop(DropReason::UnmatchedUp),
            (KeyAction::Up, Some(logical)) => Self::Up(logical),
        }
    }

    /// The type of the canonical event, or `None` for a dropped notification.
    pub fn event_type(&self) -> Option<KeyEventType> {
        match self {
            Self::Down => Some(KeyEventType::Down),
            Self::Repeat(_) => Some(KeyEventType::Repeat),
            Self::Up(_) => Some(KeyEventType::Up),
            Self::Drop(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;

    const RECORDED: LogicalKey = LogicalKey(0x61);

    #[test]
    fn test_down_without_record() {
        assert_eq!(Transition::classify(KeyAction::Down, None, false), Transition::Down);
        // The OS repeat hint does not matter for an untracked key.
        assert_eq!(Transition::classify(KeyAction::Down, None, true), Transition::Down);
    }

    #[test]
    fn test_repeat_reuses_recorded_key() {
        assert_eq!(
            Transition::classify(KeyAction::Down, Some(RECORDED), true),
            Transition::Repeat(RECORDED)
        );
    }

    #[test]
    fn test_duplicate_down_dropped() {
        assert_eq!(
            Transition::classify(KeyAction::Down, Some(RECORDED), false),
            Transition::Drop(DropReason::DuplicateDown)
        );
    }

    #[test]
    fn test_up() {
        assert_eq!(
            Transition::classify(KeyAction::Up, Some(RECORDED), true),
            Transition::Up(RECORDED)
        );
        assert_eq!(
            Transition::classify(KeyAction::Up, None, true),
            Transition::Drop(DropReason::UnmatchedUp)
        );
    }

    #[test]
    fn test_event_types() {
        assert_eq!(Transition::Down.event_type(), Some(KeyEventType::Down));
        assert_eq!(
            Transition::Repeat(RECORDED).event_type(),
            Some(KeyEventType::Repeat)
        );
        assert_eq!(Transition::Up(RECORDED).event_type(), Some(KeyEventType::Up));
        assert_eq!(
            Transition::Drop(DropReason::UnmatchedUp).event_type(),
            None
        );
    }
}
