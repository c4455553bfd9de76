//! Canonical key events and the sink they are dispatched to.

use ::std::time::Duration;
use ::strum::Display;
use ::tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use ::tracing::debug;

use super::{pending::ResponseId, LogicalKey, PhysicalKey};

/// The type of a canonical key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum KeyEventType {
    Down,
    Up,
    Repeat,
}

/// A canonical key event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Time the event was generated, measured by the [`Keyboard`]'s clock.
    ///
    /// [`Keyboard`]: crate::input::keyboard::Keyboard
    pub timestamp: Duration,
    pub event_type: KeyEventType,
    pub physical: PhysicalKey,
    pub logical: LogicalKey,
    /// The text produced by the key. Always empty for up events and for
    /// synthesized events.
    pub character: String,
    /// `true` for corrective events generated to bring the tracked modifier
    /// and lock key state back in line with the OS. Synthesized events are
    /// never acknowledged.
    pub synthesized: bool,
}

impl KeyEvent {
    /// A corrective event with no character.
    pub(crate) fn synthesized(
        timestamp: Duration,
        event_type: KeyEventType,
        physical: PhysicalKey,
        logical: LogicalKey,
    ) -> Self {
        Self {
            timestamp,
            event_type,
            physical,
            logical,
            character: String::new(),
            synthesized: true,
        }
    }
}

/// Consumer of canonical key events.
///
/// Real events carry `Some(response)`. The sink must eventually report
/// whether the event was handled by passing that id exactly once to
/// [`Keyboard::handle_response`], on the thread which drives the
/// [`Keyboard`]. Synthesized events carry `None` and expect no response.
///
/// Any `FnMut(KeyEvent, Option<ResponseId>)` closure is a sink.
///
/// [`Keyboard`]: crate::input::keyboard::Keyboard
/// [`Keyboard::handle_response`]: crate::input::keyboard::Keyboard::handle_response
pub trait KeyEventSink {
    fn send(&mut self, event: KeyEvent, response: Option<ResponseId>);
}

impl<F> KeyEventSink for F
where
    F: FnMut(KeyEvent, Option<ResponseId>),
{
    fn send(&mut self, event: KeyEvent, response: Option<ResponseId>) {
        self(event, response)
    }
}

/// An event as delivered by a [`ChannelSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub event: KeyEvent,
    /// The id to acknowledge, `None` for synthesized events.
    pub response: Option<ResponseId>,
}

/// A [`KeyEventSink`] which forwards events over an unbounded channel, for
/// consumers which handle key events later in their own update loop.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: UnboundedSender<DispatchedEvent>,
}

impl ChannelSink {
    /// Creates a sink along with the receiving end of its channel.
    pub fn new() -> (Self, UnboundedReceiver<DispatchedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl KeyEventSink for ChannelSink {
    fn send(&mut self, event: KeyEvent, response: Option<ResponseId>) {
        if self.tx.send(DispatchedEvent { event, response }).is_err() {
            // The receiver is gone, so the event can never be acknowledged.
            debug!(?response, "Key event receiver closed, event discarded");
        }
    }
}
