//! Bookkeeping for dispatched events awaiting a "handled" response.

use ::std::{collections::HashMap, fmt};
use ::tracing::{debug, trace};

/// Opaque handle identifying a dispatched event until it is acknowledged.
///
/// Ids are allocated from a counter starting at 1 and are never reused by the
/// [`Keyboard`] which allocated them.
///
/// [`Keyboard`]: crate::input::keyboard::Keyboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResponseId(pub u64);

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Callback receiving whether a key event was handled.
pub type Completion = Box<dyn FnOnce(bool)>;

/// Completions of dispatched events, keyed by [`ResponseId`].
#[derive(Default)]
pub struct PendingResponses {
    next_id: u64,
    pending: HashMap<ResponseId, Completion>,
}

impl fmt::Debug for PendingResponses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingResponses")
            .field("next_id", &self.next_id)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl PendingResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the completion under a freshly allocated id.
    pub fn register(&mut self, completion: Completion) -> ResponseId {
        self.next_id += 1;
        let id = ResponseId(self.next_id);
        self.pending.insert(id, completion);
        trace!(response = %id, "Registered pending response");
        id
    }

    /// Removes the completion for `id` and invokes it with `handled`.
    ///
    /// Returns `false` without doing anything if there is no such completion,
    /// either because it already ran or because the id was never registered.
    pub fn complete(&mut self, id: ResponseId, handled: bool) -> bool {
        match self.pending.remove(&id) {
            Some(completion) => {
                trace!(response = %id, handled, "Completing pending response");
                completion(handled);
                true
            }
            None => {
                debug!(response = %id, "Ignoring response with no pending event");
                false
            }
        }
    }

    pub fn contains(&self, id: ResponseId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
