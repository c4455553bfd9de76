//! Input and state handling for keyboard events.

mod builder;
mod codes;
mod critical;
mod event;
mod keyboard;
mod keys;
mod mapping;
mod pending;
mod pressing;
mod sequencer;
mod sink;
mod state;

pub use builder::*;
pub use codes::*;
pub use critical::{CriticalKey, CriticalKeySpec, CriticalKeys, DEFAULT_CRITICAL_KEYS};
pub use event::*;
pub use keyboard::*;
pub use keys::*;
pub use mapping::{normalize_scancode, KeyMapper};
pub use pending::{Completion, PendingResponses, ResponseId};
pub use pressing::PressingRecords;
pub use sequencer::{DropReason, Transition};
pub use sink::*;
pub use state::*;
