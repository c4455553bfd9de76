//! Crate-specific error and result types.

use ::thiserror::Error;

/// Result type returned by the fallible conversions in this crate.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Error type for conversions from raw Win32 values.
///
/// The keyboard hook itself never fails. Every key notification, however
/// anomalous, is resolved by a defined transition. Errors only surface at the
/// boundary where untyped message identifiers are turned into typed values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The message identifier is neither a key-down nor a key-up message.
    #[error("message 0x{0:04X} is not a key-down or key-up action")]
    UnknownAction(u32),

    /// The window message does not carry a keystroke.
    #[error("message 0x{0:04X} is not a keystroke message")]
    NotAKeyMessage(u32),
}
