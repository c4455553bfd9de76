//! Normalization of Win32 keyboard messages into a portable stream of key
//! down, up and repeat events.
//!
//! The central type is [`Keyboard`], which accepts raw key notifications
//! (virtual key, scan code, extended flag, decoded character and the
//! "previously down" hint reported by Windows) and forwards canonical
//! [`KeyEvent`]s to a [`KeyEventSink`]. Along the way it:
//!
//! * derives a layout independent [`PhysicalKey`] and a layout dependent
//!   [`LogicalKey`] for every key,
//! * drops duplicate downs and orphaned ups which arrive when focus changes or
//!   several physical keyboards report the same key,
//! * keeps shift, control and the lock keys synchronized with the OS key state,
//!   synthesizing corrective events when the two drift apart,
//! * tracks the asynchronous "handled" acknowledgment for every event it
//!   dispatches.
//!
//! [`Keyboard`]: crate::input::keyboard::Keyboard
//! [`KeyEvent`]: crate::input::keyboard::KeyEvent
//! [`KeyEventSink`]: crate::input::keyboard::KeyEventSink
//! [`PhysicalKey`]: crate::input::keyboard::PhysicalKey
//! [`LogicalKey`]: crate::input::keyboard::LogicalKey

pub mod errors;
pub mod input;
