//! Replays a captured sequence of Win32 keystroke messages through a
//! [`Keyboard`] and logs the resulting events.
//!
//! Run with `RUST_LOG=debug` to also see dropped notifications and
//! synthesized corrections.
//!
//! [`Keyboard`]: ::keysync::input::keyboard::Keyboard

use ::keysync::{
    errors::Result,
    input::keyboard::{
        ChannelSink, KeyMessage, KeyStateTable, Keyboard, RawKeyEvent, VK_CAPITAL, VK_H, VK_I,
        VK_LSHIFT, VK_SHIFT, WM_KEYDOWN, WM_KEYUP,
    },
};
use ::std::rc::Rc;
use ::tracing::info;
use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// One captured message, along with the OS key state at the time it arrived.
struct Step {
    msg: KeyMessage,
    character: char,
    os: fn(&KeyStateTable),
}

const fn key(umsg: u32, virtual_key: u32, lparam: u32) -> KeyMessage {
    KeyMessage {
        umsg,
        wparam: virtual_key as usize,
        lparam: lparam as isize,
    }
}

const SCRIPT: &[Step] = &[
    // Shift-h.
    Step {
        msg: key(WM_KEYDOWN, VK_SHIFT, 0x002A0001),
        character: '\0',
        os: |os| os.set_pressed(VK_LSHIFT, true),
    },
    Step {
        msg: key(WM_KEYDOWN, VK_H, 0x00230001),
        character: 'H',
        os: |_| (),
    },
    Step {
        msg: key(WM_KEYUP, VK_H, 0xC0230001),
        character: '\0',
        os: |_| (),
    },
    // Shift is released while another window has focus, so its up is never
    // seen. Caps lock is turned on in the meantime.
    Step {
        msg: key(WM_KEYDOWN, VK_I, 0x00170001),
        character: 'I',
        os: |os| {
            os.set_pressed(VK_LSHIFT, false);
            os.set_toggled(VK_CAPITAL, true);
        },
    },
    // A second keyboard reports the same key.
    Step {
        msg: key(WM_KEYDOWN, VK_I, 0x00170001),
        character: 'I',
        os: |_| (),
    },
    Step {
        msg: key(WM_KEYUP, VK_I, 0xC0170001),
        character: '\0',
        os: |_| (),
    },
];

pub fn main() -> Result<()> {
    ::tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let os = Rc::new(KeyStateTable::new());
    let (sink, mut events) = ChannelSink::new();
    let mut keyboard = Keyboard::new(sink, Rc::clone(&os));

    for step in SCRIPT {
        (step.os)(&*os);

        let raw = RawKeyEvent::try_from(step.msg)?.with_character(step.character);
        let outcome = keyboard.handle_raw_event(raw, move |handled| {
            info!(virtual_key = raw.virtual_key, handled, "Message completed");
        });
        info!(?outcome, "Replayed message");

        // Stand in for the consumer, which handles every event it receives.
        while let Ok(dispatched) = events.try_recv() {
            info!(event = ?dispatched.event, "Received key event");
            if let Some(response) = dispatched.response {
                keyboard.handle_response(response, true);
            }
        }
    }

    Ok(())
}
