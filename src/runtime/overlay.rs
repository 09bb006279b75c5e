use crossterm::event::{KeyCode, KeyEvent};
use log::info;

use crate::app::App;
use crate::gate::AccessGate;
use crate::subscribe::{SubscribeOutcome, SubscriptionClient};

/// Route a key to the subscription overlay. Returns false when the overlay
/// is closed and the key belongs to the screen underneath.
pub fn handle_key(
    key: KeyEvent,
    app: &mut App,
    gate: &AccessGate,
    subscriber: &SubscriptionClient,
) -> bool {
    if app.subscribe.is_none() {
        return false;
    }
    match key.code {
        KeyCode::Esc => app.close_subscribe(),
        KeyCode::Backspace => app.pop_email_char(),
        KeyCode::Enter => submit(app, gate, subscriber),
        KeyCode::Char(c) if !c.is_control() => app.push_email_char(c),
        _ => {}
    }
    true
}

/// Open the overlay on request, unless there is nothing left to unlock.
pub fn open(app: &mut App, gate: &AccessGate) {
    if gate.is_unlocked() {
        app.set_status("Album already unlocked");
    } else {
        app.open_subscribe();
    }
}

fn submit(app: &mut App, gate: &AccessGate, subscriber: &SubscriptionClient) {
    let Some(email) = app.email_input().map(str::to_string) else {
        return;
    };
    match subscriber.subscribe(gate, &email) {
        Ok(SubscribeOutcome::Subscribed) => {
            info!("unlocked by subscription");
            app.subscribe_succeeded("Thanks for subscribing! The full album is unlocked.");
        }
        Ok(SubscribeOutcome::AlreadySubscribed) => {
            app.subscribe_succeeded("You're already subscribed. The full album is unlocked.");
        }
        Err(e) => app.subscribe_failed(&e),
    }
}
