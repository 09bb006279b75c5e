use std::cell::Cell;
use std::rc::Rc;

use crate::error::EncoreError;
use crate::player::GatePrompt;

/// The e-mail entry shown when gated content is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribeForm {
    pub email: String,
    pub error: Option<String>,
}

pub struct App {
    /// Position in the visible queue, not a playlist index.
    pub selected: usize,
    pub subscribe: Option<SubscribeForm>,
    pub status: Option<String>,
    prompt_requested: Rc<Cell<bool>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            selected: 0,
            subscribe: None,
            status: None,
            prompt_requested: Rc::new(Cell::new(false)),
        }
    }

    /// Callback handed to the player; it only raises a flag that the event
    /// loop turns into the overlay on its next pass.
    pub fn gate_prompt(&self) -> GatePrompt {
        let flag = self.prompt_requested.clone();
        Box::new(move || flag.set(true))
    }

    /// Open the overlay if the player asked for it since the last call.
    pub fn take_prompt(&mut self) -> bool {
        if !self.prompt_requested.replace(false) {
            return false;
        }
        self.open_subscribe();
        true
    }

    pub fn open_subscribe(&mut self) {
        if self.subscribe.is_none() {
            self.subscribe = Some(SubscribeForm::default());
        }
    }

    pub fn close_subscribe(&mut self) {
        self.subscribe = None;
    }

    pub fn push_email_char(&mut self, c: char) {
        if let Some(form) = self.subscribe.as_mut() {
            form.email.push(c);
            form.error = None;
        }
    }

    pub fn pop_email_char(&mut self) {
        if let Some(form) = self.subscribe.as_mut() {
            form.email.pop();
        }
    }

    /// Current overlay input, if the overlay is open.
    pub fn email_input(&self) -> Option<&str> {
        self.subscribe.as_ref().map(|f| f.email.as_str())
    }

    pub fn subscribe_failed(&mut self, err: &EncoreError) {
        if let Some(form) = self.subscribe.as_mut() {
            form.error = Some(subscribe_error_text(err));
        }
    }

    pub fn subscribe_succeeded(&mut self, message: &str) {
        self.subscribe = None;
        self.set_status(message);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    /// Keep the cursor inside a list of `len` rows.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn next(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// User-facing text for a failed subscription.
pub fn subscribe_error_text(err: &EncoreError) -> String {
    match err {
        EncoreError::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
        EncoreError::SubscriptionRejected { message, .. } => message.clone(),
        EncoreError::Http(_) => "Could not reach the server. Please try again.".to_string(),
        other => format!("Subscription failed: {other}"),
    }
}
