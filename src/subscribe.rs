//! E-mail subscription: the action that unlocks the album.

use std::sync::LazyLock;
use std::time::Duration;

use log::{info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{EncoreError, Result};
use crate::gate::AccessGate;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const FALLBACK_MESSAGE: &str = "Something went wrong";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

#[derive(Serialize)]
struct SubscribeRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

pub struct SubscriptionClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl SubscriptionClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Register `email` and unlock `gate` on success.
    ///
    /// The gate is untouched on any error.
    pub fn subscribe(&self, gate: &AccessGate, email: &str) -> Result<SubscribeOutcome> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(EncoreError::InvalidEmail(email.to_string()));
        }

        let response = self
            .client
            .post(&self.url)
            .json(&SubscribeRequest { email })
            .send()?;
        let status = response.status();

        let outcome = if status.as_u16() == 409 {
            SubscribeOutcome::AlreadySubscribed
        } else if status.is_success() {
            SubscribeOutcome::Subscribed
        } else {
            let message = rejection_message(&response.text().unwrap_or_default());
            warn!("subscription rejected with {status}: {message}");
            return Err(EncoreError::SubscriptionRejected {
                status: status.as_u16(),
                message,
            });
        };

        info!("subscription accepted ({outcome:?})");
        gate.unlock_with_email(email);
        Ok(outcome)
    }
}

fn rejection_message(body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
