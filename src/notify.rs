//! Webhook transport and request signing for built cards.
//!
//! Transmission is synchronous and happens only after a card is built;
//! nothing here is called from the builder path.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;
use thiserror::Error;
use ureq::Agent;

use crate::blocks::TemplateReference;
use crate::card::Card;

/// Environment variable holding the bot webhook URL.
pub const WEBHOOK_URL_ENV: &str = "LARK_WEBHOOK_URL";
/// Environment variable holding the optional signing secret.
pub const WEBHOOK_SECRET_ENV: &str = "LARK_WEBHOOK_SECRET";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type HmacSha256 = Hmac<Sha256>;

/// Delivery failure. Transport errors are environmental; a rejection is the
/// receiving service refusing the payload.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook transport failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("webhook returned HTTP {status}")]
    HttpStatus { status: u16 },
    #[error("webhook rejected payload: code {code}: {msg}")]
    Rejected { code: i64, msg: String },
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("{0} is not set")]
    MissingEnv(&'static str),
}

/// Acknowledgement envelope returned by the webhook endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

/// Client for a Lark custom-bot webhook.
pub struct LarkNotifier {
    webhook_url: String,
    secret: Option<String>,
    agent: Agent,
}

impl LarkNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .new_agent();
        LarkNotifier {
            webhook_url: webhook_url.into(),
            secret: None,
            agent,
        }
    }

    /// Enable request signing. Signed requests carry a unix timestamp and an
    /// HMAC-SHA256 signature the receiving bot verifies.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Read `LARK_WEBHOOK_URL` (required) and `LARK_WEBHOOK_SECRET`
    /// (optional) from the environment.
    pub fn from_env() -> Result<Self, NotifyError> {
        let url = std::env::var(WEBHOOK_URL_ENV)
            .map_err(|_| NotifyError::MissingEnv(WEBHOOK_URL_ENV))?;
        let mut notifier = LarkNotifier::new(url);
        if let Ok(secret) = std::env::var(WEBHOOK_SECRET_ENV) {
            if !secret.is_empty() {
                notifier = notifier.with_secret(secret);
            }
        }
        Ok(notifier)
    }

    /// Post a built card as an interactive message.
    pub fn send(&self, card: &Card) -> Result<Ack, NotifyError> {
        self.post(interactive_payload(serde_json::to_value(card)?))
    }

    /// Post a published-template message.
    pub fn send_template(&self, template: &TemplateReference) -> Result<Ack, NotifyError> {
        self.post(interactive_payload(serde_json::to_value(template)?))
    }

    fn post(&self, mut payload: Value) -> Result<Ack, NotifyError> {
        if let Some(secret) = &self.secret {
            attach_signature(&mut payload, unix_timestamp(), secret);
        }
        tracing::debug!(url = %self.webhook_url, "posting card to webhook");
        let mut response = self
            .agent
            .post(self.webhook_url.as_str())
            .send_json(payload)?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::HttpStatus {
                status: status.as_u16(),
            });
        }
        let ack: Ack = response.body_mut().read_json()?;
        if ack.code != 0 {
            return Err(NotifyError::Rejected {
                code: ack.code,
                msg: ack.msg,
            });
        }
        tracing::info!("webhook accepted card");
        Ok(ack)
    }
}

fn interactive_payload(card: Value) -> Value {
    json!({
        "msg_type": "interactive",
        "card": card,
    })
}

fn attach_signature(payload: &mut Value, timestamp: u64, secret: &str) {
    payload["timestamp"] = Value::String(timestamp.to_string());
    payload["sign"] = Value::String(sign(timestamp, secret));
}

/// Custom-bot signature: `{timestamp}\n{secret}` is the HMAC key and the
/// signed message is empty.
fn sign(timestamp: u64, secret: &str) -> String {
    let key = format!("{timestamp}\n{secret}");
    let mac = HmacSha256::new_from_slice(key.as_bytes()).expect("hmac accepts any key length");
    BASE64.encode(mac.finalize().into_bytes())
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
