//! Confirmation and notices over HTMX.
//!
//! The browser asks for confirmation before the request is sent (`hx-confirm`)
//! and, when granted, posts the prompt it showed as `confirmed`. The server
//! rebuilds the prompt from the cart as it is now; a confirmation only counts
//! when the two match, so a prompt shown for a stale row or total is treated
//! as declined. Notices travel back in the `HX-Trigger` response header as a
//! `bella-toast` event.

use axum::http::{HeaderName, HeaderValue};
use bella_mode_core::cart::{Interaction, Notice, NoticeKind};
use serde::Serialize;

/// Header HTMX reads client-side events from.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Event fired after every cart request so badges refresh.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Event carrying a toast notice.
pub const TOAST_EVENT: &str = "bella-toast";

/// Toast payload sent to the browser.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Toast<'a> {
    message: &'a str,
    duration_ms: u64,
    kind: NoticeKind,
    error: bool,
}

/// Interaction for one HTMX request.
#[derive(Debug, Default)]
pub struct HtmxInteraction {
    confirmed: Option<String>,
    prompts: Vec<String>,
    notices: Vec<Notice>,
}

impl HtmxInteraction {
    /// `confirmed` is the prompt the user accepted before the request was sent.
    #[must_use]
    pub const fn new(confirmed: Option<String>) -> Self {
        Self {
            confirmed,
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Prompts the operation asked for.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Notices the operation emitted.
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// `HX-Trigger` value: the cart-updated event plus the latest notice.
    #[must_use]
    pub fn trigger_header(&self) -> HeaderValue {
        let mut events = serde_json::Map::new();
        events.insert(CART_UPDATED_EVENT.to_string(), serde_json::Value::Bool(true));

        if let Some(notice) = self.notices.last() {
            let toast = Toast {
                message: &notice.message,
                duration_ms: u64::try_from(notice.duration.as_millis()).unwrap_or(u64::MAX),
                kind: notice.kind,
                error: notice.is_error(),
            };
            match serde_json::to_value(&toast) {
                Ok(value) => {
                    events.insert(TOAST_EVENT.to_string(), value);
                }
                Err(e) => tracing::error!(error = %e, "failed to encode toast"),
            }
        }

        let json = escape_non_ascii(&serde_json::Value::Object(events).to_string());
        HeaderValue::from_str(&json).unwrap_or_else(|e| {
            tracing::error!(error = %e, "invalid HX-Trigger header");
            HeaderValue::from_static(CART_UPDATED_EVENT)
        })
    }
}

impl Interaction for HtmxInteraction {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        match self.confirmed.as_deref() {
            Some(accepted) if accepted == prompt => true,
            Some(accepted) => {
                tracing::info!(prompt, accepted, "confirmed prompt is stale");
                false
            }
            None => {
                tracing::debug!(prompt, "confirmation not granted by client");
                false
            }
        }
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Header values must be visible ASCII; escape everything else as JSON
/// `\uXXXX` sequences.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for ch in json.chars() {
        if ch.is_ascii() {
            escaped.push(ch);
        } else {
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                escaped.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    escaped
}
