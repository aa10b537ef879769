//! Boundary adapter for the provider's delivery payload.
//!
//! Only `entry[0].changes[0].value.messages[0]` is looked at. Everything past
//! this module works with [`InboundMessage`] and knows nothing about the
//! provider's JSON shape.

use serde_json::Value;

const FIRST_MESSAGE: &str = "/entry/0/changes/0/value/messages/0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Sender phone in the provider's canonical form (digits, country code).
    pub sender: String,
    /// Message text, trimmed.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// No message in the payload, or not a text message (status updates,
    /// media, reactions).
    NotText,
    /// A text message without a sender or with a blank body.
    Incomplete,
    Text(InboundMessage),
}

pub fn parse(body: &[u8]) -> Result<Delivery, serde_json::Error> {
    let payload: Value = serde_json::from_slice(body)?;
    Ok(read_delivery(&payload))
}

fn read_delivery(payload: &Value) -> Delivery {
    let Some(message) = payload.pointer(FIRST_MESSAGE) else {
        return Delivery::NotText;
    };
    if message.get("type").and_then(Value::as_str) != Some("text") {
        return Delivery::NotText;
    }

    let sender = message
        .get("from")
        .and_then(Value::as_str)
        .filter(|from| !from.is_empty());
    let body = message
        .pointer("/text/body")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|body| !body.is_empty());

    match (sender, body) {
        (Some(sender), Some(body)) => Delivery::Text(InboundMessage {
            sender: sender.to_string(),
            body: body.to_string(),
        }),
        _ => Delivery::Incomplete,
    }
}
