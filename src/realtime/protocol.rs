//! Socket.IO v4 framing over Engine.IO v4 text frames.
//!
//! Only the subset the tracker needs: the default namespace, text events,
//! and the transport packets required to keep a websocket session alive.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::ProtocolError;

/// Reply to a server ping
pub const PONG_FRAME: &str = "3";

/// Join the default namespace
pub const CONNECT_FRAME: &str = "40";

/// Leave the default namespace
pub const DISCONNECT_FRAME: &str = "41";

/// Engine.IO handshake sent by the server in the open packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub ping_interval: u64,
    #[serde(default)]
    pub ping_timeout: u64,
}

/// One decoded text frame
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Engine.IO open; the handshake is `None` if the body was unreadable
    Open(Option<Handshake>),
    Close,
    Ping,
    Pong,
    Noop,
    /// Namespace joined
    Connect,
    /// Namespace left (server side)
    Disconnect,
    Event { name: String, payload: Value },
    /// Acknowledgement of an emit; the tracker never asks for one
    Ack,
    ConnectError(String),
}

/// Decode a single text frame
///
/// # Errors
///
/// Returns an error for empty frames, unknown packet types, and event
/// packets whose body is not a `["name", payload]` array.
pub fn decode(frame: &str) -> Result<Packet, ProtocolError> {
    let mut chars = frame.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let body = chars.as_str();

    match kind {
        '0' => Ok(Packet::Open(serde_json::from_str(body).ok())),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_message(body),
        '5' | '6' => Ok(Packet::Noop),
        other => Err(ProtocolError::UnknownPacket(other.to_string())),
    }
}

fn decode_message(body: &str) -> Result<Packet, ProtocolError> {
    let mut chars = body.chars();
    let kind = chars.next().ok_or(ProtocolError::Empty)?;
    let rest = chars.as_str();

    match kind {
        '0' => Ok(Packet::Connect),
        '1' => Ok(Packet::Disconnect),
        '2' => decode_event(rest),
        '3' => Ok(Packet::Ack),
        '4' => Ok(Packet::ConnectError(connect_error_message(rest))),
        other => Err(ProtocolError::UnknownPacket(format!("4{other}"))),
    }
}

fn decode_event(body: &str) -> Result<Packet, ProtocolError> {
    let body = strip_namespace(body);
    let body = body.trim_start_matches(|c: char| c.is_ascii_digit());

    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProtocolError::InvalidPayload(e.to_string()))?;
    let Value::Array(mut parts) = value else {
        return Err(ProtocolError::InvalidPayload("event body is not an array".to_string()));
    };
    if parts.is_empty() {
        return Err(ProtocolError::InvalidPayload("event without a name".to_string()));
    }

    let payload = if parts.len() > 1 { parts.swap_remove(1) } else { Value::Null };
    let Value::String(name) = parts.swap_remove(0) else {
        return Err(ProtocolError::InvalidPayload("event name is not a string".to_string()));
    };

    Ok(Packet::Event { name, payload })
}

/// `/admin,["x"]` → `["x"]`; the default namespace has no prefix
fn strip_namespace(body: &str) -> &str {
    if body.starts_with('/') {
        body.split_once(',').map_or("", |(_, rest)| rest)
    } else {
        body
    }
}

fn connect_error_message(body: &str) -> String {
    let body = strip_namespace(body);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| body.to_string(), str::to_string),
        _ => body.to_string(),
    }
}

/// Encode an event for the default namespace: `42["name",payload]`
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized to JSON.
pub fn encode_event<T: Serialize>(name: &str, payload: &T) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string(&(name, payload))?;
    Ok(format!("42{body}"))
}
