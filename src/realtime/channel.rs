use serde_json::Value;
use crate::constants::POSITION_EVENT;
use crate::error::{ChannelError, ProtocolError};
use crate::models::{PositionNotification, RouteId, StartCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Failed,
}

/// What the channel hands to the tracking session
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingMessage {
    StatusChanged(ConnectionStatus),
    PositionUpdate(PositionNotification),
    /// A buffered start command was discarded before it reached the server
    StartDropped(RouteId),
}

impl IncomingMessage {
    /// Interpret a named event
    ///
    /// Events the tracker does not subscribe to yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error when a `new-position` payload is missing fields, has
    /// the wrong shape, or carries coordinates outside the valid range.
    pub fn from_event(name: &str, payload: Value) -> Result<Option<Self>, ProtocolError> {
        if name != POSITION_EVENT {
            return Ok(None);
        }

        let notification = serde_json::from_value::<PositionNotification>(payload)
            .map_err(|e| ProtocolError::InvalidPayload(e.to_string()))?;
        if !notification.position.is_valid() {
            return Err(ProtocolError::InvalidPayload(format!(
                "position {} out of range",
                notification.position
            )));
        }

        Ok(Some(Self::PositionUpdate(notification)))
    }
}

/// Outbound side of the realtime channel
///
/// Inbound messages are pushed by the adapter to whoever owns it, as
/// `IncomingMessage` values.
pub trait RealtimeChannel {
    /// Ask the backend to start emitting positions for a route
    ///
    /// # Errors
    ///
    /// Returns an error if the command can never be delivered (closed
    /// channel, unencodable payload, transport refusal).
    fn request_start(&mut self, command: &StartCommand) -> Result<(), ChannelError>;

    /// Release the channel; later `request_start` calls fail with `Closed`
    fn close(&mut self);
}

impl<C: RealtimeChannel + ?Sized> RealtimeChannel for Box<C> {
    fn request_start(&mut self, command: &StartCommand) -> Result<(), ChannelError> {
        (**self).request_start(command)
    }

    fn close(&mut self) {
        (**self).close();
    }
}
