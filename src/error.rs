//! Error types shared across the tracker.

use thiserror::Error;
use crate::models::RouteId;

/// Failures of `TrackingSession::start_tracking`
///
/// A route that is already being tracked is not an error here; it comes back
/// as `StartOutcome::AlreadyTracked`.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// The operator referenced a route id the catalog does not know.
    #[error("Route {0} not found")]
    RouteNotFound(RouteId),

    /// The start command could not be handed to the realtime channel.
    #[error("Failed to request route start: {0}")]
    Channel(#[from] ChannelError),
}

/// Returned by `MapController::add_route` when the route already has markers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Route {0} is already being tracked")]
pub struct AlreadyTracked(pub RouteId);

/// Outbound failures of a realtime channel
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The websocket could not be opened.
    #[error("Could not open realtime channel: {0}")]
    Connect(String),

    /// The underlying socket is closed; nothing more can be sent.
    #[error("Realtime channel is closed")]
    Closed,

    /// The server dropped the session; commands are refused until it is rejoined.
    #[error("Not connected to live updates")]
    NotConnected,

    /// Payload could not be encoded.
    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    /// The transport rejected the frame.
    #[error("Failed to send frame: {0}")]
    Send(String),
}

/// Inbound frames that cannot be understood
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Empty frame")]
    Empty,

    #[error("Unknown packet type: {0}")]
    UnknownPacket(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

/// Catalog fetch failures
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Failed to deserialize: {0}")]
    Decode(String),
}

/// Geolocation failures
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// The browser exposes no geolocation API.
    #[error("Geolocation is not available")]
    Unavailable,

    /// The lookup was refused or timed out.
    #[error("Could not determine current position: {0}")]
    Denied(String),
}
