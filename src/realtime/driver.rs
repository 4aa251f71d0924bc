use std::collections::VecDeque;
use crate::constants::START_EVENT;
use crate::error::ChannelError;
use crate::logging::{console_error, log};
use crate::models::{RouteId, StartCommand};
use super::channel::{ConnectionStatus, IncomingMessage};
use super::protocol::{self, Packet, CONNECT_FRAME, PONG_FRAME};

/// Frames to send back and messages to deliver after one inbound frame
#[derive(Debug, Default, PartialEq)]
pub struct Reaction {
    pub outgoing: Vec<String>,
    pub incoming: Vec<IncomingMessage>,
}

/// Namespace membership of the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Link {
    /// Waiting for the first namespace join
    #[default]
    Opening,
    Joined,
    /// Joined before, dropped since; a rejoin may be in flight
    Lost,
    Closed,
}

/// Transport-independent Socket.IO client state
///
/// Keeps the websocket session alive (namespace join, ping replies) and
/// holds start commands issued before the namespace is first joined,
/// flushing them once it is. After the server drops the namespace the client
/// asks to rejoin, and start commands are refused until it has.
#[derive(Debug, Default)]
pub struct ProtocolDriver {
    link: Link,
    pending: VecDeque<(RouteId, String)>,
}

impl ProtocolDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.link == Link::Joined
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.link == Link::Closed
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// React to one inbound text frame
    ///
    /// Undecodable frames and malformed payloads are dropped here; they never
    /// reach the tracking session.
    pub fn on_frame(&mut self, frame: &str) -> Reaction {
        let mut reaction = Reaction::default();

        let packet = match protocol::decode(frame) {
            Ok(packet) => packet,
            Err(e) => {
                log!("Dropping frame: {}", e);
                return reaction;
            }
        };

        match packet {
            Packet::Open(_) => {
                if self.link != Link::Closed {
                    reaction.outgoing.push(CONNECT_FRAME.to_string());
                }
            }
            Packet::Ping => reaction.outgoing.push(PONG_FRAME.to_string()),
            Packet::Connect => {
                if self.link != Link::Closed {
                    self.link = Link::Joined;
                    reaction.outgoing.extend(self.pending.drain(..).map(|(_, frame)| frame));
                    reaction.incoming.push(IncomingMessage::StatusChanged(ConnectionStatus::Connected));
                }
            }
            Packet::Disconnect => {
                if self.link != Link::Closed {
                    self.link = Link::Lost;
                    reaction.outgoing.push(CONNECT_FRAME.to_string());
                }
                reaction.incoming.extend(self.drop_pending());
                reaction.incoming.push(IncomingMessage::StatusChanged(ConnectionStatus::Disconnected));
            }
            Packet::Close => {
                self.link = Link::Closed;
                reaction.incoming.extend(self.drop_pending());
                reaction.incoming.push(IncomingMessage::StatusChanged(ConnectionStatus::Disconnected));
            }
            Packet::ConnectError(message) => {
                console_error!("Realtime channel refused connection: {}", message);
                if self.link != Link::Closed {
                    self.link = Link::Lost;
                }
                reaction.incoming.extend(self.drop_pending());
                reaction.incoming.push(IncomingMessage::StatusChanged(ConnectionStatus::Failed));
            }
            Packet::Event { name, payload } => match IncomingMessage::from_event(&name, payload) {
                Ok(Some(message)) => reaction.incoming.push(message),
                Ok(None) => {
                    log!("Ignoring event {}", name);
                }
                Err(e) => {
                    log!("Dropping {} event: {}", name, e);
                }
            },
            Packet::Pong | Packet::Noop | Packet::Ack => {}
        }

        reaction
    }

    /// Encode a start command
    ///
    /// Returns the frame to send right away, or `None` when it was queued
    /// until the namespace is first joined.
    ///
    /// # Errors
    ///
    /// Returns `Closed` once the transport has gone away, `NotConnected` while
    /// the server has dropped the namespace, or an encoding error.
    pub fn queue_start(&mut self, command: &StartCommand) -> Result<Option<String>, ChannelError> {
        match self.link {
            Link::Closed => Err(ChannelError::Closed),
            Link::Lost => Err(ChannelError::NotConnected),
            Link::Joined => Ok(Some(protocol::encode_event(START_EVENT, command)?)),
            Link::Opening => {
                let frame = protocol::encode_event(START_EVENT, command)?;
                self.pending.push_back((command.route_id.clone(), frame));
                Ok(None)
            }
        }
    }

    /// The underlying transport closed; nothing more will be sent
    ///
    /// Buffered start commands are reported as dropped ahead of the status.
    pub fn on_transport_closed(&mut self) -> Vec<IncomingMessage> {
        self.link = Link::Closed;
        let mut messages = self.drop_pending();
        messages.push(IncomingMessage::StatusChanged(ConnectionStatus::Disconnected));
        messages
    }

    /// The underlying transport reported an error
    pub fn on_transport_error(&mut self) -> Vec<IncomingMessage> {
        if self.link != Link::Closed {
            self.link = Link::Lost;
        }
        let mut messages = self.drop_pending();
        messages.push(IncomingMessage::StatusChanged(ConnectionStatus::Failed));
        messages
    }

    fn drop_pending(&mut self) -> Vec<IncomingMessage> {
        self.pending
            .drain(..)
            .map(|(route_id, _)| IncomingMessage::StartDropped(route_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LatLng, PositionNotification, RouteId};

    fn start(id: &str) -> StartCommand {
        StartCommand::new(RouteId::from(id))
    }

    fn connected_driver() -> ProtocolDriver {
        let mut driver = ProtocolDriver::new();
        driver.on_frame(r#"0{"sid":"s","pingInterval":25000,"pingTimeout":20000}"#);
        driver.on_frame(r#"40{"sid":"n"}"#);
        driver
    }

    #[test]
    fn test_open_joins_namespace() {
        let mut driver = ProtocolDriver::new();
        let reaction = driver.on_frame(r#"0{"sid":"s"}"#);
        assert_eq!(reaction.outgoing, vec![CONNECT_FRAME.to_string()]);
        assert!(reaction.incoming.is_empty());
        assert!(!driver.is_connected());
    }

    #[test]
    fn test_ping_is_answered() {
        let mut driver = connected_driver();
        assert_eq!(driver.on_frame("2").outgoing, vec![PONG_FRAME.to_string()]);
    }

    #[test]
    fn test_start_before_connect_is_flushed_on_connect() {
        let mut driver = ProtocolDriver::new();
        assert_eq!(driver.queue_start(&start("A")).expect("queued"), None);
        assert_eq!(driver.pending_len(), 1);

        let reaction = driver.on_frame("40");

        assert_eq!(reaction.outgoing, vec![r#"42["new-direction",{"routeId":"A"}]"#.to_string()]);
        assert_eq!(reaction.incoming, vec![IncomingMessage::StatusChanged(ConnectionStatus::Connected)]);
        assert_eq!(driver.pending_len(), 0);
    }

    #[test]
    fn test_start_when_connected_is_sent_immediately() {
        let mut driver = connected_driver();
        let frame = driver.queue_start(&start("B")).expect("encodable");
        assert_eq!(frame.as_deref(), Some(r#"42["new-direction",{"routeId":"B"}]"#));
    }

    #[test]
    fn test_start_after_close_fails() {
        let mut driver = connected_driver();
        driver.on_transport_closed();
        assert!(matches!(driver.queue_start(&start("A")), Err(ChannelError::Closed)));
    }

    #[test]
    fn test_position_frame_is_delivered() {
        let mut driver = connected_driver();
        let reaction = driver.on_frame(r#"42["new-position",{"routeId":"A","position":[1.5,1.5],"finished":false}]"#);
        assert_eq!(
            reaction.incoming,
            vec![IncomingMessage::PositionUpdate(PositionNotification::new("A", LatLng::new(1.5, 1.5), false))]
        );
    }

    #[test]
    fn test_malformed_frames_are_dropped() {
        let mut driver = connected_driver();
        for frame in ["", "42{oops", r#"42["new-position",{"routeId":"A"}]"#, "x"] {
            assert_eq!(driver.on_frame(frame), Reaction::default());
        }
        assert!(driver.is_connected());
    }

    #[test]
    fn test_server_disconnect_reports_status_and_rejoins() {
        let mut driver = connected_driver();
        let reaction = driver.on_frame("41");
        assert_eq!(reaction.incoming, vec![IncomingMessage::StatusChanged(ConnectionStatus::Disconnected)]);
        assert_eq!(reaction.outgoing, vec![CONNECT_FRAME.to_string()]);
        assert!(!driver.is_connected());
        assert!(!driver.is_closed());
    }

    #[test]
    fn test_start_after_server_disconnect_is_refused() {
        let mut driver = connected_driver();
        driver.on_frame("41");

        assert!(matches!(driver.queue_start(&start("A")), Err(ChannelError::NotConnected)));
        assert!(matches!(driver.queue_start(&start("A")), Err(ChannelError::NotConnected)));
        assert_eq!(driver.pending_len(), 0);
    }

    #[test]
    fn test_start_after_rejoin_is_sent() {
        let mut driver = connected_driver();
        driver.on_frame("41");
        let reaction = driver.on_frame("40");

        assert_eq!(reaction.incoming, vec![IncomingMessage::StatusChanged(ConnectionStatus::Connected)]);
        let frame = driver.queue_start(&start("A")).expect("encodable");
        assert_eq!(frame.as_deref(), Some(r#"42["new-direction",{"routeId":"A"}]"#));
    }

    #[test]
    fn test_buffered_starts_are_reported_when_dropped() {
        let mut driver = ProtocolDriver::new();
        driver.queue_start(&start("A")).expect("queued");
        driver.queue_start(&start("B")).expect("queued");

        let messages = driver.on_transport_closed();

        assert_eq!(
            messages,
            vec![
                IncomingMessage::StartDropped(RouteId::from("A")),
                IncomingMessage::StartDropped(RouteId::from("B")),
                IncomingMessage::StatusChanged(ConnectionStatus::Disconnected),
            ]
        );
        assert_eq!(driver.pending_len(), 0);
    }

    #[test]
    fn test_refused_namespace_drops_buffered_starts() {
        let mut driver = ProtocolDriver::new();
        driver.queue_start(&start("A")).expect("queued");

        let reaction = driver.on_frame(r#"44{"message":"nope"}"#);

        assert_eq!(
            reaction.incoming,
            vec![
                IncomingMessage::StartDropped(RouteId::from("A")),
                IncomingMessage::StatusChanged(ConnectionStatus::Failed),
            ]
        );
        assert!(matches!(driver.queue_start(&start("B")), Err(ChannelError::NotConnected)));
    }

    #[test]
    fn test_connect_error_reports_failure() {
        let mut driver = ProtocolDriver::new();
        let reaction = driver.on_frame(r#"44{"message":"nope"}"#);
        assert_eq!(reaction.incoming, vec![IncomingMessage::StatusChanged(ConnectionStatus::Failed)]);
    }
}
