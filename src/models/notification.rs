use serde::{Deserialize, Serialize};
use super::{LatLng, RouteId};

/// Outbound "request start" payload (`new-direction` event)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartCommand {
    pub route_id: RouteId,
}

impl StartCommand {
    #[must_use]
    pub fn new(route_id: RouteId) -> Self {
        Self { route_id }
    }
}

/// Inbound position update (`new-position` event)
///
/// On the wire the position is a `[lat, lng]` pair. Every field is required;
/// a payload missing one fails to deserialize and is dropped by the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionNotification {
    pub route_id: RouteId,
    #[serde(with = "pair")]
    pub position: LatLng,
    pub finished: bool,
}

impl PositionNotification {
    #[must_use]
    pub fn new(route_id: impl Into<RouteId>, position: LatLng, finished: bool) -> Self {
        Self {
            route_id: route_id.into(),
            position,
            finished,
        }
    }
}

mod pair {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::models::LatLng;

    pub fn serialize<S: Serializer>(point: &LatLng, serializer: S) -> Result<S::Ok, S::Error> {
        <[f64; 2]>::from(*point).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LatLng, D::Error> {
        <[f64; 2]>::deserialize(deserializer).map(LatLng::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_command_wire_shape() {
        let cmd = StartCommand::new(RouteId::from("A"));
        let json = serde_json::to_value(&cmd).expect("serializable");
        assert_eq!(json, serde_json::json!({ "routeId": "A" }));
    }

    #[test]
    fn test_position_notification_from_wire() {
        let json = r#"{"routeId": "A", "position": [1.5, 2.5], "finished": false}"#;
        let notification: PositionNotification = serde_json::from_str(json).expect("valid payload");

        assert_eq!(notification.route_id, RouteId::from("A"));
        assert_eq!(notification.position, LatLng::new(1.5, 2.5));
        assert!(!notification.finished);
    }

    #[test]
    fn test_position_notification_missing_fields_rejected() {
        let no_finished = r#"{"routeId": "A", "position": [1.5, 2.5]}"#;
        let no_position = r#"{"routeId": "A", "finished": true}"#;
        let short_position = r#"{"routeId": "A", "position": [1.5], "finished": true}"#;

        assert!(serde_json::from_str::<PositionNotification>(no_finished).is_err());
        assert!(serde_json::from_str::<PositionNotification>(no_position).is_err());
        assert!(serde_json::from_str::<PositionNotification>(short_position).is_err());
    }

    #[test]
    fn test_position_serializes_back_to_pair() {
        let notification = PositionNotification::new("A", LatLng::new(2.0, 3.0), true);
        let json = serde_json::to_value(&notification).expect("serializable");
        assert_eq!(json["position"], serde_json::json!([2.0, 3.0]));
    }
}
