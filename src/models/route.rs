use serde::{Deserialize, Serialize};
use super::LatLng;

/// Opaque route identifier assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A predefined trip between two points, as listed by `GET /routes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    #[serde(rename = "_id")]
    pub id: RouteId,
    pub title: String,
    pub start_position: LatLng,
    pub end_position: LatLng,
}

impl Route {
    #[must_use]
    pub fn new(id: impl Into<RouteId>, title: impl Into<String>, start_position: LatLng, end_position: LatLng) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_position,
            end_position,
        }
    }
}
