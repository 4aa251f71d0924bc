use serde::{Deserialize, Serialize};
use crate::constants::{
    DEFAULT_API_URL, DEFAULT_MAP_ZOOM, FALLBACK_CENTER, MAX_MAP_ZOOM, MAX_TOASTS, MIN_MAP_ZOOM,
    ROUTES_PATH, SOCKET_PATH, TOAST_DURATION_MS,
};
use crate::models::LatLng;

/// Runtime configuration of the tracker client
///
/// The API base is baked in at build time through `ROUTE_TRACKER_API_URL`;
/// everything else falls back to the defaults in `constants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Overrides the socket URL derived from `api_url`
    #[serde(default)]
    pub socket_url: Option<String>,
    #[serde(default = "default_map_zoom")]
    pub map_zoom: f64,
    #[serde(default = "default_fallback_center")]
    pub fallback_center: LatLng,
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u32,
    #[serde(default = "default_max_toasts")]
    pub max_toasts: usize,
}

fn default_api_url() -> String {
    option_env!("ROUTE_TRACKER_API_URL")
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

fn default_map_zoom() -> f64 {
    DEFAULT_MAP_ZOOM
}

fn default_fallback_center() -> LatLng {
    FALLBACK_CENTER
}

fn default_toast_duration_ms() -> u32 {
    TOAST_DURATION_MS
}

fn default_max_toasts() -> usize {
    MAX_TOASTS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            socket_url: option_env!("ROUTE_TRACKER_SOCKET_URL").map(str::to_string),
            map_zoom: default_map_zoom(),
            fallback_center: default_fallback_center(),
            toast_duration_ms: default_toast_duration_ms(),
            max_toasts: default_max_toasts(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// `GET` endpoint of the route listing
    #[must_use]
    pub fn routes_url(&self) -> String {
        format!("{}{ROUTES_PATH}", self.api_url.trim_end_matches('/'))
    }

    /// WebSocket endpoint of the realtime channel
    ///
    /// `http://` maps to `ws://` and `https://` to `wss://`; a base without a
    /// scheme is treated as plain `ws://`.
    #[must_use]
    pub fn socket_url(&self) -> String {
        if let Some(url) = &self.socket_url {
            return url.clone();
        }

        let base = self.api_url.trim_end_matches('/');
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else if base.starts_with("ws://") || base.starts_with("wss://") {
            base.to_string()
        } else {
            format!("ws://{base}")
        };

        format!("{ws_base}{SOCKET_PATH}")
    }

    /// Map zoom clamped to the renderer's supported range
    #[must_use]
    pub fn clamped_zoom(&self) -> f64 {
        self.map_zoom.clamp(MIN_MAP_ZOOM, MAX_MAP_ZOOM)
    }
}
