use crate::models::LatLng;

/// Palette new routes draw their color from
pub const ROUTE_PALETTE: [&str; 10] = [
    "#b71c1c",
    "#4a148c",
    "#2e7d32",
    "#e65100",
    "#2962ff",
    "#c2185b",
    "#FFCD00",
    "#3e2723",
    "#03a9f4",
    "#827717",
];

/// Client → server event asking the backend to start emitting positions
pub const START_EVENT: &str = "new-direction";

/// Server → client event carrying a position update
pub const POSITION_EVENT: &str = "new-position";

/// Path of the route listing relative to the API base URL
pub const ROUTES_PATH: &str = "/routes";

/// Socket.IO endpoint relative to the API base URL (Engine.IO v4, websocket only)
pub const SOCKET_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// API base used when `ROUTE_TRACKER_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Initial map zoom level
pub const DEFAULT_MAP_ZOOM: f64 = 15.0;

pub const MIN_MAP_ZOOM: f64 = 3.0;
pub const MAX_MAP_ZOOM: f64 = 19.0;

/// Map center when the operator position cannot be resolved (São Paulo)
pub const FALLBACK_CENTER: LatLng = LatLng::new(-23.550_52, -46.633_308);

/// How long a toast stays on screen
pub const TOAST_DURATION_MS: u32 = 4_000;

/// Maximum number of toasts visible at once
pub const MAX_TOASTS: usize = 3;
