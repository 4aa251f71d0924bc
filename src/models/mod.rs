mod lat_lng;
mod notification;
mod route;

pub use lat_lng::LatLng;
pub use notification::{PositionNotification, StartCommand};
pub use route::{Route, RouteId};
