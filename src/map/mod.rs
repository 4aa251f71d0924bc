pub mod controller;
pub mod icon;
pub mod layer;
pub mod projection;
pub mod render;

pub use controller::{MapController, RouteMarkerOptions, TrackedRoute};
pub use icon::{MarkerIcon, MarkerKind};
pub use layer::{MapSurface, Marker, MarkerId, MarkerLayer};
pub use projection::MapView;
