use chrono::{DateTime, Utc};
use indexmap::map::Entry;
use indexmap::IndexMap;
use crate::color::RouteColor;
use crate::error::AlreadyTracked;
use crate::logging::log;
use crate::models::{LatLng, RouteId};
use super::icon::MarkerIcon;
use super::layer::{MapSurface, MarkerId, MarkerLayer};

/// Where and how to draw a newly tracked route
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMarkerOptions {
    pub color: RouteColor,
    pub start_position: LatLng,
    pub end_position: LatLng,
}

/// Live-tracking record of one route
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedRoute {
    pub route_id: RouteId,
    pub color: RouteColor,
    pub current_marker: MarkerId,
    pub end_marker: MarkerId,
    pub last_position: LatLng,
    /// When the last position update was applied; `None` until the first one
    pub last_update: Option<DateTime<Utc>>,
}

/// Owns the mapping from route id to its markers
///
/// A route is tracked exactly when it has an entry here. There is no separate
/// state flag: removal deletes the entry, so late updates for a removed route
/// find nothing and do nothing.
pub struct MapController<S: MapSurface = MarkerLayer> {
    surface: S,
    routes: IndexMap<RouteId, TrackedRoute>,
}

impl MapController<MarkerLayer> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_surface(MarkerLayer::new())
    }
}

impl Default for MapController<MarkerLayer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MapSurface> MapController<S> {
    pub fn with_surface(surface: S) -> Self {
        Self {
            surface,
            routes: IndexMap::new(),
        }
    }

    /// Start drawing a route: a car marker at its start and a pin at its end
    ///
    /// # Errors
    ///
    /// Returns `AlreadyTracked` if the route already has markers; nothing is
    /// placed in that case.
    pub fn add_route(&mut self, route_id: RouteId, options: RouteMarkerOptions) -> Result<&TrackedRoute, AlreadyTracked> {
        match self.routes.entry(route_id) {
            Entry::Occupied(entry) => Err(AlreadyTracked(entry.key().clone())),
            Entry::Vacant(entry) => {
                let current_marker = self
                    .surface
                    .place_marker(options.start_position, MarkerIcon::car(options.color.clone()));
                let end_marker = self
                    .surface
                    .place_marker(options.end_position, MarkerIcon::pin(options.color.clone()));

                log!("Tracking route {}", entry.key());

                let tracked = TrackedRoute {
                    route_id: entry.key().clone(),
                    color: options.color,
                    current_marker,
                    end_marker,
                    last_position: options.start_position,
                    last_update: None,
                };
                Ok(entry.insert(tracked))
            }
        }
    }

    /// Relocate the car marker of a tracked route
    ///
    /// Returns false, and changes nothing, when the route is not tracked.
    pub fn move_current_marker(&mut self, route_id: &RouteId, position: LatLng) -> bool {
        let Some(tracked) = self.routes.get_mut(route_id) else {
            log!("Ignoring position for untracked route {}", route_id);
            return false;
        };

        self.surface.move_marker(tracked.current_marker, position);
        tracked.last_position = position;
        tracked.last_update = Some(Utc::now());
        true
    }

    /// Take a route's markers off the map and forget it
    ///
    /// Returns the removed record, or `None` when the route was not tracked.
    pub fn remove_route(&mut self, route_id: &RouteId) -> Option<TrackedRoute> {
        let tracked = self.routes.shift_remove(route_id)?;
        self.surface.remove_marker(tracked.current_marker);
        self.surface.remove_marker(tracked.end_marker);
        log!("Stopped tracking route {}", route_id);
        Some(tracked)
    }

    /// Remove every tracked route and its markers
    pub fn clear(&mut self) {
        for (_, tracked) in self.routes.drain(..) {
            self.surface.remove_marker(tracked.current_marker);
            self.surface.remove_marker(tracked.end_marker);
        }
    }

    #[must_use]
    pub fn is_tracked(&self, route_id: &RouteId) -> bool {
        self.routes.contains_key(route_id)
    }

    #[must_use]
    pub fn get(&self, route_id: &RouteId) -> Option<&TrackedRoute> {
        self.routes.get(route_id)
    }

    /// Tracked routes in the order they were started
    pub fn tracked_routes(&self) -> impl Iterator<Item = &TrackedRoute> {
        self.routes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::icon::MarkerKind;

    fn options() -> RouteMarkerOptions {
        RouteMarkerOptions {
            color: RouteColor::new("#2962ff"),
            start_position: LatLng::new(1.0, 1.0),
            end_position: LatLng::new(2.0, 2.0),
        }
    }

    fn r1() -> RouteId {
        RouteId::from("r1")
    }

    #[test]
    fn test_add_route_places_car_and_pin() {
        let mut map = MapController::new();
        let tracked = map.add_route(r1(), options()).expect("first add succeeds").clone();

        let layer = map.surface();
        assert_eq!(layer.len(), 2);

        let car = layer.get(tracked.current_marker).expect("car placed");
        assert_eq!(car.icon.kind, MarkerKind::Car);
        assert_eq!(car.position, LatLng::new(1.0, 1.0));
        assert_eq!(car.icon.fill(), "#2962ff");

        let pin = layer.get(tracked.end_marker).expect("pin placed");
        assert_eq!(pin.icon.kind, MarkerKind::Pin);
        assert_eq!(pin.position, LatLng::new(2.0, 2.0));

        assert_eq!(tracked.last_position, LatLng::new(1.0, 1.0));
        assert!(tracked.last_update.is_none());
    }

    #[test]
    fn test_second_add_is_rejected_and_leaves_one_entry() {
        let mut map = MapController::new();
        map.add_route(r1(), options()).expect("first add succeeds");

        let second = map.add_route(r1(), options());

        assert_eq!(second.err(), Some(AlreadyTracked(r1())));
        assert_eq!(map.len(), 1);
        assert_eq!(map.surface().len(), 2);
    }

    #[test]
    fn test_move_unknown_route_is_inert() {
        let mut map = MapController::new();
        map.add_route(RouteId::from("other"), options()).expect("add succeeds");
        let before: Vec<_> = map.surface().iter().map(|(id, m)| (id, m.clone())).collect();

        let moved = map.move_current_marker(&r1(), LatLng::new(9.0, 9.0));

        let after: Vec<_> = map.surface().iter().map(|(id, m)| (id, m.clone())).collect();
        assert!(!moved);
        assert!(!map.is_tracked(&r1()));
        assert_eq!(before, after);
    }

    #[test]
    fn test_move_relocates_car_only() {
        let mut map = MapController::new();
        let tracked = map.add_route(r1(), options()).expect("add succeeds").clone();

        assert!(map.move_current_marker(&r1(), LatLng::new(1.5, 1.5)));

        let layer = map.surface();
        assert_eq!(layer.get(tracked.current_marker).map(|m| m.position), Some(LatLng::new(1.5, 1.5)));
        assert_eq!(layer.get(tracked.end_marker).map(|m| m.position), Some(LatLng::new(2.0, 2.0)));

        let updated = map.get(&r1()).expect("still tracked");
        assert_eq!(updated.last_position, LatLng::new(1.5, 1.5));
        assert!(updated.last_update.is_some());
    }

    #[test]
    fn test_remove_twice_matches_remove_once() {
        let mut map = MapController::new();
        map.add_route(r1(), options()).expect("add succeeds");
        map.add_route(RouteId::from("r2"), options()).expect("add succeeds");

        assert!(map.remove_route(&r1()).is_some());
        let layer_after_first = map.surface().len();

        assert!(map.remove_route(&r1()).is_none());

        assert_eq!(map.surface().len(), layer_after_first);
        assert_eq!(map.surface().len(), 2);
        assert_eq!(map.len(), 1);
        assert!(map.is_tracked(&RouteId::from("r2")));
    }

    #[test]
    fn test_reject_then_accept_after_remove() {
        let mut map = MapController::new();

        assert!(map.add_route(r1(), options()).is_ok());
        assert!(map.add_route(r1(), options()).is_err());
        map.remove_route(&r1());
        assert!(map.add_route(r1(), options()).is_ok());

        assert_eq!(map.len(), 1);
        assert_eq!(map.surface().len(), 2);
    }

    #[test]
    fn test_stale_move_after_remove_does_not_resurrect() {
        let mut map = MapController::new();
        map.add_route(r1(), options()).expect("add succeeds");
        map.remove_route(&r1());

        assert!(!map.move_current_marker(&r1(), LatLng::new(1.9, 1.9)));
        assert!(map.is_empty());
        assert!(map.surface().is_empty());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut map = MapController::new();
        map.add_route(r1(), options()).expect("add succeeds");
        map.add_route(RouteId::from("r2"), options()).expect("add succeeds");

        map.clear();

        assert!(map.is_empty());
        assert!(map.surface().is_empty());
    }

    #[test]
    fn test_tracked_routes_in_start_order() {
        let mut map = MapController::new();
        for id in ["c", "a", "b"] {
            map.add_route(RouteId::from(id), options()).expect("add succeeds");
        }
        map.remove_route(&RouteId::from("a"));

        let order: Vec<_> = map.tracked_routes().map(|t| t.route_id.as_str()).collect();
        assert_eq!(order, vec!["c", "b"]);
    }
}
