use indexmap::IndexMap;
use crate::models::{Route, RouteId};

/// Routes available for tracking, loaded once from the backend listing
///
/// Listing order is preserved so the route picker shows routes the way the
/// backend returned them.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Option<IndexMap<RouteId, Route>>,
}

impl RouteCatalog {
    /// An empty catalog that has not been loaded yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A loaded catalog; later duplicates of an id replace earlier ones
    #[must_use]
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        Self {
            routes: Some(routes.into_iter().map(|route| (route.id.clone(), route)).collect()),
        }
    }

    #[must_use]
    pub fn get(&self, id: &RouteId) -> Option<&Route> {
        self.routes.as_ref()?.get(id)
    }

    /// Display title of a route, or its id when the catalog does not know it
    #[must_use]
    pub fn display_title(&self, id: &RouteId) -> String {
        self.get(id).map_or_else(|| id.to_string(), |route| route.title.clone())
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().flat_map(IndexMap::values)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.as_ref().map_or(0, IndexMap::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
