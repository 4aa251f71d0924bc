use indexmap::IndexMap;
use crate::models::LatLng;
use super::icon::{MarkerIcon, MarkerKind};

/// Handle of a marker placed on a map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub icon: MarkerIcon,
}

/// The marker capabilities the tracker needs from a map
pub trait MapSurface {
    /// Put a new marker on the map
    fn place_marker(&mut self, position: LatLng, icon: MarkerIcon) -> MarkerId;

    /// Relocate a marker; returns false when the marker is unknown
    fn move_marker(&mut self, id: MarkerId, position: LatLng) -> bool;

    /// Take a marker off the map; returns false when the marker is unknown
    fn remove_marker(&mut self, id: MarkerId) -> bool;
}

/// The visible marker set, in placement order
#[derive(Debug, Clone, Default)]
pub struct MarkerLayer {
    markers: IndexMap<MarkerId, Marker>,
    next_id: u64,
}

impl MarkerLayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &Marker)> {
        self.markers.iter().map(|(id, marker)| (*id, marker))
    }

    /// Markers of one kind, in placement order
    pub fn of_kind(&self, kind: MarkerKind) -> impl Iterator<Item = &Marker> {
        self.markers.values().filter(move |marker| marker.icon.kind == kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MapSurface for MarkerLayer {
    fn place_marker(&mut self, position: LatLng, icon: MarkerIcon) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);
        self.markers.insert(id, Marker { position, icon });
        id
    }

    fn move_marker(&mut self, id: MarkerId, position: LatLng) -> bool {
        match self.markers.get_mut(&id) {
            Some(marker) => {
                marker.position = position;
                true
            }
            None => false,
        }
    }

    fn remove_marker(&mut self, id: MarkerId) -> bool {
        self.markers.shift_remove(&id).is_some()
    }
}
