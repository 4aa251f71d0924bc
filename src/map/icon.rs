use crate::color::RouteColor;

/// Top-down car silhouette in a 24×24 box, centered on the position
const CAR_PATH: &str = "M5 11l1.5-4.5C6.8 5.6 7.6 5 8.5 5h7c.9 0 1.7.6 2 1.5L19 11v7a1 1 0 0 1-1 1h-1a1 1 0 0 1-1-1v-1H8v1a1 1 0 0 1-1 1H6a1 1 0 0 1-1-1v-7zm2.5 1a1.5 1.5 0 1 0 0 3 1.5 1.5 0 0 0 0-3zm9 0a1.5 1.5 0 1 0 0 3 1.5 1.5 0 0 0 0-3zM7 10h10l-1-3H8l-1 3z";

/// Map pin in a 24×24 box, tip at the bottom center
const PIN_PATH: &str = "M12 0C7.03 0 3 4.03 3 9c0 6.75 9 15 9 15s9-8.25 9-15c0-4.97-4.03-9-9-9zm0 12.5a3.5 3.5 0 1 1 0-7 3.5 3.5 0 0 1 0 7z";

const ICON_BOX: f64 = 24.0;
const CAR_SCALE: f64 = 1.5;
const PIN_SCALE: f64 = 1.25;
const ICON_OUTLINE_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Moving marker at the vehicle's current position
    Car,
    /// Static marker at the route's destination
    Pin,
}

/// How a marker is drawn; a pure function of kind and color
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerIcon {
    pub kind: MarkerKind,
    pub color: RouteColor,
}

impl MarkerIcon {
    #[must_use]
    pub fn car(color: RouteColor) -> Self {
        Self { kind: MarkerKind::Car, color }
    }

    #[must_use]
    pub fn pin(color: RouteColor) -> Self {
        Self { kind: MarkerKind::Pin, color }
    }

    /// SVG path data of the icon shape
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self.kind {
            MarkerKind::Car => CAR_PATH,
            MarkerKind::Pin => PIN_PATH,
        }
    }

    #[must_use]
    pub fn fill(&self) -> &str {
        self.color.as_str()
    }

    #[must_use]
    pub fn outline(&self) -> &'static str {
        ICON_OUTLINE_COLOR
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        match self.kind {
            MarkerKind::Car => CAR_SCALE,
            MarkerKind::Pin => PIN_SCALE,
        }
    }

    /// Point of the icon box (in path units) that sits on the geographic position
    #[must_use]
    pub fn anchor(&self) -> (f64, f64) {
        match self.kind {
            MarkerKind::Car => (ICON_BOX / 2.0, ICON_BOX / 2.0),
            MarkerKind::Pin => (ICON_BOX / 2.0, ICON_BOX),
        }
    }
}
