use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use crate::constants::ROUTE_PALETTE;

/// CSS hex color assigned to a tracked route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteColor(String);

impl RouteColor {
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picks a color for each newly started route
///
/// Every pick is independent; two active routes may end up with the same
/// color.
pub struct ColorAllocator {
    palette: Vec<RouteColor>,
    rng: StdRng,
}

impl ColorAllocator {
    /// Allocator over the default palette, seeded from the platform entropy source
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(default_palette(), StdRng::from_entropy())
    }

    /// Deterministic allocator, for tests and benchmarks
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(default_palette(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(palette: Vec<RouteColor>, rng: StdRng) -> Self {
        Self { palette, rng }
    }

    pub fn allocate(&mut self) -> RouteColor {
        self.palette
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| RouteColor::new(ROUTE_PALETTE[0]))
    }

    #[must_use]
    pub fn palette(&self) -> &[RouteColor] {
        &self.palette
    }
}

impl Default for ColorAllocator {
    fn default() -> Self {
        Self::new()
    }
}

fn default_palette() -> Vec<RouteColor> {
    ROUTE_PALETTE.iter().map(|hex| RouteColor::new(*hex)).collect()
}
