//! Island geometry: the world envelope, the island band, and the spawn.
//!
//! Two nested rectangles partition every coordinate into exactly one
//! [`PlotClass`]: outside the envelope is off-world, inside the band is
//! island-eligible, and the ring between them is boundary.

use island_types::{Bounds, PlotClass, Position};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Default world envelope.
pub const DEFAULT_WORLD: Bounds = Bounds::new(-4, 4, -2, 6);

/// Default island band.
pub const DEFAULT_ISLAND: Bounds = Bounds::new(-3, 3, -1, 5);

/// Default spawn position.
pub const DEFAULT_SPAWN: Position = Position::new(0, 0);

/// The coordinate envelope of one island build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandGeometry {
    /// Every coordinate the world knows about.
    pub world: Bounds,
    /// The subset that may hold island tiles.
    pub island: Bounds,
    /// Where the spawn anchor must sit.
    pub spawn: Position,
}

impl IslandGeometry {
    /// Build a geometry, checking that the rectangles are well formed and
    /// nest, and that the spawn is island-eligible.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidGeometry`] describing the first problem.
    pub fn new(world: Bounds, island: Bounds, spawn: Position) -> Result<Self, WorldError> {
        let geometry = Self {
            world,
            island,
            spawn,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// Re-check the invariants of a geometry built field by field (for
    /// example, one deserialized from configuration).
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidGeometry`] describing the first problem.
    pub fn validate(&self) -> Result<(), WorldError> {
        if !self.world.is_valid() {
            return Err(WorldError::InvalidGeometry {
                reason: format!("world bounds {:?} are inverted", self.world),
            });
        }
        if !self.island.is_valid() {
            return Err(WorldError::InvalidGeometry {
                reason: format!("island bounds {:?} are inverted", self.island),
            });
        }
        if !self.world.encloses(&self.island) {
            return Err(WorldError::InvalidGeometry {
                reason: format!(
                    "island bounds {:?} extend past world bounds {:?}",
                    self.island, self.world
                ),
            });
        }
        if self.classify(self.spawn) != PlotClass::IslandEligible {
            return Err(WorldError::InvalidGeometry {
                reason: format!("spawn {} is not inside the island band", self.spawn),
            });
        }
        Ok(())
    }

    /// Classify a coordinate. Pure; every position falls in exactly one class.
    pub const fn classify(&self, position: Position) -> PlotClass {
        if !self.world.contains(position) {
            PlotClass::OffWorld
        } else if self.island.contains(position) {
            PlotClass::IslandEligible
        } else {
            PlotClass::Boundary
        }
    }

    /// Island-eligible positions, ordered by `(x, y)`.
    pub fn eligible_positions(&self) -> impl Iterator<Item = Position> {
        self.island.positions()
    }

    /// Boundary positions, ordered by `(x, y)`.
    pub fn boundary_positions(&self) -> impl Iterator<Item = Position> {
        let island = self.island;
        self.world.positions().filter(move |p| !island.contains(*p))
    }
}

impl Default for IslandGeometry {
    fn default() -> Self {
        Self {
            world: DEFAULT_WORLD,
            island: DEFAULT_ISLAND,
            spawn: DEFAULT_SPAWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_geometry_is_valid() {
        assert!(IslandGeometry::default().validate().is_ok());
    }

    #[test]
    fn classify_partitions_the_envelope() {
        let geometry = IslandGeometry::default();
        assert_eq!(geometry.classify(Position::new(0, 0)), PlotClass::IslandEligible);
        assert_eq!(geometry.classify(Position::new(-3, 5)), PlotClass::IslandEligible);
        assert_eq!(geometry.classify(Position::new(-4, 0)), PlotClass::Boundary);
        assert_eq!(geometry.classify(Position::new(0, 6)), PlotClass::Boundary);
        assert_eq!(geometry.classify(Position::new(5, 0)), PlotClass::OffWorld);
        assert_eq!(geometry.classify(Position::new(0, -3)), PlotClass::OffWorld);
    }

    #[test]
    fn classify_is_idempotent_and_exhaustive() {
        let geometry = IslandGeometry::default();
        let envelope = Bounds::new(-6, 6, -4, 8);
        let mut eligible = 0_u32;
        let mut boundary = 0_u32;
        for position in envelope.positions() {
            let first = geometry.classify(position);
            assert_eq!(first, geometry.classify(position));
            match first {
                PlotClass::IslandEligible => eligible = eligible.saturating_add(1),
                PlotClass::Boundary => boundary = boundary.saturating_add(1),
                PlotClass::OffWorld => {}
            }
        }
        assert_eq!(eligible, 49);
        assert_eq!(boundary, 81 - 49);
        assert_eq!(geometry.eligible_positions().count(), 49);
        assert_eq!(geometry.boundary_positions().count(), 32);
    }

    #[test]
    fn island_must_nest_inside_world() {
        let result = IslandGeometry::new(
            Bounds::new(-2, 2, -2, 2),
            Bounds::new(-3, 3, -1, 1),
            Position::new(0, 0),
        );
        assert!(matches!(result, Err(WorldError::InvalidGeometry { .. })));
    }

    #[test]
    fn spawn_must_be_eligible() {
        let result = IslandGeometry::new(DEFAULT_WORLD, DEFAULT_ISLAND, Position::new(4, 0));
        assert!(matches!(result, Err(WorldError::InvalidGeometry { .. })));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let result = IslandGeometry::new(
            Bounds::new(4, -4, -2, 6),
            DEFAULT_ISLAND,
            DEFAULT_SPAWN,
        );
        assert!(result.is_err());
    }
}
