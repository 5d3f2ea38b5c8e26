//! The anchor manifest: an immutable, validated set of landmark cells.
//!
//! A manifest is an injected value rather than a global so that tests can
//! build alternate islands. Validation runs once in [`AnchorManifest::new`];
//! any violation is a fatal configuration error and no tile synthesis runs.

use std::collections::BTreeMap;

use island_types::{AnchorTile, Direction8, PlotClass, Position, TileId};

use crate::error::WorldError;
use crate::geometry::IslandGeometry;

/// A closed, read-only list of anchors with id and position indexes.
#[derive(Debug, Clone)]
pub struct AnchorManifest {
    /// Anchors in authored order.
    anchors: Vec<AnchorTile>,
    /// Anchor id -> index into `anchors`.
    by_id: BTreeMap<TileId, usize>,
    /// Anchor position -> index into `anchors`.
    by_position: BTreeMap<Position, usize>,
    /// Copy of the single spawn anchor.
    start: AnchorTile,
}

impl AnchorManifest {
    /// Validate and index a list of anchors against a geometry.
    ///
    /// # Errors
    ///
    /// - [`WorldError::AnchorOutsideIsland`] if an anchor is not
    ///   island-eligible.
    /// - [`WorldError::DuplicateAnchorId`] or
    ///   [`WorldError::DuplicateAnchorPosition`] on collisions.
    /// - [`WorldError::MissingSpawn`], [`WorldError::MultipleSpawns`] or
    ///   [`WorldError::SpawnMismatch`] unless exactly one spawn anchor sits
    ///   at the geometry's spawn position.
    /// - [`WorldError::UnknownNeighbor`] or
    ///   [`WorldError::NeighborDirectionMismatch`] for broken links, or
    ///   [`WorldError::AsymmetricNeighbor`] when a target links back the
    ///   opposite way to a different anchor.
    pub fn new(anchors: Vec<AnchorTile>, geometry: &IslandGeometry) -> Result<Self, WorldError> {
        let mut by_id = BTreeMap::new();
        let mut by_position: BTreeMap<Position, usize> = BTreeMap::new();
        let mut spawns = Vec::new();

        for (index, anchor) in anchors.iter().enumerate() {
            if geometry.classify(anchor.position) != PlotClass::IslandEligible {
                return Err(WorldError::AnchorOutsideIsland {
                    anchor: anchor.id.clone(),
                    position: anchor.position,
                    island: geometry.island,
                });
            }
            if by_id.insert(anchor.id.clone(), index).is_some() {
                return Err(WorldError::DuplicateAnchorId(anchor.id.clone()));
            }
            if let Some(&first) = by_position.get(&anchor.position) {
                let first = anchors
                    .get(first)
                    .map_or_else(|| anchor.id.clone(), |a| a.id.clone());
                return Err(WorldError::DuplicateAnchorPosition {
                    position: anchor.position,
                    first,
                    second: anchor.id.clone(),
                });
            }
            by_position.insert(anchor.position, index);
            if anchor.roles.is_spawn {
                spawns.push(index);
            }
        }

        let start = match spawns.as_slice() {
            [] => return Err(WorldError::MissingSpawn),
            [single] => anchors.get(*single).cloned().ok_or(WorldError::MissingSpawn)?,
            many => {
                return Err(WorldError::MultipleSpawns {
                    anchors: many
                        .iter()
                        .filter_map(|&i| anchors.get(i).map(|a| a.id.clone()))
                        .collect(),
                });
            }
        };

        let manifest = Self {
            anchors,
            by_id,
            by_position,
            start,
        };
        manifest.validate_spawn(geometry)?;
        manifest.validate_links()?;
        Ok(manifest)
    }

    /// Re-check a validated manifest against a geometry other than the one
    /// it was built with.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AnchorOutsideIsland`] if an anchor is not
    /// island-eligible under `geometry`, or [`WorldError::SpawnMismatch`] if
    /// the spawn anchor is not at `geometry.spawn`.
    pub fn validate_against(&self, geometry: &IslandGeometry) -> Result<(), WorldError> {
        if let Some(anchor) = self
            .anchors
            .iter()
            .find(|a| geometry.classify(a.position) != PlotClass::IslandEligible)
        {
            return Err(WorldError::AnchorOutsideIsland {
                anchor: anchor.id.clone(),
                position: anchor.position,
                island: geometry.island,
            });
        }
        self.validate_spawn(geometry)
    }

    fn validate_spawn(&self, geometry: &IslandGeometry) -> Result<(), WorldError> {
        let start = self.start_tile();
        if start.position != geometry.spawn {
            return Err(WorldError::SpawnMismatch {
                anchor: start.id.clone(),
                position: start.position,
                expected: geometry.spawn,
            });
        }
        Ok(())
    }

    fn validate_links(&self) -> Result<(), WorldError> {
        for anchor in &self.anchors {
            for (&direction, neighbor_id) in &anchor.neighbors {
                let Some(neighbor) = self.anchor(neighbor_id) else {
                    return Err(WorldError::UnknownNeighbor {
                        anchor: anchor.id.clone(),
                        direction,
                        neighbor: neighbor_id.clone(),
                    });
                };
                let actual = Direction8::toward(anchor.position, neighbor.position);
                if actual != Some(direction) {
                    return Err(WorldError::NeighborDirectionMismatch {
                        anchor: anchor.id.clone(),
                        direction,
                        neighbor: neighbor_id.clone(),
                        actual,
                    });
                }
                let back = neighbor
                    .neighbor(direction.opposite())
                    .filter(|back| *back != &anchor.id);
                if let Some(back) = back {
                    return Err(WorldError::AsymmetricNeighbor {
                        anchor: anchor.id.clone(),
                        direction,
                        neighbor: neighbor_id.clone(),
                        back: back.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up an anchor by id.
    pub fn anchor(&self, id: &TileId) -> Option<&AnchorTile> {
        self.by_id.get(id).and_then(|&i| self.anchors.get(i))
    }

    /// Look up the anchor at a position.
    pub fn anchor_at(&self, position: Position) -> Option<&AnchorTile> {
        self.by_position
            .get(&position)
            .and_then(|&i| self.anchors.get(i))
    }

    /// The spawn anchor.
    pub const fn start_tile(&self) -> &AnchorTile {
        &self.start
    }

    /// All anchor ids in authored order.
    pub fn ids(&self) -> Vec<TileId> {
        self.anchors.iter().map(|a| a.id.clone()).collect()
    }

    /// The anchor linked from `id` in `direction`, if both exist.
    pub fn neighbor(&self, id: &TileId, direction: Direction8) -> Option<&AnchorTile> {
        self.anchor(id)
            .and_then(|a| a.neighbor(direction))
            .and_then(|n| self.anchor(n))
    }

    /// Iterate over anchors in authored order.
    pub fn anchors(&self) -> impl Iterator<Item = &AnchorTile> {
        self.anchors.iter()
    }

    /// Number of anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the manifest holds no anchors. Never true for a validated
    /// manifest, which always has a spawn.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use island_types::Bounds;

    use super::*;
    use crate::starting_island::{anchor_ids, starting_anchors};

    fn build(anchors: Vec<AnchorTile>) -> Result<AnchorManifest, WorldError> {
        AnchorManifest::new(anchors, &IslandGeometry::default())
    }

    fn without_links(mut anchors: Vec<AnchorTile>) -> Vec<AnchorTile> {
        for anchor in &mut anchors {
            anchor.neighbors.clear();
        }
        anchors
    }

    #[test]
    fn stock_anchors_validate() {
        let manifest = build(starting_anchors()).unwrap();
        assert_eq!(manifest.len(), 12);
        assert!(!manifest.is_empty());
        assert_eq!(manifest.start_tile().id.as_str(), anchor_ids::CAMP_LANDING);
        assert_eq!(manifest.ids().len(), 12);
    }

    #[test]
    fn lookups_by_id_position_and_direction() {
        let manifest = build(starting_anchors()).unwrap();
        let camp = TileId::from(anchor_ids::CAMP_LANDING);
        assert_eq!(
            manifest.anchor(&camp).map(|a| a.position),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            manifest.anchor_at(Position::new(0, 4)).map(|a| a.id.as_str()),
            Some(anchor_ids::SUMMIT_PASS)
        );
        assert!(manifest.anchor_at(Position::new(1, 1)).is_none());
        assert_eq!(
            manifest
                .neighbor(&camp, Direction8::North)
                .map(|a| a.id.as_str()),
            Some(anchor_ids::TRAIL_CLEARING)
        );
        assert!(manifest.neighbor(&camp, Direction8::South).is_none());
    }

    #[test]
    fn anchor_outside_band_rejected() {
        let mut anchors = without_links(starting_anchors());
        if let Some(a) = anchors.get_mut(1) {
            a.position = Position::new(-4, 0);
        }
        assert!(matches!(
            build(anchors),
            Err(WorldError::AnchorOutsideIsland { .. })
        ));
    }

    #[test]
    fn duplicate_position_rejected() {
        let mut anchors = without_links(starting_anchors());
        if let Some(a) = anchors.get_mut(2) {
            a.position = Position::new(-2, 0);
        }
        assert!(matches!(
            build(anchors),
            Err(WorldError::DuplicateAnchorPosition { .. })
        ));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut anchors = without_links(starting_anchors());
        if let Some(a) = anchors.get_mut(2) {
            a.id = TileId::from(anchor_ids::DRIFTWOOD_BEACH);
        }
        assert!(matches!(build(anchors), Err(WorldError::DuplicateAnchorId(_))));
    }

    #[test]
    fn spawn_count_enforced() {
        let mut none = without_links(starting_anchors());
        for a in &mut none {
            a.roles.is_spawn = false;
        }
        assert!(matches!(build(none), Err(WorldError::MissingSpawn)));

        let mut two = without_links(starting_anchors());
        if let Some(a) = two.get_mut(1) {
            a.roles.is_spawn = true;
        }
        assert!(matches!(
            build(two),
            Err(WorldError::MultipleSpawns { anchors }) if anchors.len() == 2
        ));
    }

    #[test]
    fn spawn_must_sit_on_geometry_spawn() {
        let mut anchors = without_links(starting_anchors());
        for a in &mut anchors {
            a.roles.is_spawn = a.id.as_str() == anchor_ids::LAGOON_BEACH;
        }
        assert!(matches!(
            build(anchors),
            Err(WorldError::SpawnMismatch { .. })
        ));
    }

    #[test]
    fn recheck_against_moved_spawn_or_shrunken_band() {
        let manifest = build(starting_anchors()).unwrap();
        assert!(manifest.validate_against(&IslandGeometry::default()).is_ok());

        let moved = IslandGeometry {
            spawn: Position::new(1, 1),
            ..IslandGeometry::default()
        };
        assert!(matches!(
            manifest.validate_against(&moved),
            Err(WorldError::SpawnMismatch { expected, .. }) if expected == Position::new(1, 1)
        ));

        let shrunken = IslandGeometry::new(
            Bounds::new(-5, 5, -3, 7),
            Bounds::new(-2, 2, -1, 5),
            Position::new(0, 0),
        )
        .unwrap();
        assert!(matches!(
            manifest.validate_against(&shrunken),
            Err(WorldError::AnchorOutsideIsland { .. })
        ));
    }

    #[test]
    fn unknown_neighbor_rejected() {
        let mut anchors = starting_anchors();
        if let Some(a) = anchors.first_mut() {
            a.neighbors
                .insert(Direction8::South, TileId::from("sunken_reef"));
        }
        assert!(matches!(
            build(anchors),
            Err(WorldError::UnknownNeighbor { .. })
        ));
    }

    #[test]
    fn back_link_must_return_to_the_linking_anchor() {
        let mut anchors = starting_anchors();
        // Point the camp north at the summit, which links south to the
        // trail clearing.
        if let Some(camp) = anchors
            .iter_mut()
            .find(|a| a.id.as_str() == anchor_ids::CAMP_LANDING)
        {
            camp.neighbors
                .insert(Direction8::North, TileId::from(anchor_ids::SUMMIT_PASS));
        }
        assert!(matches!(
            build(anchors),
            Err(WorldError::AsymmetricNeighbor { anchor, back, .. })
                if anchor.as_str() == anchor_ids::CAMP_LANDING
                    && back.as_str() == anchor_ids::TRAIL_CLEARING
        ));
    }

    #[test]
    fn neighbor_in_wrong_direction_rejected() {
        let mut anchors = starting_anchors();
        if let Some(a) = anchors.first_mut() {
            // Summit pass is due north of the camp, not west.
            a.neighbors
                .insert(Direction8::West, TileId::from(anchor_ids::SUMMIT_PASS));
        }
        assert!(matches!(
            build(anchors),
            Err(WorldError::NeighborDirectionMismatch {
                actual: Some(Direction8::North),
                ..
            })
        ));
    }
}
