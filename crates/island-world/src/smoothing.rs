//! Difficulty smoothing.
//!
//! Adjacent smoothing candidates (Normal safety, no abrupt feature) should
//! differ by at most one difficulty step. A single sweep in position order
//! clamps each candidate into the window its candidate neighbors allow,
//! reading neighbors from the live map so earlier fixes feed later ones.
//! Cells whose neighbors disagree too widely to satisfy are left alone and
//! counted as conflicts.

use island_types::{DifficultyViolation, IslandTile, TerrainDifficulty};
use tracing::debug;

use crate::error::WorldError;
use crate::island_map::IslandMap;

/// Counters from one smoothing sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothingOutcome {
    /// Cells whose difficulty changed.
    pub cells_adjusted: u32,
    /// Candidates with no difficulty that fits all their neighbors.
    pub conflicts: u32,
}

/// The difficulty window `[lo, hi]` allowed by neighbor indexes, or `None`
/// if there are no neighbors or the window is empty.
fn allowed_window(neighbors: &[u8]) -> Option<(u8, u8)> {
    let max = neighbors.iter().copied().max()?;
    let min = neighbors.iter().copied().min()?;
    let lo = max.saturating_sub(1);
    let hi = min.saturating_add(1).min(TerrainDifficulty::MAX_INDEX);
    (lo <= hi).then_some((lo, hi))
}

/// Run one smoothing sweep over `map`.
///
/// # Errors
///
/// Returns [`WorldError`] only if writing a tile back fails.
pub fn smooth_difficulty(map: &mut IslandMap) -> Result<SmoothingOutcome, WorldError> {
    let mut outcome = SmoothingOutcome::default();

    for position in map.positions() {
        let Some(tile) = map.get(position) else {
            continue;
        };
        if !tile.is_smoothing_candidate() {
            continue;
        }

        let neighbors: Vec<u8> = map
            .neighbors(position)
            .filter(|n| n.is_smoothing_candidate())
            .map(|n| n.difficulty.index())
            .collect();
        if neighbors.is_empty() {
            continue;
        }
        let Some((lo, hi)) = allowed_window(&neighbors) else {
            outcome.conflicts = outcome.conflicts.saturating_add(1);
            continue;
        };

        let current = tile.difficulty.index();
        let target = current.clamp(lo, hi);
        if target == current {
            continue;
        }

        let from = tile.difficulty;
        let to = TerrainDifficulty::from_index(target);
        debug!(%position, ?from, ?to, "smoothed difficulty");
        let updated = tile
            .clone()
            .with_difficulty(to)
            .with_note(format!("The going here shifts from {from:?} to {to:?}."));
        map.replace(updated)?;
        outcome.cells_adjusted = outcome.cells_adjusted.saturating_add(1);
    }

    Ok(outcome)
}

/// Every adjacent pair of smoothing candidates more than one step apart.
///
/// Each pair is listed once, lower position first.
pub fn difficulty_violations(map: &IslandMap) -> Vec<DifficultyViolation> {
    let mut violations = Vec::new();
    for tile in map.tiles().filter(|t| t.is_smoothing_candidate()) {
        for neighbor in map
            .neighbors(tile.position)
            .filter(|n| n.position > tile.position && both_candidates(tile, n))
        {
            let delta = tile.difficulty.index().abs_diff(neighbor.difficulty.index());
            if delta > 1 {
                violations.push(DifficultyViolation {
                    a: tile.position,
                    b: neighbor.position,
                    delta,
                });
            }
        }
    }
    violations
}

/// Whether two adjacent tiles both take part in smoothing.
pub fn both_candidates(a: &IslandTile, b: &IslandTile) -> bool {
    a.is_smoothing_candidate() && b.is_smoothing_candidate()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use island_types::{
        Biome, Elevation, FloraDensity, FloraKind, Position, Region, TerrainFeature, TileContext,
        TileId, TileKind, TileSafety,
    };

    use super::*;

    fn tile(x: i32, y: i32, difficulty: TerrainDifficulty) -> IslandTile {
        let position = Position::new(x, y);
        IslandTile {
            tile_id: TileId::gardened(position),
            kind: TileKind::Gardened,
            position,
            biome: Biome::Rocky,
            region: Region::Lowland,
            elevation: Elevation::Low,
            difficulty,
            safety: TileSafety::Normal,
            walkable: true,
            features: BTreeSet::new(),
            flora_primary: FloraKind::Lichen,
            flora_secondary: None,
            flora_density: FloraDensity::Sparse,
            context: TileContext::new("Test cell."),
        }
    }

    fn row(difficulties: &[TerrainDifficulty]) -> IslandMap {
        let mut map = IslandMap::new();
        for (x, &d) in (0_i32..).zip(difficulties) {
            map.insert(tile(x, 0, d)).unwrap();
        }
        map
    }

    #[test]
    fn window_from_neighbors() {
        assert_eq!(allowed_window(&[0, 1]), Some((0, 1)));
        assert_eq!(allowed_window(&[3]), Some((2, 3)));
        assert_eq!(allowed_window(&[0, 3]), None);
        assert_eq!(allowed_window(&[]), None);
    }

    #[test]
    fn spike_is_flattened() {
        use TerrainDifficulty::{Easy, Extreme, Hard};
        let mut map = row(&[Easy, Extreme, Easy]);
        assert_eq!(difficulty_violations(&map).len(), 2);

        // (0,0) is raised toward the spike first, then the spike settles
        // between its two neighbors.
        let outcome = smooth_difficulty(&mut map).unwrap();
        assert_eq!(outcome.cells_adjusted, 2);
        assert_eq!(map.get(Position::new(0, 0)).map(|t| t.difficulty), Some(Hard));
        assert_eq!(
            map.get(Position::new(1, 0)).map(|t| t.difficulty),
            Some(TerrainDifficulty::Normal)
        );
        assert!(difficulty_violations(&map).is_empty());
        assert_eq!(
            map.get(Position::new(1, 0)).map(|t| t.context.history.len()),
            Some(1)
        );
    }

    #[test]
    fn sweep_reads_live_values() {
        use TerrainDifficulty::{Easy, Extreme};
        // (0,0) Extreme sees only (1,0) Easy and is pulled to Normal before
        // (1,0) is visited.
        let mut map = row(&[Extreme, Easy]);
        let outcome = smooth_difficulty(&mut map).unwrap();
        assert_eq!(outcome.cells_adjusted, 1);
        assert!(difficulty_violations(&map).is_empty());
    }

    #[test]
    fn conflicting_neighbors_are_counted_not_changed() {
        use TerrainDifficulty::{Easy, Extreme, Normal};
        let mut map = row(&[Easy, Normal, Extreme]);
        let outcome = smooth_difficulty(&mut map).unwrap();
        assert_eq!(outcome.conflicts, 1);
        assert_eq!(
            map.get(Position::new(1, 0)).map(|t| t.difficulty),
            Some(TerrainDifficulty::Normal)
        );
    }

    #[test]
    fn abrupt_and_unsafe_cells_are_exempt() {
        use TerrainDifficulty::{Easy, Extreme};
        let mut map = row(&[Easy, Extreme, Easy]);
        let t = map.get(Position::new(1, 0)).cloned().unwrap();
        map.replace(t.with_feature(TerrainFeature::CliffFace)).unwrap();
        assert!(difficulty_violations(&map).is_empty());
        let outcome = smooth_difficulty(&mut map).unwrap();
        assert_eq!(outcome.cells_adjusted, 0);

        let mut map = row(&[Easy, Extreme, Easy]);
        let t = map.get(Position::new(1, 0)).cloned().unwrap();
        map.replace(t.with_safety(TileSafety::Dead)).unwrap();
        assert!(difficulty_violations(&map).is_empty());
    }

    #[test]
    fn pairs_listed_once() {
        use TerrainDifficulty::{Easy, Hard};
        let map = row(&[Easy, Hard]);
        let violations = difficulty_violations(&map);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations.first().map(|v| (v.a, v.b, v.delta)),
            Some((Position::new(0, 0), Position::new(1, 0), 2))
        );
        let a = map.get(Position::new(0, 0));
        let b = map.get(Position::new(1, 0));
        assert!(a.zip(b).is_some_and(|(a, b)| both_candidates(a, b)));
    }
}
