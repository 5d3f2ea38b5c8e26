//! The gardener: coverage walk and hazard relaxation.
//!
//! The gardener walks the island from the spawn over walkable plots and
//! checks that it reached every one. If it did not, it relaxes a bounded
//! number of impossible gardened cells on the edge of the explored area and
//! walks once more. The result is a [`GardenerWorldReport`].

use std::collections::BTreeSet;

use island_types::{GardenerWorldReport, IslandTile, Position, TileKind, TileSafety};
use tracing::{debug, info, warn};

use crate::error::WorldError;
use crate::island_map::IslandMap;

/// Most cells one relax pass may flip.
pub const RELAX_BUDGET: usize = 10;

/// Most explore-relax-explore cycles per build.
pub const MAX_RELAX_CYCLES: u32 = 1;

/// Counters carried in from earlier passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarlierFixes {
    /// Cells changed by difficulty smoothing.
    pub difficulty_fixes: u32,
    /// Cells eased by the main path overlay.
    pub path_cells_smoothed: u32,
}

/// One coverage walk.
struct Walk {
    order: Vec<Position>,
    anchors: u32,
    total_walkable: u32,
    unvisited: Vec<Position>,
}

impl Walk {
    fn visited(&self) -> u32 {
        u32::try_from(self.order.len()).unwrap_or(u32::MAX)
    }

    fn is_complete(&self) -> bool {
        self.visited() == self.total_walkable && self.unvisited.is_empty()
    }
}

fn explore(map: &IslandMap, spawn: Position) -> Walk {
    let order = map.reachable_from(spawn, IslandTile::is_walkable_plot);
    let visited: BTreeSet<Position> = order.iter().copied().collect();

    let anchors = order
        .iter()
        .filter_map(|p| map.get(*p))
        .filter(|t| t.kind == TileKind::Anchor)
        .map(|t| &t.tile_id)
        .collect::<BTreeSet<_>>()
        .len();

    let unvisited: Vec<Position> = map
        .tiles()
        .filter(|t| t.is_walkable_plot() && !visited.contains(&t.position))
        .map(|t| t.position)
        .collect();

    Walk {
        anchors: u32::try_from(anchors).unwrap_or(u32::MAX),
        total_walkable: map.count_where(IslandTile::is_walkable_plot),
        unvisited,
        order,
    }
}

/// Impossible gardened cells touching the explored area, in position order,
/// capped at [`RELAX_BUDGET`].
fn relax_candidates(map: &IslandMap, walk: &Walk) -> Vec<Position> {
    let visited: BTreeSet<Position> = walk.order.iter().copied().collect();
    map.tiles()
        .filter(|t| t.kind == TileKind::Gardened && t.safety == TileSafety::Impossible)
        .filter(|t| t.position.neighbors8().any(|n| visited.contains(&n)))
        .map(|t| t.position)
        .take(RELAX_BUDGET)
        .collect()
}

/// Walk the island from `spawn`, relaxing hazards if the walk falls short.
///
/// # Errors
///
/// Returns [`WorldError`] only if writing a relaxed tile back fails.
pub fn tend_island(
    map: &mut IslandMap,
    spawn: Position,
    earlier: EarlierFixes,
) -> Result<GardenerWorldReport, WorldError> {
    let mut report = GardenerWorldReport {
        difficulty_fixes: earlier.difficulty_fixes,
        path_cells_smoothed: earlier.path_cells_smoothed,
        ..GardenerWorldReport::default()
    };

    let mut walk = explore(map, spawn);
    debug!(
        visited = walk.visited(),
        total = walk.total_walkable,
        "coverage walk"
    );

    while !walk.is_complete() && report.relax_cycles < MAX_RELAX_CYCLES {
        let candidates = relax_candidates(map, &walk);
        if candidates.is_empty() {
            report.warnings.push(format!(
                "{} walkable plots unreached and no impossible cell borders the explored area",
                walk.unvisited.len()
            ));
            break;
        }

        for position in &candidates {
            let Some(tile) = map.get(*position).cloned() else {
                continue;
            };
            debug!(%position, "relaxing impossible cell");
            map.replace(
                tile.with_safety(TileSafety::Normal)
                    .with_note("A way through has been cleared."),
            )?;
            report.relaxed_plots.push(*position);
        }

        let relaxed = u32::try_from(candidates.len()).unwrap_or(u32::MAX);
        report.impossible_relaxed = report.impossible_relaxed.saturating_add(relaxed);
        report.relax_cycles = report.relax_cycles.saturating_add(1);
        report
            .warnings
            .push(format!("relaxed {relaxed} impossible cells to restore coverage"));

        walk = explore(map, spawn);
        debug!(
            visited = walk.visited(),
            total = walk.total_walkable,
            "coverage walk after relaxing"
        );
    }

    report.plots_visited = walk.visited();
    report.visited_walkable_plots = walk.visited();
    report.anchors_visited = walk.anchors;
    report.total_walkable_plots = walk.total_walkable;
    report.has_full_coverage = walk.is_complete();
    report.unvisited_walkable_plots = walk.unvisited;
    report.coverage_path = walk.order;

    if report.has_full_coverage {
        info!(
            plots = report.plots_visited,
            anchors = report.anchors_visited,
            relaxed = report.impossible_relaxed,
            "gardener reached every walkable plot"
        );
    } else {
        warn!(
            visited = report.visited_walkable_plots,
            total = report.total_walkable_plots,
            unvisited = report.unvisited_walkable_plots.len(),
            "gardener left walkable plots unreached"
        );
    }

    Ok(report)
}
