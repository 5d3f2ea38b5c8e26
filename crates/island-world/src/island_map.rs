//! The island grid: every tile indexed by position and by id.
//!
//! The [`IslandMap`] owns all [`IslandTile`] values. Tiles are written in
//! whole: [`IslandMap::insert`] adds a new cell and [`IslandMap::replace`]
//! swaps an existing cell for a new value at the same position. There is
//! no partial field mutation.
//!
//! Graph queries treat the grid as an 8-connected graph. Each query takes a
//! `passable` predicate so callers choose which cells may be entered:
//! walkable plots for the coverage walk, any walkable cell for
//! connectivity, Normal cells for safe paths.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use island_types::{IslandTile, Position, TileId};

use crate::error::WorldError;

/// The island grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IslandMap {
    /// All tiles indexed by their position.
    tiles: BTreeMap<Position, IslandTile>,
    /// Tile id -> position.
    ids: BTreeMap<TileId, Position>,
}

impl IslandMap {
    /// Create an empty map.
    pub const fn new() -> Self {
        Self {
            tiles: BTreeMap::new(),
            ids: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Tile operations
    // -------------------------------------------------------------------

    /// Add a tile at an empty position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateTile`] if the position is occupied, or
    /// [`WorldError::DuplicateTileId`] if the id is already in use.
    pub fn insert(&mut self, tile: IslandTile) -> Result<(), WorldError> {
        if self.tiles.contains_key(&tile.position) {
            return Err(WorldError::DuplicateTile(tile.position));
        }
        if self.ids.contains_key(&tile.tile_id) {
            return Err(WorldError::DuplicateTileId(tile.tile_id));
        }
        self.ids.insert(tile.tile_id.clone(), tile.position);
        self.tiles.insert(tile.position, tile);
        Ok(())
    }

    /// Replace the tile at `tile.position` with `tile`, returning the old
    /// value. The replacement must keep the cell's id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileNotFound`] if no tile occupies the position,
    /// or [`WorldError::TileIdMismatch`] if the ids differ.
    pub fn replace(&mut self, tile: IslandTile) -> Result<IslandTile, WorldError> {
        let Some(existing) = self.tiles.get_mut(&tile.position) else {
            return Err(WorldError::TileNotFound(tile.position));
        };
        if existing.tile_id != tile.tile_id {
            return Err(WorldError::TileIdMismatch {
                position: tile.position,
                existing: existing.tile_id.clone(),
                replacement: tile.tile_id,
            });
        }
        Ok(std::mem::replace(existing, tile))
    }

    /// The tile at a position.
    pub fn get(&self, position: Position) -> Option<&IslandTile> {
        self.tiles.get(&position)
    }

    /// The tile with an id.
    pub fn get_by_id(&self, id: &TileId) -> Option<&IslandTile> {
        self.ids.get(id).and_then(|p| self.tiles.get(p))
    }

    /// Whether a tile occupies `position`.
    pub fn contains(&self, position: Position) -> bool {
        self.tiles.contains_key(&position)
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the map holds no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles, ordered by position.
    pub fn tiles(&self) -> impl Iterator<Item = &IslandTile> {
        self.tiles.values()
    }

    /// All occupied positions, in order.
    pub fn positions(&self) -> Vec<Position> {
        self.tiles.keys().copied().collect()
    }

    /// Number of tiles matching `predicate`.
    pub fn count_where(&self, predicate: impl Fn(&IslandTile) -> bool) -> u32 {
        let count = self.tiles.values().filter(|&t| predicate(t)).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    // -------------------------------------------------------------------
    // Graph queries
    // -------------------------------------------------------------------

    /// Existing tiles 8-adjacent to `position`, in compass order.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = &IslandTile> {
        position.neighbors8().filter_map(|p| self.tiles.get(&p))
    }

    /// Breadth-first walk from `start` over cells accepted by `passable`.
    ///
    /// Returns positions in visitation order, `start` first. Returns an
    /// empty list if `start` is missing or not passable.
    pub fn reachable_from(
        &self,
        start: Position,
        passable: impl Fn(&IslandTile) -> bool,
    ) -> Vec<Position> {
        self.step_distances_ordered(start, &passable)
            .into_iter()
            .map(|(p, _)| p)
            .collect()
    }

    /// Fewest 8-way steps from `start` to every reachable cell.
    pub fn step_distances(
        &self,
        start: Position,
        passable: impl Fn(&IslandTile) -> bool,
    ) -> BTreeMap<Position, u32> {
        self.step_distances_ordered(start, &passable)
            .into_iter()
            .collect()
    }

    fn step_distances_ordered(
        &self,
        start: Position,
        passable: &impl Fn(&IslandTile) -> bool,
    ) -> Vec<(Position, u32)> {
        if !self.tiles.get(&start).is_some_and(passable) {
            return Vec::new();
        }

        let mut order = Vec::new();
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back((start, 0_u32));

        while let Some((current, steps)) = queue.pop_front() {
            order.push((current, steps));
            for neighbor in self.neighbors(current) {
                if passable(neighbor) && visited.insert(neighbor.position) {
                    queue.push_back((neighbor.position, steps.saturating_add(1)));
                }
            }
        }

        order
    }

    /// Least total crossing time from `start` to every reachable cell.
    ///
    /// Entering a cell costs its difficulty's time cost; the start cell is
    /// free. Uses Dijkstra's algorithm with a `BTreeSet` as the priority
    /// queue.
    pub fn effort_distances(
        &self,
        start: Position,
        passable: impl Fn(&IslandTile) -> bool,
    ) -> BTreeMap<Position, u32> {
        // Distance map: position -> best known effort.
        let mut dist: BTreeMap<Position, u32> = BTreeMap::new();
        let mut queue: BTreeSet<(u32, Position)> = BTreeSet::new();

        if !self.tiles.get(&start).is_some_and(&passable) {
            return dist;
        }

        dist.insert(start, 0);
        queue.insert((0, start));

        while let Some((current_dist, current)) = queue.pop_first() {
            for neighbor in self.neighbors(current) {
                if !passable(neighbor) {
                    continue;
                }
                let Some(new_dist) = current_dist.checked_add(neighbor.difficulty.time_cost())
                else {
                    continue;
                };

                let is_shorter = dist
                    .get(&neighbor.position)
                    .is_none_or(|&existing| new_dist < existing);

                if is_shorter {
                    if let Some(&old_dist) = dist.get(&neighbor.position) {
                        queue.remove(&(old_dist, neighbor.position));
                    }
                    dist.insert(neighbor.position, new_dist);
                    queue.insert((new_dist, neighbor.position));
                }
            }
        }

        dist
    }
}
