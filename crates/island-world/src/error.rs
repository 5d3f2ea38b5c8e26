//! Error types for the `island-world` crate.
//!
//! Configuration errors (a malformed manifest or geometry) are fatal and
//! surface before any tile is synthesized. Generation anomalies such as
//! unreachable cells are never errors; they land in the creation report.

use island_types::{Bounds, Direction8, Position, TileId};

/// Errors that can occur while loading a manifest or editing the map.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// Geometry bounds are inverted or do not nest.
    #[error("invalid geometry: {reason}")]
    InvalidGeometry {
        /// What is wrong with the geometry.
        reason: String,
    },

    /// An anchor lies outside the island band.
    #[error("anchor {anchor} at {position} is outside the island band {island:?}")]
    AnchorOutsideIsland {
        /// The misplaced anchor.
        anchor: TileId,
        /// Its position.
        position: Position,
        /// The island band it should lie in.
        island: Bounds,
    },

    /// Two anchors share a position.
    #[error("anchors {first} and {second} share position {position}")]
    DuplicateAnchorPosition {
        /// The shared position.
        position: Position,
        /// The anchor listed first.
        first: TileId,
        /// The anchor listed second.
        second: TileId,
    },

    /// Two anchors share an identifier.
    #[error("duplicate anchor id: {0}")]
    DuplicateAnchorId(TileId),

    /// No anchor is flagged as the spawn.
    #[error("manifest has no spawn anchor")]
    MissingSpawn,

    /// More than one anchor is flagged as the spawn.
    #[error("manifest has {} spawn anchors: {anchors:?}", anchors.len())]
    MultipleSpawns {
        /// Every anchor flagged as spawn.
        anchors: Vec<TileId>,
    },

    /// The spawn anchor does not sit at the configured spawn position.
    #[error("spawn anchor {anchor} is at {position}, geometry expects {expected}")]
    SpawnMismatch {
        /// The spawn anchor.
        anchor: TileId,
        /// Where it is.
        position: Position,
        /// Where the geometry puts the spawn.
        expected: Position,
    },

    /// A neighbor link names an anchor that does not exist.
    #[error("anchor {anchor} links {direction:?} to unknown anchor {neighbor}")]
    UnknownNeighbor {
        /// The linking anchor.
        anchor: TileId,
        /// The link direction.
        direction: Direction8,
        /// The missing target.
        neighbor: TileId,
    },

    /// A neighbor link points the wrong way on the grid.
    #[error("anchor {anchor} links {direction:?} to {neighbor}, which lies {actual:?}")]
    NeighborDirectionMismatch {
        /// The linking anchor.
        anchor: TileId,
        /// The declared direction.
        direction: Direction8,
        /// The target anchor.
        neighbor: TileId,
        /// The direction the target actually lies in.
        actual: Option<Direction8>,
    },

    /// A neighbor links back in the opposite direction to a different anchor.
    #[error("anchor {anchor} links {direction:?} to {neighbor}, which links back to {back}")]
    AsymmetricNeighbor {
        /// The linking anchor.
        anchor: TileId,
        /// The declared direction.
        direction: Direction8,
        /// The target anchor.
        neighbor: TileId,
        /// What the target links to in the opposite direction.
        back: TileId,
    },

    /// A tile was inserted at an occupied position.
    #[error("duplicate tile at {0}")]
    DuplicateTile(Position),

    /// A tile was inserted with an identifier already on the map.
    #[error("duplicate tile id: {0}")]
    DuplicateTileId(TileId),

    /// No tile exists at the position.
    #[error("no tile at {0}")]
    TileNotFound(Position),

    /// A replacement tried to change the identifier of a cell.
    #[error("replacement at {position} changes tile id {existing} to {replacement}")]
    TileIdMismatch {
        /// The cell being replaced.
        position: Position,
        /// Identifier already on the map.
        existing: TileId,
        /// Identifier carried by the replacement.
        replacement: TileId,
    },
}
