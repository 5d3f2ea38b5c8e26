//! Shared type definitions for the island builder.
//!
//! This crate is the single source of truth for the data model passed
//! between the generation pipeline and its consumers. Report types derive
//! `ts-rs` so ops tooling can read the creation report with typed bindings.
//!
//! # Modules
//!
//! - [`ids`] -- Deterministic string identifiers for tiles
//! - [`position`] -- Grid coordinates, compass directions, bounds
//! - [`enums`] -- Terrain, safety, feature, flora, and provenance tags
//! - [`structs`] -- Anchors, island tiles, tile narrative context
//! - [`report`] -- Gardener pass and island creation reports

pub mod enums;
pub mod ids;
pub mod position;
pub mod report;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    Biome, Elevation, FloraDensity, FloraKind, PlotClass, Region, TerrainDifficulty,
    TerrainFeature, TileKind, TileSafety,
};
pub use ids::TileId;
pub use position::{Bounds, Direction8, Position};
pub use report::{
    AnchorSummary, ConnectivitySummary, DifficultySummary, DifficultyViolation, FeatureSummary,
    FloraSummary, GardenerWorldReport, GeometrySummary, HazardSummary, IslandCreationReport,
    Verdict,
};
pub use structs::{AnchorRoles, AnchorTile, IslandTile, TileContext};
