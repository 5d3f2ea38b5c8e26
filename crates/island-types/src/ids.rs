//! Type-safe identifier wrappers around stable strings.
//!
//! Every tile on the island has a strongly-typed ID. Identifiers are derived
//! from authored data (anchor slugs) or from grid coordinates (gardened and
//! boundary cells), never from a random source, so two builds of the same
//! manifest produce identical identifiers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::position::Position;

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a tile on the island grid.
    ///
    /// Anchor tiles reuse their authored slug (`camp_landing`); synthesized
    /// tiles are named after their coordinates (`garden_-2_3`).
    TileId
}

impl TileId {
    /// Identifier for a gardened tile at the given position.
    pub fn gardened(position: Position) -> Self {
        Self(format!("garden_{}_{}", position.x, position.y))
    }

    /// Identifier for a boundary tile at the given position.
    pub fn boundary(position: Position) -> Self {
        Self(format!("boundary_{}_{}", position.x, position.y))
    }
}
