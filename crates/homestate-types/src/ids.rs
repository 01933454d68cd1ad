//! Type-safe identifiers for household entities.
//!
//! Rooms, fixtures, and items live in flat arenas owned by the household.
//! Each arena slot is addressed through its own newtype so a fixture index
//! can never be passed where an item index is expected.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an arena index with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub usize);

        impl $name {
            /// Wrap a raw arena index.
            pub const fn new(index: usize) -> Self {
                Self(index)
            }

            /// Return the raw arena index.
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }
    };
}

define_id! {
    /// Identifier for a room in the household.
    RoomId, "room"
}

define_id! {
    /// Identifier for a stationary fixture (furniture or appliance).
    FixtureId, "fixture"
}

define_id! {
    /// Identifier for a movable item.
    ItemId, "item"
}
