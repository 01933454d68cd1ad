//! Enumeration types for the household world.
//!
//! Every concrete entity variant is a closed enum member here. Static
//! properties (capabilities, placement rules) live in the world crate's
//! registry; this module only carries identity and the symbolic type name
//! each variant contributes to the planning format.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The registry category an entity type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Room types (kitchen, living room, bedroom).
    Room,
    /// Stationary fixtures created once inside a room.
    Fixture,
    /// Portable items that move between containers and the person's hand.
    Item,
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// A room type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// The single kitchen.
    Kitchen,
    /// The single living room.
    LivingRoom,
    /// A bedroom, one per available owner name.
    Bedroom,
}

impl RoomKind {
    /// All room kinds in registry order.
    pub const ALL: [Self; 3] = [Self::Kitchen, Self::LivingRoom, Self::Bedroom];

    /// Symbolic type name used in the planning format.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Kitchen => "kitchen",
            Self::LivingRoom => "livingroom",
            Self::Bedroom => "bedroom",
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A stationary fixture type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FixtureKind {
    /// Flat surface that accepts any item.
    Table,
    /// Multi-level shelf that accepts any item.
    Shelf,
    /// Accepts food only.
    Fridge,
    /// Accepts kitchenware and has a faucet.
    Sink,
    /// Window with blinds.
    Window,
    /// Overhead light.
    Light,
    /// Television with a fixed channel list.
    Tv,
}

impl FixtureKind {
    /// All fixture kinds in registry order.
    pub const ALL: [Self; 7] = [
        Self::Table,
        Self::Shelf,
        Self::Fridge,
        Self::Sink,
        Self::Window,
        Self::Light,
        Self::Tv,
    ];

    /// Symbolic type name used in the planning format.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Shelf => "shelf",
            Self::Fridge => "fridge",
            Self::Sink => "sink",
            Self::Window => "window",
            Self::Light => "light",
            Self::Tv => "tv",
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A movable item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// A book identified by its title.
    Book,
    /// A pen identified by its colour.
    Pen,
    /// A food item.
    Food,
    /// A piece of kitchenware.
    Kitchenware,
    /// A phone that belongs to someone and can ring.
    Phone,
}

impl ItemKind {
    /// All item kinds in registry order.
    pub const ALL: [Self; 5] = [
        Self::Book,
        Self::Pen,
        Self::Food,
        Self::Kitchenware,
        Self::Phone,
    ];

    /// Symbolic type name used in the planning format.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Pen => "pen",
            Self::Food => "food",
            Self::Kitchenware => "kitchenware",
            Self::Phone => "phone",
        }
    }
}

// ---------------------------------------------------------------------------
// TV channels
// ---------------------------------------------------------------------------

/// A television channel. The channel list is fixed and shared by every TV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// The Discovery Channel.
    Discovery,
    /// Cartoon Network.
    CartoonNetwork,
    /// NBC.
    Nbc,
    /// CNN.
    Cnn,
    /// Fox News.
    FoxNews,
    /// ESPN.
    Espn,
}

impl Channel {
    /// All channels in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Discovery,
        Self::CartoonNetwork,
        Self::Nbc,
        Self::Cnn,
        Self::FoxNews,
        Self::Espn,
    ];

    /// Planning-format type name shared by all channel objects.
    pub const TYPE_NAME: &'static str = "channel";

    /// Name used in narration.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Discovery => "the Discovery Channel",
            Self::CartoonNetwork => "Cartoon Network",
            Self::Nbc => "NBC",
            Self::Cnn => "CNN",
            Self::FoxNews => "Fox News",
            Self::Espn => "ESPN",
        }
    }

    /// Static planning-format object symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Discovery => "the-discovery-channel",
            Self::CartoonNetwork => "cartoon-network",
            Self::Nbc => "nbc",
            Self::Cnn => "cnn",
            Self::FoxNews => "fox-news",
            Self::Espn => "espn",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn type_names_are_unique_across_categories() {
        let mut names = BTreeSet::new();
        for kind in RoomKind::ALL {
            assert!(names.insert(kind.type_name()));
        }
        for kind in FixtureKind::ALL {
            assert!(names.insert(kind.type_name()));
        }
        for kind in ItemKind::ALL {
            assert!(names.insert(kind.type_name()));
        }
        assert!(names.insert(Channel::TYPE_NAME));
    }

    #[test]
    fn channel_symbols_are_unique() {
        let symbols: BTreeSet<&str> = Channel::ALL.iter().map(|c| c.symbol()).collect();
        assert_eq!(symbols.len(), Channel::ALL.len());
    }

    #[test]
    fn kinds_serialize_as_variant_names() {
        let json = serde_json::to_string(&FixtureKind::Tv).unwrap_or_default();
        assert_eq!(json, "\"Tv\"");
    }
}
