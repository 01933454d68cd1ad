//! Capability registry: the static table of every concrete entity type.
//!
//! Concrete variants are enumerated explicitly instead of being discovered at
//! runtime. The registry maps each [`Category`] to an ordered list of
//! [`EntityType`]s, and the free functions in this module answer the static
//! capability questions the rest of the crate asks:
//!
//! - [`blueprint`] returns the fixed capabilities of a [`FixtureKind`]
//! - [`can_hold`] is the container compatibility rule
//! - [`accepts`] is the room/fixture compatibility rule
//! - [`room_limit`] is the per-type instantiation limit for rooms

use std::collections::BTreeMap;

use homestate_types::{Category, FixtureKind, ItemKind, RoomKind};

/// Fewest levels a generated shelf may have.
pub const MIN_SHELF_LEVELS: u32 = 3;

/// Most levels a generated shelf may have. Also the number of static level
/// objects declared in every problem.
pub const MAX_SHELF_LEVELS: u32 = 10;

// ---------------------------------------------------------------------------
// Entity types
// ---------------------------------------------------------------------------

/// One registered concrete entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityType {
    /// A room type.
    Room(RoomKind),
    /// A stationary fixture type.
    Fixture(FixtureKind),
    /// A movable item type.
    Item(ItemKind),
}

impl EntityType {
    /// The registry category this type belongs to.
    pub const fn category(self) -> Category {
        match self {
            Self::Room(_) => Category::Room,
            Self::Fixture(_) => Category::Fixture,
            Self::Item(_) => Category::Item,
        }
    }

    /// Symbolic type name used in the planning format.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Room(kind) => kind.type_name(),
            Self::Fixture(kind) => kind.type_name(),
            Self::Item(kind) => kind.type_name(),
        }
    }
}

// ---------------------------------------------------------------------------
// Blueprints
// ---------------------------------------------------------------------------

/// How a container fixture subdivides its storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerLayout {
    /// One compartment, reached with the given place-phrase ("on", "inside").
    Single(&'static str),
    /// A stack of numbered levels; the count is drawn from `min..=max`.
    Levels {
        /// Fewest levels.
        min: u32,
        /// Most levels.
        max: u32,
    },
}

/// Static capabilities of a fixture type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureBlueprint {
    /// The fixture type.
    pub kind: FixtureKind,
    /// Name used in narration.
    pub display_name: &'static str,
    /// Container layout, if the fixture holds items.
    pub container: Option<ContainerLayout>,
    /// Whether the fixture carries a toggle state.
    pub interactable: bool,
}

/// Return the canonical blueprint for a given [`FixtureKind`].
pub const fn blueprint(kind: FixtureKind) -> FixtureBlueprint {
    match kind {
        FixtureKind::Table => FixtureBlueprint {
            kind,
            display_name: "table",
            container: Some(ContainerLayout::Single("on")),
            interactable: false,
        },
        FixtureKind::Shelf => FixtureBlueprint {
            kind,
            display_name: "shelf",
            container: Some(ContainerLayout::Levels {
                min: MIN_SHELF_LEVELS,
                max: MAX_SHELF_LEVELS,
            }),
            interactable: false,
        },
        FixtureKind::Fridge => FixtureBlueprint {
            kind,
            display_name: "fridge",
            container: Some(ContainerLayout::Single("inside")),
            interactable: false,
        },
        // ---- Interactable containers ----
        FixtureKind::Sink => FixtureBlueprint {
            kind,
            display_name: "sink",
            container: Some(ContainerLayout::Single("in")),
            interactable: true,
        },
        // ---- Plain interactables ----
        FixtureKind::Window => FixtureBlueprint {
            kind,
            display_name: "window",
            container: None,
            interactable: true,
        },
        FixtureKind::Light => FixtureBlueprint {
            kind,
            display_name: "overhead light",
            container: None,
            interactable: true,
        },
        FixtureKind::Tv => FixtureBlueprint {
            kind,
            display_name: "TV",
            container: None,
            interactable: true,
        },
    }
}

/// Whether a container of type `fixture` accepts an item of type `item`.
///
/// Tables and shelves take anything, a fridge takes food only and a sink
/// takes kitchenware only. Non-containers take nothing.
pub const fn can_hold(fixture: FixtureKind, item: ItemKind) -> bool {
    match fixture {
        FixtureKind::Table | FixtureKind::Shelf => true,
        FixtureKind::Fridge => matches!(item, ItemKind::Food),
        FixtureKind::Sink => matches!(item, ItemKind::Kitchenware),
        FixtureKind::Window | FixtureKind::Light | FixtureKind::Tv => false,
    }
}

/// Whether a room of type `room` accepts a fixture of type `fixture`.
pub const fn accepts(room: RoomKind, fixture: FixtureKind) -> bool {
    match room {
        RoomKind::Kitchen => matches!(
            fixture,
            FixtureKind::Fridge | FixtureKind::Sink | FixtureKind::Light
        ),
        RoomKind::LivingRoom | RoomKind::Bedroom => matches!(
            fixture,
            FixtureKind::Table
                | FixtureKind::Shelf
                | FixtureKind::Window
                | FixtureKind::Light
                | FixtureKind::Tv
        ),
    }
}

/// Whether an item type carries a toggle state.
pub const fn item_is_interactable(item: ItemKind) -> bool {
    matches!(item, ItemKind::Phone)
}

/// How many instances of a room type a household may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomLimit {
    /// At most one instance.
    Once,
    /// One instance per available owner name.
    PerOwnerName,
}

/// Instantiation limit for a room type.
pub const fn room_limit(room: RoomKind) -> RoomLimit {
    match room {
        RoomKind::Kitchen | RoomKind::LivingRoom => RoomLimit::Once,
        RoomKind::Bedroom => RoomLimit::PerOwnerName,
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Ordered table of registered entity types per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<Category, Vec<EntityType>>,
}

impl Registry {
    /// Registry restricted to the given types, in the given order.
    pub fn new(rooms: &[RoomKind], fixtures: &[FixtureKind], items: &[ItemKind]) -> Self {
        let entries = BTreeMap::from([
            (
                Category::Room,
                rooms.iter().copied().map(EntityType::Room).collect(),
            ),
            (
                Category::Fixture,
                fixtures.iter().copied().map(EntityType::Fixture).collect(),
            ),
            (
                Category::Item,
                items.iter().copied().map(EntityType::Item).collect(),
            ),
        ]);
        Self { entries }
    }

    /// Registry containing every concrete type.
    pub fn standard() -> Self {
        Self::new(&RoomKind::ALL, &FixtureKind::ALL, &ItemKind::ALL)
    }

    /// Registered types of one category.
    pub fn entries(&self, category: Category) -> &[EntityType] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Registered room types.
    pub fn rooms(&self) -> impl Iterator<Item = RoomKind> {
        self.entries(Category::Room).iter().filter_map(|entry| match entry {
            EntityType::Room(kind) => Some(*kind),
            _ => None,
        })
    }

    /// Registered fixture types.
    pub fn fixtures(&self) -> impl Iterator<Item = FixtureKind> {
        self.entries(Category::Fixture)
            .iter()
            .filter_map(|entry| match entry {
                EntityType::Fixture(kind) => Some(*kind),
                _ => None,
            })
    }

    /// Registered item types.
    pub fn items(&self) -> impl Iterator<Item = ItemKind> {
        self.entries(Category::Item).iter().filter_map(|entry| match entry {
            EntityType::Item(kind) => Some(*kind),
            _ => None,
        })
    }

    /// Every registered type: fixtures, then items, then rooms.
    ///
    /// This is the order in which types contribute to the planning domain.
    pub fn all_types(&self) -> impl Iterator<Item = EntityType> {
        [Category::Fixture, Category::Item, Category::Room]
            .into_iter()
            .flat_map(|category| self.entries(category).iter().copied())
    }

    /// Registered fixture types a room type accepts.
    pub fn room_fixtures(&self, room: RoomKind) -> Vec<FixtureKind> {
        self.fixtures().filter(|f| accepts(room, *f)).collect()
    }

    /// Registered item types a container type can hold.
    pub fn holdable_items(&self, fixture: FixtureKind) -> Vec<ItemKind> {
        self.items().filter(|i| can_hold(fixture, *i)).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
