//! Entity records: rooms, fixtures, items and the person.
//!
//! Capabilities are optional sub-records on a single value rather than
//! positions in a type hierarchy. A fixture with `compartments` is a
//! container; a fixture or item with a `toggle` is interactable; a sink has
//! both. Dispatch in [`crate::behavior`] is driven by which are present.
//!
//! Items are owned by exactly one [`Holder`] at all times, which makes
//! "in a container XOR in the person's hand" a structural property.

use homestate_types::{FixtureId, FixtureKind, ItemId, ItemKind, RoomId, RoomKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::narration::{capitalize_first, symbolize};
use crate::registry::{ContainerLayout, blueprint};
use crate::toggle::Toggle;

/// Symbol of the single person in every problem.
pub const PERSON_SYMBOL: &str = "me";

/// Planning-format type of the person.
pub const PERSON_TYPE: &str = "person";

// ---------------------------------------------------------------------------
// Person
// ---------------------------------------------------------------------------

/// The singleton agent. Holds at most one item; which one is recorded on the
/// item's [`Holder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Planning-format symbol.
    pub symbol: String,
}

impl Default for Person {
    fn default() -> Self {
        Self {
            symbol: String::from(PERSON_SYMBOL),
        }
    }
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

/// Everything needed to add a room to a household.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDraft {
    /// Room type.
    pub kind: RoomKind,
    /// Narration name, e.g. "the kitchen" or "Alice's bedroom".
    pub name: String,
    /// Planning-format symbol.
    pub symbol: String,
}

impl RoomDraft {
    /// The kitchen.
    pub fn kitchen() -> Self {
        Self {
            kind: RoomKind::Kitchen,
            name: String::from("the kitchen"),
            symbol: String::from("kitchen"),
        }
    }

    /// The living room.
    pub fn living_room() -> Self {
        Self {
            kind: RoomKind::LivingRoom,
            name: String::from("the living room"),
            symbol: String::from("living-room"),
        }
    }

    /// A bedroom belonging to `owner`.
    pub fn bedroom(owner: &str) -> Self {
        Self {
            kind: RoomKind::Bedroom,
            name: format!("{owner}'s bedroom"),
            symbol: format!("{}-bedroom", symbolize(owner)),
        }
    }
}

/// A room in the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Arena id.
    pub id: RoomId,
    /// Room type.
    pub kind: RoomKind,
    /// Narration name.
    pub name: String,
    /// Planning-format symbol.
    pub symbol: String,
    /// Fixtures created in this room, in creation order.
    pub fixtures: Vec<FixtureId>,
}

impl Room {
    /// Narration name with a leading capital, for sentence starts.
    pub fn title(&self) -> String {
        capitalize_first(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Internal structure of a container fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Compartments {
    /// One compartment reached with a fixed place-phrase.
    Single {
        /// "on", "inside" or "in".
        phrase: &'static str,
    },
    /// Numbered levels `1..=n`.
    Levels(u32),
}

impl Compartments {
    /// Number of levels, if the container is levelled.
    pub const fn level_count(&self) -> Option<u32> {
        match *self {
            Self::Single { .. } => None,
            Self::Levels(n) => Some(n),
        }
    }

    /// Phrase naming the container's whole surface in a question.
    pub const fn surface_phrase(&self) -> &'static str {
        match *self {
            Self::Single { phrase } => phrase,
            Self::Levels(_) => "on",
        }
    }
}

/// Mutable capability state supplied when a fixture is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixtureState {
    /// Present for containers.
    pub compartments: Option<Compartments>,
    /// Present for interactables.
    pub toggle: Option<Toggle>,
}

impl FixtureState {
    /// Randomised state: shelf level count and toggle positions are drawn.
    pub fn initial<R: Rng + ?Sized>(kind: FixtureKind, rng: &mut R) -> Self {
        let compartments = blueprint(kind).container.map(|layout| match layout {
            ContainerLayout::Single(phrase) => Compartments::Single { phrase },
            ContainerLayout::Levels { min, max } => Compartments::Levels(rng.random_range(min..=max)),
        });
        Self {
            compartments,
            toggle: Toggle::for_fixture(kind, rng),
        }
    }

    /// Deterministic state: fewest levels, everything off.
    pub const fn quiet(kind: FixtureKind) -> Self {
        let compartments = match blueprint(kind).container {
            Some(ContainerLayout::Single(phrase)) => Some(Compartments::Single { phrase }),
            Some(ContainerLayout::Levels { min, .. }) => Some(Compartments::Levels(min)),
            None => None,
        };
        Self {
            compartments,
            toggle: Toggle::quiet_fixture(kind),
        }
    }
}

/// A stationary fixture inside a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Arena id.
    pub id: FixtureId,
    /// Fixture type.
    pub kind: FixtureKind,
    /// Narration name, e.g. "overhead light".
    pub name: String,
    /// Planning-format symbol, e.g. `kitchen-overhead-light`.
    pub symbol: String,
    /// The room the fixture stands in.
    pub room: RoomId,
    /// Container capability.
    pub compartments: Option<Compartments>,
    /// Interactable capability.
    pub toggle: Option<Toggle>,
}

impl Fixture {
    /// Whether the fixture holds items.
    pub const fn is_container(&self) -> bool {
        self.compartments.is_some()
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Where an item sits within a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Place-phrase used before "the <fixture>", e.g. "on the 2nd level of".
    pub phrase: String,
    /// Shelf level, for levelled containers.
    pub level: Option<u32>,
}

/// The single owner of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Holder {
    /// Never drawn into play. Excluded from objects, init, actions and queries.
    Pool,
    /// In the person's hand.
    Person,
    /// Inside a container fixture.
    Fixture {
        /// The container.
        fixture: FixtureId,
        /// Position within the container.
        placement: Placement,
    },
}

/// Everything needed to add an item to a household.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    /// Item type.
    pub kind: ItemKind,
    /// Long narration name, e.g. `book called "Dune"`.
    pub name: String,
    /// Short narration name, e.g. `"Dune" book`.
    pub short_name: String,
    /// Whether references take "the" ("the red pen" vs "Alice's phone").
    pub definite: bool,
    /// Planning-format symbol.
    pub symbol: String,
}

impl ItemDraft {
    /// A book with the given title.
    pub fn book(title: &str) -> Self {
        Self {
            kind: ItemKind::Book,
            name: format!("book called \"{title}\""),
            short_name: format!("\"{title}\" book"),
            definite: true,
            symbol: format!("{}-book", symbolize(title)),
        }
    }

    /// A pen of the given colour.
    pub fn pen(color: &str) -> Self {
        let name = format!("{color} pen");
        Self {
            kind: ItemKind::Pen,
            short_name: name.clone(),
            symbol: format!("{}-pen", symbolize(color)),
            name,
            definite: true,
        }
    }

    /// A food item.
    pub fn food(name: &str) -> Self {
        Self::plain(ItemKind::Food, name)
    }

    /// A piece of kitchenware.
    pub fn kitchenware(name: &str) -> Self {
        Self::plain(ItemKind::Kitchenware, name)
    }

    /// A phone that belongs to `owner`.
    pub fn phone(owner: &str) -> Self {
        Self {
            kind: ItemKind::Phone,
            name: format!("phone that belongs to {owner}"),
            short_name: format!("{owner}'s phone"),
            definite: false,
            symbol: format!("{}-phone", symbolize(owner)),
        }
    }

    fn plain(kind: ItemKind, name: &str) -> Self {
        Self {
            kind,
            name: String::from(name),
            short_name: String::from(name),
            definite: true,
            symbol: symbolize(name),
        }
    }
}

/// A movable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Arena id.
    pub id: ItemId,
    /// Item type.
    pub kind: ItemKind,
    /// Long narration name, used when introducing the item.
    pub name: String,
    /// Short narration name, used in references.
    pub short_name: String,
    /// Whether references take "the".
    pub definite: bool,
    /// Planning-format symbol.
    pub symbol: String,
    /// Current owner.
    pub holder: Holder,
    /// Interactable capability.
    pub toggle: Option<Toggle>,
}

impl Item {
    /// Reference used in narration: "the red pen", "Alice's phone".
    pub fn reference(&self) -> String {
        if self.definite {
            format!("the {}", self.short_name)
        } else {
            self.short_name.clone()
        }
    }

    /// Whether the item was drawn into play.
    pub const fn is_active(&self) -> bool {
        !matches!(self.holder, Holder::Pool)
    }

    /// Whether the person is holding the item.
    pub const fn is_held(&self) -> bool {
        matches!(self.holder, Holder::Person)
    }

    /// The container and placement, when the item sits in one.
    pub const fn container(&self) -> Option<(FixtureId, &Placement)> {
        match &self.holder {
            Holder::Fixture { fixture, placement } => Some((*fixture, placement)),
            Holder::Pool | Holder::Person => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::registry::{MAX_SHELF_LEVELS, MIN_SHELF_LEVELS};

    #[test]
    fn item_drafts_build_symbols_and_names() {
        let book = ItemDraft::book("The Old Man and the Sea");
        assert_eq!(book.symbol, "the-old-man-and-the-sea-book");
        assert_eq!(book.name, "book called \"The Old Man and the Sea\"");
        let pen = ItemDraft::pen("red");
        assert_eq!((pen.symbol.as_str(), pen.short_name.as_str()), ("red-pen", "red pen"));
        let phone = ItemDraft::phone("Alice");
        assert_eq!(phone.symbol, "alice-phone");
        assert!(!phone.definite);
    }

    #[test]
    fn room_drafts() {
        assert_eq!(RoomDraft::living_room().symbol, "living-room");
        let bedroom = RoomDraft::bedroom("Mary Ann");
        assert_eq!(bedroom.name, "Mary Ann's bedroom");
        assert_eq!(bedroom.symbol, "mary-ann-bedroom");
    }

    #[test]
    fn shelf_levels_are_drawn_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let state = FixtureState::initial(FixtureKind::Shelf, &mut rng);
            let levels = state.compartments.and_then(|c| c.level_count());
            assert!(levels.is_some_and(|n| (MIN_SHELF_LEVELS..=MAX_SHELF_LEVELS).contains(&n)));
            assert!(state.toggle.is_none());
        }
    }

    #[test]
    fn quiet_state_matches_blueprint() {
        for kind in FixtureKind::ALL {
            let state = FixtureState::quiet(kind);
            assert_eq!(state.compartments.is_some(), blueprint(kind).container.is_some());
            assert_eq!(state.toggle.is_some(), blueprint(kind).interactable);
        }
    }
}
