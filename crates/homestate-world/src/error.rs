//! Error types for the `homestate-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type alias. Note that an entity declining to act is
//! not an error; that is reported through
//! [`ActionOutcome::NotApplicable`](homestate_types::ActionOutcome).

use homestate_types::{FixtureId, FixtureKind, ItemId, ItemKind, RoomId, RoomKind};

/// Errors that can occur while building or mutating a household.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A room id does not refer to a room in this household.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// A fixture id does not refer to a fixture in this household.
    #[error("fixture not found: {0}")]
    FixtureNotFound(FixtureId),

    /// An item id does not refer to an item in this household.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    /// Two entities would share a planning-format symbol.
    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    /// The room type does not accept this fixture type.
    #[error("{room:?} does not accept a {fixture:?}")]
    FixtureNotAccepted {
        /// The room type.
        room: RoomKind,
        /// The rejected fixture type.
        fixture: FixtureKind,
    },

    /// The supplied state does not match the fixture type's capabilities.
    #[error("{fixture:?} state does not match its {capability} capability")]
    CapabilityMismatch {
        /// The fixture type.
        fixture: FixtureKind,
        /// The capability whose presence disagrees.
        capability: &'static str,
    },

    /// The fixture cannot hold items.
    #[error("fixture {0} is not a container")]
    NotAContainer(FixtureId),

    /// The container type does not accept the item type.
    #[error("a {fixture:?} cannot hold a {item:?}")]
    IncompatibleItem {
        /// The item type.
        item: ItemKind,
        /// The container type.
        fixture: FixtureKind,
    },

    /// A placement names a level the container does not have.
    #[error("level {level:?} is out of range for fixture {fixture} ({levels} levels)")]
    LevelOutOfRange {
        /// The container.
        fixture: FixtureId,
        /// The requested level, if any.
        level: Option<u32>,
        /// Number of levels the container has (zero for single-compartment).
        levels: u32,
    },

    /// The person already holds a different item.
    #[error("hand is occupied by {held}")]
    HandOccupied {
        /// The item currently held.
        held: ItemId,
    },

    /// The item was never drawn into play.
    #[error("item {0} is not in play")]
    ItemNotInPlay(ItemId),

    /// A structural invariant of the household does not hold.
    #[error("household invariant violated: {reason}")]
    InvariantViolated {
        /// Description of the violated invariant.
        reason: String,
    },
}
