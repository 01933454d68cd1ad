//! The household: flat arenas of rooms, fixtures and items plus the person.
//!
//! All mutation goes through methods that check the capability rules from
//! [`crate::registry`], so a household built through this API satisfies
//! [`Household::check_invariants`] at every step.

use std::collections::BTreeSet;

use homestate_types::{FixtureId, FixtureKind, ItemId, RoomId};
use tracing::debug;

use crate::entity::{
    Compartments, Fixture, FixtureState, Holder, Item, ItemDraft, Person, Placement, Room,
    RoomDraft,
};
use crate::error::WorldError;
use crate::narration::symbolize;
use crate::registry::{accepts, blueprint, can_hold};
use crate::toggle::Toggle;

/// A generated household.
#[derive(Debug, Clone, Default)]
pub struct Household {
    rooms: Vec<Room>,
    fixtures: Vec<Fixture>,
    items: Vec<Item>,
    person: Person,
}

impl Household {
    /// An empty household with the default person.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// The person.
    pub const fn person(&self) -> &Person {
        &self.person
    }

    /// All rooms in creation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// All fixtures in creation order.
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// All items, including those still in the pool.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items drawn into play.
    pub fn active_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.is_active())
    }

    /// Look up a room.
    pub fn room(&self, id: RoomId) -> Result<&Room, WorldError> {
        self.rooms.get(id.index()).ok_or(WorldError::RoomNotFound(id))
    }

    /// Look up a fixture.
    pub fn fixture(&self, id: FixtureId) -> Result<&Fixture, WorldError> {
        self.fixtures
            .get(id.index())
            .ok_or(WorldError::FixtureNotFound(id))
    }

    /// Look up an item.
    pub fn item(&self, id: ItemId) -> Result<&Item, WorldError> {
        self.items.get(id.index()).ok_or(WorldError::ItemNotFound(id))
    }

    pub(crate) fn fixture_mut(&mut self, id: FixtureId) -> Result<&mut Fixture, WorldError> {
        self.fixtures
            .get_mut(id.index())
            .ok_or(WorldError::FixtureNotFound(id))
    }

    pub(crate) fn item_mut(&mut self, id: ItemId) -> Result<&mut Item, WorldError> {
        self.items
            .get_mut(id.index())
            .ok_or(WorldError::ItemNotFound(id))
    }

    /// The item in the person's hand, if any.
    pub fn held_item(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.is_held())
    }

    /// Items currently inside a fixture, in arena order.
    pub fn contents(&self, fixture: FixtureId) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.container().is_some_and(|(id, _)| id == fixture))
            .collect()
    }

    /// "fridge in the kitchen": the fixture name qualified by its room.
    pub fn full_name(&self, fixture: FixtureId) -> Result<String, WorldError> {
        let fixture = self.fixture(fixture)?;
        let room = self.room(fixture.room)?;
        Ok(format!("{} in {}", fixture.name, room.name))
    }

    /// Whether any entity already uses `symbol`.
    pub fn has_symbol(&self, symbol: &str) -> bool {
        self.person.symbol == symbol
            || self.rooms.iter().any(|r| r.symbol == symbol)
            || self.fixtures.iter().any(|f| f.symbol == symbol)
            || self.items.iter().any(|i| i.symbol == symbol)
    }

    fn ensure_unique(&self, symbol: &str) -> Result<(), WorldError> {
        if self.has_symbol(symbol) {
            return Err(WorldError::DuplicateSymbol(String::from(symbol)));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Add an empty room.
    pub fn add_room(&mut self, draft: RoomDraft) -> Result<RoomId, WorldError> {
        self.ensure_unique(&draft.symbol)?;
        let id = RoomId::new(self.rooms.len());
        debug!(room = %draft.symbol, "room added");
        self.rooms.push(Room {
            id,
            kind: draft.kind,
            name: draft.name,
            symbol: draft.symbol,
            fixtures: Vec::new(),
        });
        Ok(id)
    }

    /// Add a fixture of `kind` to `room`.
    ///
    /// The room must accept the fixture type and `state` must carry exactly
    /// the capabilities the type's blueprint declares.
    pub fn add_fixture(
        &mut self,
        room: RoomId,
        kind: FixtureKind,
        state: FixtureState,
    ) -> Result<FixtureId, WorldError> {
        let plan = blueprint(kind);
        let room_entry = self.room(room)?;
        if !accepts(room_entry.kind, kind) {
            return Err(WorldError::FixtureNotAccepted {
                room: room_entry.kind,
                fixture: kind,
            });
        }
        if plan.container.is_some() != state.compartments.is_some() {
            return Err(WorldError::CapabilityMismatch {
                fixture: kind,
                capability: "container",
            });
        }
        if plan.interactable != state.toggle.is_some() {
            return Err(WorldError::CapabilityMismatch {
                fixture: kind,
                capability: "interactable",
            });
        }
        let symbol = format!("{}-{}", room_entry.symbol, symbolize(plan.display_name));
        self.ensure_unique(&symbol)?;

        let id = FixtureId::new(self.fixtures.len());
        self.fixtures.push(Fixture {
            id,
            kind,
            name: String::from(plan.display_name),
            symbol,
            room,
            compartments: state.compartments,
            toggle: state.toggle,
        });
        self.rooms
            .get_mut(room.index())
            .ok_or(WorldError::RoomNotFound(room))?
            .fixtures
            .push(id);
        Ok(id)
    }

    /// Add an item to the pool. It joins play once placed or handed over.
    pub fn add_item(&mut self, draft: ItemDraft, toggle: Option<Toggle>) -> Result<ItemId, WorldError> {
        self.ensure_unique(&draft.symbol)?;
        let id = ItemId::new(self.items.len());
        self.items.push(Item {
            id,
            kind: draft.kind,
            name: draft.name,
            short_name: draft.short_name,
            definite: draft.definite,
            symbol: draft.symbol,
            holder: Holder::Pool,
            toggle,
        });
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Ownership transfer
    // -----------------------------------------------------------------------

    /// Move an item into a container at the given placement.
    pub fn place(
        &mut self,
        item: ItemId,
        fixture: FixtureId,
        placement: Placement,
    ) -> Result<(), WorldError> {
        let kind = self.item(item)?.kind;
        let target = self.fixture(fixture)?;
        let compartments = target
            .compartments
            .ok_or(WorldError::NotAContainer(fixture))?;
        if !can_hold(target.kind, kind) {
            return Err(WorldError::IncompatibleItem {
                item: kind,
                fixture: target.kind,
            });
        }
        check_level(fixture, compartments, placement.level)?;
        self.item_mut(item)?.holder = Holder::Fixture { fixture, placement };
        Ok(())
    }

    /// Put an item in play into the person's hand.
    pub fn hand_to_person(&mut self, item: ItemId) -> Result<(), WorldError> {
        if let Some(held) = self.held_item().filter(|held| held.id != item) {
            return Err(WorldError::HandOccupied { held: held.id });
        }
        let entry = self.item_mut(item)?;
        if !entry.is_active() {
            return Err(WorldError::ItemNotInPlay(item));
        }
        entry.holder = Holder::Person;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// Verify the structural invariants of the household.
    ///
    /// At most one item is held; every placed item sits in an existing
    /// container that accepts its type, on a level the container has; every
    /// fixture is listed by the room it names; symbols are unique.
    pub fn check_invariants(&self) -> Result<(), WorldError> {
        let held = self.items.iter().filter(|item| item.is_held()).count();
        if held > 1 {
            return Err(violation(format!("{held} items held at once")));
        }

        for item in &self.items {
            let Some((fixture_id, placement)) = item.container() else {
                continue;
            };
            let fixture = self.fixture(fixture_id)?;
            let compartments = fixture.compartments.ok_or_else(|| {
                violation(format!("{} sits in non-container {}", item.symbol, fixture.symbol))
            })?;
            if !can_hold(fixture.kind, item.kind) {
                return Err(violation(format!(
                    "{} cannot hold {}",
                    fixture.symbol, item.symbol
                )));
            }
            check_level(fixture_id, compartments, placement.level)?;
        }

        for fixture in &self.fixtures {
            if !self.room(fixture.room)?.fixtures.contains(&fixture.id) {
                return Err(violation(format!(
                    "{} is not listed by its room",
                    fixture.symbol
                )));
            }
        }

        let mut symbols = BTreeSet::new();
        let all = std::iter::once(self.person.symbol.as_str())
            .chain(self.rooms.iter().map(|r| r.symbol.as_str()))
            .chain(self.fixtures.iter().map(|f| f.symbol.as_str()))
            .chain(self.items.iter().map(|i| i.symbol.as_str()));
        for symbol in all {
            if !symbols.insert(symbol) {
                return Err(WorldError::DuplicateSymbol(String::from(symbol)));
            }
        }
        Ok(())
    }
}

fn violation(reason: String) -> WorldError {
    WorldError::InvariantViolated { reason }
}

fn check_level(
    fixture: FixtureId,
    compartments: Compartments,
    level: Option<u32>,
) -> Result<(), WorldError> {
    let in_range = match (compartments, level) {
        (Compartments::Single { .. }, None) => true,
        (Compartments::Levels(n), Some(l)) => (1..=n).contains(&l),
        _ => false,
    };
    if in_range {
        Ok(())
    } else {
        Err(WorldError::LevelOutOfRange {
            fixture,
            level,
            levels: compartments.level_count().unwrap_or(0),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::RoomKind;

    use super::*;

    fn kitchen_with_fridge() -> (Household, FixtureId) {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let fridge = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        (house, fridge)
    }

    fn inside() -> Placement {
        Placement {
            phrase: String::from("inside"),
            level: None,
        }
    }

    #[test]
    fn fixture_symbols_are_room_qualified() {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let light = house
            .add_fixture(kitchen, FixtureKind::Light, FixtureState::quiet(FixtureKind::Light))
            .unwrap();
        assert_eq!(house.fixture(light).unwrap().symbol, "kitchen-overhead-light");
        assert_eq!(house.full_name(light).unwrap(), "overhead light in the kitchen");
        assert_eq!(house.room(kitchen).unwrap().fixtures, vec![light]);
    }

    #[test]
    fn kitchen_rejects_table() {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let err = house
            .add_fixture(kitchen, FixtureKind::Table, FixtureState::quiet(FixtureKind::Table))
            .unwrap_err();
        assert!(matches!(
            err,
            WorldError::FixtureNotAccepted {
                room: RoomKind::Kitchen,
                fixture: FixtureKind::Table
            }
        ));
    }

    #[test]
    fn capability_state_must_match_blueprint() {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let err = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::default())
            .unwrap_err();
        assert!(matches!(err, WorldError::CapabilityMismatch { .. }));
    }

    #[test]
    fn duplicate_room_symbol_rejected() {
        let mut house = Household::new();
        house.add_room(RoomDraft::kitchen()).unwrap();
        assert!(matches!(
            house.add_room(RoomDraft::kitchen()),
            Err(WorldError::DuplicateSymbol(_))
        ));
    }

    #[test]
    fn place_then_hand_keeps_single_owner() {
        let (mut house, fridge) = kitchen_with_fridge();
        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        assert!(!house.item(apple).unwrap().is_active());

        house.place(apple, fridge, inside()).unwrap();
        assert_eq!(house.contents(fridge).len(), 1);
        house.check_invariants().unwrap();

        house.hand_to_person(apple).unwrap();
        assert!(house.contents(fridge).is_empty());
        assert_eq!(house.held_item().map(|i| i.id), Some(apple));
        house.check_invariants().unwrap();
    }

    #[test]
    fn fridge_rejects_pen() {
        let (mut house, fridge) = kitchen_with_fridge();
        let pen = house.add_item(ItemDraft::pen("red"), None).unwrap();
        assert!(matches!(
            house.place(pen, fridge, inside()),
            Err(WorldError::IncompatibleItem { .. })
        ));
    }

    #[test]
    fn second_item_cannot_be_handed_over() {
        let (mut house, fridge) = kitchen_with_fridge();
        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        let bread = house.add_item(ItemDraft::food("bread"), None).unwrap();
        house.place(apple, fridge, inside()).unwrap();
        house.place(bread, fridge, inside()).unwrap();
        house.hand_to_person(apple).unwrap();
        assert!(matches!(
            house.hand_to_person(bread),
            Err(WorldError::HandOccupied { held }) if held == apple
        ));
    }

    #[test]
    fn pooled_item_cannot_be_handed_over() {
        let (mut house, _) = kitchen_with_fridge();
        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        assert!(matches!(
            house.hand_to_person(apple),
            Err(WorldError::ItemNotInPlay(_))
        ));
    }

    #[test]
    fn shelf_level_out_of_range_rejected() {
        let mut house = Household::new();
        let bedroom = house.add_room(RoomDraft::bedroom("Alice")).unwrap();
        let state = FixtureState {
            compartments: Some(Compartments::Levels(3)),
            toggle: None,
        };
        let shelf = house.add_fixture(bedroom, FixtureKind::Shelf, state).unwrap();
        let pen = house.add_item(ItemDraft::pen("blue"), None).unwrap();
        let placement = Placement {
            phrase: String::from("on the 4th level of"),
            level: Some(4),
        };
        assert!(matches!(
            house.place(pen, shelf, placement),
            Err(WorldError::LevelOutOfRange { levels: 3, .. })
        ));
    }
}
