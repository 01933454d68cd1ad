//! Instance-level planning-format contributions: objects and `:init` atoms.
//!
//! Items still in the pool contribute nothing, so they never appear in a
//! problem.

use homestate_types::{Atom, FixtureId, ItemId, ObjectDecl, RoomId};

use crate::entity::{Compartments, Holder, PERSON_TYPE};
use crate::error::WorldError;
use crate::household::Household;
use crate::schema::{
    FAUCET_ON, IS_RINGING, LIGHT_ON, SHELF_HAS_LEVEL, TV_ON, TV_PLAYING_CHANNEL, WINDOW_OPEN,
    contains_atom, hand_empty_atom, in_hand_atom, in_room_atom, level_symbol,
};
use crate::toggle::Toggle;

/// Atoms describing a toggle's state for the entity named `symbol`.
///
/// Inactive toggles contribute nothing (closed-world negation).
pub fn toggle_atoms(toggle: Toggle, symbol: &str) -> Vec<Atom> {
    match toggle {
        Toggle::Faucet { on: true } => vec![Atom::new(FAUCET_ON, [symbol])],
        Toggle::Blinds { open: true } => vec![Atom::new(WINDOW_OPEN, [symbol])],
        Toggle::Light { on: true } => vec![Atom::new(LIGHT_ON, [symbol])],
        Toggle::Tv { on: true, channel } => vec![
            Atom::new(TV_ON, [symbol]),
            Atom::new(TV_PLAYING_CHANNEL, [symbol, channel.symbol()]),
        ],
        Toggle::Ringer { ringing: true } => vec![Atom::new(IS_RINGING, [symbol])],
        Toggle::Faucet { on: false }
        | Toggle::Blinds { open: false }
        | Toggle::Light { on: false }
        | Toggle::Tv { on: false, .. }
        | Toggle::Ringer { ringing: false } => Vec::new(),
    }
}

impl Household {
    /// The person's object declaration.
    pub fn person_object(&self) -> ObjectDecl {
        ObjectDecl::new(self.person().symbol.as_str(), PERSON_TYPE)
    }

    /// The room and each of its fixtures.
    pub fn room_objects(&self, room: RoomId) -> Result<Vec<ObjectDecl>, WorldError> {
        let entry = self.room(room)?;
        let mut objects = vec![ObjectDecl::new(entry.symbol.as_str(), entry.kind.type_name())];
        for id in &entry.fixtures {
            let fixture = self.fixture(*id)?;
            objects.push(ObjectDecl::new(fixture.symbol.as_str(), fixture.kind.type_name()));
        }
        Ok(objects)
    }

    /// The item's declaration, or `None` while it is in the pool.
    pub fn item_object(&self, item: ItemId) -> Result<Option<ObjectDecl>, WorldError> {
        let entry = self.item(item)?;
        Ok(entry
            .is_active()
            .then(|| ObjectDecl::new(entry.symbol.as_str(), entry.kind.type_name())))
    }

    /// `(hand-empty me)` when nothing is held.
    pub fn person_init(&self) -> Vec<Atom> {
        if self.held_item().is_some() {
            Vec::new()
        } else {
            vec![hand_empty_atom(&self.person().symbol)]
        }
    }

    /// Room membership, shelf levels and toggle state of one fixture.
    pub fn fixture_init(&self, fixture: FixtureId) -> Result<Vec<Atom>, WorldError> {
        let entry = self.fixture(fixture)?;
        let room = self.room(entry.room)?;
        let mut atoms = vec![in_room_atom(room.kind, &room.symbol, &entry.symbol)];
        if let Some(Compartments::Levels(n)) = entry.compartments {
            atoms.extend(
                (1..=n).map(|level| {
                    Atom::new(SHELF_HAS_LEVEL, [entry.symbol.clone(), level_symbol(level)])
                }),
            );
        }
        if let Some(toggle) = entry.toggle {
            atoms.extend(toggle_atoms(toggle, &entry.symbol));
        }
        Ok(atoms)
    }

    /// Initial conditions of every fixture in a room.
    pub fn room_init(&self, room: RoomId) -> Result<Vec<Atom>, WorldError> {
        let mut atoms = Vec::new();
        for id in &self.room(room)?.fixtures {
            atoms.extend(self.fixture_init(*id)?);
        }
        Ok(atoms)
    }

    /// Location and toggle state of one item. Empty while in the pool.
    pub fn item_init(&self, item: ItemId) -> Result<Vec<Atom>, WorldError> {
        let entry = self.item(item)?;
        let mut atoms = match &entry.holder {
            Holder::Pool => return Ok(Vec::new()),
            Holder::Person => vec![in_hand_atom(&self.person().symbol, &entry.symbol)],
            Holder::Fixture { fixture, placement } => {
                let container = self.fixture(*fixture)?;
                let level = placement.level.map(level_symbol);
                vec![contains_atom(
                    container.kind,
                    &container.symbol,
                    &entry.symbol,
                    level.as_deref(),
                )]
            }
        };
        if let Some(toggle) = entry.toggle {
            atoms.extend(toggle_atoms(toggle, &entry.symbol));
        }
        Ok(atoms)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::{Channel, FixtureKind, ItemKind};

    use super::*;
    use crate::entity::{FixtureState, ItemDraft, Placement, RoomDraft};

    #[test]
    fn tv_on_contributes_channel() {
        let atoms = toggle_atoms(
            Toggle::Tv {
                on: true,
                channel: Channel::FoxNews,
            },
            "living-room-tv",
        );
        let rendered: Vec<String> = atoms.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["(tv-on living-room-tv)", "(tv-playing-channel living-room-tv fox-news)"]
        );
        assert!(toggle_atoms(Toggle::Light { on: false }, "x").is_empty());
    }

    #[test]
    fn shelf_declares_each_level() {
        let mut house = Household::new();
        let bedroom = house.add_room(RoomDraft::bedroom("Alice")).unwrap();
        let shelf = house
            .add_fixture(
                bedroom,
                FixtureKind::Shelf,
                FixtureState {
                    compartments: Some(Compartments::Levels(3)),
                    toggle: None,
                },
            )
            .unwrap();
        let rendered: Vec<String> = house
            .fixture_init(shelf)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            rendered,
            vec![
                "(in-bedroom alice-bedroom alice-bedroom-shelf)",
                "(shelf-has-level alice-bedroom-shelf level-1)",
                "(shelf-has-level alice-bedroom-shelf level-2)",
                "(shelf-has-level alice-bedroom-shelf level-3)",
            ]
        );
    }

    #[test]
    fn item_init_follows_holder() {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let fridge = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        assert!(house.item_init(apple).unwrap().is_empty());
        assert!(house.item_object(apple).unwrap().is_none());

        let placement = Placement {
            phrase: String::from("inside"),
            level: None,
        };
        house.place(apple, fridge, placement).unwrap();
        assert_eq!(
            house.item_init(apple).unwrap(),
            vec![contains_atom(FixtureKind::Fridge, "kitchen-fridge", "apple", None)]
        );
        assert_eq!(house.person_init(), vec![hand_empty_atom("me")]);

        house.hand_to_person(apple).unwrap();
        assert_eq!(house.item_init(apple).unwrap(), vec![in_hand_atom("me", "apple")]);
        assert!(house.person_init().is_empty());
    }

    #[test]
    fn ringing_phone_contributes_is_ringing() {
        let mut house = Household::new();
        let living = house.add_room(RoomDraft::living_room()).unwrap();
        let table = house
            .add_fixture(living, FixtureKind::Table, FixtureState::quiet(FixtureKind::Table))
            .unwrap();
        let phone = house
            .add_item(ItemDraft::phone("Carol"), Some(Toggle::Ringer { ringing: true }))
            .unwrap();
        let placement = Placement {
            phrase: String::from("on"),
            level: None,
        };
        house.place(phone, table, placement).unwrap();
        let atoms = house.item_init(phone).unwrap();
        assert!(atoms.contains(&Atom::new(IS_RINGING, ["carol-phone"])));
        assert_eq!(
            house.item_object(phone).unwrap().map(|o| o.type_name),
            Some(String::from(ItemKind::Phone.type_name()))
        );
    }
}
