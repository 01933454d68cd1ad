//! Question generators for items, fixtures and rooms.
//!
//! Every question is answered from the current state, so the pair is always
//! true at the moment it is asked.

use homestate_types::{FixtureId, ItemId, QueryAnswer, RoomId};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::entity::Holder;
use crate::error::WorldError;
use crate::household::Household;
use crate::narration::capitalize_first;
use crate::placement::describe_contents;

impl Household {
    /// Ask about an item in play.
    ///
    /// Interactable items ask about their toggle half of the time; otherwise
    /// the question is where the item is.
    pub fn query_item<R: Rng + ?Sized>(
        &self,
        item: ItemId,
        rng: &mut R,
    ) -> Result<QueryAnswer, WorldError> {
        let entry = self.item(item)?;
        let reference = entry.reference();
        if let Some(toggle) = entry.toggle.filter(|_| rng.random_bool(0.5)) {
            return Ok(toggle.question(&reference));
        }
        let answer = match &entry.holder {
            Holder::Pool => return Err(WorldError::ItemNotInPlay(item)),
            Holder::Person => format!("You are holding {reference}."),
            Holder::Fixture { fixture, placement } => format!(
                "{} is {} the {}.",
                capitalize_first(&reference),
                placement.phrase,
                self.full_name(*fixture)?
            ),
        };
        Ok(QueryAnswer {
            question: format!("Where is {reference}?"),
            answer,
        })
    }

    /// Fixtures of a room that can answer a question.
    pub fn queryable_fixtures(&self, room: RoomId) -> Result<Vec<FixtureId>, WorldError> {
        let mut queryable = Vec::new();
        for id in &self.room(room)?.fixtures {
            let fixture = self.fixture(*id)?;
            if fixture.is_container() || fixture.toggle.is_some() {
                queryable.push(*id);
            }
        }
        Ok(queryable)
    }

    /// Ask about a fixture's toggle or contents.
    ///
    /// A fixture with both picks one by a fair coin. Returns `None` for a
    /// fixture with neither.
    pub fn query_fixture<R: Rng + ?Sized>(
        &self,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<Option<QueryAnswer>, WorldError> {
        let entry = self.fixture(fixture)?;
        let full_name = self.full_name(fixture)?;
        let ask_toggle = match (entry.toggle, entry.compartments) {
            (Some(_), Some(_)) => rng.random_bool(0.5),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return Ok(None),
        };
        if let (true, Some(toggle)) = (ask_toggle, entry.toggle) {
            return Ok(Some(toggle.question(&format!("the {full_name}"))));
        }
        let Some(compartments) = entry.compartments else {
            return Ok(None);
        };
        let contents = self.contents(fixture);
        Ok(Some(QueryAnswer {
            question: format!(
                "What is {} the {full_name}?",
                compartments.surface_phrase()
            ),
            answer: describe_contents(compartments, &full_name, &contents)
                .trim_end()
                .to_owned(),
        }))
    }

    /// Ask about a uniformly chosen queryable fixture of a room.
    pub fn query_room<R: Rng + ?Sized>(
        &self,
        room: RoomId,
        rng: &mut R,
    ) -> Result<Option<QueryAnswer>, WorldError> {
        let queryable = self.queryable_fixtures(room)?;
        match queryable.choose(rng) {
            Some(fixture) => self.query_fixture(*fixture, rng),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::{Channel, FixtureKind};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::entity::{Compartments, FixtureState, ItemDraft, Placement, RoomDraft};
    use crate::toggle::Toggle;

    #[test]
    fn item_location_question() {
        let mut rng = SmallRng::seed_from_u64(42);
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
        let pen = house.add_item(ItemDraft::pen("red"), None).unwrap();
        let placement = Placement {
            phrase: String::from("on the 3rd level of"),
            level: Some(3),
        };
        house.place(pen, shelf, placement).unwrap();

        let qa = house.query_item(pen, &mut rng).unwrap();
        assert_eq!(qa.question, "Where is the red pen?");
        assert_eq!(qa.answer, "The red pen is on the 3rd level of the shelf in Alice's bedroom.");

        house.hand_to_person(pen).unwrap();
        let qa = house.query_item(pen, &mut rng).unwrap();
        assert_eq!(qa.answer, "You are holding the red pen.");
    }

    #[test]
    fn pooled_item_cannot_be_queried() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut house = Household::new();
        let pen = house.add_item(ItemDraft::pen("red"), None).unwrap();
        assert!(matches!(
            house.query_item(pen, &mut rng),
            Err(WorldError::ItemNotInPlay(_))
        ));
    }

    #[test]
    fn tv_question_reports_channel() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut house = Household::new();
        let living = house.add_room(RoomDraft::living_room()).unwrap();
        let tv = house
            .add_fixture(
                living,
                FixtureKind::Tv,
                FixtureState {
                    compartments: None,
                    toggle: Some(Toggle::Tv {
                        on: true,
                        channel: Channel::Espn,
                    }),
                },
            )
            .unwrap();
        let qa = house.query_room(living, &mut rng).unwrap().unwrap();
        assert_eq!(
            qa.question,
            "Is the TV in the living room on or off? If it's on, what channel is it playing?"
        );
        assert_eq!(qa.answer, "The TV is on and is playing ESPN.");
        assert_eq!(house.queryable_fixtures(living).unwrap(), vec![tv]);
    }

    #[test]
    fn container_question_lists_contents() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let fridge = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        house.place_randomly(apple, fridge, &mut rng).unwrap();

        let qa = house.query_fixture(fridge, &mut rng).unwrap().unwrap();
        assert_eq!(qa.question, "What is inside the fridge in the kitchen?");
        assert_eq!(qa.answer, "The fridge in the kitchen has an apple.");
    }
}
