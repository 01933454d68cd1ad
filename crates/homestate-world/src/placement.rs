//! Placement engine: assigning items to containers.
//!
//! - [`relative_location`] draws a position inside a container
//! - [`Household::place_randomly`] moves one item to a drawn position
//! - [`Household::populate`] fills a fresh container from the remaining pool
//! - [`describe_contents`] narrates what a container holds
//!
//! The drawn [`Placement`] is stored on the item, so the narration phrase
//! and the planning-format level always agree.

use homestate_types::{FixtureId, ItemId};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::entity::{Compartments, Item, Placement};
use crate::error::WorldError;
use crate::household::Household;
use crate::narration::{list_with_articles, ordinal};
use crate::registry::can_hold;

/// Draw a position inside a container.
///
/// Levelled containers draw the level uniformly from `1..=n`.
pub fn relative_location<R: Rng + ?Sized>(compartments: Compartments, rng: &mut R) -> Placement {
    match compartments {
        Compartments::Single { phrase } => Placement {
            phrase: String::from(phrase),
            level: None,
        },
        Compartments::Levels(n) => {
            let level = rng.random_range(1..=n.max(1));
            Placement {
                phrase: format!("on the {} level of", ordinal(level)),
                level: Some(level),
            }
        }
    }
}

/// Narrate a container's contents.
///
/// `subject` names the container ("fridge", or "fridge in the kitchen" in a
/// query answer). Each sentence ends with a trailing space so descriptions
/// concatenate into a paragraph.
pub fn describe_contents(compartments: Compartments, subject: &str, contents: &[&Item]) -> String {
    match compartments {
        Compartments::Single { .. } => {
            if contents.is_empty() {
                format!("The {subject} is empty. ")
            } else {
                let names: Vec<&str> = contents.iter().map(|i| i.name.as_str()).collect();
                format!("The {subject} has {}. ", list_with_articles(&names))
            }
        }
        Compartments::Levels(n) => {
            let mut text = format!("The {subject} has {n} levels. ");
            for level in 1..=n {
                let names: Vec<&str> = contents
                    .iter()
                    .filter(|i| i.container().is_some_and(|(_, p)| p.level == Some(level)))
                    .map(|i| i.name.as_str())
                    .collect();
                if !names.is_empty() {
                    text.push_str(&format!(
                        "The {} level of the {subject} has {}. ",
                        ordinal(level),
                        list_with_articles(&names)
                    ));
                }
            }
            text
        }
    }
}

impl Household {
    /// Move `item` into `fixture` at a freshly drawn position.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        item: ItemId,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<Placement, WorldError> {
        let compartments = self
            .fixture(fixture)?
            .compartments
            .ok_or(WorldError::NotAContainer(fixture))?;
        let placement = relative_location(compartments, rng);
        self.place(item, fixture, placement.clone())?;
        Ok(placement)
    }

    /// Draw up to `capacity` compatible items from `pool` into `fixture`.
    ///
    /// Drawn items are removed from `pool`. Returns them in a shuffled order
    /// suitable for narration.
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        fixture: FixtureId,
        pool: &mut Vec<ItemId>,
        capacity: usize,
        rng: &mut R,
    ) -> Result<Vec<ItemId>, WorldError> {
        let kind = self.fixture(fixture)?.kind;
        let mut drawn: Vec<ItemId> = pool
            .iter()
            .copied()
            .filter(|id| self.item(*id).is_ok_and(|item| can_hold(kind, item.kind)))
            .collect();
        drawn.shuffle(rng);
        drawn.truncate(capacity);
        pool.retain(|id| !drawn.contains(id));

        for id in &drawn {
            self.place_randomly(*id, fixture, rng)?;
        }
        drawn.shuffle(rng);
        debug!(fixture = %fixture, items = drawn.len(), "container populated");
        Ok(drawn)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::FixtureKind;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::entity::{FixtureState, ItemDraft, RoomDraft};

    #[test]
    fn shelf_placement_phrase_matches_level() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let placement = relative_location(Compartments::Levels(4), &mut rng);
            let level = placement.level.unwrap();
            assert!((1..=4).contains(&level));
            assert_eq!(placement.phrase, format!("on the {} level of", ordinal(level)));
        }
    }

    #[test]
    fn populate_respects_capacity_and_compatibility() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let fridge = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        let mut pool = vec![
            house.add_item(ItemDraft::food("apple"), None).unwrap(),
            house.add_item(ItemDraft::pen("red"), None).unwrap(),
            house.add_item(ItemDraft::food("bread"), None).unwrap(),
            house.add_item(ItemDraft::food("cheese"), None).unwrap(),
        ];

        let drawn = house.populate(fridge, &mut pool, 2, &mut rng).unwrap();
        assert_eq!(drawn.len(), 2);
        assert_eq!(pool.len(), 2);
        for id in &drawn {
            assert!(!pool.contains(id));
            assert_eq!(house.item(*id).unwrap().container().map(|(f, _)| f), Some(fridge));
        }
        assert!(pool.iter().any(|id| house.item(*id).unwrap().name == "red pen"));
        house.check_invariants().unwrap();
    }

    #[test]
    fn contents_description_for_single_compartment() {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let fridge = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        let compartments = house.fixture(fridge).unwrap().compartments.unwrap();
        assert_eq!(describe_contents(compartments, "fridge", &[]), "The fridge is empty. ");

        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        house.place_randomly(apple, fridge, &mut rng).unwrap();
        assert_eq!(
            describe_contents(compartments, "fridge", &house.contents(fridge)),
            "The fridge has an apple. "
        );
    }

    #[test]
    fn contents_description_groups_by_level() {
        let mut house = Household::new();
        let bedroom = house.add_room(RoomDraft::bedroom("Bob")).unwrap();
        let levels = Compartments::Levels(3);
        let shelf = house
            .add_fixture(
                bedroom,
                FixtureKind::Shelf,
                FixtureState {
                    compartments: Some(levels),
                    toggle: None,
                },
            )
            .unwrap();
        let pen = house.add_item(ItemDraft::pen("red"), None).unwrap();
        let placement = Placement {
            phrase: String::from("on the 2nd level of"),
            level: Some(2),
        };
        house.place(pen, shelf, placement).unwrap();
        assert_eq!(
            describe_contents(levels, "shelf", &house.contents(shelf)),
            "The shelf has 3 levels. The 2nd level of the shelf has a red pen. "
        );
    }
}
