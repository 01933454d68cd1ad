//! Action simulator: picks who acts, asks, or is asked for something next.
//!
//! Every selection follows the same discipline: shuffle the room pool and
//! the item pool, then repeatedly pop a candidate from a pool chosen by a
//! fair coin (falling back to whichever pool is non-empty) until one
//! candidate answers. Pools are finite, so selection always terminates;
//! exhausting both is a fatal [`SimulationError`].

use homestate_types::{ActionOutcome, Goal, ItemId, QueryAnswer, RoomId};
use homestate_world::{Household, WorldError};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

/// Errors raised while simulating.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// No room or item could act. The world is malformed.
    #[error("no entity could act after {attempts} attempts")]
    NoEligibleAction {
        /// Candidates tried before giving up.
        attempts: usize,
    },

    /// No room or item could answer a question.
    #[error("nothing in the household can be queried")]
    NothingToQuery,

    /// No room or item could produce a goal.
    #[error("no goal is available in the current state")]
    NoGoalAvailable,

    /// A household operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Something that can be asked to act, answer or fulfil a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Room(RoomId),
    Item(ItemId),
}

/// The two shuffled candidate pools.
struct Candidates {
    rooms: Vec<RoomId>,
    items: Vec<ItemId>,
}

impl Candidates {
    fn shuffled<R: Rng + ?Sized>(mut rooms: Vec<RoomId>, mut items: Vec<ItemId>, rng: &mut R) -> Self {
        rooms.shuffle(rng);
        items.shuffle(rng);
        Self { rooms, items }
    }

    /// Every room and every item in play.
    fn all<R: Rng + ?Sized>(household: &Household, rng: &mut R) -> Self {
        Self::shuffled(
            household.rooms().iter().map(|r| r.id).collect(),
            household.active_items().map(|i| i.id).collect(),
            rng,
        )
    }

    /// Pop the next candidate, choosing the pool by a fair coin.
    fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Candidate> {
        let from_rooms = match (self.rooms.is_empty(), self.items.is_empty()) {
            (true, true) => return None,
            (false, true) => true,
            (true, false) => false,
            (false, false) => rng.random_bool(0.5),
        };
        if from_rooms {
            self.rooms.pop().map(Candidate::Room)
        } else {
            self.items.pop().map(Candidate::Item)
        }
    }
}

/// Apply exactly one state-changing action and return its narration.
pub fn state_change<R: Rng + ?Sized>(
    household: &mut Household,
    rng: &mut R,
) -> Result<String, SimulationError> {
    let mut candidates = Candidates::all(household, rng);
    let mut attempts: usize = 0;
    while let Some(candidate) = candidates.next(rng) {
        attempts = attempts.saturating_add(1);
        let outcome = match candidate {
            Candidate::Room(room) => household.act_room(room, rng)?,
            Candidate::Item(item) => household.act_item(item, rng)?,
        };
        if let ActionOutcome::Performed(narration) = outcome {
            debug!(?candidate, attempts, "state changed");
            return Ok(narration);
        }
    }
    warn!(attempts, "no entity could act");
    Err(SimulationError::NoEligibleAction { attempts })
}

/// Ask one question about the current state.
///
/// A random item in play asks its own question, or a random room asks about
/// one of its queryable fixtures.
pub fn query<R: Rng + ?Sized>(
    household: &Household,
    rng: &mut R,
) -> Result<QueryAnswer, SimulationError> {
    let mut rooms = Vec::new();
    for room in household.rooms() {
        if !household.queryable_fixtures(room.id)?.is_empty() {
            rooms.push(room.id);
        }
    }
    let items = household.active_items().map(|i| i.id).collect();
    let mut candidates = Candidates::shuffled(rooms, items, rng);
    while let Some(candidate) = candidates.next(rng) {
        let answer = match candidate {
            Candidate::Room(room) => household.query_room(room, rng)?,
            Candidate::Item(item) => Some(household.query_item(item, rng)?),
        };
        if let Some(answer) = answer {
            return Ok(answer);
        }
    }
    Err(SimulationError::NothingToQuery)
}

/// Produce one request and advance the household to its goal state.
pub fn goal<R: Rng + ?Sized>(
    household: &mut Household,
    rng: &mut R,
) -> Result<Goal, SimulationError> {
    let mut candidates = Candidates::all(household, rng);
    while let Some(candidate) = candidates.next(rng) {
        let goal = match candidate {
            Candidate::Room(room) => household.goal_for_room(room, rng)?,
            Candidate::Item(item) => household.goal_for_item(item, rng)?,
        };
        if let Some(goal) = goal {
            debug!(?candidate, request = %goal.description, "goal generated");
            return Ok(goal);
        }
    }
    Err(SimulationError::NoGoalAvailable)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::FixtureKind;
    use homestate_world::{FixtureState, ItemDraft, Placement, RoomDraft};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn kitchen_with_apple() -> Household {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let fridge = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        house
            .add_fixture(kitchen, FixtureKind::Light, FixtureState::quiet(FixtureKind::Light))
            .unwrap();
        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        let placement = Placement {
            phrase: String::from("inside"),
            level: None,
        };
        house.place(apple, fridge, placement).unwrap();
        house
    }

    #[test]
    fn every_step_changes_something() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut house = kitchen_with_apple();
        for _ in 0..50 {
            let narration = state_change(&mut house, &mut rng).unwrap();
            assert!(narration.starts_with("I "));
            house.check_invariants().unwrap();
        }
    }

    #[test]
    fn world_without_actors_is_fatal() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        house.add_item(ItemDraft::food("apple"), None).unwrap();

        assert!(matches!(
            state_change(&mut house, &mut rng),
            Err(SimulationError::NoEligibleAction { attempts: 1 })
        ));
    }

    #[test]
    fn empty_household_has_nothing_to_query() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(matches!(
            query(&Household::new(), &mut rng),
            Err(SimulationError::NothingToQuery)
        ));
    }

    #[test]
    fn queries_answer_from_current_state() {
        let mut rng = SmallRng::seed_from_u64(8);
        let house = kitchen_with_apple();
        for _ in 0..20 {
            let answer = query(&house, &mut rng).unwrap();
            assert!(!answer.question.is_empty());
            assert!(!answer.answer.is_empty());
            if answer.question == "Where is the apple?" {
                assert_eq!(answer.answer, "The apple is inside the fridge in the kitchen.");
            }
        }
    }

    #[test]
    fn goals_advance_the_household() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut house = kitchen_with_apple();
        for _ in 0..10 {
            let goal = goal(&mut house, &mut rng).unwrap();
            assert!(!goal.literals.is_empty());
            house.check_invariants().unwrap();
        }
    }
}
