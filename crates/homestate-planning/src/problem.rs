//! Problem assembly: objects and initial conditions of the current state.
//!
//! A [`Problem`] is rebuilt from the household at every timestep. Static
//! objects (shelf levels, channels) are declared once per registered type
//! regardless of how many instances exist.

use core::fmt;
use std::collections::BTreeSet;

use homestate_types::{Atom, Goal, ObjectDecl};
use homestate_world::Household;
use homestate_world::registry::Registry;
use homestate_world::schema;

use crate::error::PlanningError;

/// A planning problem: objects, initial state and an optional goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Problem name.
    pub name: String,
    /// Name of the domain this problem refers to.
    pub domain: String,
    /// Declared objects.
    pub objects: Vec<ObjectDecl>,
    /// Initial conditions.
    pub init: Vec<Atom>,
    /// Goal conjunction, for goal records.
    pub goal: Option<Goal>,
}

impl Problem {
    /// Encode the household's current state.
    ///
    /// Objects: the person, each room with its fixtures, each item in play,
    /// then static objects. Init: the person's hand, each room's fixtures,
    /// then each item in play.
    pub fn from_household(
        name: impl Into<String>,
        domain: impl Into<String>,
        household: &Household,
        registry: &Registry,
    ) -> Result<Self, PlanningError> {
        let mut objects = vec![household.person_object()];
        let mut init = household.person_init();

        for room in household.rooms() {
            objects.extend(household.room_objects(room.id)?);
            init.extend(household.room_init(room.id)?);
        }
        for item in household.active_items() {
            objects.extend(household.item_object(item.id)?);
            init.extend(household.item_init(item.id)?);
        }
        for entity in registry.all_types() {
            objects.extend(schema::static_objects(entity));
        }

        Ok(Self {
            name: name.into(),
            domain: domain.into(),
            objects,
            init,
            goal: None,
        })
    }

    /// This problem with a goal attached.
    #[must_use]
    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Initial conditions as an order-insensitive set.
    pub fn init_set(&self) -> BTreeSet<&Atom> {
        self.init.iter().collect()
    }

    /// Whether an object with `symbol` is declared.
    pub fn declares(&self, symbol: &str) -> bool {
        self.objects.iter().any(|o| o.symbol == symbol)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(define (problem {})", self.name)?;
        writeln!(f, "\t(:domain {})", self.domain)?;
        writeln!(f, "\t(:objects")?;
        for object in &self.objects {
            writeln!(f, "\t\t{object}")?;
        }
        writeln!(f, "\t)")?;
        writeln!(f, "\t(:init")?;
        for atom in &self.init {
            writeln!(f, "\t\t{atom}")?;
        }
        writeln!(f, "\t)")?;
        if let Some(goal) = &self.goal {
            write!(f, "{goal}")?;
        }
        writeln!(f, ")")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::{FixtureKind, Literal};
    use homestate_world::{FixtureState, ItemDraft, Placement, RoomDraft};

    use super::*;

    fn small_household() -> Household {
        let mut house = Household::new();
        let kitchen = house.add_room(RoomDraft::kitchen()).unwrap();
        let fridge = house
            .add_fixture(kitchen, FixtureKind::Fridge, FixtureState::quiet(FixtureKind::Fridge))
            .unwrap();
        let apple = house.add_item(ItemDraft::food("apple"), None).unwrap();
        house.add_item(ItemDraft::pen("red"), None).unwrap();
        let placement = Placement {
            phrase: String::from("inside"),
            level: None,
        };
        house.place(apple, fridge, placement).unwrap();
        house
    }

    #[test]
    fn pooled_items_are_not_declared() {
        let house = small_household();
        let problem =
            Problem::from_household("simulation-a", "simulation", &house, &Registry::standard())
                .unwrap();
        assert!(problem.declares("apple"));
        assert!(!problem.declares("red-pen"));
        assert!(problem.declares("level-10"));
        assert!(problem.declares("cnn"));
        assert!(!problem.init.iter().any(|a| a.mentions("red-pen")));
    }

    #[test]
    fn rendering_layout() {
        let house = small_household();
        let text = Problem::from_household("simulation-a", "simulation", &house, &Registry::standard())
            .unwrap()
            .to_string();
        assert!(text.starts_with(
            "(define (problem simulation-a)\n\t(:domain simulation)\n\t(:objects\n\t\tme - person\n\t\tkitchen - kitchen\n\t\tkitchen-fridge - fridge\n"
        ));
        assert!(text.contains("\t(:init\n\t\t(hand-empty me)\n\t\t(in-kitchen kitchen kitchen-fridge)\n"));
        assert!(text.contains("\t\t(fridge-contains kitchen-fridge apple)\n"));
        assert!(text.ends_with("\t)\n)\n"));
    }

    #[test]
    fn goal_block_is_appended() {
        let house = small_household();
        let goal = Goal {
            description: String::from("Hand me the apple."),
            literals: vec![Literal::Pos(Atom::new("in-hand", ["me", "apple"]))],
        };
        let text = Problem::from_household("simulation-a", "simulation", &house, &Registry::standard())
            .unwrap()
            .with_goal(goal)
            .to_string();
        assert!(text.ends_with("\t(:goal\n\t\t(and\n\t\t\t(in-hand me apple)\n\t\t)\n\t)\n)\n"));
    }
}
