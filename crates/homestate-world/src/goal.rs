//! Goal generators: natural-language requests with their goal literals.
//!
//! Each generator returns the [`Goal`] and advances the household to the
//! state in which the request is fulfilled. Callers render the problem for
//! the pre-goal state before asking for a goal.

use homestate_types::{Atom, Channel, FixtureId, Goal, ItemId, Literal, RoomId};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::WorldError;
use crate::household::Household;
use crate::placement::relative_location;
use crate::registry::can_hold;
use crate::schema::{
    FAUCET_ON, IS_RINGING, LIGHT_ON, TV_ON, TV_PLAYING_CHANNEL, WINDOW_OPEN, contains_atom,
    in_hand_atom, level_symbol,
};
use crate::toggle::{Toggle, other_channel, random_channel};

impl Household {
    /// A request about an item in play: hand it over, or answer it.
    pub fn goal_for_item<R: Rng + ?Sized>(
        &mut self,
        item: ItemId,
        rng: &mut R,
    ) -> Result<Option<Goal>, WorldError> {
        let entry = self.item(item)?;
        if !entry.is_active() {
            return Ok(None);
        }
        if entry.toggle.is_none() {
            return self.hand_over_goal(item);
        }
        let prefer_toggle = rng.random_bool(0.5);
        let first = if prefer_toggle {
            self.answer_goal(item)?
        } else {
            self.hand_over_goal(item)?
        };
        if first.is_some() {
            Ok(first)
        } else if prefer_toggle {
            self.hand_over_goal(item)
        } else {
            self.answer_goal(item)
        }
    }

    /// A request about a fixture: fill it, or change its toggle.
    pub fn goal_for_fixture<R: Rng + ?Sized>(
        &mut self,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<Option<Goal>, WorldError> {
        let entry = self.fixture(fixture)?;
        match (entry.is_container(), entry.toggle.is_some()) {
            (true, true) => {
                let prefer_toggle = rng.random_bool(0.5);
                let first = if prefer_toggle {
                    self.toggle_goal(fixture, rng)?
                } else {
                    self.fill_goal(fixture, rng)?
                };
                if first.is_some() {
                    Ok(first)
                } else if prefer_toggle {
                    self.fill_goal(fixture, rng)
                } else {
                    self.toggle_goal(fixture, rng)
                }
            }
            (true, false) => self.fill_goal(fixture, rng),
            (false, true) => self.toggle_goal(fixture, rng),
            (false, false) => Ok(None),
        }
    }

    /// A request about one of a room's fixtures, tried in random order.
    pub fn goal_for_room<R: Rng + ?Sized>(
        &mut self,
        room: RoomId,
        rng: &mut R,
    ) -> Result<Option<Goal>, WorldError> {
        let mut fixtures = self.room(room)?.fixtures.clone();
        fixtures.shuffle(rng);
        for fixture in fixtures {
            if let Some(goal) = self.goal_for_fixture(fixture, rng)? {
                return Ok(Some(goal));
            }
        }
        Ok(None)
    }

    /// "Hand me the apple." Needs an empty hand and the item in a container.
    fn hand_over_goal(&mut self, item: ItemId) -> Result<Option<Goal>, WorldError> {
        let entry = self.item(item)?;
        if self.held_item().is_some() || entry.container().is_none() {
            return Ok(None);
        }
        let goal = Goal {
            description: format!("Hand me {}.", entry.reference()),
            literals: vec![Literal::Pos(in_hand_atom(
                &self.person().symbol,
                &entry.symbol,
            ))],
        };
        self.hand_to_person(item)?;
        Ok(Some(goal))
    }

    /// "Answer Alice's phone." Needs a ringing phone.
    fn answer_goal(&mut self, item: ItemId) -> Result<Option<Goal>, WorldError> {
        let entry = self.item_mut(item)?;
        let Some(Toggle::Ringer { ringing }) = entry.toggle.as_mut() else {
            return Ok(None);
        };
        if !*ringing {
            return Ok(None);
        }
        *ringing = false;
        Ok(Some(Goal {
            description: format!("Answer {}.", entry.reference()),
            literals: vec![Literal::Neg(Atom::new(IS_RINGING, [entry.symbol.as_str()]))],
        }))
    }

    /// "Place the apple inside the fridge in the kitchen." Picks a compatible
    /// item in play that is not already in the container.
    fn fill_goal<R: Rng + ?Sized>(
        &mut self,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<Option<Goal>, WorldError> {
        let entry = self.fixture(fixture)?;
        let Some(compartments) = entry.compartments else {
            return Ok(None);
        };
        let (kind, symbol) = (entry.kind, entry.symbol.clone());
        let mut candidates: Vec<ItemId> = self
            .active_items()
            .filter(|item| can_hold(kind, item.kind))
            .filter(|item| item.container().is_none_or(|(id, _)| id != fixture))
            .map(|item| item.id)
            .collect();
        candidates.shuffle(rng);
        let Some(chosen) = candidates.first().copied() else {
            return Ok(None);
        };

        let placement = relative_location(compartments, rng);
        let item = self.item(chosen)?;
        let level = placement.level.map(level_symbol);
        let goal = Goal {
            description: format!(
                "Place {} {} the {}.",
                item.reference(),
                placement.phrase,
                self.full_name(fixture)?
            ),
            literals: vec![Literal::Pos(contains_atom(
                kind,
                &symbol,
                &item.symbol,
                level.as_deref(),
            ))],
        };
        self.place(chosen, fixture, placement)?;
        Ok(Some(goal))
    }

    /// Flip-state requests. A faucet is only ever asked to be turned off.
    fn toggle_goal<R: Rng + ?Sized>(
        &mut self,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<Option<Goal>, WorldError> {
        let full_name = self.full_name(fixture)?;
        let entry = self.fixture_mut(fixture)?;
        let symbol = entry.symbol.as_str();
        let Some(toggle) = entry.toggle.as_mut() else {
            return Ok(None);
        };
        let goal = match toggle {
            Toggle::Light { on } => {
                *on = !*on;
                let atom = Atom::new(LIGHT_ON, [symbol]);
                Goal {
                    description: format!(
                        "Turn {} the {full_name}.",
                        if *on { "on" } else { "off" }
                    ),
                    literals: vec![polarity(*on, atom)],
                }
            }
            Toggle::Blinds { open } => {
                *open = !*open;
                let atom = Atom::new(WINDOW_OPEN, [symbol]);
                Goal {
                    description: format!(
                        "{} the blinds of the {full_name}.",
                        if *open { "Open" } else { "Close" }
                    ),
                    literals: vec![polarity(*open, atom)],
                }
            }
            Toggle::Faucet { on } => {
                if !*on {
                    return Ok(None);
                }
                *on = false;
                Goal {
                    description: format!("Turn off the faucet of the {full_name}."),
                    literals: vec![Literal::Neg(Atom::new(FAUCET_ON, [symbol]))],
                }
            }
            Toggle::Tv { on, channel } => {
                let target: Channel = if *on {
                    other_channel(*channel, rng)
                } else {
                    random_channel(rng)
                };
                *on = true;
                *channel = target;
                Goal {
                    description: format!(
                        "Turn on the {full_name} and put on {}.",
                        target.display_name()
                    ),
                    literals: vec![
                        Literal::Pos(Atom::new(TV_ON, [symbol])),
                        Literal::Pos(Atom::new(TV_PLAYING_CHANNEL, [symbol, target.symbol()])),
                    ],
                }
            }
            Toggle::Ringer { .. } => return Ok(None),
        };
        Ok(Some(goal))
    }
}

fn polarity(positive: bool, atom: Atom) -> Literal {
    if positive {
        Literal::Pos(atom)
    } else {
        Literal::Neg(atom)
    }
}
