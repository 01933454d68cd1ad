//! Per-entity behaviour: what a room, fixture or item does when asked to act.
//!
//! Acting never fails because a precondition is unmet; the entity answers
//! [`ActionOutcome::NotApplicable`] and the simulator tries someone else.
//! Composite entities (a sink is a container with a faucet, a phone is a
//! movable item with a ringer) prefer one capability by a fair coin and fall
//! back to the other.

use homestate_types::{ActionOutcome, FixtureId, ItemId, RoomId};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::WorldError;
use crate::household::Household;
use crate::registry::can_hold;

impl Household {
    /// Let a room act through one of its fixtures, tried in random order.
    pub fn act_room<R: Rng + ?Sized>(
        &mut self,
        room: RoomId,
        rng: &mut R,
    ) -> Result<ActionOutcome, WorldError> {
        let mut fixtures = self.room(room)?.fixtures.clone();
        fixtures.shuffle(rng);
        for fixture in fixtures {
            let outcome = self.act_fixture(fixture, rng)?;
            if outcome.is_performed() {
                return Ok(outcome);
            }
        }
        Ok(ActionOutcome::NotApplicable)
    }

    /// Let a fixture act: toggle its state or take the held item.
    pub fn act_fixture<R: Rng + ?Sized>(
        &mut self,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<ActionOutcome, WorldError> {
        let entry = self.fixture(fixture)?;
        match (entry.is_container(), entry.toggle.is_some()) {
            (true, true) => {
                let prefer_toggle = rng.random_bool(0.5);
                let first = if prefer_toggle {
                    self.flip_fixture(fixture, rng)?
                } else {
                    self.receive_held(fixture, rng)?
                };
                if first.is_performed() {
                    Ok(first)
                } else if prefer_toggle {
                    self.receive_held(fixture, rng)
                } else {
                    self.flip_fixture(fixture, rng)
                }
            }
            (true, false) => self.receive_held(fixture, rng),
            (false, true) => self.flip_fixture(fixture, rng),
            (false, false) => Ok(ActionOutcome::NotApplicable),
        }
    }

    /// Let an item act: be picked up or toggle its state.
    ///
    /// Items still in the pool never act.
    pub fn act_item<R: Rng + ?Sized>(
        &mut self,
        item: ItemId,
        rng: &mut R,
    ) -> Result<ActionOutcome, WorldError> {
        let entry = self.item(item)?;
        if !entry.is_active() {
            return Ok(ActionOutcome::NotApplicable);
        }
        if entry.toggle.is_none() {
            return self.pick_up(item);
        }
        let prefer_toggle = rng.random_bool(0.5);
        let first = if prefer_toggle {
            self.flip_item(item, rng)?
        } else {
            self.pick_up(item)?
        };
        if first.is_performed() {
            Ok(first)
        } else if prefer_toggle {
            self.pick_up(item)
        } else {
            self.flip_item(item, rng)
        }
    }

    /// Whether at least one entity can act in the current state.
    ///
    /// True when any fixture or item in play is interactable, when the hand
    /// is empty and some item sits in a container, or when the held item fits
    /// some container.
    pub fn has_eligible_action(&self) -> bool {
        if self.fixtures().iter().any(|f| f.toggle.is_some())
            || self.active_items().any(|i| i.toggle.is_some())
        {
            return true;
        }
        match self.held_item() {
            Some(held) => self
                .fixtures()
                .iter()
                .any(|f| f.is_container() && can_hold(f.kind, held.kind)),
            None => self.active_items().any(|i| i.container().is_some()),
        }
    }

    /// Move the held item into `fixture`, if it fits.
    fn receive_held<R: Rng + ?Sized>(
        &mut self,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<ActionOutcome, WorldError> {
        let Some(held) = self.held_item() else {
            return Ok(ActionOutcome::NotApplicable);
        };
        let (item, reference) = (held.id, held.reference());
        let target = self.fixture(fixture)?;
        if !target.is_container() || !can_hold(target.kind, held.kind) {
            return Ok(ActionOutcome::NotApplicable);
        }
        let full_name = self.full_name(fixture)?;
        let placement = self.place_randomly(item, fixture, rng)?;
        Ok(ActionOutcome::Performed(format!(
            "I placed {reference} I was holding {} the {full_name}.",
            placement.phrase
        )))
    }

    /// Take an item out of its container into the empty hand.
    fn pick_up(&mut self, item: ItemId) -> Result<ActionOutcome, WorldError> {
        if self.held_item().is_some() {
            return Ok(ActionOutcome::NotApplicable);
        }
        let entry = self.item(item)?;
        let Some((fixture, placement)) = entry.container() else {
            return Ok(ActionOutcome::NotApplicable);
        };
        let narration = format!(
            "I picked up {} {} the {}.",
            entry.reference(),
            placement.phrase,
            self.full_name(fixture)?
        );
        self.hand_to_person(item)?;
        Ok(ActionOutcome::Performed(narration))
    }

    fn flip_fixture<R: Rng + ?Sized>(
        &mut self,
        fixture: FixtureId,
        rng: &mut R,
    ) -> Result<ActionOutcome, WorldError> {
        let subject = format!("the {}", self.full_name(fixture)?);
        let entry = self.fixture_mut(fixture)?;
        Ok(entry.toggle.as_mut().map_or(ActionOutcome::NotApplicable, |toggle| {
            ActionOutcome::Performed(toggle.flip(&subject, rng))
        }))
    }

    fn flip_item<R: Rng + ?Sized>(
        &mut self,
        item: ItemId,
        rng: &mut R,
    ) -> Result<ActionOutcome, WorldError> {
        let entry = self.item_mut(item)?;
        let subject = entry.reference();
        Ok(entry.toggle.as_mut().map_or(ActionOutcome::NotApplicable, |toggle| {
            ActionOutcome::Performed(toggle.flip(&subject, rng))
        }))
    }
}
