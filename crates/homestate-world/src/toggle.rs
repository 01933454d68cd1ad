//! The interactable capability.
//!
//! A [`Toggle`] is the internal state of an interactable fixture or item. It
//! is orthogonal to being a container: a sink is both. Everything a toggle
//! contributes to narration lives here so fixtures and items share it:
//!
//! - [`Toggle::describe`] for the initial room narration
//! - [`Toggle::flip`] for a state-changing action
//! - [`Toggle::question`] for a query and its answer

use homestate_types::{Channel, FixtureKind, ItemKind, QueryAnswer};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::narration::capitalize_first;

/// Toggle state of an interactable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Toggle {
    /// Sink faucet.
    Faucet {
        /// Whether water is running.
        on: bool,
    },
    /// Window blinds.
    Blinds {
        /// Whether the blinds are open.
        open: bool,
    },
    /// Overhead light.
    Light {
        /// Whether the light is on.
        on: bool,
    },
    /// Television.
    Tv {
        /// Whether the TV is on.
        on: bool,
        /// The tuned channel. Only meaningful while on.
        channel: Channel,
    },
    /// Phone ringer.
    Ringer {
        /// Whether the phone is ringing.
        ringing: bool,
    },
}

const fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

const fn open_closed(open: bool) -> &'static str {
    if open { "open" } else { "closed" }
}

/// A uniformly drawn channel.
pub fn random_channel<R: Rng + ?Sized>(rng: &mut R) -> Channel {
    Channel::ALL.choose(rng).copied().unwrap_or(Channel::Discovery)
}

/// A uniformly drawn channel different from `current`.
pub fn other_channel<R: Rng + ?Sized>(current: Channel, rng: &mut R) -> Channel {
    let others: Vec<Channel> = Channel::ALL.into_iter().filter(|c| *c != current).collect();
    others.choose(rng).copied().unwrap_or(current)
}

impl Toggle {
    /// Randomised initial state for a fixture type, if it is interactable.
    pub fn for_fixture<R: Rng + ?Sized>(kind: FixtureKind, rng: &mut R) -> Option<Self> {
        match kind {
            FixtureKind::Sink => Some(Self::Faucet {
                on: rng.random_bool(0.5),
            }),
            FixtureKind::Window => Some(Self::Blinds {
                open: rng.random_bool(0.5),
            }),
            FixtureKind::Light => Some(Self::Light {
                on: rng.random_bool(0.5),
            }),
            FixtureKind::Tv => Some(Self::Tv {
                on: rng.random_bool(0.5),
                channel: random_channel(rng),
            }),
            FixtureKind::Table | FixtureKind::Shelf | FixtureKind::Fridge => None,
        }
    }

    /// Randomised initial state for an item type, if it is interactable.
    pub fn for_item<R: Rng + ?Sized>(kind: ItemKind, rng: &mut R) -> Option<Self> {
        match kind {
            ItemKind::Phone => Some(Self::Ringer {
                ringing: rng.random_bool(0.5),
            }),
            ItemKind::Book | ItemKind::Pen | ItemKind::Food | ItemKind::Kitchenware => None,
        }
    }

    /// Everything-off state for a fixture type, if it is interactable.
    pub const fn quiet_fixture(kind: FixtureKind) -> Option<Self> {
        match kind {
            FixtureKind::Sink => Some(Self::Faucet { on: false }),
            FixtureKind::Window => Some(Self::Blinds { open: false }),
            FixtureKind::Light => Some(Self::Light { on: false }),
            FixtureKind::Tv => Some(Self::Tv {
                on: false,
                channel: Channel::Discovery,
            }),
            FixtureKind::Table | FixtureKind::Shelf | FixtureKind::Fridge => None,
        }
    }

    /// Silent state for an item type, if it is interactable.
    pub const fn quiet_item(kind: ItemKind) -> Option<Self> {
        match kind {
            ItemKind::Phone => Some(Self::Ringer { ringing: false }),
            ItemKind::Book | ItemKind::Pen | ItemKind::Food | ItemKind::Kitchenware => None,
        }
    }

    /// Whether the toggle is in its "active" position (on, open, ringing).
    pub const fn is_active(self) -> bool {
        match self {
            Self::Faucet { on } | Self::Light { on } | Self::Tv { on, .. } => on,
            Self::Blinds { open } => open,
            Self::Ringer { ringing } => ringing,
        }
    }

    /// Sentence describing the current state, for the initial narration.
    ///
    /// `name` is the owner's bare display name ("sink", "TV").
    pub fn describe(self, name: &str) -> String {
        match self {
            Self::Faucet { on } => format!(
                "The {name} has a faucet that can be turned on and off. It is currently {}. ",
                on_off(on)
            ),
            Self::Blinds { open } => format!(
                "The {name} has blinds that can open and close. They are currently {}. ",
                open_closed(open)
            ),
            Self::Light { on } => format!(
                "The {name} turns on and off. It is currently {}. ",
                on_off(on)
            ),
            Self::Tv { on: true, channel } => format!(
                "The {name} is currently on and is playing {}. ",
                channel.display_name()
            ),
            Self::Tv { on: false, .. } => format!("The {name} is currently off. "),
            Self::Ringer { ringing: true } => format!("The {name} is ringing. "),
            Self::Ringer { ringing: false } => format!("The {name} is silent. "),
        }
    }

    /// Change the state and narrate the change in the first person.
    ///
    /// `subject` is the definite reference to the owner ("the sink in the
    /// kitchen", "Alice's phone"). A TV that is on either switches to a
    /// different channel or turns off, by a fair coin.
    pub fn flip<R: Rng + ?Sized>(&mut self, subject: &str, rng: &mut R) -> String {
        match self {
            Self::Faucet { on } => {
                *on = !*on;
                format!("I turned {} the faucet of {subject}.", on_off(*on))
            }
            Self::Blinds { open } => {
                *open = !*open;
                let verb = if *open { "opened" } else { "closed" };
                format!("I {verb} the blinds of {subject}.")
            }
            Self::Light { on } => {
                *on = !*on;
                format!("I turned {} {subject}.", on_off(*on))
            }
            Self::Tv { on, channel } => {
                if !*on {
                    *on = true;
                    *channel = random_channel(rng);
                    format!(
                        "I turned on {subject} and set it to {}.",
                        channel.display_name()
                    )
                } else if rng.random_bool(0.5) {
                    *channel = other_channel(*channel, rng);
                    format!(
                        "I switched the channel of {subject} to {}.",
                        channel.display_name()
                    )
                } else {
                    *on = false;
                    format!("I turned off {subject}.")
                }
            }
            Self::Ringer { ringing } => {
                *ringing = !*ringing;
                let verb = if *ringing { "started" } else { "stopped" };
                format!("{} {verb} ringing.", capitalize_first(subject))
            }
        }
    }

    /// Question about the current state, with its answer.
    pub fn question(self, subject: &str) -> QueryAnswer {
        let (question, answer) = match self {
            Self::Faucet { on } => (
                format!("Is the faucet of {subject} on or off?"),
                format!("The faucet is {}.", on_off(on)),
            ),
            Self::Blinds { open } => (
                format!("Are the blinds of {subject} open or closed?"),
                format!("The window blinds are {}.", open_closed(open)),
            ),
            Self::Light { on } => (
                format!("Is {subject} on or off?"),
                format!("The light is {}.", on_off(on)),
            ),
            Self::Tv { on, channel } => (
                format!("Is {subject} on or off? If it's on, what channel is it playing?"),
                if on {
                    format!("The TV is on and is playing {}.", channel.display_name())
                } else {
                    String::from("The TV is off.")
                },
            ),
            Self::Ringer { ringing } => (
                format!("Is {subject} ringing?"),
                String::from(if ringing { "Yes." } else { "No." }),
            ),
        };
        QueryAnswer { question, answer }
    }
}
