//! Type-level planning-format contributions.
//!
//! Every registered entity type contributes required types, predicates,
//! actions and static objects to the domain. Contributions depend only on
//! the type and the registry, never on instances. A capability that needs
//! extra types (shelf levels, TV channels) reports them here so the encoder
//! declares them exactly once.
//!
//! Composite types concatenate: a sink contributes its container predicates
//! and actions followed by its faucet predicate and actions.

use homestate_types::{
    Action, Atom, Channel, FixtureKind, ItemKind, Literal, ObjectDecl, Predicate, RoomKind,
    TypedParam,
};

use crate::entity::PERSON_TYPE;
use crate::registry::{EntityType, MAX_SHELF_LEVELS, Registry, blueprint};

// ---------------------------------------------------------------------------
// Predicate names
// ---------------------------------------------------------------------------

/// `(in-hand ?person ?item)`.
pub const IN_HAND: &str = "in-hand";
/// `(hand-empty ?person)`.
pub const HAND_EMPTY: &str = "hand-empty";
/// `(shelf-has-level ?shelf ?level)`.
pub const SHELF_HAS_LEVEL: &str = "shelf-has-level";
/// `(faucet-on ?sink)`.
pub const FAUCET_ON: &str = "faucet-on";
/// `(window-open ?window)`.
pub const WINDOW_OPEN: &str = "window-open";
/// `(light-on ?light)`.
pub const LIGHT_ON: &str = "light-on";
/// `(tv-on ?tv)`.
pub const TV_ON: &str = "tv-on";
/// `(tv-playing-channel ?tv ?channel)`.
pub const TV_PLAYING_CHANNEL: &str = "tv-playing-channel";
/// `(is-ringing ?phone)`.
pub const IS_RINGING: &str = "is-ringing";
/// Type of the static shelf-level objects.
pub const LEVEL_TYPE: &str = "level";

/// `<container>-contains`.
pub fn contains_predicate(kind: FixtureKind) -> String {
    format!("{}-contains", kind.type_name())
}

/// `in-<room>`.
pub fn in_room_predicate(kind: RoomKind) -> String {
    format!("in-{}", kind.type_name())
}

/// Symbol of the static object for a shelf level.
pub fn level_symbol(level: u32) -> String {
    format!("level-{level}")
}

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

/// `(in-hand person item)`.
pub fn in_hand_atom(person: &str, item: &str) -> Atom {
    Atom::new(IN_HAND, [person, item])
}

/// `(hand-empty person)`.
pub fn hand_empty_atom(person: &str) -> Atom {
    Atom::new(HAND_EMPTY, [person])
}

/// `(<container>-contains container item [level])`.
pub fn contains_atom(kind: FixtureKind, container: &str, item: &str, level: Option<&str>) -> Atom {
    let mut args = vec![container, item];
    args.extend(level);
    Atom::new(contains_predicate(kind), args)
}

/// `(in-<room> room fixture)`.
pub fn in_room_atom(kind: RoomKind, room: &str, fixture: &str) -> Atom {
    Atom::new(in_room_predicate(kind), [room, fixture])
}

// ---------------------------------------------------------------------------
// Contributions
// ---------------------------------------------------------------------------

/// Types a registered type needs declared: its own name plus any extras.
pub fn required_types(entity: EntityType) -> Vec<&'static str> {
    let mut types = vec![entity.type_name()];
    match entity {
        EntityType::Fixture(FixtureKind::Shelf) => types.push(LEVEL_TYPE),
        EntityType::Fixture(FixtureKind::Tv) => types.push(Channel::TYPE_NAME),
        _ => {}
    }
    types
}

/// Instance-independent objects a type needs declared once.
pub fn static_objects(entity: EntityType) -> Vec<ObjectDecl> {
    match entity {
        EntityType::Fixture(FixtureKind::Shelf) => (1..=MAX_SHELF_LEVELS)
            .map(|level| ObjectDecl::new(level_symbol(level), LEVEL_TYPE))
            .collect(),
        EntityType::Fixture(FixtureKind::Tv) => Channel::ALL
            .iter()
            .map(|channel| ObjectDecl::new(channel.symbol(), Channel::TYPE_NAME))
            .collect(),
        _ => Vec::new(),
    }
}

/// The person's predicates: `in-hand` over every registered item type and
/// `hand-empty`.
pub fn person_predicates(registry: &Registry) -> Vec<Predicate> {
    vec![
        Predicate::new(
            IN_HAND,
            vec![
                TypedParam::single("?a", PERSON_TYPE),
                TypedParam::new("?b", registry.items().map(ItemKind::type_name)),
            ],
        ),
        Predicate::new(HAND_EMPTY, vec![TypedParam::single("?a", PERSON_TYPE)]),
    ]
}

/// Predicates a registered type contributes.
pub fn predicates(entity: EntityType, registry: &Registry) -> Vec<Predicate> {
    match entity {
        EntityType::Fixture(kind) => {
            let mut out = Vec::new();
            if blueprint(kind).container.is_some() {
                out.push(Predicate::new(
                    contains_predicate(kind),
                    container_params(kind, registry),
                ));
                if kind == FixtureKind::Shelf {
                    out.push(Predicate::new(
                        SHELF_HAS_LEVEL,
                        vec![
                            TypedParam::single("?a", kind.type_name()),
                            TypedParam::single("?b", LEVEL_TYPE),
                        ],
                    ));
                }
            }
            out.extend(interaction_predicates(kind));
            out
        }
        EntityType::Item(ItemKind::Phone) => vec![Predicate::new(
            IS_RINGING,
            vec![TypedParam::single("?a", ItemKind::Phone.type_name())],
        )],
        EntityType::Item(_) => Vec::new(),
        EntityType::Room(kind) => vec![Predicate::new(
            in_room_predicate(kind),
            vec![
                TypedParam::single("?a", kind.type_name()),
                TypedParam::new(
                    "?b",
                    registry
                        .room_fixtures(kind)
                        .into_iter()
                        .map(FixtureKind::type_name),
                ),
            ],
        )],
    }
}

/// Actions a registered type contributes.
pub fn actions(entity: EntityType, registry: &Registry) -> Vec<Action> {
    match entity {
        EntityType::Fixture(kind) => {
            let mut out = Vec::new();
            if blueprint(kind).container.is_some() {
                out.extend(container_actions(kind, registry));
            }
            out.extend(interaction_actions(kind));
            out
        }
        EntityType::Item(ItemKind::Phone) => {
            let ringing = Atom::new(IS_RINGING, ["?a"]);
            vec![Action::new(
                "answer-phone",
                vec![TypedParam::single("?a", ItemKind::Phone.type_name())],
                vec![Literal::Pos(ringing.clone())],
                vec![Literal::Neg(ringing)],
            )]
        }
        EntityType::Item(_) | EntityType::Room(_) => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Container contributions
// ---------------------------------------------------------------------------

/// `?a - container ?b - holdables [?c - level]`.
fn container_params(kind: FixtureKind, registry: &Registry) -> Vec<TypedParam> {
    let mut params = vec![
        TypedParam::single("?a", kind.type_name()),
        TypedParam::new(
            "?b",
            registry
                .holdable_items(kind)
                .into_iter()
                .map(ItemKind::type_name),
        ),
    ];
    if kind == FixtureKind::Shelf {
        params.push(TypedParam::single("?c", LEVEL_TYPE));
    }
    params
}

fn container_actions(kind: FixtureKind, registry: &Registry) -> Vec<Action> {
    let levelled = kind == FixtureKind::Shelf;
    let person = if levelled { "?d" } else { "?c" };
    let mut params = container_params(kind, registry);
    params.push(TypedParam::single(person, PERSON_TYPE));

    let mut contains_args = vec!["?a", "?b"];
    if levelled {
        contains_args.push("?c");
    }
    let contains = Atom::new(contains_predicate(kind), contains_args);
    let in_hand = Atom::new(IN_HAND, [person, "?b"]);
    let hand_empty = Atom::new(HAND_EMPTY, [person]);

    let mut place_pre = vec![Literal::Pos(in_hand.clone())];
    if levelled {
        place_pre.push(Literal::Pos(Atom::new(SHELF_HAS_LEVEL, ["?a", "?c"])));
    }
    let place = Action::new(
        format!("place-among-{}", kind.type_name()),
        params.clone(),
        place_pre,
        vec![
            Literal::Neg(in_hand.clone()),
            Literal::Pos(hand_empty.clone()),
            Literal::Pos(contains.clone()),
        ],
    );
    let remove = Action::new(
        format!("remove-from-{}", kind.type_name()),
        params,
        vec![Literal::Pos(contains.clone()), Literal::Pos(hand_empty.clone())],
        vec![
            Literal::Neg(contains),
            Literal::Neg(hand_empty),
            Literal::Pos(in_hand),
        ],
    );
    vec![place, remove]
}

// ---------------------------------------------------------------------------
// Interaction contributions
// ---------------------------------------------------------------------------

fn interaction_predicates(kind: FixtureKind) -> Vec<Predicate> {
    let own = || TypedParam::single("?a", kind.type_name());
    match kind {
        FixtureKind::Sink => vec![Predicate::new(FAUCET_ON, vec![own()])],
        FixtureKind::Window => vec![Predicate::new(WINDOW_OPEN, vec![own()])],
        FixtureKind::Light => vec![Predicate::new(LIGHT_ON, vec![own()])],
        FixtureKind::Tv => vec![
            Predicate::new(TV_ON, vec![own()]),
            Predicate::new(
                TV_PLAYING_CHANNEL,
                vec![own(), TypedParam::single("?b", Channel::TYPE_NAME)],
            ),
        ],
        FixtureKind::Table | FixtureKind::Shelf | FixtureKind::Fridge => Vec::new(),
    }
}

/// A pair of actions setting and clearing a unary predicate.
fn switch_pair(kind: FixtureKind, predicate: &str, on: &str, off: &str) -> Vec<Action> {
    let atom = Atom::new(predicate, ["?a"]);
    let params = vec![TypedParam::single("?a", kind.type_name())];
    vec![
        Action::new(
            on,
            params.clone(),
            vec![Literal::Neg(atom.clone())],
            vec![Literal::Pos(atom.clone())],
        ),
        Action::new(
            off,
            params,
            vec![Literal::Pos(atom.clone())],
            vec![Literal::Neg(atom)],
        ),
    ]
}

fn interaction_actions(kind: FixtureKind) -> Vec<Action> {
    match kind {
        FixtureKind::Sink => switch_pair(kind, FAUCET_ON, "turn-on-faucet", "turn-off-faucet"),
        FixtureKind::Window => switch_pair(kind, WINDOW_OPEN, "open-window", "close-window"),
        FixtureKind::Light => switch_pair(kind, LIGHT_ON, "turn-on-light", "turn-off-light"),
        FixtureKind::Tv => tv_actions(),
        FixtureKind::Table | FixtureKind::Shelf | FixtureKind::Fridge => Vec::new(),
    }
}

fn tv_actions() -> Vec<Action> {
    let tv = || TypedParam::single("?a", FixtureKind::Tv.type_name());
    let channel = |var: &str| TypedParam::single(var, Channel::TYPE_NAME);
    let on = Atom::new(TV_ON, ["?a"]);
    let playing = Atom::new(TV_PLAYING_CHANNEL, ["?a", "?b"]);
    let switched = Atom::new(TV_PLAYING_CHANNEL, ["?a", "?c"]);
    vec![
        Action::new(
            "turn-tv-on",
            vec![tv(), channel("?b")],
            vec![Literal::Neg(on.clone())],
            vec![Literal::Pos(on.clone()), Literal::Pos(playing.clone())],
        ),
        Action::new(
            "turn-tv-off",
            vec![tv(), channel("?b")],
            vec![Literal::Pos(on.clone()), Literal::Pos(playing.clone())],
            vec![Literal::Neg(on), Literal::Neg(playing.clone())],
        ),
        Action::new(
            "switch-tv-channel",
            vec![tv(), channel("?b"), channel("?c")],
            vec![Literal::Pos(playing.clone())],
            vec![Literal::Pos(switched), Literal::Neg(playing)],
        ),
    ]
}
