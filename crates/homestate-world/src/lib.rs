//! Household world model for the homestate dataset generator.
//!
//! This crate owns the capability registry and the mutable household: rooms
//! with their fixtures, movable items, and the single person. It answers
//! every per-entity question the generator and encoder ask.
//!
//! # Modules
//!
//! - [`registry`] -- Static capability table and blueprints
//! - [`entity`] -- Room, fixture, item and person records
//! - [`toggle`] -- Interactable state, its narration and questions
//! - [`household`] -- Entity arenas, ownership transfer, invariant checks
//! - [`placement`] -- Drawing items into containers and describing contents
//! - [`behavior`] -- `act` for rooms, fixtures and items
//! - [`query`] -- Question/answer generators
//! - [`goal`] -- Goal request generators
//! - [`schema`] -- Type-level predicates, actions and static objects
//! - [`state`] -- Instance-level objects and initial conditions
//! - [`narration`] -- English text helpers
//! - [`error`] -- Error types

pub mod behavior;
pub mod entity;
pub mod error;
pub mod goal;
pub mod household;
pub mod narration;
pub mod placement;
pub mod query;
pub mod registry;
pub mod schema;
pub mod state;
pub mod toggle;

pub use entity::{
    Compartments, Fixture, FixtureState, Holder, Item, ItemDraft, PERSON_SYMBOL, PERSON_TYPE,
    Person, Placement, Room, RoomDraft,
};
pub use error::WorldError;
pub use household::Household;
pub use registry::{EntityType, FixtureBlueprint, Registry, RoomLimit};
pub use toggle::Toggle;
