//! Shared type definitions for the homestate household dataset generator.
//!
//! This crate is the single source of truth for values that cross crate
//! boundaries: entity kinds, arena identifiers, planning-format schema
//! descriptors and the records a timeline run emits.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe arena index wrappers for rooms, fixtures and items
//! - [`enums`] -- Entity kinds, registry categories and TV channels
//! - [`schema`] -- Planning-format predicates, actions, atoms and goals
//! - [`outcome`] -- The performed / not-applicable result of acting
//! - [`records`] -- Initial bundle and timeline records

pub mod enums;
pub mod ids;
pub mod outcome;
pub mod records;
pub mod schema;

// Re-export all public types at crate root for convenience.
pub use enums::{Category, Channel, FixtureKind, ItemKind, RoomKind};
pub use ids::{FixtureId, ItemId, RoomId};
pub use outcome::ActionOutcome;
pub use records::{InitialBundle, QueryAnswer, TimelineRecord, TimelineStep};
pub use schema::{Action, Atom, Goal, Literal, ObjectDecl, Predicate, TypedParam};
