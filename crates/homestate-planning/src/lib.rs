//! Planning-format encoder for homestate households.
//!
//! Serialises the type-level schema of every registered entity type into a
//! domain, and the household's current state into a problem, using the
//! typed predicate/action grammar.
//!
//! # Modules
//!
//! - [`domain`] -- Domain assembly and rendering
//! - [`problem`] -- Problem assembly and rendering
//! - [`validate`] -- Structural checks for domains and problems
//! - [`encoder`] -- [`PlanningEncoder`], the entry point used per timestep
//! - [`error`] -- Error types

pub mod domain;
pub mod encoder;
pub mod error;
pub mod problem;
pub mod validate;

pub use domain::Domain;
pub use encoder::PlanningEncoder;
pub use error::PlanningError;
pub use problem::Problem;
