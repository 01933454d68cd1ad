//! Error types for the `homestate-planning` crate.
//!
//! Structural validation failures indicate a defect in a type's schema
//! contribution or in instance encoding, not a runtime condition. They are
//! surfaced as [`PlanningError`] so tests can assert on them.

use homestate_world::WorldError;

/// Errors raised while encoding or validating planning-format output.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    /// The household could not be read.
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// A parameter or object uses a type the domain does not declare.
    #[error("{context}: undeclared type `{type_name}`")]
    UndeclaredType {
        /// Where the type was referenced.
        context: String,
        /// The undeclared type.
        type_name: String,
    },

    /// A parameter admits no types at all.
    #[error("{context}: parameter {var} admits no types")]
    EmptyParameterType {
        /// Predicate or action name.
        context: String,
        /// The variable.
        var: String,
    },

    /// Two predicates share a name.
    #[error("duplicate predicate `{0}`")]
    DuplicatePredicate(String),

    /// A literal or atom names a predicate the domain does not declare.
    #[error("{context}: unknown predicate `{predicate}`")]
    UnknownPredicate {
        /// Where the predicate was referenced.
        context: String,
        /// The unknown predicate.
        predicate: String,
    },

    /// A literal or atom has the wrong number of arguments.
    #[error("{context}: `{predicate}` takes {expected} arguments, found {found}")]
    ArityMismatch {
        /// Where the atom appeared.
        context: String,
        /// The predicate.
        predicate: String,
        /// Declared arity.
        expected: usize,
        /// Arity used.
        found: usize,
    },

    /// An action literal uses a variable that is not an action parameter.
    #[error("action `{action}`: unbound variable {var}")]
    UnboundVariable {
        /// The action.
        action: String,
        /// The variable.
        var: String,
    },

    /// An argument's type is not admitted by the predicate parameter.
    #[error("{context}: `{argument}` of type `{found}` is not admitted by `{predicate}`")]
    TypeMismatch {
        /// Where the atom appeared.
        context: String,
        /// The predicate.
        predicate: String,
        /// The variable or object symbol.
        argument: String,
        /// The argument's type.
        found: String,
    },

    /// Two objects share a symbol.
    #[error("duplicate object `{0}`")]
    DuplicateObject(String),

    /// An atom references an object the problem does not declare.
    #[error("{context}: undeclared object `{symbol}`")]
    UndeclaredObject {
        /// Where the object was referenced.
        context: String,
        /// The undeclared symbol.
        symbol: String,
    },
}
