//! Domain assembly: the type-level schema of every registered entity type.
//!
//! The domain is built once per run from the [`Registry`]. It never depends
//! on the household's instances.

use core::fmt;
use std::collections::BTreeSet;

use homestate_types::{Action, Predicate};
use homestate_world::registry::Registry;
use homestate_world::{PERSON_TYPE, schema};

/// Requirement flags declared by every domain.
pub const REQUIREMENTS: &[&str] = &[":typing", ":negative-preconditions"];

/// A planning domain: types, predicates and actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domain {
    /// Domain name.
    pub name: String,
    /// Declared types, deduplicated, person first.
    pub types: Vec<String>,
    /// Declared predicates, person predicates first.
    pub predicates: Vec<Predicate>,
    /// Declared actions.
    pub actions: Vec<Action>,
}

impl Domain {
    /// Assemble the domain contributed by every type in `registry`.
    ///
    /// Contributions are concatenated in registry order: the person, then
    /// fixtures, items and rooms.
    pub fn from_registry(name: impl Into<String>, registry: &Registry) -> Self {
        let mut types = vec![String::from(PERSON_TYPE)];
        let mut seen: BTreeSet<&str> = BTreeSet::from([PERSON_TYPE]);
        let mut predicates = schema::person_predicates(registry);
        let mut actions = Vec::new();

        for entity in registry.all_types() {
            for type_name in schema::required_types(entity) {
                if seen.insert(type_name) {
                    types.push(String::from(type_name));
                }
            }
            predicates.extend(schema::predicates(entity, registry));
            actions.extend(schema::actions(entity, registry));
        }

        Self {
            name: name.into(),
            types,
            predicates,
            actions,
        }
    }

    /// Names of every declared predicate, in declaration order.
    pub fn predicate_names(&self) -> Vec<String> {
        self.predicates.iter().map(|p| p.name.clone()).collect()
    }

    /// Look up a predicate by name.
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    /// Whether `type_name` is declared.
    pub fn declares_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "(define (domain {})", self.name)?;
        writeln!(f, "\t(:requirements {})", REQUIREMENTS.join(" "))?;
        writeln!(f, "\t(:types")?;
        for type_name in &self.types {
            writeln!(f, "\t\t{type_name}")?;
        }
        writeln!(f, "\t)")?;
        writeln!(f, "\t(:predicates")?;
        for predicate in &self.predicates {
            writeln!(f, "\t\t{predicate}")?;
        }
        writeln!(f, "\t)")?;
        for action in &self.actions {
            writeln!(f)?;
            write!(f, "{action}")?;
        }
        writeln!(f, ")")
    }
}
