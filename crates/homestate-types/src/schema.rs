//! Planning-format schema values.
//!
//! These are pure descriptors: entity *types* produce [`Predicate`]s and
//! [`Action`]s, entity *instances* produce ground [`Atom`]s for the initial
//! state. The `Display` impls render the typed predicate/action grammar
//! directly, so the encoder only has to assemble and join blocks.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A typed parameter such as `?a - fridge` or `?b - (either food pen)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypedParam {
    /// Variable name including the leading `?`.
    pub var: String,
    /// Admissible types. More than one renders as an `either` union.
    pub types: Vec<String>,
}

impl TypedParam {
    /// Build a parameter admitting any of `types`.
    pub fn new<S: Into<String>>(var: impl Into<String>, types: impl IntoIterator<Item = S>) -> Self {
        Self {
            var: var.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a parameter admitting a single type.
    pub fn single(var: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            types: vec![type_name.into()],
        }
    }

    /// Whether `type_name` is admitted by this parameter.
    pub fn admits(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}

impl fmt::Display for TypedParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.types.as_slice() {
            [only] => write!(f, "{} - {only}", self.var),
            many => write!(f, "{} - (either {})", self.var, many.join(" ")),
        }
    }
}

/// A predicate applied to arguments: `(fridge-contains kitchen-fridge apple)`.
///
/// Arguments are either variables (`?a`) inside action bodies or object
/// symbols inside problem files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Atom {
    /// Predicate name.
    pub predicate: String,
    /// Ordered arguments.
    pub args: Vec<String>,
}

impl Atom {
    /// Build an atom from a predicate name and its arguments.
    pub fn new<S: Into<String>>(predicate: impl Into<String>, args: impl IntoIterator<Item = S>) -> Self {
        Self {
            predicate: predicate.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any argument equals `symbol`.
    pub fn mentions(&self, symbol: &str) -> bool {
        self.args.iter().any(|a| a == symbol)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "({})", self.predicate)
        } else {
            write!(f, "({} {})", self.predicate, self.args.join(" "))
        }
    }
}

/// A possibly negated atom, used in preconditions, effects and goals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Literal {
    /// The atom must hold (or becomes true).
    Pos(Atom),
    /// The atom must not hold (or becomes false).
    Neg(Atom),
}

impl Literal {
    /// The underlying atom regardless of polarity.
    pub const fn atom(&self) -> &Atom {
        match self {
            Self::Pos(atom) | Self::Neg(atom) => atom,
        }
    }

    /// Whether this literal is negated.
    pub const fn is_negated(&self) -> bool {
        matches!(self, Self::Neg(_))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pos(atom) => write!(f, "{atom}"),
            Self::Neg(atom) => write!(f, "(not {atom})"),
        }
    }
}

/// A predicate signature declared in the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    /// Predicate name.
    pub name: String,
    /// Typed parameter list.
    pub params: Vec<TypedParam>,
}

impl Predicate {
    /// Build a predicate signature.
    pub fn new(name: impl Into<String>, params: Vec<TypedParam>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.name)?;
        for param in &self.params {
            write!(f, " {param}")?;
        }
        write!(f, ")")
    }
}

/// An action schema declared in the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Action name.
    pub name: String,
    /// Typed parameter list.
    pub params: Vec<TypedParam>,
    /// Conjunctive precondition.
    pub preconditions: Vec<Literal>,
    /// Conjunctive effect.
    pub effects: Vec<Literal>,
}

impl Action {
    /// Build an action schema.
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypedParam>,
        preconditions: Vec<Literal>,
        effects: Vec<Literal>,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            preconditions,
            effects,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        writeln!(f, "\t(:action {}", self.name)?;
        writeln!(f, "\t\t:parameters ({})", params.join(" "))?;
        writeln!(f, "\t\t:precondition (and")?;
        for literal in &self.preconditions {
            writeln!(f, "\t\t\t{literal}")?;
        }
        writeln!(f, "\t\t)")?;
        writeln!(f, "\t\t:effect (and")?;
        for literal in &self.effects {
            writeln!(f, "\t\t\t{literal}")?;
        }
        writeln!(f, "\t\t)")?;
        writeln!(f, "\t)")
    }
}

/// An object declaration in the problem: `kitchen-fridge - fridge`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectDecl {
    /// Object symbol.
    pub symbol: String,
    /// Declared type name.
    pub type_name: String,
}

impl ObjectDecl {
    /// Build an object declaration.
    pub fn new(symbol: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for ObjectDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.symbol, self.type_name)
    }
}

/// A natural-language request paired with its goal conjunction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// The request as it would be spoken to an assistant.
    pub description: String,
    /// Literals that must all hold once the request is fulfilled.
    pub literals: Vec<Literal>,
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t(:goal")?;
        writeln!(f, "\t\t(and")?;
        for literal in &self.literals {
            writeln!(f, "\t\t\t{literal}")?;
        }
        writeln!(f, "\t\t)")?;
        writeln!(f, "\t)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_type_param_renders_plain() {
        let param = TypedParam::single("?a", "fridge");
        assert_eq!(param.to_string(), "?a - fridge");
    }

    #[test]
    fn union_param_renders_either() {
        let param = TypedParam::new("?b", ["food", "pen"]);
        assert_eq!(param.to_string(), "?b - (either food pen)");
        assert!(param.admits("pen"));
        assert!(!param.admits("book"));
    }

    #[test]
    fn negated_literal_wraps_atom() {
        let atom = Atom::new("light-on", ["kitchen-overhead-light"]);
        assert_eq!(Literal::Pos(atom.clone()).to_string(), "(light-on kitchen-overhead-light)");
        assert_eq!(Literal::Neg(atom).to_string(), "(not (light-on kitchen-overhead-light))");
    }

    #[test]
    fn predicate_signature() {
        let predicate = Predicate::new(
            "tv-playing-channel",
            vec![TypedParam::single("?a", "tv"), TypedParam::single("?b", "channel")],
        );
        assert_eq!(predicate.to_string(), "(tv-playing-channel ?a - tv ?b - channel)");
    }

    #[test]
    fn action_block_layout() {
        let a = Atom::new("window-open", ["?a"]);
        let action = Action::new(
            "open-window",
            vec![TypedParam::single("?a", "window")],
            vec![Literal::Neg(a.clone())],
            vec![Literal::Pos(a)],
        );
        let expected = "\t(:action open-window\n\
                        \t\t:parameters (?a - window)\n\
                        \t\t:precondition (and\n\
                        \t\t\t(not (window-open ?a))\n\
                        \t\t)\n\
                        \t\t:effect (and\n\
                        \t\t\t(window-open ?a)\n\
                        \t\t)\n\
                        \t)\n";
        assert_eq!(action.to_string(), expected);
    }

    #[test]
    fn goal_block_layout() {
        let goal = Goal {
            description: String::from("Hand me the red pen."),
            literals: vec![Literal::Pos(Atom::new("in-hand", ["me", "red-pen"]))],
        };
        assert_eq!(
            goal.to_string(),
            "\t(:goal\n\t\t(and\n\t\t\t(in-hand me red-pen)\n\t\t)\n\t)\n"
        );
    }

    #[test]
    fn atom_mentions_symbol() {
        let atom = Atom::new("fridge-contains", ["kitchen-fridge", "apple"]);
        assert!(atom.mentions("apple"));
        assert!(!atom.mentions("banana"));
    }
}
