//! Structural validation of encoded domains and problems.
//!
//! - [`validate_domain`] checks that every parameter type is declared and
//!   every action literal names a declared predicate with matching arity,
//!   bound variables and compatible types
//! - [`validate_problem`] checks that every object type is declared, object
//!   symbols are unique, and every init or goal atom references declared
//!   objects whose types the predicate admits

use std::collections::{BTreeMap, BTreeSet};

use homestate_types::{Action, Atom, TypedParam};

use crate::domain::Domain;
use crate::error::PlanningError;
use crate::problem::Problem;

/// Validate a domain's internal consistency.
pub fn validate_domain(domain: &Domain) -> Result<(), PlanningError> {
    let mut names = BTreeSet::new();
    for predicate in &domain.predicates {
        if !names.insert(predicate.name.as_str()) {
            return Err(PlanningError::DuplicatePredicate(predicate.name.clone()));
        }
        check_params(domain, &predicate.name, &predicate.params)?;
    }
    for action in &domain.actions {
        check_params(domain, &action.name, &action.params)?;
        validate_action(domain, action)?;
    }
    Ok(())
}

/// Validate a problem against its domain.
pub fn validate_problem(domain: &Domain, problem: &Problem) -> Result<(), PlanningError> {
    let mut types: BTreeMap<&str, &str> = BTreeMap::new();
    for object in &problem.objects {
        if !domain.declares_type(&object.type_name) {
            return Err(PlanningError::UndeclaredType {
                context: format!("object {}", object.symbol),
                type_name: object.type_name.clone(),
            });
        }
        if types
            .insert(object.symbol.as_str(), object.type_name.as_str())
            .is_some()
        {
            return Err(PlanningError::DuplicateObject(object.symbol.clone()));
        }
    }

    let goal_atoms = problem
        .goal
        .iter()
        .flat_map(|goal| goal.literals.iter().map(|l| (":goal", l.atom())));
    let atoms = problem.init.iter().map(|a| (":init", a)).chain(goal_atoms);
    for (context, atom) in atoms {
        check_atom(domain, context, atom, |symbol| types.get(symbol).copied())?;
    }
    Ok(())
}

fn check_params(domain: &Domain, context: &str, params: &[TypedParam]) -> Result<(), PlanningError> {
    for param in params {
        if param.types.is_empty() {
            return Err(PlanningError::EmptyParameterType {
                context: String::from(context),
                var: param.var.clone(),
            });
        }
        if let Some(missing) = param.types.iter().find(|t| !domain.declares_type(t)) {
            return Err(PlanningError::UndeclaredType {
                context: String::from(context),
                type_name: missing.clone(),
            });
        }
    }
    Ok(())
}

fn validate_action(domain: &Domain, action: &Action) -> Result<(), PlanningError> {
    let params: BTreeMap<&str, &TypedParam> =
        action.params.iter().map(|p| (p.var.as_str(), p)).collect();
    for literal in action.preconditions.iter().chain(&action.effects) {
        let atom = literal.atom();
        let predicate = lookup(domain, &action.name, atom)?;
        for (arg, slot) in atom.args.iter().zip(&predicate.params) {
            let param = params
                .get(arg.as_str())
                .ok_or_else(|| PlanningError::UnboundVariable {
                    action: action.name.clone(),
                    var: arg.clone(),
                })?;
            if let Some(found) = param.types.iter().find(|t| !slot.admits(t)) {
                return Err(PlanningError::TypeMismatch {
                    context: action.name.clone(),
                    predicate: predicate.name.clone(),
                    argument: arg.clone(),
                    found: found.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_atom<'a>(
    domain: &Domain,
    context: &str,
    atom: &Atom,
    type_of: impl Fn(&str) -> Option<&'a str>,
) -> Result<(), PlanningError> {
    let predicate = lookup(domain, context, atom)?;
    for (arg, slot) in atom.args.iter().zip(&predicate.params) {
        let found = type_of(arg).ok_or_else(|| PlanningError::UndeclaredObject {
            context: format!("{context} {atom}"),
            symbol: arg.clone(),
        })?;
        if !slot.admits(found) {
            return Err(PlanningError::TypeMismatch {
                context: format!("{context} {atom}"),
                predicate: predicate.name.clone(),
                argument: arg.clone(),
                found: String::from(found),
            });
        }
    }
    Ok(())
}

fn lookup<'d>(
    domain: &'d Domain,
    context: &str,
    atom: &Atom,
) -> Result<&'d homestate_types::Predicate, PlanningError> {
    let predicate = domain
        .predicate(&atom.predicate)
        .ok_or_else(|| PlanningError::UnknownPredicate {
            context: String::from(context),
            predicate: atom.predicate.clone(),
        })?;
    if predicate.params.len() != atom.args.len() {
        return Err(PlanningError::ArityMismatch {
            context: String::from(context),
            predicate: predicate.name.clone(),
            expected: predicate.params.len(),
            found: atom.args.len(),
        });
    }
    Ok(predicate)
}
