//! The planning-format encoder used by the timeline driver.
//!
//! The domain is assembled and validated once when the encoder is built;
//! problems are rebuilt from the household on every call.

use homestate_types::Goal;
use homestate_world::Household;
use homestate_world::registry::Registry;
use tracing::debug;

use crate::domain::Domain;
use crate::error::PlanningError;
use crate::problem::Problem;
use crate::validate::{validate_domain, validate_problem};

/// Encodes a household into domain and problem text.
#[derive(Debug, Clone)]
pub struct PlanningEncoder {
    registry: Registry,
    domain: Domain,
    domain_text: String,
    problem_name: String,
}

impl PlanningEncoder {
    /// Build the encoder, assembling and validating the domain.
    pub fn new(
        registry: Registry,
        domain_name: &str,
        problem_name: &str,
    ) -> Result<Self, PlanningError> {
        let domain = Domain::from_registry(domain_name, &registry);
        validate_domain(&domain)?;
        let domain_text = domain.to_string();
        debug!(
            types = domain.types.len(),
            predicates = domain.predicates.len(),
            actions = domain.actions.len(),
            "domain assembled"
        );
        Ok(Self {
            registry,
            domain,
            domain_text,
            problem_name: String::from(problem_name),
        })
    }

    /// The assembled domain.
    pub const fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The rendered domain text. Identical for the whole run.
    pub fn domain_text(&self) -> &str {
        &self.domain_text
    }

    /// The registry the domain was built from.
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Names of every declared predicate.
    pub fn predicate_names(&self) -> Vec<String> {
        self.domain.predicate_names()
    }

    /// Build and validate the problem for the current state.
    pub fn problem(&self, household: &Household) -> Result<Problem, PlanningError> {
        let problem = Problem::from_household(
            self.problem_name.as_str(),
            self.domain.name.as_str(),
            household,
            &self.registry,
        )?;
        validate_problem(&self.domain, &problem)?;
        Ok(problem)
    }

    /// Render the problem for the current state.
    pub fn problem_text(&self, household: &Household) -> Result<String, PlanningError> {
        Ok(self.problem(household)?.to_string())
    }

    /// Attach `goal` to a previously built problem and render it.
    ///
    /// Goal generators advance the household to the goal state, so callers
    /// build `problem` before asking for the goal.
    pub fn goal_problem_text(&self, problem: Problem, goal: Goal) -> Result<String, PlanningError> {
        let problem = problem.with_goal(goal);
        validate_problem(&self.domain, &problem)?;
        Ok(problem.to_string())
    }
}
