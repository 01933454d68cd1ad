//! Timeline records produced by a dataset run.
//!
//! A run starts with one [`InitialBundle`] and continues with an ordered
//! sequence of [`TimelineRecord`]s. The directory layout used on disk is
//! derived from [`TimelineRecord::directory_name`].

use serde::{Deserialize, Serialize};

/// Everything written once at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialBundle {
    /// Narrated description of the generated household.
    pub narration: String,
    /// Planning-format domain text.
    pub domain: String,
    /// Planning-format problem text for the initial state.
    pub problem: String,
    /// Names of all declared predicates, in domain order.
    pub predicate_names: Vec<String>,
}

/// A question about the current state with its true answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// The question text.
    pub question: String,
    /// The answer text.
    pub answer: String,
}

/// One step of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineStep {
    /// The world changed.
    StateChange {
        /// First-person narration of the change.
        narration: String,
        /// Problem text for the state after the change.
        problem: String,
    },
    /// A question about the current state.
    Query(QueryAnswer),
    /// A request to bring the world into a goal state.
    Goal {
        /// The request text.
        description: String,
        /// Problem text whose `:init` is the state before the request.
        problem: String,
    },
}

impl TimelineStep {
    /// Suffix used in on-disk directory names.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StateChange { .. } => "state_change",
            Self::Query(_) => "query",
            Self::Goal { .. } => "goal",
        }
    }
}

/// A timeline step with its sequential index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRecord {
    /// Zero-based position in the timeline.
    pub index: u32,
    /// The step itself.
    pub step: TimelineStep,
}

impl TimelineRecord {
    /// Directory name for this record, e.g. `time_0007_query`.
    pub fn directory_name(&self) -> String {
        format!("time_{:04}_{}", self.index, self.step.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_name_is_zero_padded() {
        let record = TimelineRecord {
            index: 7,
            step: TimelineStep::Query(QueryAnswer {
                question: String::from("Where is the fork?"),
                answer: String::from("You are holding the fork."),
            }),
        };
        assert_eq!(record.directory_name(), "time_0007_query");
    }

    #[test]
    fn directory_names_sort_in_timeline_order() {
        let change = |index| TimelineRecord {
            index,
            step: TimelineStep::StateChange {
                narration: String::new(),
                problem: String::new(),
            },
        };
        let mut names = vec![change(10).directory_name(), change(9).directory_name()];
        names.sort();
        assert_eq!(names, vec!["time_0009_state_change", "time_0010_state_change"]);
    }
}
