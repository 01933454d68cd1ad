//! Directory persistence for dataset runs.
//!
//! Layout of one dataset directory:
//!
//! ```text
//! initial_state.txt          narration of the generated household
//! domain.pddl                domain text
//! problem.pddl               problem for the initial state
//! predicate_names.txt        one predicate name per line
//! time_0000_state_change/    state_change.txt, problem.pddl
//! time_0004_query/           query.txt, answer.txt
//! time_0005_goal/            goal.txt, problem.pddl
//! manifest.json              run summary
//! ```

use std::path::{Path, PathBuf};

use homestate_types::{InitialBundle, TimelineRecord, TimelineStep};
use tracing::{debug, info};

use crate::timeline::{RunSummary, SinkError, TimelineSink};

/// Narration of the initial household.
pub const INITIAL_STATE_FILE: &str = "initial_state.txt";
/// Domain text.
pub const DOMAIN_FILE: &str = "domain.pddl";
/// Problem text, at the root and in state-change and goal directories.
pub const PROBLEM_FILE: &str = "problem.pddl";
/// Declared predicate names.
pub const PREDICATE_NAMES_FILE: &str = "predicate_names.txt";
/// Narration of one state change.
pub const STATE_CHANGE_FILE: &str = "state_change.txt";
/// Question of a query record.
pub const QUERY_FILE: &str = "query.txt";
/// Answer of a query record.
pub const ANSWER_FILE: &str = "answer.txt";
/// Request of a goal record.
pub const GOAL_FILE: &str = "goal.txt";
/// Run summary.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Sink writing one dataset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySink {
    root: PathBuf,
    written: u32,
}

impl DirectorySink {
    /// Create (or reuse an empty) dataset directory at `root`.
    pub fn create(root: &Path) -> Result<Self, SinkError> {
        std::fs::create_dir_all(root).map_err(|source| io_error(root, source))?;
        let mut entries = std::fs::read_dir(root).map_err(|source| io_error(root, source))?;
        if entries.next().is_some() {
            return Err(SinkError::NotEmpty {
                path: root.to_path_buf(),
            });
        }
        debug!(root = %root.display(), "dataset directory created");
        Ok(Self {
            root: root.to_path_buf(),
            written: 0,
        })
    }

    /// The dataset directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TimelineSink for DirectorySink {
    fn begin(&mut self, bundle: &InitialBundle) -> Result<(), SinkError> {
        write(&self.root, INITIAL_STATE_FILE, &bundle.narration)?;
        write(&self.root, DOMAIN_FILE, &bundle.domain)?;
        write(&self.root, PROBLEM_FILE, &bundle.problem)?;
        let mut names = bundle.predicate_names.join("\n");
        names.push('\n');
        write(&self.root, PREDICATE_NAMES_FILE, &names)
    }

    fn record(&mut self, record: &TimelineRecord) -> Result<(), SinkError> {
        let dir = self.root.join(record.directory_name());
        std::fs::create_dir(&dir).map_err(|source| io_error(&dir, source))?;
        match &record.step {
            TimelineStep::StateChange { narration, problem } => {
                write(&dir, STATE_CHANGE_FILE, narration)?;
                write(&dir, PROBLEM_FILE, problem)?;
            }
            TimelineStep::Query(answer) => {
                write(&dir, QUERY_FILE, &answer.question)?;
                write(&dir, ANSWER_FILE, &answer.answer)?;
            }
            TimelineStep::Goal {
                description,
                problem,
            } => {
                write(&dir, GOAL_FILE, description)?;
                write(&dir, PROBLEM_FILE, problem)?;
            }
        }
        self.written = self.written.saturating_add(1);
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), SinkError> {
        let manifest = serde_json::to_string_pretty(summary)?;
        write(&self.root, MANIFEST_FILE, &manifest)?;
        info!(
            root = %self.root.display(),
            records = self.written,
            "dataset written"
        );
        Ok(())
    }
}

fn write(dir: &Path, name: &str, contents: &str) -> Result<(), SinkError> {
    let path = dir.join(name);
    std::fs::write(&path, contents).map_err(|source| io_error(&path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> SinkError {
    SinkError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use homestate_types::QueryAnswer;

    use super::*;

    fn bundle() -> InitialBundle {
        InitialBundle {
            narration: String::from("The kitchen has a fridge."),
            domain: String::from("(define (domain simulation)\n)\n"),
            problem: String::from("(define (problem simulation-a)\n)\n"),
            predicate_names: vec![String::from("in-hand"), String::from("hand-empty")],
        }
    }

    #[test]
    fn writes_initial_files_and_record_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("dataset_0");
        let mut sink = DirectorySink::create(&root).unwrap();
        sink.begin(&bundle()).unwrap();
        sink.record(&TimelineRecord {
            index: 3,
            step: TimelineStep::Query(QueryAnswer {
                question: String::from("Where is the apple?"),
                answer: String::from("You are holding the apple."),
            }),
        })
        .unwrap();

        let names = std::fs::read_to_string(root.join(PREDICATE_NAMES_FILE)).unwrap();
        assert_eq!(names, "in-hand\nhand-empty\n");
        let answer = std::fs::read_to_string(root.join("time_0003_query").join(ANSWER_FILE)).unwrap();
        assert_eq!(answer, "You are holding the apple.");
        assert!(root.join(DOMAIN_FILE).is_file());
    }

    #[test]
    fn refuses_non_empty_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("stale.txt"), "old").unwrap();
        assert!(matches!(
            DirectorySink::create(tmp.path()),
            Err(SinkError::NotEmpty { .. })
        ));
    }
}
