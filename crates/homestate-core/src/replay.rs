//! Reading a written dataset directory back into records.

use std::path::{Path, PathBuf};

use homestate_types::{InitialBundle, QueryAnswer, TimelineRecord, TimelineStep};

use crate::persist::{
    ANSWER_FILE, DOMAIN_FILE, GOAL_FILE, INITIAL_STATE_FILE, MANIFEST_FILE, PREDICATE_NAMES_FILE,
    PROBLEM_FILE, QUERY_FILE, STATE_CHANGE_FILE,
};
use crate::timeline::RunSummary;

/// Prefix of every record directory.
const RECORD_PREFIX: &str = "time_";

/// Errors raised while reading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Reading a file or directory failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A record directory name does not follow `time_NNNN_label`.
    #[error("malformed record directory name {name:?}")]
    MalformedName {
        /// The offending name.
        name: String,
    },

    /// The manifest is not valid JSON.
    #[error("malformed manifest: {source}")]
    Manifest {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// A dataset read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// The initial bundle.
    pub bundle: InitialBundle,
    /// Records ordered by index.
    pub records: Vec<TimelineRecord>,
    /// The run summary, if the run finished.
    pub manifest: Option<RunSummary>,
}

impl Dataset {
    /// Read the dataset directory at `root`.
    pub fn open(root: &Path) -> Result<Self, ReplayError> {
        let bundle = InitialBundle {
            narration: read(root, INITIAL_STATE_FILE)?,
            domain: read(root, DOMAIN_FILE)?,
            problem: read(root, PROBLEM_FILE)?,
            predicate_names: read(root, PREDICATE_NAMES_FILE)?
                .lines()
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
        };

        let mut records = Vec::new();
        let entries = std::fs::read_dir(root).map_err(|source| io_error(root, source))?;
        for entry in entries {
            let entry = entry.map_err(|source| io_error(root, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(RECORD_PREFIX) && entry.path().is_dir() {
                records.push(read_record(&entry.path(), &name)?);
            }
        }
        records.sort_by_key(|r| r.index);

        let manifest_path = root.join(MANIFEST_FILE);
        let manifest = if manifest_path.is_file() {
            Some(serde_json::from_str(&read(root, MANIFEST_FILE)?)?)
        } else {
            None
        };

        Ok(Self {
            bundle,
            records,
            manifest,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in timeline order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a TimelineRecord;
    type IntoIter = std::slice::Iter<'a, TimelineRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parse `time_NNNN_label` and read the files the label calls for.
fn read_record(dir: &Path, name: &str) -> Result<TimelineRecord, ReplayError> {
    let malformed = || ReplayError::MalformedName {
        name: String::from(name),
    };
    let (index, label) = name
        .strip_prefix(RECORD_PREFIX)
        .and_then(|rest| rest.split_once('_'))
        .ok_or_else(malformed)?;
    let index: u32 = index.parse().map_err(|_parse| malformed())?;

    let step = match label {
        "state_change" => TimelineStep::StateChange {
            narration: read(dir, STATE_CHANGE_FILE)?,
            problem: read(dir, PROBLEM_FILE)?,
        },
        "query" => TimelineStep::Query(QueryAnswer {
            question: read(dir, QUERY_FILE)?,
            answer: read(dir, ANSWER_FILE)?,
        }),
        "goal" => TimelineStep::Goal {
            description: read(dir, GOAL_FILE)?,
            problem: read(dir, PROBLEM_FILE)?,
        },
        _ => return Err(malformed()),
    };
    Ok(TimelineRecord { index, step })
}

fn read(dir: &Path, name: &str) -> Result<String, ReplayError> {
    let path = dir.join(name);
    std::fs::read_to_string(&path).map_err(|source| io_error(&path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ReplayError {
    ReplayError::Io {
        path: path.to_path_buf(),
        source,
    }
}
