//! Configuration loading and typed config structures for the dataset generator.
//!
//! The canonical configuration lives in `homestate-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure, and provides a loader that reads and validates the file.
//! Every field has a default, so an empty file yields a usable config.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding `world.seed`.
pub const SEED_ENV: &str = "HOMESTATE_SEED";

/// Environment variable overriding `output.directory`.
pub const OUTPUT_DIR_ENV: &str = "HOMESTATE_OUTPUT_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file (or a content list) from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {variable}")]
    InvalidOverride {
        /// The environment variable name.
        variable: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A value is out of range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level generator configuration.
///
/// Mirrors the structure of `homestate-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratorConfig {
    /// World generation settings (seed, caps).
    #[serde(default)]
    pub world: WorldConfig,

    /// Timeline shape.
    #[serde(default)]
    pub timeline: TimelineConfig,

    /// Planning-format naming.
    #[serde(default)]
    pub planning: PlanningConfig,

    /// Optional replacement word lists.
    #[serde(default)]
    pub content: ContentConfig,

    /// Where datasets are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GeneratorConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `HOMESTATE_SEED` overrides `world.seed`
    /// - `HOMESTATE_OUTPUT_DIR` overrides `output.directory`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_raw(yaml)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parse configuration from a YAML string without consulting the
    /// environment.
    pub fn parse_raw(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserialises to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(SEED_ENV) {
            self.world.seed = value.trim().parse().map_err(|_parse| ConfigError::InvalidOverride {
                variable: SEED_ENV,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(OUTPUT_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            self.output.directory = PathBuf::from(value);
        }
        Ok(())
    }

    /// Reject configurations that cannot produce a dataset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.max_rooms == 0 {
            return Err(ConfigError::Invalid {
                field: "world.max_rooms",
                reason: "must be at least 1",
            });
        }
        if self.world.container_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "world.container_capacity",
                reason: "must be at least 1",
            });
        }
        if self.planning.domain_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "planning.domain_name",
                reason: "must not be empty",
            });
        }
        if self.planning.problem_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "planning.problem_name",
                reason: "must not be empty",
            });
        }
        if self.output.datasets == 0 {
            return Err(ConfigError::Invalid {
                field: "output.datasets",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// World generation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Maximum number of rooms across all room types.
    #[serde(default = "default_max_rooms")]
    pub max_rooms: usize,

    /// Maximum number of movable items across all item types.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Maximum items drawn into one container at generation time.
    #[serde(default = "default_container_capacity")]
    pub container_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_rooms: default_max_rooms(),
            max_items: default_max_items(),
            container_capacity: default_container_capacity(),
        }
    }
}

/// Timeline shape configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimelineConfig {
    /// Number of query records.
    #[serde(default = "default_num_queries")]
    pub num_queries: u32,

    /// State changes emitted before each query.
    #[serde(default = "default_state_changes_per_query")]
    pub state_changes_per_query: u32,

    /// Emit a goal record after every this many state changes. Zero disables
    /// goals.
    #[serde(default)]
    pub state_changes_per_goal: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            num_queries: default_num_queries(),
            state_changes_per_query: default_state_changes_per_query(),
            state_changes_per_goal: 0,
        }
    }
}

/// Planning-format naming.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanningConfig {
    /// Name of the generated domain.
    #[serde(default = "default_domain_name")]
    pub domain_name: String,

    /// Name of every generated problem.
    #[serde(default = "default_problem_name")]
    pub problem_name: String,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            domain_name: default_domain_name(),
            problem_name: default_problem_name(),
        }
    }
}

/// Optional one-entry-per-line files replacing the embedded word lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContentConfig {
    /// Owner names for bedrooms and phones.
    #[serde(default)]
    pub names_file: Option<PathBuf>,

    /// Pen colours.
    #[serde(default)]
    pub colors_file: Option<PathBuf>,

    /// Food names.
    #[serde(default)]
    pub foods_file: Option<PathBuf>,

    /// Book titles.
    #[serde(default)]
    pub book_titles_file: Option<PathBuf>,

    /// Kitchenware names.
    #[serde(default)]
    pub kitchenware_file: Option<PathBuf>,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Root directory; dataset `i` is written to `{directory}/dataset_{i}`.
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Number of datasets to generate, seeded `seed + i`.
    #[serde(default = "default_datasets")]
    pub datasets: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            datasets: default_datasets(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_seed() -> u64 {
    42
}

const fn default_max_rooms() -> usize {
    5
}

const fn default_max_items() -> usize {
    20
}

const fn default_container_capacity() -> usize {
    2
}

const fn default_num_queries() -> u32 {
    100
}

const fn default_state_changes_per_query() -> u32 {
    10
}

fn default_domain_name() -> String {
    String::from("simulation")
}

fn default_problem_name() -> String {
    String::from("simulation-a")
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

const fn default_datasets() -> u32 {
    1
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GeneratorConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.world.max_rooms, 5);
        assert_eq!(config.world.max_items, 20);
        assert_eq!(config.timeline.num_queries, 100);
        assert_eq!(config.timeline.state_changes_per_goal, 0);
        assert_eq!(config.planning.problem_name, "simulation-a");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  seed: 123
  max_rooms: 3
  max_items: 12
  container_capacity: 1

timeline:
  num_queries: 4
  state_changes_per_query: 2
  state_changes_per_goal: 5

planning:
  domain_name: "house"
  problem_name: "house-a"

content:
  names_file: "lists/names.txt"

output:
  directory: "datasets"
  datasets: 3

logging:
  level: "debug"
"#;

        let config = GeneratorConfig::parse_raw(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(GeneratorConfig::default);

        assert_eq!(config.world.seed, 123);
        assert_eq!(config.world.container_capacity, 1);
        assert_eq!(config.timeline.state_changes_per_goal, 5);
        assert_eq!(config.planning.domain_name, "house");
        assert_eq!(
            config.content.names_file,
            Some(PathBuf::from("lists/names.txt"))
        );
        assert_eq!(config.content.foods_file, None);
        assert_eq!(config.output.datasets, 3);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "world:\n  seed: 7\n";
        let config = GeneratorConfig::parse_raw(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_else(GeneratorConfig::default);

        // Seed is overridden
        assert_eq!(config.world.seed, 7);
        // Everything else uses defaults
        assert_eq!(config.world.max_items, 20);
        assert_eq!(config.timeline.state_changes_per_query, 10);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = GeneratorConfig::parse_raw("");
        assert_eq!(config.ok(), Some(GeneratorConfig::default()));
    }

    #[test]
    fn overrides_replace_seed_and_directory() {
        let mut config = GeneratorConfig::default();
        let result = config.apply_overrides(|name| match name {
            SEED_ENV => Some(String::from(" 99 ")),
            OUTPUT_DIR_ENV => Some(String::from("/tmp/runs")),
            _ => None,
        });
        assert!(result.is_ok());
        assert_eq!(config.world.seed, 99);
        assert_eq!(config.output.directory, PathBuf::from("/tmp/runs"));
    }

    #[test]
    fn malformed_seed_override_rejected() {
        let mut config = GeneratorConfig::default();
        let result = config.apply_overrides(|name| {
            (name == SEED_ENV).then(|| String::from("forty-two"))
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidOverride { variable: SEED_ENV, .. })
        ));
        assert_eq!(config.world.seed, 42);
    }

    #[test]
    fn zero_caps_rejected() {
        let mut config = GeneratorConfig::default();
        config.world.max_rooms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "world.max_rooms", .. })
        ));

        let mut config = GeneratorConfig::default();
        config.world.container_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.planning.problem_name = String::from("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("homestate-config.yaml");
        if path.exists() {
            let contents = std::fs::read_to_string(&path).unwrap_or_default();
            let config = GeneratorConfig::parse_raw(&contents);
            assert!(config.is_ok());
            let config = config.ok().unwrap_or_else(GeneratorConfig::default);
            assert!(config.validate().is_ok());
        }
    }
}
