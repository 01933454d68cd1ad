//! Finite word lists that name generated rooms and items.
//!
//! Every list ships as an embedded default and may be replaced by a
//! one-entry-per-line file named in [`ContentConfig`]. Draws are without
//! replacement; an exhausted pool yields `None` and the caller stops
//! instantiating that type.

use std::path::Path;

use homestate_types::ItemKind;
use homestate_world::ItemDraft;
use rand::Rng;
use tracing::debug;

use crate::config::{ConfigError, ContentConfig};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

/// Owner names for bedrooms and phones.
pub const DEFAULT_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dan", "Eve", "Frank", "Grace", "Heidi", "Ivan", "Judy", "Mallory",
    "Niaj", "Olivia", "Peggy", "Rupert", "Sybil", "Trent", "Victor", "Walter", "Yolanda",
];

/// Pen colours.
pub const DEFAULT_COLORS: &[&str] = &[
    "red", "blue", "green", "black", "purple", "orange", "yellow", "pink", "brown", "gray",
];

/// Food names.
pub const DEFAULT_FOODS: &[&str] = &[
    "apple", "banana", "orange", "sandwich", "yogurt", "cheese", "carrot", "egg", "onion",
    "avocado", "pizza", "lemon", "tomato", "cucumber", "grape",
];

/// Book titles.
pub const DEFAULT_BOOK_TITLES: &[&str] = &[
    "Moby Dick",
    "War and Peace",
    "Pride and Prejudice",
    "The Hobbit",
    "Dracula",
    "Frankenstein",
    "Little Women",
    "The Odyssey",
    "Great Expectations",
    "Jane Eyre",
    "Ulysses",
    "Don Quixote",
];

/// Kitchenware names.
pub const DEFAULT_KITCHENWARE: &[&str] = &["plate", "bowl", "fork", "spoon", "knife"];

// ---------------------------------------------------------------------------
// WordPool
// ---------------------------------------------------------------------------

/// A shrinking pool of words drawn without replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Build a pool from owned words. Blank entries are dropped.
    pub fn new(words: impl IntoIterator<Item = String>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|w| String::from(w.trim()))
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Build a pool from an embedded list.
    pub fn from_static(words: &[&str]) -> Self {
        Self::new(words.iter().map(|w| String::from(*w)))
    }

    /// Read a pool from a one-entry-per-line file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::new(contents.lines().map(String::from)))
    }

    /// Remove and return a uniformly chosen word.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.words.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.words.len());
        Some(self.words.swap_remove(index))
    }

    /// Words left.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the pool is exhausted.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn load_or(path: Option<&Path>, fallback: &[&str]) -> Result<WordPool, ConfigError> {
    path.map_or_else(|| Ok(WordPool::from_static(fallback)), WordPool::from_file)
}

// ---------------------------------------------------------------------------
// ContentPools
// ---------------------------------------------------------------------------

/// Every word pool one dataset run draws from.
///
/// Bedrooms and phones draw from independent copies of the name list, so a
/// household may have both Alice's bedroom and Alice's phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPools {
    /// Bedroom owners.
    pub bedroom_owners: WordPool,
    /// Phone owners.
    pub phone_owners: WordPool,
    /// Pen colours.
    pub colors: WordPool,
    /// Food names.
    pub foods: WordPool,
    /// Book titles.
    pub book_titles: WordPool,
    /// Kitchenware names.
    pub kitchenware: WordPool,
}

impl Default for ContentPools {
    fn default() -> Self {
        Self {
            bedroom_owners: WordPool::from_static(DEFAULT_NAMES),
            phone_owners: WordPool::from_static(DEFAULT_NAMES),
            colors: WordPool::from_static(DEFAULT_COLORS),
            foods: WordPool::from_static(DEFAULT_FOODS),
            book_titles: WordPool::from_static(DEFAULT_BOOK_TITLES),
            kitchenware: WordPool::from_static(DEFAULT_KITCHENWARE),
        }
    }
}

impl ContentPools {
    /// Load pools, reading any file named in `config` and falling back to
    /// the embedded lists.
    pub fn load(config: &ContentConfig) -> Result<Self, ConfigError> {
        let names = load_or(config.names_file.as_deref(), DEFAULT_NAMES)?;
        Ok(Self {
            bedroom_owners: names.clone(),
            phone_owners: names,
            colors: load_or(config.colors_file.as_deref(), DEFAULT_COLORS)?,
            foods: load_or(config.foods_file.as_deref(), DEFAULT_FOODS)?,
            book_titles: load_or(config.book_titles_file.as_deref(), DEFAULT_BOOK_TITLES)?,
            kitchenware: load_or(config.kitchenware_file.as_deref(), DEFAULT_KITCHENWARE)?,
        })
    }

    /// Draw the next bedroom owner.
    pub fn draw_bedroom_owner<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        let owner = self.bedroom_owners.draw(rng);
        if owner.is_none() {
            debug!("bedroom owner names exhausted");
        }
        owner
    }

    /// Draw the naming for a new item of `kind`, or `None` once its pool is
    /// exhausted.
    pub fn draw_item<R: Rng + ?Sized>(&mut self, kind: ItemKind, rng: &mut R) -> Option<ItemDraft> {
        let draft = match kind {
            ItemKind::Book => self.book_titles.draw(rng).map(|t| ItemDraft::book(&t)),
            ItemKind::Pen => self.colors.draw(rng).map(|c| ItemDraft::pen(&c)),
            ItemKind::Food => self.foods.draw(rng).map(|f| ItemDraft::food(&f)),
            ItemKind::Kitchenware => self.kitchenware.draw(rng).map(|k| ItemDraft::kitchenware(&k)),
            ItemKind::Phone => self.phone_owners.draw(rng).map(|o| ItemDraft::phone(&o)),
        };
        if draft.is_none() {
            debug!(kind = kind.type_name(), "content pool exhausted");
        }
        draft
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;
    use std::io::Write;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn draws_without_replacement_until_exhausted() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut pool = WordPool::from_static(DEFAULT_KITCHENWARE);
        let mut seen = BTreeSet::new();
        while let Some(word) = pool.draw(&mut rng) {
            assert!(seen.insert(word));
        }
        assert_eq!(seen.len(), DEFAULT_KITCHENWARE.len());
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&mut rng), None);
    }

    #[test]
    fn bedroom_and_phone_names_are_independent() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut pools = ContentPools::default();
        while pools.draw_bedroom_owner(&mut rng).is_some() {}
        assert!(pools.draw_item(ItemKind::Phone, &mut rng).is_some());
        assert_eq!(pools.phone_owners.len(), DEFAULT_NAMES.len().saturating_sub(1));
    }

    #[test]
    fn item_drafts_use_their_pools() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut pools = ContentPools::default();
        let fork = pools.draw_item(ItemKind::Kitchenware, &mut rng).unwrap();
        assert!(DEFAULT_KITCHENWARE.contains(&fork.name.as_str()));
        let pen = pools.draw_item(ItemKind::Pen, &mut rng).unwrap();
        assert!(pen.name.ends_with(" pen"));
        assert_eq!(pools.colors.len(), DEFAULT_COLORS.len().saturating_sub(1));
    }

    #[test]
    fn list_file_replaces_embedded_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Zed\n\n  Yara  \n").unwrap();
        let config = ContentConfig {
            names_file: Some(file.path().to_path_buf()),
            ..ContentConfig::default()
        };
        let pools = ContentPools::load(&config).unwrap();
        assert_eq!(pools.bedroom_owners.len(), 2);
        assert_eq!(pools.phone_owners.len(), 2);
        assert_eq!(pools.foods.len(), DEFAULT_FOODS.len());
    }

    #[test]
    fn missing_list_file_is_an_io_error() {
        let config = ContentConfig {
            foods_file: Some(std::path::PathBuf::from("/nonexistent/foods.txt")),
            ..ContentConfig::default()
        };
        assert!(matches!(
            ContentPools::load(&config),
            Err(ConfigError::Io { .. })
        ));
    }
}
