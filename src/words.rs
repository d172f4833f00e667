//! Word source for the quiz
//!
//! An ordered, immutable list of lowercase target words, fixed for the
//! whole session. The quiz walks it by index; index == len() means the
//! quiz is complete.

use crate::{Result, SpellError};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Built-in practice list used when no word-list file is configured.
/// Commonly misspelled English words.
pub const DEFAULT_WORDS: &[&str] = &[
    "accommodate",
    "rhythm",
    "necessary",
    "conscience",
    "embarrass",
    "liaison",
    "millennium",
    "occasionally",
    "perseverance",
    "questionnaire",
    "silhouette",
    "threshold",
    "vacuum",
    "maintenance",
    "pharaoh",
    "playwright",
    "mischievous",
    "basil",
];

/// Ordered sequence of target words
///
/// Invariants enforced at construction: the list is non-empty and every
/// entry is a non-empty lowercase string. Never mutated afterwards.
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Build a word list from arbitrary entries
    ///
    /// Entries are trimmed and lowercased. Fails on an empty list or any
    /// entry that is empty after trimming - a zero-length list would put
    /// the quiz in its terminal state before it started.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = Vec::new();
        for entry in entries {
            let word = entry.as_ref().trim().to_lowercase();
            if word.is_empty() {
                return Err(SpellError::WordList(
                    "word list contains an empty entry".to_string(),
                ));
            }
            words.push(word);
        }

        if words.is_empty() {
            return Err(SpellError::WordList("word list is empty".to_string()));
        }

        debug!("Word list built with {} entries", words.len());
        Ok(Self { words })
    }

    /// The built-in default list
    pub fn default_list() -> Self {
        // DEFAULT_WORDS is non-empty and already lowercase
        Self::new(DEFAULT_WORDS).expect("built-in word list is valid")
    }

    /// Load a word list from a file: one word per line, blank lines and
    /// `#` comment lines skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading word list from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| {
            SpellError::WordList(format!("failed to read {}: {}", path.display(), e))
        })?;

        let entries: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        Self::new(entries)
    }

    /// Word at `index`, or `None` once the quiz is past the end
    pub fn word_at(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    /// Number of words in the list
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
