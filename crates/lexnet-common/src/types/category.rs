//! Word categories (parts of speech).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Part of speech of a lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Noun.
    Noun,
    /// Verb.
    Verb,
    /// Adjective.
    Adj,
    /// Adverb.
    Adv,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 4] = [Self::Noun, Self::Verb, Self::Adj, Self::Adv];

    /// Returns the canonical spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adj => "adj",
            Self::Adv => "adv",
        }
    }

    /// Maps a raw category spelling to its canonical form.
    ///
    /// Matching ignores case and surrounding whitespace, and accepts the long
    /// forms `adjective` and `adverb`. The flag is true when the input was not
    /// already canonical.
    ///
    /// ```
    /// use lexnet_common::Category;
    ///
    /// assert_eq!(Category::normalize("noun"), Some((Category::Noun, false)));
    /// assert_eq!(Category::normalize("ADJECTIVE"), Some((Category::Adj, true)));
    /// assert_eq!(Category::normalize("pronoun"), None);
    /// ```
    #[must_use]
    pub fn normalize(raw: &str) -> Option<(Self, bool)> {
        let lowered = raw.trim().to_ascii_lowercase();
        let category = match lowered.as_str() {
            "noun" => Self::Noun,
            "verb" => Self::Verb,
            "adj" | "adjective" => Self::Adj,
            "adv" | "adverb" => Self::Adv,
            _ => return None,
        };
        Some((category, raw != category.as_str()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
            .map(|(category, _)| category)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// Category bucket of the word-count table.
///
/// The table is tagged with corpus part-of-speech tags that are coarser than
/// [`Category`]; adverbs have no bucket of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountCategory {
    /// Nouns, pronouns, numerals and special tokens.
    Noun,
    /// Verbs.
    Verb,
    /// Adjectives and adverbs.
    Adj,
    /// Everything else.
    Other,
}

impl CountCategory {
    /// Maps a corpus tag (`N`, `WW`, `ADJ`, ...) to its bucket.
    ///
    /// ```
    /// use lexnet_common::CountCategory;
    ///
    /// assert_eq!(CountCategory::from_tag("N"), CountCategory::Noun);
    /// assert_eq!(CountCategory::from_tag("BW"), CountCategory::Adj);
    /// assert_eq!(CountCategory::from_tag("LID"), CountCategory::Other);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "N" | "VNW" | "TW" | "SPEC" => Self::Noun,
            "WW" => Self::Verb,
            "ADJ" | "BW" => Self::Adj,
            _ => Self::Other,
        }
    }
}

impl From<Category> for CountCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Noun => Self::Noun,
            Category::Verb => Self::Verb,
            Category::Adj => Self::Adj,
            Category::Adv => Self::Other,
        }
    }
}
