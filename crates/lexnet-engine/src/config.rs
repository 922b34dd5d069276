//! Network configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use lexnet_common::utils::error::Error;

/// Default depth ceiling for traversals.
pub const DEFAULT_MAX_DEPTH: usize = 9;

/// Default bound on hyperonym chains followed by the similarity measures.
pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = 64;

/// How a similarity selector that matches several senses is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SensePolicy {
    /// Each selector must match exactly one lexical unit.
    #[default]
    Strict,
    /// Score every pair of matching units and keep the best.
    BestPair,
}

impl fmt::Display for SensePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::BestPair => write!(f, "best_pair"),
        }
    }
}

impl FromStr for SensePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "best_pair" | "best-pair" | "bestpair" => Ok(Self::BestPair),
            _ => Err(Error::InvalidValue(format!("unknown sense policy '{s}'"))),
        }
    }
}

/// Errors from [`Config::validate()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The depth ceiling must be at least one.
    ZeroMaxDepth,
    /// A step budget must be greater than zero.
    ZeroMaxSteps,
    /// A query timeout must be greater than zero.
    ZeroQueryTimeout,
    /// The hierarchy depth bound must be at least one.
    ZeroHierarchyDepth,
    /// A relation name is empty.
    EmptyRelationName(&'static str),
    /// A source path is needed but not set.
    MissingSource(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxDepth => write!(f, "max_depth must be at least 1"),
            Self::ZeroMaxSteps => write!(f, "max_steps must be greater than zero"),
            Self::ZeroQueryTimeout => write!(f, "query_timeout must be greater than zero"),
            Self::ZeroHierarchyDepth => {
                write!(f, "similarity.max_hierarchy_depth must be at least 1")
            }
            Self::EmptyRelationName(field) => write!(f, "{field} contains an empty relation name"),
            Self::MissingSource(field) => write!(f, "{field} is not set"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

/// Settings of the similarity measures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityConfig {
    /// Relation pointing from a synset to its broader synsets.
    pub hyperonym_relation: String,
    /// Relation pointing from a synset to its narrower synsets.
    pub hyponym_relation: String,
    /// How many levels up or down the hierarchy is followed.
    pub max_hierarchy_depth: usize,
    /// Treat a zero (sub)count as one so its information content is defined.
    pub smoothing: bool,
    /// Divide by the corpus size of the synset's count bucket instead of
    /// the total mass of the hierarchy.
    pub category_totals: bool,
    /// Handling of selectors matching several senses.
    pub sense_policy: SensePolicy,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            hyperonym_relation: "HAS_HYPERONYM".to_string(),
            hyponym_relation: "HAS_HYPONYM".to_string(),
            max_hierarchy_depth: DEFAULT_MAX_HIERARCHY_DEPTH,
            smoothing: false,
            category_totals: false,
            sense_policy: SensePolicy::Strict,
        }
    }
}

impl SimilarityConfig {
    /// Sets the hierarchy depth bound.
    #[must_use]
    pub fn with_max_hierarchy_depth(mut self, depth: usize) -> Self {
        self.max_hierarchy_depth = depth;
        self
    }

    /// Enables add-one smoothing of zero counts.
    #[must_use]
    pub fn with_smoothing(mut self) -> Self {
        self.smoothing = true;
        self
    }

    /// Measures probabilities against per-category corpus totals.
    #[must_use]
    pub fn with_category_totals(mut self) -> Self {
        self.category_totals = true;
        self
    }

    /// Sets the sense policy.
    #[must_use]
    pub fn with_sense_policy(mut self, policy: SensePolicy) -> Self {
        self.sense_policy = policy;
        self
    }

    /// Sets the relations that make up the hierarchy.
    #[must_use]
    pub fn with_hierarchy_relations(
        mut self,
        hyperonym: impl Into<String>,
        hyponym: impl Into<String>,
    ) -> Self {
        self.hyperonym_relation = hyperonym.into();
        self.hyponym_relation = hyponym.into();
        self
    }
}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lexical-unit XML extract, used by [`LexNet::open`](crate::LexNet::open).
    pub lexical_units_source: Option<PathBuf>,
    /// Synset XML extract, used by [`LexNet::open`](crate::LexNet::open).
    pub synsets_source: Option<PathBuf>,
    /// Optional word-count table enabling similarity.
    pub counts_source: Option<PathBuf>,

    /// Depth ceiling applied to every traversal.
    pub max_depth: usize,

    /// Default step budget per query (None for unlimited).
    pub max_steps: Option<u64>,

    /// Default wall-clock budget per query (None for unlimited).
    pub query_timeout: Option<Duration>,

    /// Relations queried transitively when no depth is given.
    pub hierarchical_relations: Vec<String>,

    /// Refuse to finish loading without word counts.
    pub require_counts: bool,

    /// Similarity settings.
    pub similarity: SimilarityConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lexical_units_source: None,
            synsets_source: None,
            counts_source: None,
            max_depth: DEFAULT_MAX_DEPTH,
            max_steps: None,
            query_timeout: None,
            hierarchical_relations: vec!["HAS_HYPERONYM".to_string(), "HAS_HYPONYM".to_string()],
            require_counts: false,
            similarity: SimilarityConfig::default(),
        }
    }
}

impl Config {
    /// Creates a configuration reading the two XML extracts from disk.
    #[must_use]
    pub fn from_paths(lexical_units: impl Into<PathBuf>, synsets: impl Into<PathBuf>) -> Self {
        Self {
            lexical_units_source: Some(lexical_units.into()),
            synsets_source: Some(synsets.into()),
            ..Default::default()
        }
    }

    /// Sets the word-count table.
    #[must_use]
    pub fn with_counts(mut self, path: impl Into<PathBuf>) -> Self {
        self.counts_source = Some(path.into());
        self
    }

    /// Sets the depth ceiling.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the default step budget.
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Sets the default query timeout.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = Some(timeout);
        self
    }

    /// Replaces the relations treated as hierarchical.
    #[must_use]
    pub fn with_hierarchical_relations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hierarchical_relations = relations.into_iter().map(Into::into).collect();
        self
    }

    /// Requires a word-count table at load time.
    #[must_use]
    pub fn with_required_counts(mut self) -> Self {
        self.require_counts = true;
        self
    }

    /// Sets the similarity configuration.
    #[must_use]
    pub fn with_similarity(mut self, similarity: SimilarityConfig) -> Self {
        self.similarity = similarity;
        self
    }

    /// Whether `relation` is queried transitively by default.
    #[must_use]
    pub fn is_hierarchical(&self, relation: &str) -> bool {
        self.hierarchical_relations
            .iter()
            .any(|r| r.eq_ignore_ascii_case(relation))
    }

    /// Validates the configuration.
    ///
    /// Called by [`LexNet::new()`](crate::LexNet::new).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any setting is invalid.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroMaxDepth);
        }

        if self.max_steps == Some(0) {
            return Err(ConfigError::ZeroMaxSteps);
        }

        if self.query_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroQueryTimeout);
        }

        if self.hierarchical_relations.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::EmptyRelationName("hierarchical_relations"));
        }

        if self.similarity.max_hierarchy_depth == 0 {
            return Err(ConfigError::ZeroHierarchyDepth);
        }

        if self.similarity.hyperonym_relation.trim().is_empty()
            || self.similarity.hyponym_relation.trim().is_empty()
        {
            return Err(ConfigError::EmptyRelationName("similarity"));
        }

        if self.require_counts && self.lexical_units_source.is_some() && self.counts_source.is_none()
        {
            return Err(ConfigError::MissingSource("counts_source"));
        }

        Ok(())
    }
}
