//! Information-content similarity between lexical units.
//!
//! Scores are computed on the synsets of the units. The information content
//! of a synset is `-log2(p)`, where `p` is the synset's subcount (its own
//! count plus the counts of everything below it in the hyperonym hierarchy)
//! divided by the total count of the network.
//!
//! | Metric | Score |
//! |--------|-------|
//! | Resnik | `IC(lcs)` |
//! | Jiang-Conrath | `1 / (IC(a) + IC(b) - 2 IC(lcs))` |
//! | Lin | `2 IC(lcs) / (IC(a) + IC(b))` |
//!
//! `lcs` is the common subsumer with the highest information content. Two
//! synsets without one are treated as sharing a subsumer of information
//! content zero.

mod hierarchy;

use std::fmt;
use std::str::FromStr;

use lexnet_common::SynsetId;
use lexnet_common::utils::error::Error;
use lexnet_common::utils::strings::{find_similar, format_suggestion};

pub(crate) use hierarchy::{Hierarchy, SimilarityCache, Subsumer};

/// A similarity measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Information content of the least common subsumer.
    Resnik,
    /// Inverse of the Jiang-Conrath distance.
    JiangConrath,
    /// Lin's ratio of shared to total information content.
    Lin,
}

impl Metric {
    /// Every metric.
    pub const ALL: [Metric; 3] = [Self::Resnik, Self::JiangConrath, Self::Lin];

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resnik => "resnik",
            Self::JiangConrath => "jiang_conrath",
            Self::Lin => "lin",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resnik" | "res" => Ok(Self::Resnik),
            "jcn" | "jiang_conrath" | "jiang-conrath" => Ok(Self::JiangConrath),
            "lin" => Ok(Self::Lin),
            _ => {
                let names = ["resnik", "jcn", "jiang_conrath", "lin"];
                let mut message = format!("unknown similarity metric '{s}'");
                if let Some(similar) = find_similar(s, &names) {
                    message = format!("{message}. {}", format_suggestion(similar));
                }
                Err(Error::InvalidValue(message))
            }
        }
    }
}

/// Score of one synset pair; `None` when an information content it needs
/// is undefined.
pub(crate) fn score(hierarchy: &Hierarchy<'_>, metric: Metric, a: SynsetId, b: SynsetId) -> Option<f64> {
    let lcs = hierarchy.lcs_information(a, b)?;
    let value = match metric {
        Metric::Resnik => lcs,
        Metric::JiangConrath => {
            let distance =
                hierarchy.information_content(a)? + hierarchy.information_content(b)? - 2.0 * lcs;
            if distance <= f64::EPSILON {
                f64::INFINITY
            } else {
                1.0 / distance
            }
        }
        Metric::Lin => {
            let total = hierarchy.information_content(a)? + hierarchy.information_content(b)?;
            if hierarchy.common_subsumers(a, b).is_empty() {
                0.0
            } else if total <= f64::EPSILON {
                1.0
            } else {
                2.0 * lcs / total
            }
        }
    };
    tracing::trace!(%metric, a = %a, b = %b, value, "similarity");
    Some(value)
}

/// Best score over every pair drawn from `a` and `b`.
pub(crate) fn best_score(
    hierarchy: &Hierarchy<'_>,
    metric: Metric,
    a: &[SynsetId],
    b: &[SynsetId],
) -> Option<f64> {
    let mut best: Option<f64> = None;
    for &x in a {
        for &y in b {
            if let Some(value) = score(hierarchy, metric, x, y) {
                best = Some(best.map_or(value, |b| b.max(value)));
            }
        }
    }
    best
}
