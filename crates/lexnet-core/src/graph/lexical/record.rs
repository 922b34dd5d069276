use arcstr::ArcStr;
use lexnet_common::{Category, SynsetId, UnitId};
use smallvec::SmallVec;

/// One sense of one lemma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalUnit {
    /// Dense id, in load order.
    pub id: UnitId,
    /// Id used by the source data (`c_lu_id`).
    pub external_id: ArcStr,
    /// Written form.
    pub lemma: ArcStr,
    /// Part of speech.
    pub category: Category,
    /// Sense number, starting at 1.
    pub sense: u32,
    /// The one synset this unit belongs to.
    pub synset: SynsetId,
    /// Corpus frequency of the lemma, if counts were loaded.
    pub count: Option<u64>,
}

impl LexicalUnit {
    /// Formats the unit as `lemma:category:sense`.
    #[must_use]
    pub fn spec(&self) -> String {
        format!("{}:{}:{}", self.lemma, self.category, self.sense)
    }
}

/// A set of lexical units sharing one meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synset {
    /// Dense id, in load order.
    pub id: SynsetId,
    /// Id used by the source data (`c_sy_id`). `None` for the singleton
    /// synsets created for units that no synset listed.
    pub external_id: Option<ArcStr>,
    /// Alternative id relation targets may use (`d_synset_id`).
    pub alias: Option<ArcStr>,
    /// Members in listing order.
    pub members: SmallVec<[UnitId; 4]>,
}

impl Synset {
    /// Whether this synset was created for an orphan unit.
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        self.external_id.is_none()
    }
}
