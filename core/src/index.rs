use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

/// One ingested article, stored verbatim in the forward index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub article_id: String,
    pub source_name: String,
    pub title: String,
    pub description: String,
    pub full_content: String,
    pub url: String,
    pub url_to_image: String,
}

impl Document {
    /// The searchable text: title, source name, description, and full
    /// content concatenated in that order.
    pub fn indexable_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title, self.source_name, self.description, self.full_content
        )
    }
}

/// Per-term map from document to occurrence count. A document absent from
/// the map has frequency 0 for the term.
pub type PostingList = HashMap<DocId, u32>;
pub type InvertedIndex = HashMap<TermId, PostingList>;
pub type ForwardIndex = HashMap<DocId, Document>;
/// Total token count of each document's indexable text.
pub type DocLengths = HashMap<DocId, u32>;

/// Term-to-id table. Ids are assigned from 1 in first-encounter order during
/// a build and never reused; the table is frozen once the build finishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    terms: HashMap<String, TermId>,
    next_id: TermId,
}

impl Lexicon {
    pub fn new() -> Self {
        Self {
            terms: HashMap::new(),
            next_id: 1,
        }
    }

    /// Id for `term`, assigning the next unused id on first sight.
    /// Build-side only.
    pub fn get_or_assign(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.terms.get(term) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.terms.insert(term.to_string(), id);
        id
    }

    /// Read-only lookup for the query side; unknown terms stay unknown.
    pub fn lookup(&self, term: &str) -> Option<TermId> {
        self.terms.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the retrieval engine needs, frozen after a build or a load.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    pub lexicon: Lexicon,
    pub forward: ForwardIndex,
    pub inverted: InvertedIndex,
    pub doc_lengths: DocLengths,
}

impl IndexSnapshot {
    pub fn num_docs(&self) -> usize {
        self.doc_lengths.len()
    }

    /// Mean indexable-text length across the corpus. Callers must not
    /// invoke this on an empty index.
    pub fn avg_doc_length(&self) -> f32 {
        let total: u64 = self.doc_lengths.values().map(|&len| u64::from(len)).sum();
        total as f32 / self.doc_lengths.len() as f32
    }
}
