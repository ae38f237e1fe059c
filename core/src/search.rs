use crate::tokenizer::tokenize;
use crate::{DocId, Document, IndexSnapshot, TermId};
use std::collections::HashMap;

/// BM25 free parameters: `k1` saturates term frequency, `b` scales the
/// document-length normalization.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    pub k1: f32,
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

/// One ranked result: the stored document joined with its BM25 score.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
    pub document: Document,
}

/// Rank documents for `query` against a frozen index snapshot.
///
/// Query terms unknown to the lexicon are dropped; a query resolving to zero
/// known terms yields an empty list. Duplicated query terms contribute once
/// per occurrence. All state is call-local, so any number of concurrent
/// callers may share one snapshot.
pub fn search(query: &str, index: &IndexSnapshot, params: &Bm25Params) -> Vec<SearchHit> {
    let term_ids: Vec<TermId> = tokenize(query)
        .iter()
        .filter_map(|term| index.lexicon.lookup(term))
        .collect();
    if term_ids.is_empty() {
        return Vec::new();
    }

    // A resolved term implies at least one indexed document, so the average
    // length is well defined past this point.
    let n = index.doc_lengths.len() as f32;
    let avg_doc_length = index.avg_doc_length();

    let mut scores: HashMap<DocId, f32> = HashMap::new();
    for &term_id in &term_ids {
        if let Some(postings) = index.inverted.get(&term_id) {
            let df = postings.len() as f32;
            let idf = ((n - df + 0.5) / (df + 0.5) + 1.0).ln();
            for (&doc_id, &tf) in postings {
                let doc_length = index.doc_lengths.get(&doc_id).copied().unwrap_or(0) as f32;
                let tf = tf as f32;
                let tf_norm = (tf * (params.k1 + 1.0))
                    / (tf + params.k1 * (1.0 - params.b + params.b * doc_length / avg_doc_length));
                *scores.entry(doc_id).or_insert(0.0) += idf * tf_norm;
            }
        }
    }

    let mut ranked: Vec<(DocId, f32)> = scores.into_iter().collect();
    // Descending by score; equal scores keep whatever order the map drain
    // produced.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .filter_map(|(doc_id, score)| {
            index.forward.get(&doc_id).map(|document| SearchHit {
                doc_id,
                score,
                document: document.clone(),
            })
        })
        .collect()
}
