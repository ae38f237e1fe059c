use crate::tokenizer::tokenize;
use crate::{DocId, DocLengths, Document, ForwardIndex, IndexSnapshot, InvertedIndex, Lexicon, TermId};
use std::collections::HashMap;

/// Accumulates one offline pass over the corpus. The builder is the sole
/// writer of the lexicon and inverted index; `finish` hands them back as a
/// frozen snapshot.
pub struct IndexBuilder {
    lexicon: Lexicon,
    forward: ForwardIndex,
    inverted: InvertedIndex,
    doc_lengths: DocLengths,
    next_doc_id: DocId,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            lexicon: Lexicon::new(),
            forward: ForwardIndex::new(),
            inverted: InvertedIndex::new(),
            doc_lengths: DocLengths::new(),
            next_doc_id: 1,
        }
    }

    /// Ingest one document, returning its assigned id.
    ///
    /// A document with empty indexable text gets a length of 0 and no
    /// postings; it stays reachable through the forward index only.
    pub fn add_document(&mut self, doc: Document) -> DocId {
        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;

        let tokens = tokenize(&doc.indexable_text());
        // Resolve in token order so term ids follow first encounter.
        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for token in &tokens {
            let term_id = self.lexicon.get_or_assign(token);
            *counts.entry(term_id).or_insert(0) += 1;
        }
        for (term_id, count) in counts {
            self.inverted.entry(term_id).or_default().insert(doc_id, count);
        }
        self.doc_lengths.insert(doc_id, tokens.len() as u32);
        self.forward.insert(doc_id, doc);
        doc_id
    }

    pub fn finish(self) -> IndexSnapshot {
        tracing::info!(
            num_docs = self.doc_lengths.len(),
            num_terms = self.lexicon.len(),
            "index build finished"
        );
        IndexSnapshot {
            lexicon: self.lexicon,
            forward: self.forward,
            inverted: self.inverted,
            doc_lengths: self.doc_lengths,
        }
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an index from an ordered corpus in one call.
pub fn build<I>(corpus: I) -> IndexSnapshot
where
    I: IntoIterator<Item = Document>,
{
    let mut builder = IndexBuilder::new();
    for doc in corpus {
        builder.add_document(doc);
    }
    builder.finish()
}
