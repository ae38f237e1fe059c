use pressdex_core::builder;
use pressdex_core::search::{search, Bm25Params};
use pressdex_core::{Document, IndexSnapshot};

fn article(article_id: &str, text: &str) -> Document {
    Document {
        article_id: article_id.into(),
        source_name: String::new(),
        title: String::new(),
        description: String::new(),
        full_content: text.into(),
        url: String::new(),
        url_to_image: String::new(),
    }
}

fn pets_index() -> IndexSnapshot {
    builder::build([
        article("a", "Cats are great pets"),
        article("b", "Dogs are great pets too"),
    ])
}

#[test]
fn both_matching_docs_are_returned_with_positive_scores() {
    let index = pets_index();
    let hits = search("great pets", &index, &Bm25Params::default());
    assert_eq!(hits.len(), 2);
    for hit in &hits {
        assert!(hit.score > 0.0, "expected positive score, got {}", hit.score);
    }

    // Same term frequencies on both sides, so only document length (4 vs 5
    // tokens) separates the scores: the shorter document ranks first. No
    // tie-break beyond the score itself is assumed anywhere in this suite.
    assert_eq!(hits[0].document.article_id, "a");
    assert_eq!(hits[1].document.article_id, "b");
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn query_term_absent_from_doc_contributes_nothing() {
    let index = pets_index();
    // "cats" only matches document a; document b must not surface through
    // a term it has zero frequency for.
    let hits = search("cats", &index, &Bm25Params::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.article_id, "a");
}

#[test]
fn unknown_terms_are_dropped_silently() {
    let index = pets_index();
    assert!(search("zzzzz999", &index, &Bm25Params::default()).is_empty());

    // Mixed known/unknown: the unknown term is dropped, the known one ranks.
    let hits = search("zzzzz999 cats", &index, &Bm25Params::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document.article_id, "a");
}

#[test]
fn punctuation_only_query_resolves_to_nothing() {
    let index = pets_index();
    assert!(search("?!...", &index, &Bm25Params::default()).is_empty());
}

#[test]
fn search_is_idempotent() {
    let index = pets_index();
    let params = Bm25Params::default();
    let first = search("great pets", &index, &params);
    let second = search("great pets", &index, &params);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.doc_id, b.doc_id);
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn repeated_query_term_contributes_per_occurrence() {
    let index = pets_index();
    let params = Bm25Params::default();
    let single = search("great", &index, &params);
    let doubled = search("great great", &index, &params);
    assert_eq!(single.len(), doubled.len());
    for (s, d) in single.iter().zip(doubled.iter()) {
        assert_eq!(s.doc_id, d.doc_id);
        assert!((d.score - 2.0 * s.score).abs() < 1e-5);
    }
}

#[test]
fn query_matches_title_and_source_fields() {
    let doc = Document {
        article_id: "x".into(),
        source_name: "Crustacean Times".into(),
        title: "Ferris ships".into(),
        description: String::new(),
        full_content: String::new(),
        url: String::new(),
        url_to_image: String::new(),
    };
    let index = builder::build([doc]);
    assert_eq!(search("crustacean", &index, &Bm25Params::default()).len(), 1);
    assert_eq!(search("ferris", &index, &Bm25Params::default()).len(), 1);
}

#[test]
fn bm25_params_are_configurable() {
    let index = pets_index();
    // With b = 0 length normalization is off and the two documents tie on
    // every component, so their scores are equal.
    let flat = Bm25Params { k1: 1.5, b: 0.0 };
    let hits = search("great pets", &index, &flat);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn results_join_full_document_records() {
    let doc = Document {
        article_id: "a9".into(),
        source_name: "The Register".into(),
        title: "Borrow checker explained".into(),
        description: "an explainer".into(),
        full_content: "lifetimes and ownership".into(),
        url: "https://example.com/borrow".into(),
        url_to_image: "https://example.com/borrow.png".into(),
    };
    let index = builder::build([doc.clone()]);
    let hits = search("ownership", &index, &Bm25Params::default());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document, doc);
}
