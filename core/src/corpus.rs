//! Corpus ingestion: CSV rows carrying the seven article fields.

use crate::Document;
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read every article row from `input`, a CSV file or a directory of CSV
/// files. Files are visited in sorted order so document ids are assigned
/// deterministically across runs.
///
/// The header row must carry exactly the `Document` field names; every
/// field is required, though any may be empty.
pub fn read_corpus(input: &Path) -> Result<Vec<Document>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("csv") {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else {
        files.push(input.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in &files {
        let mut reader = csv::Reader::from_path(file)?;
        for row in reader.deserialize() {
            let doc: Document = row?;
            docs.push(doc);
        }
        tracing::debug!(file = %file.display(), total = docs.len(), "corpus file read");
    }
    Ok(docs)
}
