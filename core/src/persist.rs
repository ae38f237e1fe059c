use crate::barrel::{load_all_barrels, save_barrels};
use crate::{DocLengths, ForwardIndex, IndexSnapshot, Lexicon};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub num_barrels: u32,
    pub created_at: String,
    pub version: u32,
}

pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn lexicon(&self) -> PathBuf { self.root.join("lexicon.bin") }
    fn forward_index(&self) -> PathBuf { self.root.join("forward_index.bin") }
    fn doc_lengths(&self) -> PathBuf { self.root.join("doc_lengths.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
    pub(crate) fn barrels_dir(&self) -> PathBuf { self.root.join("barrels") }
    pub(crate) fn barrel(&self, n: u32) -> PathBuf {
        self.barrels_dir().join(format!("barrel_{n:05}.bin"))
    }
}

fn save_blob<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = bincode::serialize(value)?;
    let mut f = File::create(path)?;
    f.write_all(&bytes)?;
    Ok(())
}

fn load_blob<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let mut f = File::open(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let value = bincode::deserialize(&buf)?;
    Ok(value)
}

pub fn save_lexicon(paths: &IndexPaths, lexicon: &Lexicon) -> Result<()> {
    save_blob(&paths.lexicon(), lexicon)
}

pub fn load_lexicon(paths: &IndexPaths) -> Result<Lexicon> {
    load_blob(&paths.lexicon())
}

pub fn save_forward_index(paths: &IndexPaths, forward: &ForwardIndex) -> Result<()> {
    save_blob(&paths.forward_index(), forward)
}

pub fn load_forward_index(paths: &IndexPaths) -> Result<ForwardIndex> {
    load_blob(&paths.forward_index())
}

pub fn save_doc_lengths(paths: &IndexPaths, doc_lengths: &DocLengths) -> Result<()> {
    save_blob(&paths.doc_lengths(), doc_lengths)
}

pub fn load_doc_lengths(paths: &IndexPaths) -> Result<DocLengths> {
    load_blob(&paths.doc_lengths())
}

pub fn save_meta(paths: &IndexPaths, meta: &MetaFile) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)?;
    let mut f = File::create(paths.meta())?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &IndexPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// True when every single-blob artifact from a previous build is present.
/// Missing artifacts mean "index not yet built", a recoverable startup
/// condition for the callers.
pub fn index_exists(paths: &IndexPaths) -> bool {
    paths.lexicon().exists() && paths.forward_index().exists() && paths.doc_lengths().exists()
}

/// Persist a finished build: lexicon, forward index, doc lengths, barrels,
/// and the meta sidecar.
pub fn save_index(paths: &IndexPaths, index: &IndexSnapshot, barrel_size: usize) -> Result<()> {
    create_dir_all(&paths.root)?;
    save_lexicon(paths, &index.lexicon)?;
    save_forward_index(paths, &index.forward)?;
    save_doc_lengths(paths, &index.doc_lengths)?;
    let num_barrels = save_barrels(paths, &index.inverted, barrel_size)?;
    let meta = MetaFile {
        num_docs: index.doc_lengths.len() as u32,
        num_terms: index.lexicon.len() as u32,
        num_barrels,
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: 1,
    };
    save_meta(paths, &meta)?;
    tracing::info!(root = %paths.root.display(), num_barrels, "index saved");
    Ok(())
}

/// Reload a fully persisted index into memory, barrels included.
///
/// An index with zero documents cannot be served (the average document
/// length is undefined), so that is rejected here once rather than checked
/// per query.
pub fn load_index(paths: &IndexPaths) -> Result<IndexSnapshot> {
    let lexicon = load_lexicon(paths)?;
    let forward = load_forward_index(paths)?;
    let doc_lengths = load_doc_lengths(paths)?;
    let inverted = load_all_barrels(paths)?;
    if doc_lengths.is_empty() {
        bail!("index at {} contains no documents", paths.root.display());
    }
    tracing::info!(
        num_docs = doc_lengths.len(),
        num_terms = lexicon.len(),
        "index loaded"
    );
    Ok(IndexSnapshot { lexicon, forward, inverted, doc_lengths })
}
