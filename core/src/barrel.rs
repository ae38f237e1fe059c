use crate::persist::IndexPaths;
use crate::{DocId, InvertedIndex, TermId};
use anyhow::Result;
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};

/// Maximum number of term entries per barrel file.
pub const DEFAULT_BARREL_SIZE: usize = 1000;

/// On-disk form of one barrel: term entries with their postings. Both levels
/// are sorted at save time so a fully saved index serializes identically
/// across runs.
pub type BarrelEntries = Vec<(TermId, Vec<(DocId, u32)>)>;

/// Partition the inverted index into numbered barrels of at most
/// `barrel_size` term entries and persist them under `barrels/`. Returns the
/// number of barrels written.
pub fn save_barrels(
    paths: &IndexPaths,
    inverted: &InvertedIndex,
    barrel_size: usize,
) -> Result<u32> {
    anyhow::ensure!(barrel_size >= 1, "barrel size must be at least 1");
    create_dir_all(paths.barrels_dir())?;

    let mut entries: BarrelEntries = inverted
        .iter()
        .map(|(&term_id, postings)| {
            let mut plist: Vec<(DocId, u32)> = postings.iter().map(|(&d, &tf)| (d, tf)).collect();
            plist.sort_unstable_by_key(|&(doc_id, _)| doc_id);
            (term_id, plist)
        })
        .collect();
    entries.sort_unstable_by_key(|&(term_id, _)| term_id);

    let mut barrel_no: u32 = 0;
    for chunk in entries.chunks(barrel_size) {
        barrel_no += 1;
        let bytes = bincode::serialize(&chunk)?;
        let mut f = File::create(paths.barrel(barrel_no))?;
        f.write_all(&bytes)?;
        tracing::debug!(barrel = barrel_no, terms = chunk.len(), "barrel saved");
    }
    Ok(barrel_no)
}

/// Read barrel `n` if it exists; `Ok(None)` marks the end of the sequence.
pub fn load_barrel(paths: &IndexPaths, n: u32) -> Result<Option<BarrelEntries>> {
    let path = paths.barrel(n);
    if !path.exists() {
        return Ok(None);
    }
    let mut f = File::open(path)?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let entries = bincode::deserialize(&buf)?;
    Ok(Some(entries))
}

/// Merge numbered barrels starting at 1, stopping at the first missing
/// number. The gap is normal termination, not an error.
pub fn load_all_barrels(paths: &IndexPaths) -> Result<InvertedIndex> {
    let mut inverted = InvertedIndex::new();
    let mut n: u32 = 1;
    while let Some(entries) = load_barrel(paths, n)? {
        for (term_id, plist) in entries {
            inverted.insert(term_id, plist.into_iter().collect());
        }
        n += 1;
    }
    tracing::debug!(barrels = n - 1, terms = inverted.len(), "barrels loaded");
    Ok(inverted)
}
