//! Memory-mapped access to the `.vocab` and `.if` files.

use crate::error::{EngineError, Result};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Owns the two read-only memory mappings backing an index: the vocabulary
/// directory and the postings region.
///
/// Both mappings are acquired once, held for the process lifetime, and
/// released when the `IndexReader` is dropped — there is no explicit close.
pub struct IndexReader {
    vocab: Mmap,
    postings: Mmap,
}

impl IndexReader {
    /// Maps `<index_stem>.vocab` and `<index_stem>.if`.
    pub fn open(index_stem: &Path) -> Result<Self> {
        let vocab_path = with_extension(index_stem, "vocab");
        let if_path = with_extension(index_stem, "if");

        let vocab = map_file(&vocab_path)?;
        let postings = map_file(&if_path)?;

        Ok(Self { vocab, postings })
    }

    pub fn vocab(&self) -> &[u8] {
        &self.vocab
    }

    pub fn postings(&self) -> &[u8] {
        &self.postings
    }
}

fn with_extension(stem: &Path, ext: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

fn map_file(path: &Path) -> Result<Mmap> {
    let file = File::open(path).map_err(|source| EngineError::Mapping {
        path: path.to_path_buf(),
        source,
    })?;
    // SAFETY: the mapped files are treated as immutable for the lifetime of
    // the process; nothing else in this process writes to them concurrently.
    unsafe { MmapOptions::new().map(&file) }.map_err(|source| EngineError::Mapping {
        path: path.to_path_buf(),
        source,
    })
}
