//! Positional vocabulary directory lookup (C2).

use crate::error::{EngineError, Result};
use crate::index::codec::Cursor;
use crate::index::layout::BinaryLayout;

/// One resolved vocabulary entry: how many postings a term has, and where
/// its posting list starts in the postings region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabEntry {
    pub postings_count: u64,
    pub postings_offset: u64,
}

/// Read-only view over the `.vocab` region, indexed positionally by termid.
pub struct Vocabulary<'a> {
    data: &'a [u8],
    layout: BinaryLayout,
}

impl<'a> Vocabulary<'a> {
    pub fn new(data: &'a [u8], layout: BinaryLayout) -> Self {
        Self { data, layout }
    }

    /// Reads the entry for `termid`.
    ///
    /// The caller guarantees `termid < numTerms`; this does not re-validate
    /// that bound, only that the computed byte range actually exists in the
    /// mapped region (a malformed or truncated `.vocab` file still surfaces
    /// as `EngineError::Corruption` rather than a panic).
    pub fn lookup(&self, termid: u64) -> Result<VocabEntry> {
        let entry_width = self.layout.vocab_entry_width();
        let start = termid
            .checked_mul(entry_width as u64)
            .ok_or_else(|| EngineError::Corruption("vocab offset overflow".to_string()))?;
        let start = usize::try_from(start)
            .map_err(|_| EngineError::Corruption("vocab offset overflow".to_string()))?;

        let mut cursor = Cursor::at(self.data, start);
        // The leading termid field is positional redundancy; skip it.
        cursor.read_uint(self.layout.termid_width)?;
        let postings_count = cursor.read_uint(self.layout.postings_count_width)?;
        let postings_offset = cursor.read_uint(self.layout.index_offset_width)?;

        Ok(VocabEntry {
            postings_count,
            postings_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_entry(layout: &BinaryLayout, termid: u64, count: u64, offset: u64) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(be_bytes(termid, layout.termid_width));
        out.extend(be_bytes(count, layout.postings_count_width));
        out.extend(be_bytes(offset, layout.index_offset_width));
        out
    }

    fn be_bytes(value: u64, width: usize) -> Vec<u8> {
        let full = value.to_be_bytes();
        full[8 - width..].to_vec()
    }

    #[test]
    fn looks_up_by_position() {
        let layout = BinaryLayout::uniform(4);
        let mut data = Vec::new();
        data.extend(encode_entry(&layout, 0, 3, 100));
        data.extend(encode_entry(&layout, 1, 0, 0));
        data.extend(encode_entry(&layout, 2, 7, 250));

        let vocab = Vocabulary::new(&data, layout);
        assert_eq!(
            vocab.lookup(0).unwrap(),
            VocabEntry {
                postings_count: 3,
                postings_offset: 100
            }
        );
        assert_eq!(
            vocab.lookup(2).unwrap(),
            VocabEntry {
                postings_count: 7,
                postings_offset: 250
            }
        );
    }

    #[test]
    fn empty_posting_list_has_zero_count() {
        let layout = BinaryLayout::uniform(4);
        let data = encode_entry(&layout, 0, 0, 0);
        let vocab = Vocabulary::new(&data, layout);
        assert_eq!(vocab.lookup(0).unwrap().postings_count, 0);
    }

    #[test]
    fn truncated_file_is_corruption_not_panic() {
        let layout = BinaryLayout::uniform(4);
        let data = vec![0u8; 2];
        let vocab = Vocabulary::new(&data, layout);
        assert!(vocab.lookup(0).is_err());
    }
}
