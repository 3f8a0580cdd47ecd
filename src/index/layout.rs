//! Byte widths of the fixed-width binary records described in the data
//! model: vocabulary entries and posting-list run headers.
//!
//! The original source compiles these as constants. Nothing in the decode
//! path actually requires that, so the port keeps them as a value —
//! `BinaryLayout::classic()` reproduces the widths used throughout the
//! distilled spec's end-to-end scenarios (§8).

/// Field widths (in bytes) for the on-disk vocabulary and postings format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryLayout {
    pub termid_width: usize,
    pub postings_count_width: usize,
    pub index_offset_width: usize,
    pub qscore_width: usize,
    pub run_len_width: usize,
    pub docid_width: usize,
}

impl BinaryLayout {
    /// Widths used by the distilled spec's worked examples (§8):
    /// qscore=1, run_len=2, docid=4, termid=3, postings_count=3, offset=5.
    ///
    /// `run_len_width != docid_width` here, so [`Self::docid_stride`] is
    /// genuinely at odds with `docid_width` under this layout. Use this
    /// constructor only where that mismatch itself is under test; build
    /// ordinary fixtures with [`Self::uniform`] instead, where the stride
    /// bug is harmless because the two widths coincide.
    pub fn classic() -> Self {
        Self {
            termid_width: 3,
            postings_count_width: 3,
            index_offset_width: 5,
            qscore_width: 1,
            run_len_width: 2,
            docid_width: 4,
        }
    }

    /// A layout with `run_len_width == docid_width`, so the docid stride
    /// bug (see [`Self::docid_stride`]) has no observable effect. This is
    /// what synthetic test fixtures should build against unless the bug
    /// itself is the thing under test.
    pub fn uniform(docid_width: usize) -> Self {
        Self {
            termid_width: 3,
            postings_count_width: 3,
            index_offset_width: 5,
            qscore_width: 1,
            run_len_width: docid_width,
            docid_width,
        }
    }

    /// Size in bytes of one fixed-width vocabulary entry:
    /// `termid | postings_count | postings_offset`.
    pub fn vocab_entry_width(&self) -> usize {
        self.termid_width + self.postings_count_width + self.index_offset_width
    }

    /// Size in bytes of one run header: `qscore_header | run_length`.
    pub fn run_header_width(&self) -> usize {
        self.qscore_width + self.run_len_width
    }

    /// The stride used to advance past one docid within a run body.
    ///
    /// This is **not** `docid_width`. The original source
    /// (`original_source/satire/src/q/q.c`, in `process_query`) reads a
    /// docid that is `BYTES_FOR_DOCID` wide but then advances its cursor by
    /// `BYTES_FOR_RUN_LEN`:
    ///
    /// ```c
    /// docid = (int) make_ull_from_n_bytes(term_control_block[chosen].if_pointer, BYTES_FOR_DOCID);
    /// ...
    /// term_control_block[chosen].if_pointer += BYTES_FOR_RUN_LEN;
    /// ```
    ///
    /// When `run_len_width == docid_width` (see [`Self::uniform`]) this is
    /// harmless. Under [`Self::classic`] the two widths differ, so repeated
    /// reads walk the run body at the wrong cadence. This port reproduces
    /// the behavior exactly rather than "fixing" it (see DESIGN.md).
    pub fn docid_stride(&self) -> usize {
        self.run_len_width
    }
}
