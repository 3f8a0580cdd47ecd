//! Per-term run iteration over the postings region (C3) and the term
//! control block (TCB) that the SAAT driver selects among.

use crate::error::{EngineError, Result};
use crate::index::codec::Cursor;
use crate::index::layout::BinaryLayout;

/// Lifecycle state of one term's traversal through its posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcbState {
    /// Never opened — the term had zero postings to begin with.
    Unopened,
    /// Positioned on a run with postings left to yield.
    Active,
    /// No further runs; the driver should stop selecting this term.
    Exhausted,
}

/// Per-query-term traversal state. One array of these is allocated once and
/// reused across queries (cleared, not reallocated) by the driver.
#[derive(Debug, Clone, Copy)]
pub struct TermControlBlock {
    pub state: TcbState,
    /// qscore of the run currently at the cursor; meaningless when exhausted.
    pub highest_unprocessed_score: u64,
    /// Number of docids left to read in the current run.
    pub current_run_len: u64,
    /// Total postings not yet consumed for this term (across all runs).
    pub postings_remaining: u64,
    cursor_pos: usize,
}

impl TermControlBlock {
    /// A TCB for a term with no postings at all.
    pub fn empty() -> Self {
        Self {
            state: TcbState::Unopened,
            highest_unprocessed_score: 0,
            current_run_len: 0,
            postings_remaining: 0,
            cursor_pos: 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, TcbState::Exhausted | TcbState::Unopened)
    }
}

/// Opens a term's posting list: positions at `postings_offset`, reads the
/// first run header, and sets up `postings_remaining` from the vocabulary's
/// `postings_count`.
pub fn open(
    postings: &[u8],
    layout: &BinaryLayout,
    postings_offset: u64,
    postings_count: u64,
) -> Result<TermControlBlock> {
    if postings_count == 0 {
        return Ok(TermControlBlock::empty());
    }

    let start = usize::try_from(postings_offset)
        .map_err(|_| EngineError::Corruption("postings offset overflow".to_string()))?;
    let mut cursor = Cursor::at(postings, start);
    let qscore = cursor.read_uint(layout.qscore_width)?;
    let run_len = cursor.read_uint(layout.run_len_width)?;

    Ok(TermControlBlock {
        state: TcbState::Active,
        highest_unprocessed_score: qscore,
        current_run_len: run_len,
        postings_remaining: postings_count,
        cursor_pos: cursor.position(),
    })
}

/// Reads the current run's docids, decrements `postings_remaining`, and
/// advances the TCB to the next run header (or marks it exhausted).
///
/// Docids are read at `docid_width` but the cursor between them advances by
/// `docid_stride()` — reproduced exactly rather than corrected, per the
/// documented behavior of the original source (see `BinaryLayout`).
pub fn consume_run(
    tcb: &mut TermControlBlock,
    postings: &[u8],
    layout: &BinaryLayout,
) -> Result<Vec<u64>> {
    if tcb.is_exhausted() {
        return Ok(Vec::new());
    }

    let mut cursor = Cursor::at(postings, tcb.cursor_pos);
    let run_len = tcb.current_run_len;
    let mut docids = Vec::with_capacity(run_len as usize);
    for _ in 0..run_len {
        let docid = cursor.read_uint_strided(layout.docid_width, layout.docid_stride())?;
        docids.push(docid);
    }

    tcb.postings_remaining = tcb.postings_remaining.saturating_sub(run_len);

    if tcb.postings_remaining > 0 {
        let qscore = cursor.read_uint(layout.qscore_width)?;
        let next_run_len = cursor.read_uint(layout.run_len_width)?;
        tcb.highest_unprocessed_score = qscore;
        tcb.current_run_len = next_run_len;
        tcb.cursor_pos = cursor.position();
    } else {
        tcb.state = TcbState::Exhausted;
    }

    Ok(docids)
}
