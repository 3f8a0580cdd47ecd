//! Bounded top-k selector (C5).
//!
//! Called `fake_heap` in the original source despite being a sorted linear
//! array, not a heap — named for what it is here instead.

use crate::saat::accumulators::Accumulators;

/// A capacity-`k` list of docids, kept sorted descending by their *current*
/// accumulator value. Scores are never cached in the structure itself —
/// every comparison reads `accumulators[docid]` fresh, so a docid's
/// position always reflects its latest score.
pub struct BoundedRanking {
    k: usize,
    docids: Vec<u64>,
}

impl BoundedRanking {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            docids: Vec::with_capacity(k),
        }
    }

    pub fn clear(&mut self) {
        self.docids.clear();
    }

    pub fn len(&self) -> usize {
        self.docids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docids.is_empty()
    }

    /// Inserts or re-ranks `docid` given its current accumulator value.
    ///
    /// 1. Dedup: if already present, remove it first — a later, lower-qscore
    ///    term can still raise a document's total and require it to move.
    /// 2. Empty: place at position 0.
    /// 3. Full (`size == k` after dedup): drop if its score does not beat
    ///    the current last entry; otherwise displace the last entry.
    /// 4. Partial: insert in sorted position, growing the list by one.
    pub fn insert(&mut self, docid: u64, accumulators: &Accumulators) {
        let score = accumulators.get(docid);

        if let Some(pos) = self.docids.iter().position(|&d| d == docid) {
            self.docids.remove(pos);
        }

        if self.docids.is_empty() {
            self.docids.push(docid);
            return;
        }

        if self.docids.len() == self.k {
            let lowest = accumulators.get(*self.docids.last().expect("non-empty"));
            if score <= lowest {
                return;
            }
            let i = self.insertion_index(score, accumulators);
            self.docids.pop();
            self.docids.insert(i, docid);
            return;
        }

        let i = self.insertion_index(score, accumulators);
        self.docids.insert(i, docid);
    }

    /// Smallest `i` with `score >= accumulators[docids[i]]`, or `len()` if
    /// no such position exists (append at the end).
    fn insertion_index(&self, score: i64, accumulators: &Accumulators) -> usize {
        self.docids
            .iter()
            .position(|&d| score >= accumulators.get(d))
            .unwrap_or(self.docids.len())
    }

    /// The ranking in descending-score order: `(rank, docid, score)`,
    /// rank 1-based.
    pub fn ranking<'a>(
        &'a self,
        accumulators: &'a Accumulators,
    ) -> impl Iterator<Item = (usize, u64, i64)> + 'a {
        self.docids
            .iter()
            .enumerate()
            .map(move |(i, &d)| (i + 1, d, accumulators.get(d)))
    }
}
