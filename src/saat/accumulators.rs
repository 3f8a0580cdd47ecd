//! Dense per-document partial score storage (C4).

/// Partial score for every document in the index, indexed by docid.
/// Cleared (not reallocated) once per query.
pub struct Accumulators {
    values: Vec<i64>,
}

impl Accumulators {
    pub fn new(num_docs: u64) -> Self {
        Self {
            values: vec![0; num_docs as usize],
        }
    }

    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0);
    }

    pub fn get(&self, docid: u64) -> i64 {
        self.values[docid as usize]
    }

    /// Adds `delta` to `docid`'s accumulator and returns the new value.
    pub fn add(&mut self, docid: u64, delta: i64) -> i64 {
        let slot = &mut self.values[docid as usize];
        *slot += delta;
        *slot
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
