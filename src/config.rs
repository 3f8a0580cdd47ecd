//! Engine parameters.
//!
//! Mirrors the `params_t` global of the original source, but held as a
//! plain value passed explicitly to the evaluator instead of a process-wide
//! static (see DESIGN.md, "Global state → explicit context").

use crate::error::{EngineError, Result};
use std::path::PathBuf;

/// Parameters controlling one run of the SAAT evaluator.
#[derive(Debug, Clone)]
pub struct EngineParams {
    /// Path prefix for `<indexStem>.vocab` / `<indexStem>.if`.
    pub index_stem: PathBuf,

    /// Number of distinct term ids in the index. Required, > 0.
    pub num_terms: u64,

    /// Number of distinct document ids in the index. Required, > 0.
    pub num_docs: u64,

    /// Maximum number of results kept per query.
    pub k: usize,

    /// Runs whose qscore falls below this are never processed.
    pub low_score_cutoff: i64,

    /// 0 disables the posting-budget cutoff. Compared with `>`, not `>=`
    /// (see DESIGN.md) — preserved exactly from the source.
    pub postings_count_cutoff: u64,

    /// Verbosity level; 0 = silent, >0 = increasingly chatty stderr tracing.
    pub debug: u32,

    /// 0 disables query shortening.
    pub query_shortening_threshold: usize,

    /// Corpus document count used by the high-frequency shortening
    /// heuristic. Defaults to `num_docs` when not given on the CLI.
    pub n: u64,
}

impl EngineParams {
    /// Validates the combination the original `q.c` checks in `main`:
    /// `indexStem`, `numTerms > 0`, `numDocs > 0`.
    pub fn validate(&self) -> Result<()> {
        if self.num_terms == 0 {
            return Err(EngineError::MissingParameter("numTerms".into()));
        }
        if self.num_docs == 0 {
            return Err(EngineError::MissingParameter("numDocs".into()));
        }
        if self.k == 0 {
            return Err(EngineError::InvalidParameter("k must be >= 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> EngineParams {
        EngineParams {
            index_stem: PathBuf::from("/tmp/whatever"),
            num_terms: 10,
            num_docs: 10,
            k: 5,
            low_score_cutoff: 0,
            postings_count_cutoff: 0,
            debug: 0,
            query_shortening_threshold: 0,
            n: 10,
        }
    }

    #[test]
    fn rejects_zero_num_terms() {
        let mut p = base();
        p.num_terms = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_zero_k() {
        let mut p = base();
        p.k = 0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn accepts_valid_params() {
        assert!(base().validate().is_ok());
    }
}
