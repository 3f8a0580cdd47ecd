//! SAAT driver (C6): the priority-driven traversal that ties C2–C5 together.

use crate::config::EngineParams;
use crate::error::{EngineError, Result};
use crate::index::{postings, BinaryLayout, TermControlBlock, Vocabulary};
use crate::saat::accumulators::Accumulators;
use crate::saat::topk::BoundedRanking;

/// `(rank, docid, score)`, rank 1-based, in descending-score order.
pub type Ranking = Vec<(usize, u64, i64)>;

/// Owns the per-query scratch state (accumulators, top-k list, TCB array)
/// and reuses it — cleared, never reallocated — across queries.
pub struct SaatDriver {
    accumulators: Accumulators,
    topk: BoundedRanking,
    tcbs: Vec<TermControlBlock>,
}

impl SaatDriver {
    pub fn new(num_docs: u64, k: usize) -> Self {
        Self {
            accumulators: Accumulators::new(num_docs),
            topk: BoundedRanking::new(k),
            tcbs: Vec::new(),
        }
    }

    /// Evaluates one query — a sequence of already-resolved termids — and
    /// returns its ranking.
    pub fn evaluate(
        &mut self,
        query_termids: &[u64],
        vocab: &Vocabulary,
        postings_region: &[u8],
        layout: &BinaryLayout,
        params: &EngineParams,
    ) -> Result<Ranking> {
        self.accumulators.clear();
        self.topk.clear();
        self.tcbs.clear();

        for &termid in query_termids {
            let entry = vocab.lookup(termid)?;
            let tcb = if entry.postings_count > 0 {
                postings::open(
                    postings_region,
                    layout,
                    entry.postings_offset,
                    entry.postings_count,
                )?
            } else {
                TermControlBlock::empty()
            };
            self.tcbs.push(tcb);
        }

        let mut terms_still_going = self.tcbs.iter().filter(|t| t.postings_remaining > 0).count();
        let mut postings_processed: u64 = 0;

        while terms_still_going > 0 {
            let chosen = self.select_chosen()?;
            let max_qscore = self.tcbs[chosen].highest_unprocessed_score;

            if (max_qscore as i64) < params.low_score_cutoff {
                break;
            }

            let docids = postings::consume_run(&mut self.tcbs[chosen], postings_region, layout)?;
            postings_processed += docids.len() as u64;
            for d in docids {
                self.accumulators.add(d, max_qscore as i64);
                self.topk.insert(d, &self.accumulators);
            }

            if params.postings_count_cutoff > 0 && postings_processed > params.postings_count_cutoff {
                break;
            }

            if self.tcbs[chosen].postings_remaining == 0 {
                terms_still_going -= 1;
            }
        }

        Ok(self.topk.ranking(&self.accumulators).collect())
    }

    /// Largest `highest_unprocessed_score` among TCBs with postings left;
    /// ties go to the lowest index (strict `>` only replaces, never ≥).
    fn select_chosen(&self) -> Result<usize> {
        let mut chosen: Option<(usize, u64)> = None;
        for (i, tcb) in self.tcbs.iter().enumerate() {
            if tcb.postings_remaining == 0 {
                continue;
            }
            match chosen {
                Some((_, best)) if tcb.highest_unprocessed_score <= best => {}
                _ => chosen = Some((i, tcb.highest_unprocessed_score)),
            }
        }
        chosen.map(|(i, _)| i).ok_or_else(|| {
            EngineError::InternalInvariant(
                "no term selected while terms_still_going > 0".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::layout::BinaryLayout;

    fn be_bytes(value: u64, width: usize) -> Vec<u8> {
        value.to_be_bytes()[8 - width..].to_vec()
    }

    fn encode_vocab_entry(layout: &BinaryLayout, termid: u64, count: u64, offset: u64) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(be_bytes(termid, layout.termid_width));
        out.extend(be_bytes(count, layout.postings_count_width));
        out.extend(be_bytes(offset, layout.index_offset_width));
        out
    }

    fn encode_run(layout: &BinaryLayout, qscore: u64, docids: &[u64]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend(be_bytes(qscore, layout.qscore_width));
        out.extend(be_bytes(docids.len() as u64, layout.run_len_width));
        for &d in docids {
            out.extend(be_bytes(d, layout.docid_width));
        }
        out
    }

    fn base_params() -> EngineParams {
        EngineParams {
            index_stem: std::path::PathBuf::from("/tmp/x"),
            num_terms: 8,
            num_docs: 16,
            k: 5,
            low_score_cutoff: 0,
            postings_count_cutoff: 0,
            debug: 0,
            query_shortening_threshold: 0,
            n: 16,
        }
    }

    #[test]
    fn single_term_single_run() {
        let layout = BinaryLayout::uniform(4);
        let mut vocab_data = Vec::new();
        vocab_data.extend(encode_vocab_entry(&layout, 0, 0, 0));
        for _ in 1..7 {
            vocab_data.extend(encode_vocab_entry(&layout, 0, 0, 0));
        }
        vocab_data.extend(encode_vocab_entry(&layout, 7, 2, 0));

        let postings_data = encode_run(&layout, 10, &[5, 9]);

        let vocab = Vocabulary::new(&vocab_data, layout);
        let params = base_params();
        let mut driver = SaatDriver::new(params.num_docs, params.k);

        let ranking = driver
            .evaluate(&[7], &vocab, &postings_data, &layout, &params)
            .unwrap();
        assert_eq!(ranking, vec![(1, 5, 10), (2, 9, 10)]);
    }

    #[test]
    fn two_terms_overlapping_doc() {
        let layout = BinaryLayout::uniform(4);
        let run1 = encode_run(&layout, 8, &[3, 4]);
        let run2 = encode_run(&layout, 6, &[4, 7]);
        let mut postings_data = run1.clone();
        let off2 = postings_data.len() as u64;
        postings_data.extend(run2);

        let mut vocab_data = Vec::new();
        vocab_data.extend(encode_vocab_entry(&layout, 0, 0, 0));
        vocab_data.extend(encode_vocab_entry(&layout, 1, 2, 0));
        vocab_data.extend(encode_vocab_entry(&layout, 2, 2, off2));
        let vocab = Vocabulary::new(&vocab_data, layout);

        let mut params = base_params();
        params.k = 3;
        let mut driver = SaatDriver::new(params.num_docs, params.k);

        let ranking = driver
            .evaluate(&[1, 2], &vocab, &postings_data, &layout, &params)
            .unwrap();
        assert_eq!(ranking, vec![(1, 4, 14), (2, 3, 8), (3, 7, 6)]);
    }

    #[test]
    fn low_score_cutoff_stops_second_term() {
        let layout = BinaryLayout::uniform(4);
        let run1 = encode_run(&layout, 8, &[3, 4]);
        let run2 = encode_run(&layout, 6, &[4, 7]);
        let mut postings_data = run1.clone();
        let off2 = postings_data.len() as u64;
        postings_data.extend(run2);

        let mut vocab_data = Vec::new();
        vocab_data.extend(encode_vocab_entry(&layout, 0, 0, 0));
        vocab_data.extend(encode_vocab_entry(&layout, 1, 2, 0));
        vocab_data.extend(encode_vocab_entry(&layout, 2, 2, off2));
        let vocab = Vocabulary::new(&vocab_data, layout);

        let mut params = base_params();
        params.k = 3;
        params.low_score_cutoff = 7;
        let mut driver = SaatDriver::new(params.num_docs, params.k);

        let mut ranking = driver
            .evaluate(&[1, 2], &vocab, &postings_data, &layout, &params)
            .unwrap();
        ranking.sort_by_key(|&(_, d, _)| d);
        assert_eq!(ranking, vec![(2, 3, 8), (1, 4, 8)]);
    }

    #[test]
    fn posting_budget_cutoff_stops_after_first_run() {
        let layout = BinaryLayout::uniform(4);
        let docids1: Vec<u64> = (0..100).collect();
        let docids2: Vec<u64> = (200..300).collect();
        let run1 = encode_run(&layout, 9, &docids1);
        let run2 = encode_run(&layout, 5, &docids2);
        let mut postings_data = run1.clone();
        let off2 = postings_data.len() as u64;
        postings_data.extend(run2);

        let mut vocab_data = Vec::new();
        vocab_data.extend(encode_vocab_entry(&layout, 0, 0, 0));
        vocab_data.extend(encode_vocab_entry(&layout, 1, 100, 0));
        vocab_data.extend(encode_vocab_entry(&layout, 2, 100, off2));
        let vocab = Vocabulary::new(&vocab_data, layout);

        let mut params = base_params();
        params.num_docs = 300;
        params.k = 5;
        params.postings_count_cutoff = 50;
        let mut driver = SaatDriver::new(params.num_docs, params.k);

        let ranking = driver
            .evaluate(&[1, 2], &vocab, &postings_data, &layout, &params)
            .unwrap();
        assert!(ranking.iter().all(|&(_, d, s)| d < 100 && s == 9));
    }

    #[test]
    fn empty_query_yields_empty_ranking() {
        let layout = BinaryLayout::uniform(4);
        let vocab_data = encode_vocab_entry(&layout, 0, 0, 0);
        let vocab = Vocabulary::new(&vocab_data, layout);
        let params = base_params();
        let mut driver = SaatDriver::new(params.num_docs, params.k);

        let ranking = driver.evaluate(&[], &vocab, &[], &layout, &params).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn all_empty_posting_lists_yields_empty_ranking() {
        let layout = BinaryLayout::uniform(4);
        let mut vocab_data = Vec::new();
        vocab_data.extend(encode_vocab_entry(&layout, 0, 0, 0));
        vocab_data.extend(encode_vocab_entry(&layout, 1, 0, 0));
        let vocab = Vocabulary::new(&vocab_data, layout);
        let params = base_params();
        let mut driver = SaatDriver::new(params.num_docs, params.k);

        let ranking = driver
            .evaluate(&[0, 1], &vocab, &[], &layout, &params)
            .unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn k_equals_one_keeps_only_argmax() {
        let layout = BinaryLayout::uniform(4);
        let postings_data = encode_run(&layout, 10, &[5, 9]);
        let mut vocab_data = Vec::new();
        for t in 0..7 {
            vocab_data.extend(encode_vocab_entry(&layout, t, 0, 0));
        }
        vocab_data.extend(encode_vocab_entry(&layout, 7, 2, 0));
        let vocab = Vocabulary::new(&vocab_data, layout);

        let mut params = base_params();
        params.k = 1;
        let mut driver = SaatDriver::new(params.num_docs, params.k);
        let ranking = driver
            .evaluate(&[7], &vocab, &postings_data, &layout, &params)
            .unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].1, 5);
    }

    #[test]
    fn cutoff_above_every_qscore_yields_empty_ranking() {
        let layout = BinaryLayout::uniform(4);
        let postings_data = encode_run(&layout, 10, &[5, 9]);
        let mut vocab_data = Vec::new();
        for t in 0..7 {
            vocab_data.extend(encode_vocab_entry(&layout, t, 0, 0));
        }
        vocab_data.extend(encode_vocab_entry(&layout, 7, 2, 0));
        let vocab = Vocabulary::new(&vocab_data, layout);

        let mut params = base_params();
        params.low_score_cutoff = 100;
        let mut driver = SaatDriver::new(params.num_docs, params.k);
        let ranking = driver
            .evaluate(&[7], &vocab, &postings_data, &layout, &params)
            .unwrap();
        assert!(ranking.is_empty());
    }
}
