//! Query shortening (C7): reduce a query to a target distinct-term count
//! while preserving protected terms and relative order.
//!
//! Operates over term *strings*, not termids — the original source looks
//! words up by string in the text vocabulary at this stage; termid
//! resolution happens afterward, once the (possibly shortened) query is
//! handed to the SAAT driver.

/// Looks up a term's occurrence count by string. Backed by the on-disk
/// vocabulary in production; a plain map is enough for tests.
pub trait ShortenVocabulary {
    /// `None` if the term does not occur in the vocabulary at all.
    fn occurrence_count(&self, term: &str) -> Option<u64>;
}

/// Bitset recording which heuristics fired, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShorteningCodes(u8);

impl ShorteningCodes {
    pub const NOEXIST: u8 = 1 << 0;
    pub const ALL_DIGITS: u8 = 1 << 1;
    pub const HIGH_FREQ: u8 = 1 << 2;

    fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    pub fn contains(&self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    pub cg_terms: Vec<String>,
    pub candidate_generation_query: String,
    pub shortening_codes: ShorteningCodes,
}

fn is_protected(term: &str) -> bool {
    term.starts_with('"') || term.starts_with('[')
}

fn all_digits(term: &str) -> bool {
    term.chars().all(|c| c.is_ascii_digit())
}

/// Distinct-term count: a backward scan over unprotected terms only.
/// Protected terms always count, even if an identical phrase repeats.
fn count_distinct(terms: &[String]) -> usize {
    let mut distinct = 0;
    for t in 0..terms.len() {
        let repeated = !is_protected(&terms[t]) && (0..t).rev().any(|u| terms[u] == terms[t]);
        if !repeated {
            distinct += 1;
        }
    }
    distinct
}

/// Reduces `terms` to at most `threshold` distinct terms, in four passes:
/// non-existent terms, then (if still over threshold) all-digit terms, then
/// (if still over threshold) highest-frequency terms down to a floor of
/// `n / 10` occurrences — unless already close to the target, in which case
/// rare terms are left alone. `threshold == 0` disables shortening entirely.
pub fn shorten(
    terms: &[String],
    threshold: usize,
    n: u64,
    vocab: &dyn ShortenVocabulary,
) -> ShortenResult {
    let mut distinct = count_distinct(terms);

    if threshold == 0 || distinct <= threshold {
        return ShortenResult {
            cg_terms: terms.to_vec(),
            candidate_generation_query: terms.join(" "),
            shortening_codes: ShorteningCodes::default(),
        };
    }

    let mut zap = vec![false; terms.len()];
    let mut freq = vec![0u64; terms.len()];
    let mut codes = ShorteningCodes::default();
    let mut cg_count = terms.len();

    // 1. Non-existent terms: always fully applied, regardless of threshold.
    for u in 0..terms.len() {
        if is_protected(&terms[u]) {
            continue;
        }
        match vocab.occurrence_count(&terms[u]) {
            None => {
                zap[u] = true;
                codes.set(ShorteningCodes::NOEXIST);
                cg_count -= 1;
                distinct -= 1;
            }
            Some(count) => freq[u] = count,
        }
    }

    // 3. All-digit terms.
    if distinct > threshold {
        for u in 0..terms.len() {
            if zap[u] || is_protected(&terms[u]) {
                continue;
            }
            if all_digits(&terms[u]) {
                zap[u] = true;
                codes.set(ShorteningCodes::ALL_DIGITS);
                cg_count -= 1;
                distinct -= 1;
                if distinct <= threshold {
                    break;
                }
            }
        }
    }

    // 4. Highest-frequency terms, guarded against stripping rare terms when
    // already close to the target.
    if distinct > threshold {
        let mut perm: Vec<usize> = (0..terms.len()).collect();
        perm.sort_by(|&a, &b| freq[b].cmp(&freq[a]));
        let freq_thresh = n / 10;

        for v in perm {
            if zap[v] {
                continue;
            }
            if cg_count <= threshold + 2 && freq[v] < freq_thresh {
                break;
            }
            zap[v] = true;
            codes.set(ShorteningCodes::HIGH_FREQ);
            cg_count -= 1;
            distinct -= 1;
            if distinct <= threshold {
                break;
            }
        }
    }

    let cg_terms: Vec<String> = terms
        .iter()
        .zip(zap.iter())
        .filter(|(_, &z)| !z)
        .map(|(t, _)| t.clone())
        .collect();
    let candidate_generation_query = cg_terms.join(" ");

    ShortenResult {
        cg_terms,
        candidate_generation_query,
        shortening_codes: codes,
    }
}
