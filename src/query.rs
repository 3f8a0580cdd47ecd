//! Minimal query-line parsing: whitespace-separated decimal termids.
//!
//! Line tokenization and input buffering in general are out of scope (an
//! external collaborator); this only covers turning one already-read line
//! into the bounded termid vector the driver consumes.

/// A query line holds at most this many parsed termids; anything beyond is
/// silently ignored, matching the original source's fixed-size query array.
pub const MAX_QTERMS: usize = 100;

/// Parses a stdin query line into termids.
///
/// Stops at the first token that fails to parse as a non-negative integer —
/// trailing junk after that point is ignored, and everything parsed so far
/// is kept. Caps at [`MAX_QTERMS`] tokens.
pub fn parse_query_line(line: &str) -> Vec<u64> {
    let mut termids = Vec::new();
    for token in line.split_whitespace() {
        if termids.len() >= MAX_QTERMS {
            break;
        }
        match token.parse::<u64>() {
            Ok(termid) => termids.push(termid),
            Err(_) => break,
        }
    }
    termids
}
