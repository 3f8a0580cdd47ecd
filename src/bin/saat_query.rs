//! `saat-query` — reads queries from stdin, one per line, and prints a
//! top-k ranking per query.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use saatq::index::{BinaryLayout, IndexReader, Vocabulary};
use saatq::query::parse_query_line;
use saatq::saat::SaatDriver;
use saatq::shortener::{self, ShortenVocabulary};
use saatq::{EngineError, EngineParams};

/// Score-at-a-time query evaluator over a memory-mapped inverted index.
#[derive(Parser, Debug)]
#[command(name = "saat-query")]
struct Cli {
    /// Path prefix for `<stem>.vocab` / `<stem>.if`.
    #[arg(long)]
    index_stem: PathBuf,

    /// Number of distinct term ids in the index.
    #[arg(long)]
    num_terms: u64,

    /// Number of distinct document ids in the index.
    #[arg(long)]
    num_docs: u64,

    /// Maximum number of results kept per query.
    #[arg(long, default_value_t = 10)]
    k: usize,

    /// Runs whose qscore falls below this are never processed.
    #[arg(long, default_value_t = 0)]
    low_score_cutoff: i64,

    /// 0 disables the posting-budget cutoff.
    #[arg(long, default_value_t = 0)]
    postings_count_cutoff: u64,

    /// Verbosity level.
    #[arg(long, default_value_t = 0)]
    debug: u32,

    /// 0 disables query shortening.
    #[arg(long, default_value_t = 0)]
    query_shortening_threshold: usize,

    /// Corpus document count for the high-frequency shortening heuristic.
    /// Defaults to `num_docs` when omitted.
    #[arg(long)]
    n: Option<u64>,
}

/// Adapts the positional, termid-indexed vocabulary to string-keyed lookups
/// for the shortener: each query token is itself a decimal termid, so
/// "occurrence count" here is just that term's postings count.
struct TermidVocabAdapter<'a> {
    vocab: &'a Vocabulary<'a>,
    num_terms: u64,
}

impl<'a> ShortenVocabulary for TermidVocabAdapter<'a> {
    fn occurrence_count(&self, term: &str) -> Option<u64> {
        let termid: u64 = term.parse().ok()?;
        if termid >= self.num_terms {
            return None;
        }
        self.vocab.lookup(termid).ok().map(|e| e.postings_count)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let params = EngineParams {
        index_stem: cli.index_stem.clone(),
        num_terms: cli.num_terms,
        num_docs: cli.num_docs,
        k: cli.k,
        low_score_cutoff: cli.low_score_cutoff,
        postings_count_cutoff: cli.postings_count_cutoff,
        debug: cli.debug,
        query_shortening_threshold: cli.query_shortening_threshold,
        n: cli.n.unwrap_or(cli.num_docs),
    };

    if let Err(e) = params.validate() {
        eprintln!("error: {e}");
        return ExitCode::from(1);
    }

    let reader = match IndexReader::open(&params.index_stem) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let layout = BinaryLayout::classic();
    let vocab = Vocabulary::new(reader.vocab(), layout);
    let mut driver = SaatDriver::new(params.num_docs, params.k);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut query_count: u64 = 0;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let original_termids = parse_query_line(&line);
        let mut termids = original_termids.clone();

        if params.query_shortening_threshold > 0 {
            let string_terms: Vec<String> = termids.iter().map(|t| t.to_string()).collect();
            let adapter = TermidVocabAdapter {
                vocab: &vocab,
                num_terms: params.num_terms,
            };
            let shortened = shortener::shorten(
                &string_terms,
                params.query_shortening_threshold,
                params.n,
                &adapter,
            );
            termids = shortened
                .cg_terms
                .iter()
                .filter_map(|s| s.parse::<u64>().ok())
                .collect();
        }

        let header: Vec<String> = original_termids.iter().map(|t| t.to_string()).collect();
        let _ = writeln!(out, "Query: {}", header.join(" "));

        match driver.evaluate(&termids, &vocab, reader.postings(), &layout, &params) {
            Ok(ranking) => {
                for (rank, docid, score) in ranking {
                    let _ = writeln!(out, "{rank:8}{docid:8}{score:8}");
                }
            }
            Err(EngineError::InternalInvariant(msg)) => {
                eprintln!("fatal: {msg}");
                return ExitCode::from(1);
            }
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        }
        let _ = writeln!(out);

        query_count += 1;
        if query_count % 10 == 0 {
            eprintln!("{query_count} queries processed");
        }
    }

    ExitCode::SUCCESS
}
