//! Score-at-a-time query evaluation: accumulators, bounded top-k, and the
//! driver that ties them to the index reader.

pub mod accumulators;
pub mod driver;
pub mod topk;

pub use accumulators::Accumulators;
pub use driver::{Ranking, SaatDriver};
pub use topk::BoundedRanking;
