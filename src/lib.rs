//! Score-at-a-time query evaluation over a memory-mapped, impact-ordered
//! inverted index, plus the query-shortening preprocessor that feeds it.
//!
//! Index construction, CLI parsing, stdin buffering, and the substitution
//! rules engine are external collaborators; this crate covers the
//! evaluation core: [`index`] decodes the on-disk format, [`saat`] drives
//! the priority traversal, and [`shortener`] reduces over-long queries
//! before they reach the driver.

pub mod config;
pub mod error;
pub mod index;
pub mod query;
pub mod saat;
pub mod shortener;
pub mod substitution;

pub use config::EngineParams;
pub use error::{EngineError, Result};
