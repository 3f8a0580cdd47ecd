//! On-disk index format: memory-mapped reader, binary layout, vocabulary
//! lookup, and posting-list run iteration.

pub mod codec;
pub mod layout;
pub mod postings;
pub mod reader;
pub mod vocabulary;

pub use layout::BinaryLayout;
pub use postings::{TcbState, TermControlBlock};
pub use reader::IndexReader;
pub use vocabulary::{VocabEntry, Vocabulary};
