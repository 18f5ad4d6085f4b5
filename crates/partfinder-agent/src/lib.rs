//! The `find_parts` orchestrator: structured search, organic top-up and
//! page enrichment, merged into one ranked response.

pub mod error;
pub mod finder;

pub use error::FinderError;
pub use finder::{FinderOptions, PartFinder};
