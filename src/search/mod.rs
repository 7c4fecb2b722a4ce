//! Search over vault notes
//!
//! Title and full-text search, folder listing, tag extraction and vault
//! statistics, all computed by scanning the vault on each call.

pub mod engine;
pub mod snippet;

pub use engine::{QueryEngine, TagIndex, VaultInfo};
pub use snippet::SnippetFinder;
