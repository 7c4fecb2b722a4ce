//! obsidian-mcp library
//!
//! Confined filesystem access to an Obsidian vault, exposed as MCP tools.
//!
//! # Modules
//!
//! - `core`: vault layout, path containment, scanning, note storage, tags
//! - `search`: listing, title and full-text search, tag index, statistics
//! - `tools`: typed tool calls and the error-as-data dispatcher
//! - `mcp`: stdio MCP server (feature `mcp`)

pub mod core;
pub mod logging;
#[cfg(feature = "mcp")]
pub mod mcp;
pub mod search;
pub mod tools;

// Re-exports for convenience
pub use crate::core::config::VaultConfig;
pub use crate::core::error::{VaultError, VaultResult};
pub use crate::core::note::{Note, NoteStore, NoteSummary, Receipt};
pub use crate::core::paths::{ResolvedPath, VaultPaths};
pub use crate::core::scanner::{EntryFilter, VaultEntry, VaultScanner};
pub use crate::core::tags::{extract_tags, TagScanner};
pub use crate::search::{QueryEngine, TagIndex, VaultInfo};
pub use crate::tools::{Operation, ToolOutput, VaultTools};
