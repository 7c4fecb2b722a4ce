//! MCP server for an Obsidian vault
//!
//! Exposes the vault tools to agent hosts over stdio.

mod server;

pub use server::{run_mcp_server, VaultService};
