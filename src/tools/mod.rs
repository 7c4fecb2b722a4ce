//! The nine vault operations behind a single dispatcher
//!
//! Every call ends in a [`ToolOutput`]; failures become `{"error": ...}`
//! payloads instead of propagating to the transport.

mod output;
mod params;

pub use output::{ErrorPayload, ToolOutput};
pub use params::{ListNotesParams, NotePathParams, SearchParams, WriteNoteParams};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::config::VaultConfig;
use crate::core::error::{VaultError, VaultResult};
use crate::core::note::NoteStore;
use crate::core::paths::VaultPaths;
use crate::search::QueryEngine;

/// Tool names accepted by [`Operation::parse`].
pub const TOOL_NAMES: [&str; 10] = [
    "list_notes",
    "get_note",
    "create_note",
    "update_note",
    "search_notes",
    "full_text_search",
    "list_folders",
    "get_tags",
    "delete_note",
    "get_vault_info",
];

/// A parsed tool call.
#[derive(Debug, Clone)]
pub enum Operation {
    ListNotes(ListNotesParams),
    GetNote(NotePathParams),
    CreateNote(WriteNoteParams),
    UpdateNote(WriteNoteParams),
    SearchNotes(SearchParams),
    FullTextSearch(SearchParams),
    ListFolders,
    GetTags,
    DeleteNote(NotePathParams),
    GetVaultInfo,
}

impl Operation {
    /// Builds an operation from a tool name and its JSON arguments.
    /// `null` arguments are treated as an empty object.
    pub fn parse(name: &str, arguments: Value) -> VaultResult<Self> {
        let arguments = if arguments.is_null() {
            Value::Object(Default::default())
        } else {
            arguments
        };

        Ok(match name {
            "list_notes" => Self::ListNotes(from_arguments(name, arguments)?),
            "get_note" => Self::GetNote(from_arguments(name, arguments)?),
            "create_note" => Self::CreateNote(from_arguments(name, arguments)?),
            "update_note" => Self::UpdateNote(from_arguments(name, arguments)?),
            "search_notes" => Self::SearchNotes(from_arguments(name, arguments)?),
            "full_text_search" => Self::FullTextSearch(from_arguments(name, arguments)?),
            "list_folders" => Self::ListFolders,
            "get_tags" => Self::GetTags,
            "delete_note" => Self::DeleteNote(from_arguments(name, arguments)?),
            "get_vault_info" => Self::GetVaultInfo,
            other => return Err(VaultError::UnknownTool(other.to_string())),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ListNotes(_) => "list_notes",
            Self::GetNote(_) => "get_note",
            Self::CreateNote(_) => "create_note",
            Self::UpdateNote(_) => "update_note",
            Self::SearchNotes(_) => "search_notes",
            Self::FullTextSearch(_) => "full_text_search",
            Self::ListFolders => "list_folders",
            Self::GetTags => "get_tags",
            Self::DeleteNote(_) => "delete_note",
            Self::GetVaultInfo => "get_vault_info",
        }
    }
}

fn from_arguments<T: DeserializeOwned>(tool: &str, arguments: Value) -> VaultResult<T> {
    serde_json::from_value(arguments).map_err(|e| VaultError::InvalidArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// Runs operations against one vault.
pub struct VaultTools {
    store: NoteStore,
    engine: QueryEngine,
}

impl VaultTools {
    pub fn new(config: &VaultConfig) -> Self {
        let paths = VaultPaths::from_config(config);
        Self {
            store: NoteStore::new(paths.clone()),
            engine: QueryEngine::new(paths),
        }
    }

    pub fn paths(&self) -> &VaultPaths {
        self.store.paths()
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Parses and runs a call by name. Unknown names and malformed
    /// arguments come back as error payloads.
    pub fn call(&self, name: &str, arguments: Value) -> ToolOutput {
        match Operation::parse(name, arguments) {
            Ok(operation) => self.execute(operation),
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "rejected tool call");
                e.into()
            }
        }
    }

    pub fn execute(&self, operation: Operation) -> ToolOutput {
        let name = operation.name();
        tracing::debug!(tool = name, "executing tool");

        match self.run(operation) {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(tool = name, error = %e, "tool failed");
                e.into()
            }
        }
    }

    fn run(&self, operation: Operation) -> VaultResult<ToolOutput> {
        Ok(match operation {
            Operation::ListNotes(p) => {
                ToolOutput::Notes(self.engine.list_notes(p.folder.as_deref(), p.limit)?)
            }
            Operation::GetNote(p) => ToolOutput::Note(self.store.read(&p.path)?),
            Operation::CreateNote(p) | Operation::UpdateNote(p) => {
                ToolOutput::Saved(self.store.write(&p.path, &p.content)?)
            }
            Operation::SearchNotes(p) => {
                ToolOutput::Notes(self.engine.search_by_title(&p.query, p.limit))
            }
            Operation::FullTextSearch(p) => {
                ToolOutput::Notes(self.engine.full_text_search(&p.query, p.limit)?)
            }
            Operation::ListFolders => ToolOutput::Folders(self.engine.list_folders()),
            Operation::GetTags => ToolOutput::Tags(self.engine.tags()),
            Operation::DeleteNote(p) => ToolOutput::Saved(self.store.delete(&p.path)?),
            Operation::GetVaultInfo => ToolOutput::Info(self.engine.vault_info()?),
        })
    }
}
