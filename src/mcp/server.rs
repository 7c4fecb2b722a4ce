//! Vault MCP Server implementation

use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParam, CallToolResult, Content, JsonObject, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_router, ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use serde_json::Value;

use crate::core::config::VaultConfig;
use crate::tools::{
    ListNotesParams, NotePathParams, Operation, SearchParams, ToolOutput, VaultTools,
    WriteNoteParams,
};

/// Vault MCP Service
#[derive(Clone)]
pub struct VaultService {
    tools: Arc<VaultTools>,
    tool_router: ToolRouter<Self>,
}

impl VaultService {
    pub fn new(config: &VaultConfig) -> Self {
        Self {
            tools: Arc::new(VaultTools::new(config)),
            tool_router: Self::tool_router(),
        }
    }

    fn respond(&self, operation: Operation) -> Result<CallToolResult, McpError> {
        Ok(into_call_result(self.tools.execute(operation)))
    }

    /// Dispatches by tool name, so unknown names and malformed arguments
    /// come back as `{"error": ...}` results like any other failure.
    fn call_by_name(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        into_call_result(self.tools.call(name, arguments))
    }
}

/// Errors stay tool results (with `isError` set) rather than protocol faults.
fn into_call_result(output: ToolOutput) -> CallToolResult {
    let content = vec![Content::text(output.to_json())];
    if output.is_error() {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

#[tool_router]
impl VaultService {
    #[tool(description = "List markdown notes in the Obsidian vault, most recently modified first")]
    async fn list_notes(
        &self,
        params: Parameters<ListNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Operation::ListNotes(params.0))
    }

    #[tool(description = "Read a note's content by path")]
    async fn get_note(&self, params: Parameters<NotePathParams>) -> Result<CallToolResult, McpError> {
        self.respond(Operation::GetNote(params.0))
    }

    #[tool(description = "Create a new note or overwrite existing")]
    async fn create_note(
        &self,
        params: Parameters<WriteNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Operation::CreateNote(params.0))
    }

    #[tool(description = "Update an existing note's content")]
    async fn update_note(
        &self,
        params: Parameters<WriteNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Operation::UpdateNote(params.0))
    }

    #[tool(description = "Search notes by title")]
    async fn search_notes(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        self.respond(Operation::SearchNotes(params.0))
    }

    #[tool(description = "Search within note content")]
    async fn full_text_search(
        &self,
        params: Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.respond(Operation::FullTextSearch(params.0))
    }

    #[tool(description = "List all folders in the vault")]
    async fn list_folders(&self) -> Result<CallToolResult, McpError> {
        self.respond(Operation::ListFolders)
    }

    #[tool(description = "Get all tags used in the vault")]
    async fn get_tags(&self) -> Result<CallToolResult, McpError> {
        self.respond(Operation::GetTags)
    }

    #[tool(description = "Delete a note (moves to .trash)")]
    async fn delete_note(&self, params: Parameters<NotePathParams>) -> Result<CallToolResult, McpError> {
        self.respond(Operation::DeleteNote(params.0))
    }

    #[tool(description = "Get vault statistics and info")]
    async fn get_vault_info(&self) -> Result<CallToolResult, McpError> {
        self.respond(Operation::GetVaultInfo)
    }
}

// The router publishes the tool schemas; calls go through `call_by_name`.
impl ServerHandler for VaultService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Obsidian vault MCP server. Read, write and search Markdown notes in a local vault."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            meta: None,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.call_by_name(&request.name, request.arguments))
    }
}

/// Run the MCP server
pub async fn run_mcp_server(config: VaultConfig) -> Result<()> {
    use tokio::io::{stdin, stdout};

    tracing::info!(vault = %config.root.display(), "starting MCP server");
    let service = VaultService::new(&config);
    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
