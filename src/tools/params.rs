use serde::Deserialize;

fn default_list_limit() -> usize {
    50
}

fn default_search_limit() -> usize {
    20
}

/// Arguments for `list_notes`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct ListNotesParams {
    /// Optional folder path to filter
    #[serde(default)]
    pub folder: Option<String>,
    /// Max results (default 50)
    #[serde(default = "default_list_limit")]
    pub limit: usize,
}

impl Default for ListNotesParams {
    fn default() -> Self {
        Self {
            folder: None,
            limit: default_list_limit(),
        }
    }
}

/// Arguments for `get_note` and `delete_note`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct NotePathParams {
    /// Path to the note (e.g., 'folder/note.md')
    pub path: String,
}

/// Arguments for `create_note` and `update_note`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct WriteNoteParams {
    /// Path for the note (e.g., 'folder/note.md'); `.md` is added if missing
    pub path: String,
    /// Markdown content
    pub content: String,
}

/// Arguments for `search_notes` and `full_text_search`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct SearchParams {
    /// Search query
    pub query: String,
    /// Max results (default 20)
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}
