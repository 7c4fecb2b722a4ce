use std::path::PathBuf;

/// Folder Obsidian keeps its own settings in.
pub const METADATA_DIR: &str = ".obsidian";
/// Folder soft-deleted notes are moved into.
pub const TRASH_DIR: &str = ".trash";
pub const NOTE_EXTENSION: &str = "md";

const DEFAULT_VAULT_DIR: &str = "Obsidian Vault";

/// Settings fixed at process start and shared by every operation.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub root: PathBuf,
    pub metadata_dir: String,
    pub trash_dir: String,
    pub extension: String,
}

impl VaultConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            metadata_dir: METADATA_DIR.to_string(),
            trash_dir: TRASH_DIR.to_string(),
            extension: NOTE_EXTENSION.to_string(),
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self::new(default_vault_path())
    }
}

/// `~/Obsidian Vault`, or a relative `Obsidian Vault` when no home directory is known.
pub fn default_vault_path() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_VAULT_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_VAULT_DIR))
}
