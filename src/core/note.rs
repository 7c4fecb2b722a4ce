use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use super::error::{VaultError, VaultResult};
use super::paths::{ResolvedPath, VaultPaths};
use super::scanner::VaultEntry;

/// A note read in full.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub name: String,
    pub path: String,
    pub content: String,
    pub modified: DateTime<Local>,
    pub size: u64,
}

impl Note {
    pub fn load(resolved: &ResolvedPath) -> VaultResult<Self> {
        let content = fs::read_to_string(&resolved.absolute)?;
        let metadata = fs::metadata(&resolved.absolute)?;

        Ok(Self {
            name: display_name(&resolved.relative),
            path: resolved.relative_display(),
            content,
            modified: DateTime::from(metadata.modified()?),
            size: metadata.len(),
        })
    }
}

/// A note as it appears in listings and search results.
#[derive(Debug, Clone, Serialize)]
pub struct NoteSummary {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    pub modified: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl NoteSummary {
    pub fn from_entry(entry: &VaultEntry) -> std::io::Result<Self> {
        let metadata = fs::metadata(&entry.path)?;
        Ok(Self {
            name: entry.name(),
            path: entry.relative_display(),
            snippet: None,
            modified: DateTime::from(metadata.modified()?),
            size: Some(metadata.len()),
        })
    }

    pub fn without_size(mut self) -> Self {
        self.size = None;
        self
    }

    pub fn with_snippet(mut self, snippet: String) -> Self {
        self.snippet = Some(snippet);
        self
    }
}

/// Confirmation returned by mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub success: bool,
    pub path: String,
    pub message: String,
}

/// Reads, writes and soft-deletes single notes, always through the
/// containment checks in [`VaultPaths`].
#[derive(Debug, Clone)]
pub struct NoteStore {
    paths: VaultPaths,
}

impl NoteStore {
    pub fn new(paths: VaultPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &VaultPaths {
        &self.paths
    }

    pub fn read(&self, path: &str) -> VaultResult<Note> {
        let resolved = self.paths.resolve_note(path)?;
        if !resolved.absolute.is_file() {
            return Err(VaultError::NoteNotFound(path.to_string()));
        }
        Note::load(&resolved)
    }

    /// Creates or overwrites a note; missing parent folders are created.
    pub fn write(&self, path: &str, content: &str) -> VaultResult<Receipt> {
        let resolved = self.paths.resolve_write_target(path)?;

        if let Some(parent) = resolved.absolute.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&resolved.absolute, content)?;

        let relative = resolved.relative_display();
        tracing::info!(path = %relative, bytes = content.len(), "note saved");

        Ok(Receipt {
            success: true,
            message: format!("Note saved: {}", relative),
            path: relative,
        })
    }

    /// Moves a note into the trash folder, keeping its relative location.
    pub fn delete(&self, path: &str) -> VaultResult<Receipt> {
        let resolved = self.paths.resolve_note(path)?;
        if !resolved.absolute.is_file() {
            return Err(VaultError::NoteNotFound(path.to_string()));
        }

        let trash_path = self.paths.trash_target(&resolved)?;
        if let Some(parent) = trash_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::rename(&resolved.absolute, &trash_path)?;

        let relative = resolved.relative_display();
        tracing::info!(path = %relative, trash = %trash_path.display(), "note moved to trash");

        Ok(Receipt {
            success: true,
            message: format!("Moved to trash: {}", relative),
            path: relative,
        })
    }
}

fn display_name(relative: &Path) -> String {
    relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, NoteStore) {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(VaultPaths::from_root(dir.path().to_path_buf()));
        (dir, store)
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (_dir, store) = store();
        let content = "# 회의록\n\n- item #project\r\nend";

        let receipt = store.write("Meetings/weekly", content).unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.path, "Meetings/weekly.md");
        assert_eq!(receipt.message, "Note saved: Meetings/weekly.md");

        let note = store.read("Meetings/weekly.md").unwrap();
        assert_eq!(note.content, content);
        assert_eq!(note.name, "weekly");
        assert_eq!(note.path, "Meetings/weekly.md");
        assert_eq!(note.size, content.len() as u64);
    }

    #[test]
    fn test_write_is_idempotent_upsert() {
        let (dir, store) = store();
        store.write("todo.md", "first").unwrap();
        store.write("todo.md", "second").unwrap();
        store.write("todo.md", "second").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.read("todo.md").unwrap().content, "second");
    }

    #[test]
    fn test_read_missing_note() {
        let (_dir, store) = store();
        let err = store.read("nope.md").unwrap_err();
        assert!(matches!(err, VaultError::NoteNotFound(ref p) if p == "nope.md"));
        assert_eq!(err.to_string(), "File not found: nope.md");
    }

    #[test]
    fn test_read_directory_is_not_found() {
        let (dir, store) = store();
        fs::create_dir(dir.path().join("Folder")).unwrap();
        assert!(store.read("Folder").unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_invalid_utf8_is_io_failure() {
        let (dir, store) = store();
        fs::write(dir.path().join("binary.md"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(store.read("binary.md"), Err(VaultError::Io(_))));
    }

    #[test]
    fn test_escapes_are_denied_without_mutation() {
        let (dir, store) = store();
        let outside_name = format!(
            "{}-escape",
            dir.path().file_name().unwrap().to_string_lossy()
        );
        let escape = format!("../{}", outside_name);

        assert!(matches!(store.write(&escape, "x"), Err(VaultError::AccessDenied)));
        assert!(matches!(store.read(&escape), Err(VaultError::AccessDenied)));
        assert!(matches!(store.delete(&escape), Err(VaultError::AccessDenied)));
        assert!(!dir.path().parent().unwrap().join(format!("{}.md", outside_name)).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_delete_moves_to_trash() {
        let (dir, store) = store();
        store.write("Projects/plan.md", "keep me").unwrap();

        let receipt = store.delete("Projects/plan.md").unwrap();
        assert_eq!(receipt.message, "Moved to trash: Projects/plan.md");

        assert!(store.read("Projects/plan.md").unwrap_err().is_not_found());
        let trashed = fs::read_to_string(dir.path().join(".trash/Projects/plan.md")).unwrap();
        assert_eq!(trashed, "keep me");
    }

    #[test]
    fn test_delete_missing_note() {
        let (_dir, store) = store();
        assert!(matches!(
            store.delete("ghost.md"),
            Err(VaultError::NoteNotFound(_))
        ));
    }

    #[test]
    fn test_operations_on_missing_vault() {
        let store = NoteStore::new(VaultPaths::from_root(
            "/nonexistent/obsidian-mcp-vault".into(),
        ));
        assert!(matches!(
            store.read("a.md"),
            Err(VaultError::VaultNotFound(_))
        ));
    }
}
