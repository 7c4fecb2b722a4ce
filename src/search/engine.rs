//! Query engine - linear scans over the visible notes of a vault
//!
//! Nothing is indexed or cached: every call walks the filesystem again.

use std::collections::BTreeMap;
use std::fs;

use serde::Serialize;

use super::snippet::SnippetFinder;
use crate::core::error::{VaultError, VaultResult};
use crate::core::note::NoteSummary;
use crate::core::paths::VaultPaths;
use crate::core::scanner::{EntryFilter, VaultEntry, VaultScanner};
use crate::core::tags::TagScanner;

/// Tag (without marker) -> display names of the notes using it, one entry
/// per occurrence.
pub type TagIndex = BTreeMap<String, Vec<String>>;

/// Vault-wide counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultInfo {
    pub vault_path: String,
    pub note_count: usize,
    pub folder_count: usize,
}

pub struct QueryEngine {
    paths: VaultPaths,
    tags: TagScanner,
}

impl QueryEngine {
    pub fn new(paths: VaultPaths) -> Self {
        Self::with_tag_scanner(paths, TagScanner::default())
    }

    pub fn with_tag_scanner(paths: VaultPaths, tags: TagScanner) -> Self {
        Self { paths, tags }
    }

    fn scanner(&self) -> VaultScanner {
        VaultScanner::new(&self.paths)
    }

    /// Most recently modified notes first. All candidates are collected and
    /// sorted before truncating to `limit`. A missing vault or folder lists
    /// as empty.
    pub fn list_notes(
        &self,
        folder: Option<&str>,
        limit: usize,
    ) -> VaultResult<Vec<NoteSummary>> {
        let scanner = self.scanner();
        let start = match folder.filter(|f| !f.is_empty()) {
            Some(folder) => {
                let resolved = match self.paths.resolve(folder) {
                    Ok(resolved) => resolved,
                    Err(VaultError::VaultNotFound(_)) => return Ok(Vec::new()),
                    Err(e) => return Err(e),
                };
                if !resolved.absolute.is_dir() {
                    return Ok(Vec::new());
                }
                resolved.absolute
            }
            None => scanner.root().to_path_buf(),
        };

        let mut notes: Vec<NoteSummary> = scanner
            .scan(&start, EntryFilter::Markdown)
            .filter_map(|entry| summarize(&entry))
            .collect();

        notes.sort_by(|a, b| b.modified.cmp(&a.modified));
        notes.truncate(limit);
        Ok(notes)
    }

    /// Notes whose display name contains `query`, ignoring case, in scan order.
    pub fn search_by_title(&self, query: &str, limit: usize) -> Vec<NoteSummary> {
        let needle = query.to_lowercase();

        self.scanner()
            .notes()
            .filter(|entry| entry.name().to_lowercase().contains(&needle))
            .filter_map(|entry| summarize(&entry))
            .map(NoteSummary::without_size)
            .take(limit)
            .collect()
    }

    /// Notes whose content contains `query`, ignoring case, each with a
    /// snippet around the first match. Unreadable files are skipped.
    pub fn full_text_search(&self, query: &str, limit: usize) -> VaultResult<Vec<NoteSummary>> {
        let finder = SnippetFinder::new(query).map_err(|e| VaultError::InvalidArguments {
            tool: "full_text_search".to_string(),
            reason: e.to_string(),
        })?;

        Ok(self
            .scanner()
            .notes()
            .filter_map(|entry| {
                let content = read_entry(&entry)?;
                let snippet = finder.find(&content)?;
                let summary = summarize(&entry)?;
                Some(summary.without_size().with_snippet(snippet))
            })
            .take(limit)
            .collect())
    }

    /// Every visible folder, relative to the vault root, sorted.
    pub fn list_folders(&self) -> Vec<String> {
        let mut folders: Vec<String> = self
            .scanner()
            .folders()
            .map(|entry| entry.relative_display())
            .collect();
        folders.sort();
        folders
    }

    pub fn tags(&self) -> TagIndex {
        let mut index = TagIndex::new();

        for entry in self.scanner().notes() {
            let Some(content) = read_entry(&entry) else {
                continue;
            };
            let name = entry.name();
            for tag in self.tags.extract(&content) {
                index.entry(tag.to_string()).or_default().push(name.clone());
            }
        }

        index
    }

    pub fn vault_info(&self) -> VaultResult<VaultInfo> {
        if !self.paths.root.is_dir() {
            return Err(VaultError::VaultNotFound(self.paths.root.clone()));
        }

        let scanner = self.scanner();
        Ok(VaultInfo {
            vault_path: self.paths.root.display().to_string(),
            note_count: scanner.notes().count(),
            folder_count: scanner.folders().count(),
        })
    }
}

fn summarize(entry: &VaultEntry) -> Option<NoteSummary> {
    match NoteSummary::from_entry(entry) {
        Ok(summary) => Some(summary),
        Err(e) => {
            tracing::debug!(path = %entry.path.display(), error = %e, "skipping note");
            None
        }
    }
}

fn read_entry(entry: &VaultEntry) -> Option<String> {
    match fs::read_to_string(&entry.path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::debug!(path = %entry.path.display(), error = %e, "skipping unreadable note");
            None
        }
    }
}
