use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::hidden::is_hidden_or_system;
use super::paths::VaultPaths;

/// Which entries a scan yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFilter {
    /// Regular files carrying the note extension.
    Markdown,
    /// Every visible file and directory.
    Any,
}

#[derive(Debug, Clone)]
pub struct VaultEntry {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub is_dir: bool,
}

impl VaultEntry {
    /// Display name: the file name without its extension.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub fn relative_display(&self) -> String {
        self.relative.to_string_lossy().to_string()
    }
}

/// Lazy recursive walk over the visible part of a vault.
pub struct VaultScanner {
    paths: VaultPaths,
    root: PathBuf,
}

impl VaultScanner {
    pub fn new(paths: &VaultPaths) -> Self {
        Self {
            root: paths.scan_root(),
            paths: paths.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks `start` (which must lie under the scan root). Hidden directories
    /// are pruned, symlinks are not followed, and entries that cannot be read
    /// are skipped. The walk only advances as far as the consumer pulls.
    pub fn scan(
        &self,
        start: &Path,
        filter: EntryFilter,
    ) -> impl Iterator<Item = VaultEntry> + '_ {
        WalkDir::new(start)
            .min_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| {
                !is_hidden_or_system(self.relative(entry.path()), &self.paths)
            })
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable vault entry");
                    None
                }
            })
            .filter(move |entry| self.accepts(entry, filter))
            .map(move |entry| VaultEntry {
                relative: self.relative(entry.path()).to_path_buf(),
                is_dir: entry.file_type().is_dir(),
                path: entry.into_path(),
            })
    }

    /// Every visible note in the vault.
    pub fn notes(&self) -> impl Iterator<Item = VaultEntry> + '_ {
        self.scan(&self.root, EntryFilter::Markdown)
    }

    /// Every visible directory in the vault.
    pub fn folders(&self) -> impl Iterator<Item = VaultEntry> + '_ {
        self.scan(&self.root, EntryFilter::Any).filter(|entry| entry.is_dir)
    }

    fn accepts(&self, entry: &DirEntry, filter: EntryFilter) -> bool {
        match filter {
            EntryFilter::Markdown => {
                entry.file_type().is_file() && self.paths.is_note_file(entry.path())
            }
            EntryFilter::Any => true,
        }
    }

    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}
