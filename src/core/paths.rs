use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::config::VaultConfig;
use super::error::{VaultError, VaultResult};

/// A user-supplied path after containment checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Absolute location, symlinks in the existing prefix resolved.
    pub absolute: PathBuf,
    /// Location relative to the canonical vault root.
    pub relative: PathBuf,
}

impl ResolvedPath {
    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }

    pub fn relative_display(&self) -> String {
        self.relative.to_string_lossy().to_string()
    }
}

/// Vault layout plus the rules that keep user paths inside it.
#[derive(Debug, Clone)]
pub struct VaultPaths {
    pub root: PathBuf,
    pub metadata_dir: String,
    pub trash_dir: String,
    pub extension: String,
}

impl VaultPaths {
    pub fn from_root(root: PathBuf) -> Self {
        Self::from_config(&VaultConfig::new(root))
    }

    pub fn from_config(config: &VaultConfig) -> Self {
        Self {
            root: config.root.clone(),
            metadata_dir: config.metadata_dir.clone(),
            trash_dir: config.trash_dir.clone(),
            extension: config.extension.clone(),
        }
    }

    /// The vault root with every symlink resolved.
    pub fn canonical_root(&self) -> VaultResult<PathBuf> {
        self.root.canonicalize().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                VaultError::VaultNotFound(self.root.clone())
            } else {
                VaultError::Io(e)
            }
        })
    }

    /// Root used for traversals; falls back to the configured path when it
    /// cannot be canonicalized so a missing vault simply scans as empty.
    pub fn scan_root(&self) -> PathBuf {
        self.root.canonicalize().unwrap_or_else(|_| self.root.clone())
    }

    pub fn is_note_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == self.extension.as_str())
            .unwrap_or(false)
    }

    /// Appends the note extension unless `path` already carries it.
    pub fn with_extension(&self, path: &str) -> String {
        let suffix = format!(".{}", self.extension);
        if path.ends_with(&suffix) {
            path.to_string()
        } else {
            format!("{}{}", path, suffix)
        }
    }

    /// Resolves `relative` against the vault root, failing with
    /// `AccessDenied` when the result lies outside it.
    pub fn resolve(&self, relative: &str) -> VaultResult<ResolvedPath> {
        let root = self.canonical_root()?;
        let absolute = canonicalize_lenient(&root.join(relative))?;

        if let Some(absolute) = absolute {
            if let Ok(inside) = absolute.strip_prefix(&root) {
                let relative = inside.to_path_buf();
                return Ok(ResolvedPath { relative, absolute });
            }
        }

        tracing::warn!(path = relative, "rejected path outside vault");
        Err(VaultError::AccessDenied)
    }

    /// Like [`resolve`](Self::resolve), but the vault root itself is not a
    /// valid note location.
    pub fn resolve_note(&self, relative: &str) -> VaultResult<ResolvedPath> {
        let resolved = self.resolve(relative)?;
        if resolved.is_root() {
            tracing::warn!(path = relative, "rejected vault root as note path");
            return Err(VaultError::AccessDenied);
        }
        Ok(resolved)
    }

    /// Resolves a write target, appending the note extension first. The
    /// last segment must name a file.
    pub fn resolve_write_target(&self, relative: &str) -> VaultResult<ResolvedPath> {
        let file_name = relative.rsplit(['/', '\\']).next().unwrap_or("");
        if matches!(file_name, "" | "." | "..") {
            return Err(VaultError::InvalidPath(relative.to_string()));
        }
        self.resolve_note(&self.with_extension(relative))
    }

    /// Mirrored location for `note` under the trash folder.
    pub fn trash_target(&self, note: &ResolvedPath) -> VaultResult<PathBuf> {
        Ok(self.canonical_root()?.join(&self.trash_dir).join(&note.relative))
    }
}

/// Walks `path` one component at a time, resolving symlinks after every
/// step while the prefix exists. `..` is applied to the already resolved
/// prefix, so a later component that exists is resolved again even when an
/// earlier one did not. Returns `None` for a dangling symlink, whose real
/// target cannot be checked.
fn canonicalize_lenient(path: &Path) -> io::Result<Option<PathBuf>> {
    let mut resolved = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => {
                resolved.push(part);
                match resolved.canonicalize() {
                    Ok(real) => resolved = real,
                    Err(e)
                        if matches!(
                            e.kind(),
                            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                        ) =>
                    {
                        if fs::symlink_metadata(&resolved).is_ok() {
                            return Ok(None);
                        }
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }

    Ok(Some(resolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vault() -> (TempDir, VaultPaths) {
        let dir = TempDir::new().unwrap();
        let paths = VaultPaths::from_root(dir.path().to_path_buf());
        (dir, paths)
    }

    #[test]
    fn test_resolve_inside_vault() {
        let (dir, paths) = vault();
        fs::create_dir(dir.path().join("Notes")).unwrap();
        fs::write(dir.path().join("Notes/idea.md"), "x").unwrap();

        let resolved = paths.resolve("Notes/idea.md").unwrap();
        assert_eq!(resolved.relative, PathBuf::from("Notes/idea.md"));
        assert!(resolved.absolute.ends_with("Notes/idea.md"));
    }

    #[test]
    fn test_resolve_missing_target_is_normalized() {
        let (_dir, paths) = vault();
        let resolved = paths.resolve("new/./sub/../draft.md").unwrap();
        assert_eq!(resolved.relative, PathBuf::from("new/draft.md"));
    }

    #[test]
    fn test_parent_escape_is_denied() {
        let (_dir, paths) = vault();
        for path in ["../outside.md", "a/../../outside.md", "Notes/../../../etc/passwd"] {
            assert!(
                matches!(paths.resolve(path), Err(VaultError::AccessDenied)),
                "{path} should be denied"
            );
        }
    }

    #[test]
    fn test_absolute_path_outside_is_denied() {
        let (_dir, paths) = vault();
        assert!(matches!(
            paths.resolve("/etc/passwd"),
            Err(VaultError::AccessDenied)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_is_denied() {
        let (dir, paths) = vault();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.md"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        assert!(matches!(
            paths.resolve("link/secret.md"),
            Err(VaultError::AccessDenied)
        ));
        assert!(matches!(
            paths.resolve("link/new.md"),
            Err(VaultError::AccessDenied)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_after_missing_parent_is_denied() {
        let (dir, paths) = vault();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("secret.md"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        for path in [
            "missing/../link/secret.md",
            "missing/deeper/../../link/new.md",
            "./missing/../link",
        ] {
            assert!(
                matches!(paths.resolve(path), Err(VaultError::AccessDenied)),
                "{path} should be denied"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_denied() {
        let (dir, paths) = vault();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("not-yet.md"),
            dir.path().join("dangling.md"),
        )
        .unwrap();

        assert!(matches!(
            paths.resolve_write_target("dangling"),
            Err(VaultError::AccessDenied)
        ));
        assert!(!outside.path().join("not-yet.md").exists());
    }

    #[test]
    fn test_missing_parent_then_existing_sibling_resolves() {
        let (dir, paths) = vault();
        fs::create_dir(dir.path().join("Notes")).unwrap();
        fs::write(dir.path().join("Notes/idea.md"), "x").unwrap();

        let resolved = paths.resolve("missing/../Notes/idea.md").unwrap();
        assert_eq!(resolved.relative, PathBuf::from("Notes/idea.md"));
    }

    #[test]
    fn test_write_target_needs_file_name() {
        let (_dir, paths) = vault();
        for path in ["", "Notes/", "Notes/.", "Notes/.."] {
            assert!(
                matches!(paths.resolve_write_target(path), Err(VaultError::InvalidPath(_))),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_root_is_not_a_note() {
        let (_dir, paths) = vault();
        assert!(paths.resolve("").unwrap().is_root());
        assert!(matches!(paths.resolve_note(""), Err(VaultError::AccessDenied)));
        assert!(matches!(paths.resolve_note("a/.."), Err(VaultError::AccessDenied)));
        assert!(paths.resolve_write_target("a/..x").is_ok());
    }

    #[test]
    fn test_write_target_gets_extension() {
        let (_dir, paths) = vault();
        let resolved = paths.resolve_write_target("Inbox/todo").unwrap();
        assert_eq!(resolved.relative, PathBuf::from("Inbox/todo.md"));

        let resolved = paths.resolve_write_target("Inbox/todo.md").unwrap();
        assert_eq!(resolved.relative, PathBuf::from("Inbox/todo.md"));
    }

    #[test]
    fn test_missing_root_reports_vault_not_found() {
        let paths = VaultPaths::from_root(PathBuf::from("/nonexistent/obsidian-mcp-vault"));
        assert!(matches!(
            paths.resolve("note.md"),
            Err(VaultError::VaultNotFound(_))
        ));
    }

    #[test]
    fn test_trash_target_mirrors_relative_path() {
        let (dir, paths) = vault();
        let resolved = paths.resolve("Projects/plan.md").unwrap();
        let trash = paths.trash_target(&resolved).unwrap();
        let root = dir.path().canonicalize().unwrap();
        assert_eq!(trash, root.join(".trash/Projects/plan.md"));
    }
}
