use std::path::{Component, Path};

use super::paths::VaultPaths;

/// Whether a vault-relative path is hidden from content operations: any
/// dot-prefixed segment, or a segment naming the metadata or trash folder.
pub fn is_hidden_or_system(relative: &Path, paths: &VaultPaths) -> bool {
    relative.components().any(|component| match component {
        Component::Normal(part) => {
            let part = part.to_string_lossy();
            part.starts_with('.') || part == paths.metadata_dir || part == paths.trash_dir
        }
        _ => false,
    })
}
