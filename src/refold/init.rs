use crate::commands::FoldsPaths;
use crate::error::{FoldsError, Result};
use crate::session::FoldSession;
use crate::store::fs::FsBackend;
use crate::store::STORE_DIR_NAME;
use directories::BaseDirs;
use std::path::{Path, PathBuf};

/// Find the project root by walking up from `cwd` to the first directory
/// holding a `.js-folds` store.
/// Returns None if none is found before reaching home or the filesystem root.
pub fn find_project_root(cwd: &Path) -> Option<PathBuf> {
    let home_dir = BaseDirs::new().map(|bd| bd.home_dir().to_path_buf());
    let mut current = cwd.to_path_buf();

    loop {
        if current.join(STORE_DIR_NAME).is_dir() {
            return Some(current);
        }

        if let Some(ref home) = home_dir {
            if &current == home {
                return None;
            }
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

/// Build the (not yet loaded) session for the editor's open project roots.
///
/// The host calls [`FoldSession::initialize`] on the result with its open buffers.
pub fn session_for_roots(roots: &[PathBuf]) -> Result<FoldSession<FsBackend>> {
    let paths = FoldsPaths::from_roots(roots)?;
    Ok(FoldSession::new(FsBackend::new(paths.store_dir)))
}

/// Resolve the store for an operator command run from `cwd`.
///
/// An explicit root is used as-is; otherwise the nearest ancestor holding a
/// store wins, falling back to `cwd` itself (so `init` has somewhere to go).
pub fn resolve_paths(cwd: &Path, explicit_root: Option<PathBuf>) -> Result<FoldsPaths> {
    let root = match explicit_root {
        Some(root) if !root.is_dir() => {
            return Err(FoldsError::Setup(format!(
                "Project root {} does not exist",
                root.display()
            )))
        }
        Some(root) => root,
        None => find_project_root(cwd).unwrap_or_else(|| cwd.to_path_buf()),
    };
    Ok(FoldsPaths::for_project(root))
}
