use camino::{Utf8Path, Utf8PathBuf};
use peacock_core::error::{PeacockError, Result};
use peacock_core::walker::DirectoryWalker;
use std::fs;
use tracing::warn;

/// Walks the real filesystem with `read_dir`.
///
/// Symlinked files are listed; symlinked directories are not descended into.
#[derive(Debug, Default, Copy, Clone)]
pub struct FsWalker;

impl DirectoryWalker for FsWalker {
    fn list(&self, root: &Utf8Path, recursive: bool) -> Result<Vec<Utf8PathBuf>> {
        let mut files = Vec::new();
        walk(root, recursive, &mut files)?;
        Ok(files)
    }
}

fn walk(dir: &Utf8Path, recursive: bool, files: &mut Vec<Utf8PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| PeacockError::Library(format!("Failed to read directory {dir}: {e}")))?;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory entry in {}: {}", dir, e);
                continue;
            }
        };

        let entry_path = entry.path();
        let path = match Utf8PathBuf::try_from(entry_path) {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping non-UTF8 path: {:?}", e.into_path_buf());
                continue;
            }
        };

        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(e) => {
                warn!("Failed to read file type for {}: {}", path, e);
                continue;
            }
        };

        if file_type.is_dir() {
            if recursive {
                if let Err(e) = walk(&path, recursive, files) {
                    warn!("Failed to scan directory {}: {}", path, e);
                }
            }
        } else if path.is_file() {
            files.push(path);
        }
    }

    Ok(())
}
