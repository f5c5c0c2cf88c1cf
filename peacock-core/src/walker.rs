use crate::error::Result;
use camino::{Utf8Path, Utf8PathBuf};

/// Lists candidate files under a root.
///
/// Returns every regular file (no extension filtering). Only a failure to
/// list `root` itself is an error; unreadable subdirectories are skipped.
pub trait DirectoryWalker: Send + Sync {
    fn list(&self, root: &Utf8Path, recursive: bool) -> Result<Vec<Utf8PathBuf>>;
}
