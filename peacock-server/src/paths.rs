use camino::{Utf8Path, Utf8PathBuf};
use peacock_core::error::{PeacockError, Result};

/// Canonicalise `candidate` and require it to sit inside `root`.
///
/// The comparison is component-wise, so `/music-private` is not inside
/// `/music`.
pub fn resolve_within(root: &Utf8Path, candidate: &Utf8Path) -> Result<Utf8PathBuf> {
    let root = root
        .canonicalize_utf8()
        .map_err(|e| PeacockError::NotFound(format!("Library root unavailable: {e}")))?;
    let resolved = candidate
        .canonicalize_utf8()
        .map_err(|_| PeacockError::NotFound(format!("File not found: {candidate}")))?;

    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(PeacockError::PermissionDenied(format!(
            "Access denied: {candidate} is outside the library"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_file_inside_root_resolves() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/a.mp3"), b"").unwrap();

        let resolved = resolve_within(&root, &root.join("sub/../sub/a.mp3")).unwrap();
        assert_eq!(resolved, root.canonicalize_utf8().unwrap().join("sub/a.mp3"));
    }

    #[test]
    fn test_traversal_outside_root_is_denied() {
        let dir = TempDir::new().unwrap();
        let base = utf8(&dir);
        fs::create_dir_all(base.join("music")).unwrap();
        fs::write(base.join("secret.mp3"), b"").unwrap();

        let result = resolve_within(&base.join("music"), &base.join("music/../secret.mp3"));
        assert!(matches!(result, Err(PeacockError::PermissionDenied(_))));
    }

    #[test]
    fn test_sibling_with_common_prefix_is_denied() {
        let dir = TempDir::new().unwrap();
        let base = utf8(&dir);
        fs::create_dir_all(base.join("music")).unwrap();
        fs::create_dir_all(base.join("music-private")).unwrap();
        fs::write(base.join("music-private/a.mp3"), b"").unwrap();

        let result = resolve_within(&base.join("music"), &base.join("music-private/a.mp3"));
        assert!(matches!(result, Err(PeacockError::PermissionDenied(_))));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let root = utf8(&dir);

        let result = resolve_within(&root, &root.join("nope.mp3"));
        assert!(matches!(result, Err(PeacockError::NotFound(_))));
    }
}
