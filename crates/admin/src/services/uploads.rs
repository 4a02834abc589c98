//! Product image upload handling.
//!
//! Uploaded files land in the configured upload directory and the database
//! stores the relative path (`uploads/<filename>`), which both binaries
//! serve via `ServeDir`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from storing an uploaded image.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Filename empty or reduced to nothing by sanitization.
    #[error("invalid filename")]
    InvalidFilename,

    /// Filesystem write failed.
    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Strips any path components and keeps ASCII alphanumerics, `.`, `-`
/// and `_`; everything else becomes `_`. Leading dots are dropped so the
/// result can never be a hidden file or a traversal component.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    cleaned.trim_start_matches('.').to_owned()
}

/// Store uploaded image bytes under the upload directory.
///
/// Returns the relative path to store in the database.
///
/// # Errors
///
/// Returns `UploadError::InvalidFilename` if the name sanitizes to nothing,
/// or `UploadError::Io` if the write fails.
pub async fn store_image(
    upload_dir: &Path,
    original_name: &str,
    data: &[u8],
) -> Result<String, UploadError> {
    let filename = sanitize_filename(original_name);
    if filename.is_empty() {
        return Err(UploadError::InvalidFilename);
    }

    tokio::fs::create_dir_all(upload_dir).await?;

    let mut target: PathBuf = upload_dir.to_path_buf();
    target.push(&filename);
    tokio::fs::write(&target, data).await?;

    tracing::debug!(path = %target.display(), bytes = data.len(), "stored product image");

    Ok(format!("uploads/{filename}"))
}

/// Best-effort removal of a previously stored image.
///
/// Takes the relative path returned by [`store_image`]. Used when the
/// database write that the upload belonged to did not go through; a
/// failure here only leaves a stray file behind, so it is logged and
/// swallowed.
pub async fn discard_image(upload_dir: &Path, relative_path: &str) {
    let Some(filename) = Path::new(relative_path).file_name() else {
        return;
    };

    let target = upload_dir.join(filename);
    if let Err(e) = tokio::fs::remove_file(&target).await {
        tracing::warn!(path = %target.display(), error = %e, "failed to remove orphaned upload");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("kaos_polos.jpg"), "kaos_polos.jpg");
        assert_eq!(sanitize_filename("photo-1.PNG"), "photo-1.PNG");
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/tmp/x.jpg"), "x.jpg");
        assert_eq!(sanitize_filename("a\\b\\c.jpg"), "a_b_c.jpg");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_chars() {
        assert_eq!(sanitize_filename("foto toko (1).jpg"), "foto_toko__1_.jpg");
    }

    #[test]
    fn test_sanitize_drops_leading_dots() {
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("..."), "");
    }

    #[tokio::test]
    async fn test_discard_removes_stored_image() {
        let dir = std::env::temp_dir().join(format!("warung-uploads-{}", std::process::id()));

        let relative = store_image(&dir, "discard_me.jpg", b"jpeg bytes")
            .await
            .expect("store failed");
        assert!(dir.join("discard_me.jpg").exists());

        discard_image(&dir, &relative).await;
        assert!(!dir.join("discard_me.jpg").exists());
    }

    #[tokio::test]
    async fn test_discard_tolerates_missing_file() {
        let dir = std::env::temp_dir().join(format!("warung-uploads-{}", std::process::id()));
        // Must not panic or error when there is nothing to remove
        discard_image(&dir, "uploads/never_written.jpg").await;
    }
}
