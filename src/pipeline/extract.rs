//! Input validation and PDF text extraction.
//!
//! Extraction has two call sites with different failure contracts:
//!
//! * [`extract_text`]: strict. Path, permission, and magic-byte problems
//!   surface as dedicated error variants; so do parser failures. Used by
//!   anything that needs to distinguish "no file" from "no text".
//! * [`extract_text_or_empty`]: degrading. Any failure is logged and the
//!   result is an empty string, so the downstream pipeline still produces
//!   a script (containing only the fixed intro and conclusion scenes).
//!
//! Only the embedded page text is kept; layout, tables, and images are lost.

use crate::error::{Pdf2VideoError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Validate that `path` points at a readable PDF file.
///
/// Checks existence, read permission, and the `%PDF` magic bytes, mapping
/// each failure to its own variant so callers can print a targeted hint.
pub fn resolve_pdf(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Pdf2VideoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(Pdf2VideoError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2VideoError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Pdf2VideoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Resolved PDF input: {}", path.display());
    Ok(path.to_path_buf())
}

/// Extract all embedded text from the PDF, pages concatenated in order.
pub fn extract_text(path: &Path) -> Result<String> {
    let path = resolve_pdf(path)?;
    let bytes = std::fs::read(&path).map_err(|e| Pdf2VideoError::ExtractFailed {
        path: path.clone(),
        detail: e.to_string(),
    })?;

    let text =
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| Pdf2VideoError::ExtractFailed {
            path: path.clone(),
            detail: e.to_string(),
        })?;

    debug!("Extracted {} chars from {}", text.len(), path.display());
    Ok(text)
}

/// Extract text, degrading to an empty string on any failure.
///
/// The failure is logged at WARN level; the pipeline continues with no
/// content, which yields a script containing only the bookend scenes.
pub fn extract_text_or_empty(path: &Path) -> String {
    match extract_text(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("Text extraction failed, continuing with empty text: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_file_not_found() {
        let err = resolve_pdf(Path::new("/definitely/not/a/real/file.pdf")).unwrap_err();
        assert!(matches!(err, Pdf2VideoError::FileNotFound { .. }));
    }

    #[test]
    fn non_pdf_magic_is_rejected() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"this is not a PDF at all").unwrap();
        let err = resolve_pdf(f.path()).unwrap_err();
        assert!(matches!(err, Pdf2VideoError::NotAPdf { .. }));
    }

    #[test]
    fn or_empty_degrades_to_empty_string() {
        let text = extract_text_or_empty(Path::new("/no/such/file.pdf"));
        assert!(text.is_empty());
    }

    #[test]
    fn truncated_pdf_fails_strict_extraction() {
        // Valid magic bytes but no document body: resolve_pdf passes,
        // the parser does not.
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"%PDF-1.4\n").unwrap();
        let err = extract_text(f.path()).unwrap_err();
        assert!(matches!(err, Pdf2VideoError::ExtractFailed { .. }));
    }
}
