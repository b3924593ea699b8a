//! Text extraction for uploaded documents.
//!
//! Dispatch is by lowercase file extension through a closed [`DocumentKind`]
//! enum; anything outside the supported set is rejected up front rather than
//! falling through to a generic reader.

use std::path::Path;

use tracing::warn;

mod pdf;
mod text;
mod word;

/// Extraction failure, propagated to the caller; callers decide how to surface it.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Format(String),
    #[error("unsupported file type: .{extension}")]
    UnsupportedType { extension: String },
}

/// The closed set of document formats accepted for upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Word,
}

impl DocumentKind {
    /// Map a lowercase extension onto a kind. `doc` and `docx` share the
    /// Word reader; legacy binary `.doc` files fail there with a format error.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(DocumentKind::Text),
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Word),
            _ => None,
        }
    }
}

/// True when the extension belongs to an accepted upload format.
pub fn is_supported_extension(ext: &str) -> bool {
    DocumentKind::from_extension(&ext.to_ascii_lowercase()).is_some()
}

/// Extract plain text from the file at `path`.
///
/// Blocking; callers on an async runtime should wrap this in
/// `spawn_blocking`. Failures are logged with their cause and returned —
/// there is no silent fallback between formats.
pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let kind = match DocumentKind::from_extension(&extension) {
        Some(kind) => kind,
        None => {
            warn!(target: "extract", %extension, "rejected unsupported file type");
            return Err(ExtractError::UnsupportedType { extension });
        }
    };
    let result = match kind {
        DocumentKind::Text => text::extract(path),
        DocumentKind::Pdf => pdf::extract(path),
        DocumentKind::Word => word::extract(path),
    };
    if let Err(ref err) = result {
        warn!(target: "extract", path = %path.display(), error = %err, "extraction failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn txt_returns_exact_contents() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "line one\nline two\n").expect("write fixture");
        let text = extract(&path).expect("extract txt");
        assert_eq!(text, "line one\nline two\n");
    }

    #[test]
    fn unsupported_extension_names_it() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("slides.pptx");
        std::fs::write(&path, b"irrelevant").expect("write fixture");
        let err = extract(&path).expect_err("pptx must be rejected");
        match err {
            ExtractError::UnsupportedType { extension } => assert_eq!(extension, "pptx"),
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }

    #[test]
    fn missing_txt_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = extract(&dir.path().join("absent.txt")).expect_err("missing file");
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[test]
    fn invalid_pdf_is_format_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").expect("write fixture");
        let err = extract(&path).expect_err("invalid pdf");
        assert!(matches!(err, ExtractError::Format(_)));
    }

    #[test]
    fn invalid_doc_is_format_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("legacy.doc");
        std::fs::write(&path, b"\xd0\xcf\x11\xe0 legacy word bytes").expect("write fixture");
        let err = extract(&path).expect_err("legacy doc");
        assert!(matches!(err, ExtractError::Format(_)));
    }

    #[test]
    fn docx_paragraphs_join_with_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("memo.docx");
        let file = std::fs::File::create(&path).expect("create docx");
        let mut archive = zip::ZipWriter::new(file);
        let opts = zip::write::SimpleFileOptions::default();
        archive
            .start_file("word/document.xml", opts)
            .expect("start entry");
        archive
            .write_all(
                br#"<?xml version="1.0"?><w:document><w:body>
                <w:p><w:r><w:t>First paragraph</w:t></w:r></w:p>
                <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph</w:t></w:r></w:p>
                </w:body></w:document>"#,
            )
            .expect("write entry");
        archive.finish().expect("finish docx");

        let text = extract(&path).expect("extract docx");
        assert_eq!(text, "First paragraph\nSecond paragraph");
    }
}
