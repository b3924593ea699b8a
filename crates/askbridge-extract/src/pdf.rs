//! PDF text extraction via lopdf, one page at a time in page order.

use std::path::Path;

use lopdf::Document;

use crate::ExtractError;

pub(crate) fn extract(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path)?;
    let doc = Document::load_mem(&bytes)
        .map_err(|err| ExtractError::Format(format!("not a valid PDF: {err}")))?;

    // get_pages is ordered by page number, so joining preserves page order.
    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        let text = doc.extract_text(&[*page_number]).map_err(|err| {
            ExtractError::Format(format!("page {page_number} has no extractable text: {err}"))
        })?;
        pages.push(text.trim_end().to_string());
    }
    Ok(pages.join("\n"))
}
