//! Word document extraction: OOXML zip, paragraphs from word/document.xml.

use std::io::Read as _;
use std::path::Path;

use zip::ZipArchive;

use crate::ExtractError;

const DOCUMENT_ENTRY: &str = "word/document.xml";

pub(crate) fn extract(path: &Path) -> Result<String, ExtractError> {
    let file = std::fs::File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|err| ExtractError::Format(format!("not a valid Word document: {err}")))?;
    let mut entry = archive
        .by_name(DOCUMENT_ENTRY)
        .map_err(|err| ExtractError::Format(format!("missing {DOCUMENT_ENTRY}: {err}")))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|err| ExtractError::Format(format!("unreadable {DOCUMENT_ENTRY}: {err}")))?;
    Ok(paragraphs_to_text(&xml))
}

/// Paragraph boundaries become newlines, remaining tags are stripped, and
/// the basic XML entities are decoded. Empty paragraphs are dropped.
fn paragraphs_to_text(xml: &str) -> String {
    let with_breaks = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", "\t")
        .replace("<w:br/>", "\n");

    let mut stripped = String::with_capacity(with_breaks.len());
    let mut in_tag = false;
    for ch in with_breaks.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => stripped.push(ch),
            _ => {}
        }
    }

    decode_entities(&stripped)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    // `&amp;` goes last so `&amp;lt;` decodes to `&lt;`, not `<`.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
