use std::path::Path;

use crate::ExtractError;

/// Plain text: the file's contents, byte-decoded as UTF-8.
pub(crate) fn extract(path: &Path) -> Result<String, ExtractError> {
    std::fs::read_to_string(path).map_err(ExtractError::Io)
}
