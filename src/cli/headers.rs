use super::error::InputError;
use crate::http::HeaderSet;

/// Parse `name:value` pairs separated by commas.
///
/// Each pair is split on its first colon so values may contain colons
/// (`Origin: https://example.org`). Both sides are trimmed. Empty input
/// yields an empty set.
pub fn parse_headers(list: &str) -> Result<HeaderSet, InputError> {
    let mut headers = HeaderSet::new();
    if list.trim().is_empty() {
        return Ok(headers);
    }

    for part in list.split(',') {
        let (name, value) = part
            .split_once(':')
            .ok_or_else(|| InputError::InvalidHeaderFormat(part.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(InputError::InvalidHeaderFormat(part.to_string()));
        }
        headers.append(name, value.trim())?;
    }

    Ok(headers)
}
