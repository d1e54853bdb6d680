use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::str::FromStr;
use thiserror::Error;

/// A header name or value the `http` crate refuses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid header {name:?}: {reason}")]
pub struct InvalidHeader {
    pub name: String,
    pub reason: &'static str,
}

/// An ordered multimap of headers.
///
/// Names keep first-insertion order; repeated names collect their values in
/// insertion order under the first occurrence. Used both for the headers a
/// user asks to send and for the request/response headers echoed back from
/// the upgrade handshake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(HeaderName, Vec<HeaderValue>)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a value under `name`, keeping any values already present.
    pub fn append(&mut self, name: &str, value: &str) -> Result<(), InvalidHeader> {
        let name_header = HeaderName::from_str(name).map_err(|_| InvalidHeader {
            name: name.to_string(),
            reason: "not a valid header name",
        })?;
        let value_header = HeaderValue::from_str(value).map_err(|_| InvalidHeader {
            name: name.to_string(),
            reason: "not a valid header value",
        })?;
        self.push(name_header, value_header);
        Ok(())
    }

    fn push(&mut self, name: HeaderName, value: HeaderValue) {
        // HeaderName is already lowercase, so equality is case-insensitive.
        if let Some((_, values)) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            values.push(value);
        } else {
            self.entries.push((name, vec![value]));
        }
    }

    /// All values recorded for `name`, empty when absent.
    pub fn get_all(&self, name: &str) -> &[HeaderValue] {
        HeaderName::from_str(name)
            .ok()
            .and_then(|target| self.entries.iter().find(|(n, _)| *n == target))
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Values of `name` joined with `", "`, for display.
    pub fn joined(&self, name: &str) -> Option<String> {
        let values = self.get_all(name);
        if values.is_empty() {
            None
        } else {
            Some(join_values(values))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &[HeaderValue])> {
        self.entries.iter().map(|(n, v)| (n, v.as_slice()))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append every value to `map`, keeping anything already in it.
    pub fn apply_to(&self, map: &mut HeaderMap) {
        for (name, values) in &self.entries {
            for value in values {
                map.append(name.clone(), value.clone());
            }
        }
    }
}

impl From<&HeaderMap> for HeaderSet {
    fn from(map: &HeaderMap) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in map {
            set.push(name.clone(), value.clone());
        }
        set
    }
}

/// Join header values for display, tolerating non-UTF-8 bytes.
pub fn join_values(values: &[HeaderValue]) -> String {
    values
        .iter()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Title-case a header name for display: `sec-websocket-version` becomes
/// `Sec-Websocket-Version`, the same form Go's `CanonicalHeaderKey` prints.
pub fn display_name(name: &HeaderName) -> String {
    name.as_str()
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
