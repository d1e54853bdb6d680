use bytes::Bytes;
use serde_json::{Map, Value};
use std::fmt;

/// A reply payload, classified once when it is decoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Response {
    /// Nothing to show, e.g. a ping probe.
    #[default]
    Absent,
    /// A JSON object, keys in the order the server sent them.
    Object(Map<String, Value>),
    /// A JSON array, or every reply of a burst.
    Sequence(Vec<Response>),
    /// Anything else, kept as received.
    Raw(Bytes),
}

impl Response {
    /// Classify a single reply payload. Payloads that are not a JSON object
    /// or array stay raw.
    pub fn decode(data: Bytes) -> Self {
        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Object(map)) => Response::Object(map),
            Ok(Value::Array(items)) => {
                Response::Sequence(items.into_iter().map(Response::from_value).collect())
            }
            _ => Response::Raw(data),
        }
    }

    /// Build the response of a whole probe: no replies is `Absent`, one reply
    /// is that reply, several replies become a `Sequence` in arrival order.
    /// With `structured` unset the payloads are kept raw.
    pub fn from_replies(replies: Vec<Bytes>, structured: bool) -> Self {
        let decode = |data: Bytes| {
            if structured {
                Response::decode(data)
            } else {
                Response::Raw(data)
            }
        };

        let mut replies = replies.into_iter().map(decode).collect::<Vec<_>>();
        match replies.len() {
            0 => Response::Absent,
            1 => replies.remove(0),
            _ => Response::Sequence(replies),
        }
    }

    fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Response::Object(map),
            Value::Array(items) => {
                Response::Sequence(items.into_iter().map(Response::from_value).collect())
            }
            Value::String(s) => Response::Raw(Bytes::from(s)),
            other => Response::Raw(Bytes::from(other.to_string())),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Response::Absent)
    }

    /// An object carrying a `jsonrpc` member.
    pub fn is_json_rpc(&self) -> bool {
        matches!(self, Response::Object(map) if map.contains_key("jsonrpc"))
    }
}

/// The native form: objects as `{key: value}`, sequences as `[a, b]`, raw
/// payloads as (lossy) UTF-8 text. Strings are not quoted.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Absent => Ok(()),
            Response::Object(map) => fmt_object(map, f),
            Response::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Response::Raw(data) => f.write_str(&String::from_utf8_lossy(data)),
        }
    }
}

fn fmt_object(map: &Map<String, Value>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key}: ")?;
        fmt_value(value, f)?;
    }
    f.write_str("}")
}

fn fmt_value(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(s),
        Value::Object(map) => fmt_object(map, f),
        Value::Array(items) => {
            f.write_str("[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_value(item, f)?;
            }
            f.write_str("]")
        }
        other => write!(f, "{other}"),
    }
}
