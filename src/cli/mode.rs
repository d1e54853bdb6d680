use super::error::InputError;
use crate::stat::Outgoing;
use serde::Serialize;
use serde_json::{Map, Value};

/// How the target is probed.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementMode {
    /// A ping frame; nothing to print afterwards.
    Ping,
    /// A literal text message.
    Text(String),
    /// A JSON object sent as given.
    Json(Map<String, Value>),
    /// A JSON-RPC request calling `method` without params.
    JsonMethod(String),
    /// `inner` sent `count` times over one connection. `count` is always > 1.
    Burst {
        count: u32,
        inner: Box<MeasurementMode>,
    },
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
    id: &'a str,
    jsonrpc: &'a str,
}

impl MeasurementMode {
    /// Pick the mode from the message flags and the burst count.
    ///
    /// At most one of `text`, `json` and `method` may be set. A burst of 1
    /// is no burst at all.
    pub fn select(
        text: Option<&str>,
        json: Option<&str>,
        method: Option<&str>,
        burst: u32,
    ) -> Result<Self, InputError> {
        if burst == 0 {
            return Err(InputError::InvalidBurst);
        }

        let set = [text.is_some(), json.is_some(), method.is_some()];
        if set.iter().filter(|s| **s).count() > 1 {
            return Err(InputError::ConflictingMessages);
        }

        let single = match (text, json, method) {
            (Some(text), _, _) => MeasurementMode::Text(text.to_string()),
            (_, Some(json), _) => MeasurementMode::Json(parse_object(json)?),
            (_, _, Some(method)) => MeasurementMode::JsonMethod(method.to_string()),
            _ => MeasurementMode::Ping,
        };

        Ok(if burst > 1 {
            MeasurementMode::Burst {
                count: burst,
                inner: Box::new(single),
            }
        } else {
            single
        })
    }

    /// Number of messages sent over the connection.
    pub fn count(&self) -> u32 {
        match self {
            MeasurementMode::Burst { count, .. } => *count,
            _ => 1,
        }
    }

    pub fn is_burst(&self) -> bool {
        self.count() > 1
    }

    /// The mode without its burst wrapper.
    pub fn single(&self) -> &MeasurementMode {
        match self {
            MeasurementMode::Burst { inner, .. } => inner.single(),
            other => other,
        }
    }

    /// True for modes that send JSON, whose replies are printed as JSON.
    pub fn is_json(&self) -> bool {
        matches!(
            self.single(),
            MeasurementMode::Json(_) | MeasurementMode::JsonMethod(_)
        )
    }

    /// True unless the mode only pings.
    pub fn expects_response(&self) -> bool {
        !matches!(self.single(), MeasurementMode::Ping)
    }

    /// The frame to put on the wire for each message.
    pub fn outgoing(&self) -> Result<Outgoing, serde_json::Error> {
        Ok(match self {
            MeasurementMode::Burst { inner, .. } => inner.outgoing()?,
            MeasurementMode::Ping => Outgoing::Ping,
            MeasurementMode::Text(text) => Outgoing::Text(text.clone()),
            MeasurementMode::Json(object) => Outgoing::Text(serde_json::to_string(object)?),
            MeasurementMode::JsonMethod(method) => {
                Outgoing::Text(serde_json::to_string(&RpcRequest {
                    method,
                    id: "1",
                    jsonrpc: "2.0",
                })?)
            }
        })
    }
}

fn parse_object(json: &str) -> Result<Map<String, Value>, InputError> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(InputError::InvalidJson("expected a JSON object".to_string())),
        Err(e) => Err(InputError::InvalidJson(e.to_string())),
    }
}
