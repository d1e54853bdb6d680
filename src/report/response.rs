use super::color::Palette;
use crate::stat::Response;
use std::io::{self, Write};

/// How a reply is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseStyle {
    /// Print the payload as received.
    pub raw: bool,
    /// The request was JSON, so an object reply is printed as JSON.
    pub json: bool,
    /// Drop the label and the blank lines around the payload.
    pub response_only: bool,
}

/// The body of the response line, or `None` when there is nothing to print.
pub fn format_response(
    response: &Response,
    style: ResponseStyle,
) -> Result<Option<String>, serde_json::Error> {
    let body = match response {
        Response::Absent => return Ok(None),
        Response::Object(map) if !style.raw && (style.json || response.is_json_rpc()) => {
            serde_json::to_string_pretty(map)?
        }
        other => other.to_string(),
    };
    Ok(Some(body))
}

/// Write an already formatted body with the framing `style` asks for.
pub fn write_response(
    out: &mut impl Write,
    body: &str,
    style: ResponseStyle,
    p: Palette,
) -> io::Result<()> {
    if style.response_only {
        return writeln!(out, "{body}");
    }
    writeln!(out)?;
    writeln!(out, "{}: {body}", p.orange("Response"))?;
    writeln!(out)
}
