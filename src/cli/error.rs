use crate::base::neterror::NetError;
use crate::http::InvalidHeader;
use std::io;
use thiserror::Error;

/// A problem with the command line, detected before any network activity.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("the message options are mutually exclusive, choose one")]
    ConflictingMessages,

    #[error("the verbosity options are mutually exclusive, choose one")]
    ConflictingVerbosity,

    #[error("the burst count must be a positive integer")]
    InvalidBurst,

    #[error("invalid JSON message: {0}")]
    InvalidJson(String),

    #[error("invalid header format: {0:?}")]
    InvalidHeaderFormat(String),

    #[error(transparent)]
    InvalidHeader(#[from] InvalidHeader),

    #[error("error parsing input URI {input:?}: {source}")]
    InvalidUri {
        input: String,
        source: url::ParseError,
    },

    #[error("unsupported scheme {0:?}, expected ws or wss")]
    UnsupportedScheme(String),

    #[error("input URI {0:?} has no host")]
    MissingHost(String),
}

/// A failed probe, classified so the user knows what to try next.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error(
        "error establishing WS connection to '{url}': {source}\n\n\
         Is the target server using a secure WS connection? If not, use the \
         '--insecure' flag or specify the correct scheme in the input."
    )]
    TlsExpectedButAbsent { url: String, source: NetError },

    #[error("error establishing WS connection to '{url}': {source}")]
    Generic { url: String, source: NetError },
}

/// Every way a run can end unsuccessfully.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("could not encode response as JSON: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

impl AppError {
    /// 2 for usage problems, 1 for everything that went wrong afterwards.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) => 2,
            AppError::Connection(_) | AppError::Encode(_) | AppError::Output(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::from(InputError::ConflictingMessages).exit_code(), 2);

        let conn = ConnectionError::Generic {
            url: "ws://x/".into(),
            source: NetError::ConnectionRefused,
        };
        assert_eq!(AppError::from(conn).exit_code(), 1);

        let io = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(AppError::from(io).exit_code(), 1);
    }

    #[test]
    fn test_tls_hint_in_message() {
        let err = ConnectionError::TlsExpectedButAbsent {
            url: "wss://localhost/".into(),
            source: NetError::TlsHandshakeMismatch {
                host: "localhost".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("wss://localhost/"));
        assert!(msg.contains("--insecure"));
    }
}
