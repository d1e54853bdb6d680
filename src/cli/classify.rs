use super::error::ConnectionError;
use crate::base::neterror::NetError;
use url::Url;

/// Sort a failed probe into a category the user can act on.
pub fn classify(error: NetError, target: &Url) -> ConnectionError {
    let url = target.to_string();
    match error {
        NetError::TlsHandshakeMismatch { .. } => ConnectionError::TlsExpectedButAbsent {
            url,
            source: error,
        },
        source => ConnectionError::Generic { url, source },
    }
}
