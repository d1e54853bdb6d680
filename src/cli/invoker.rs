use super::mode::MeasurementMode;
use crate::base::neterror::NetError;
use crate::http::HeaderSet;
use crate::stat::{Measurement, Probe, ProbeRequest, Response};
use url::Url;

/// Translate a mode into what the probe sends: the frame and how many times.
pub fn probe_request(
    target: &Url,
    headers: &HeaderSet,
    mode: &MeasurementMode,
) -> Result<ProbeRequest, serde_json::Error> {
    Ok(ProbeRequest {
        url: target.clone(),
        headers: headers.clone(),
        outgoing: mode.outgoing()?,
        count: mode.count(),
    })
}

/// Run one probe and decode its replies.
///
/// With `structured` unset the replies are kept as received. The transport
/// error is returned untouched; classifying it is up to the caller.
pub async fn invoke(
    probe: &dyn Probe,
    request: ProbeRequest,
    structured: bool,
) -> Result<(Measurement, Response), NetError> {
    let probed = probe.measure(request).await?;

    let replies = probed
        .replies
        .into_iter()
        .map(|message| message.into_data())
        .collect();
    let response = Response::from_replies(replies, structured);

    tracing::debug!(
        total_ms = probed.measurement.total_time().as_millis() as u64,
        messages = probed.measurement.message_count,
        "probe finished"
    );
    Ok((probed.measurement, response))
}
