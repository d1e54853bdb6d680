//! Report Rendering Tests
//!
//! Covers:
//! - Tiered timing diagram layout and arithmetic
//! - Burst labelling
//! - Response presentation end to end through `run` with a mock probe

use wsstat::cli::{resolve_target, run, Config, MeasurementMode, Verbosity};
use wsstat::report::{Palette, TimingReport};
use wsstat::stat::{Measurement, Measuring, Phase, Phases, Probe, ProbeRequest, Probed};
use wsstat::ws::Message;

use std::time::Duration;
use url::Url;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn sample_phases() -> Phases {
    Phases {
        dns_lookup: ms(10),
        tcp_connection: ms(20),
        tls_handshake: Some(ms(30)),
        ws_handshake: ms(15),
        message_round_trip: ms(5),
    }
}

struct FixedProbe {
    phases: Phases,
    replies: Vec<Message>,
}

impl Probe for FixedProbe {
    fn measure(&self, request: ProbeRequest) -> Measuring<'_> {
        let probed = Probed {
            measurement: Measurement::new(request.url, self.phases, request.count),
            replies: self.replies.clone(),
        };
        Box::pin(async move { Ok(probed) })
    }
}

#[test]
fn test_wss_markers_in_order() {
    let target = resolve_target("example.org", false).unwrap();
    assert_eq!(target.as_str(), "wss://example.org/");

    let m = Measurement::new(target, sample_phases(), 1);
    let report = TimingReport::new(&m, Palette::plain());

    let markers: Vec<u128> = report.phases().iter().map(|p| p.done_at_ms).collect();
    assert_eq!(markers, vec![10, 30, 60, 75, 80]);

    let diagram = report.to_tiered_string();
    let positions: Vec<usize> = ["DNS lookup:10ms", "TCP connected:30ms", "TLS done:60ms", "WS done:75ms", "Total:80ms"]
        .iter()
        .map(|needle| diagram.find(needle).unwrap_or_else(|| panic!("missing {needle} in\n{diagram}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_wss_diagram_layout() {
    let m = Measurement::new(Url::parse("wss://example.org").unwrap(), sample_phases(), 1);
    let expected = concat!(
        "\n",
        "  DNS Lookup    TCP Connection    TLS Handshake    WS Handshake    Message RTT\n",
        "|     10ms  |           20ms  |          30ms  |         15ms  |         5ms  |\n",
        "|           |                 |                |               |              |\n",
        "|  DNS lookup:10ms            |                |               |              |\n",
        "|                 TCP connected:30ms           |               |              |\n",
        "|                                       TLS done:60ms          |              |\n",
        "|                                                        WS done:75ms         |\n",
        "-                                                                         Total:80ms    \n",
        "\n",
    );
    assert_eq!(TimingReport::new(&m, Palette::plain()).to_tiered_string(), expected);
}

#[test]
fn test_ws_diagram_has_no_tls_column() {
    let mut phases = sample_phases();
    phases.tls_handshake = None;
    let m = Measurement::new(Url::parse("ws://example.org").unwrap(), phases, 1);
    let report = TimingReport::new(&m, Palette::plain());

    let rendered = report.phases();
    assert_eq!(rendered.len(), 4);
    assert!(rendered.iter().all(|p| p.phase != Phase::TlsHandshake));

    let diagram = report.to_tiered_string();
    assert!(!diagram.contains("TLS"));
    assert!(diagram.contains("WS done:45ms"));
    assert!(diagram.contains("Total:50ms"));
}

#[test]
fn test_durations_sum_to_total() {
    let phases = Phases {
        dns_lookup: Duration::from_micros(3_999),
        tcp_connection: Duration::from_micros(12_501),
        tls_handshake: Some(Duration::from_micros(27_333)),
        ws_handshake: Duration::from_micros(9_870),
        message_round_trip: Duration::from_micros(1_999),
    };
    let m = Measurement::new(Url::parse("wss://example.org").unwrap(), phases, 1);
    let report = TimingReport::new(&m, Palette::plain());

    let sum: u128 = report.phases().iter().map(|p| p.duration_ms).sum();
    assert_eq!(sum, report.total_ms());
    assert_eq!(report.total_ms(), m.total_time().as_millis());
}

#[test]
fn test_rendering_is_idempotent() {
    let m = Measurement::new(Url::parse("wss://example.org").unwrap(), sample_phases(), 1);
    let first = TimingReport::new(&m, Palette::new(true)).to_tiered_string();
    let second = TimingReport::new(&m, Palette::new(true)).to_tiered_string();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_burst_uses_mean_label() {
    let probe = FixedProbe {
        phases: sample_phases(),
        replies: vec![],
    };
    let target = Url::parse("wss://example.org").unwrap();
    let config = Config::new(target.clone(), MeasurementMode::select(None, None, None, 5).unwrap());

    let mut out = Vec::new();
    run(&config, &probe, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Mean RTT"));
    assert!(!out.contains("Message RTT"));

    let mut basic = Config::new(target, MeasurementMode::select(None, None, None, 5).unwrap());
    basic.verbosity = Verbosity::Basic;
    let mut out = Vec::new();
    run(&basic, &probe, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Total time: 80ms"));
    assert!(out.contains("Mean message RTT: 5ms (5 messages)"));
}

#[tokio::test]
async fn test_text_reply_printed_in_native_form() {
    let probe = FixedProbe {
        phases: sample_phases(),
        replies: vec![Message::Text(r#"{"echo":"hello"}"#.into())],
    };
    let target = resolve_target("ws://x", false).unwrap();
    let config = Config::new(target, MeasurementMode::Text("hello".into()));

    let mut out = Vec::new();
    run(&config, &probe, &mut out).await.unwrap();
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("\nResponse: {echo: hello}\n\n"), "{out}");
    assert!(!out.contains(r#""echo""#));
    assert!(out.contains("DNS Lookup"));
}

#[tokio::test]
async fn test_response_only_prints_just_the_reply() {
    let probe = FixedProbe {
        phases: sample_phases(),
        replies: vec![Message::Text(r#"{"jsonrpc":"2.0","result":1}"#.into())],
    };
    let mut config = Config::new(
        Url::parse("wss://example.org").unwrap(),
        MeasurementMode::JsonMethod("status".into()),
    );
    config.response_only = true;

    let mut out = Vec::new();
    run(&config, &probe, &mut out).await.unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\n  \"jsonrpc\": \"2.0\",\n  \"result\": 1\n}\n"
    );
}

#[tokio::test]
async fn test_quiet_ping_prints_nothing() {
    let probe = FixedProbe {
        phases: sample_phases(),
        replies: vec![],
    };
    let mut config = Config::new(Url::parse("wss://example.org").unwrap(), MeasurementMode::Ping);
    config.verbosity = Verbosity::Quiet;

    let mut out = Vec::new();
    run(&config, &probe, &mut out).await.unwrap();
    assert!(out.is_empty());
}
