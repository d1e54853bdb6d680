//! The tiered timing diagram.
//!
//! Every number printed is a whole millisecond. Per-phase durations are the
//! differences between successive truncated cumulative markers, so the
//! durations on the top row always add up to the total on the bottom row.

use super::color::Palette;
use crate::stat::{Measurement, Phase};
use std::io::{self, Write};

/// Wording that depends on how many messages were sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    /// Column heading of the message phase in the diagram.
    pub round_trip_column: &'static str,
    /// Label of the round trip line in basic output.
    pub round_trip: &'static str,
}

impl Labels {
    pub fn for_count(message_count: u32) -> Self {
        if message_count > 1 {
            Self {
                round_trip_column: "Mean RTT",
                round_trip: "Mean message RTT",
            }
        } else {
            Self {
                round_trip_column: "Message RTT",
                round_trip: "Message RTT",
            }
        }
    }

    pub fn is_mean(&self) -> bool {
        self.round_trip_column.starts_with("Mean")
    }
}

/// A phase as it appears in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedPhase {
    pub phase: Phase,
    pub duration_ms: u128,
    pub done_at_ms: u128,
}

pub struct TimingReport<'a> {
    measurement: &'a Measurement,
    labels: Labels,
    palette: Palette,
}

impl<'a> TimingReport<'a> {
    pub fn new(measurement: &'a Measurement, palette: Palette) -> Self {
        Self {
            measurement,
            labels: Labels::for_count(measurement.message_count),
            palette,
        }
    }

    /// The diagram has a TLS column only for `wss` targets.
    pub fn with_tls(&self) -> bool {
        self.measurement.url.scheme() == "wss"
    }

    /// Phases in order, in whole milliseconds.
    pub fn phases(&self) -> Vec<RenderedPhase> {
        let mut previous = 0;
        self.measurement
            .timeline(self.with_tls())
            .into_iter()
            .map(|timing| {
                let done_at_ms = timing.done_at.as_millis();
                let duration_ms = done_at_ms - previous;
                previous = done_at_ms;
                RenderedPhase {
                    phase: timing.phase,
                    duration_ms,
                    done_at_ms,
                }
            })
            .collect()
    }

    pub fn total_ms(&self) -> u128 {
        self.phases().last().map_or(0, |p| p.done_at_ms)
    }

    /// Total time, plus the mean round trip and message count after a burst.
    ///
    /// No diagram is drawn here, so the mean is the measured one rather than
    /// the difference between truncated markers.
    pub fn write_basic(&self, out: &mut impl Write) -> io::Result<()> {
        let p = &self.palette;
        writeln!(out)?;
        writeln!(out, "Total time: {}", p.orange(&format!("{}ms", self.total_ms())))?;
        if self.labels.is_mean() {
            let rtt = self.measurement.message_round_trip().as_millis();
            writeln!(
                out,
                "{}: {} ({} messages)",
                self.labels.round_trip,
                p.orange(&format!("{rtt}ms")),
                self.measurement.message_count
            )?;
        }
        writeln!(out)
    }

    pub fn write_tiered(&self, out: &mut impl Write) -> io::Result<()> {
        let p = &self.palette;
        let phases = self.phases();
        let d: Vec<String> = phases
            .iter()
            .map(|phase| p.green(&pad_left(phase.duration_ms)))
            .collect();
        // Every marker but the last, which is printed as the total.
        let c: Vec<String> = phases[..phases.len() - 1]
            .iter()
            .map(|phase| p.green(&pad_right(phase.done_at_ms)))
            .collect();
        let total = p.orange(&pad_right(self.total_ms()));
        let rtt = self.labels.round_trip_column;

        writeln!(out)?;
        if self.with_tls() {
            writeln!(out, "  DNS Lookup    TCP Connection    TLS Handshake    WS Handshake    {rtt}")?;
            writeln!(out, "|{}  |      {}  |     {}  |    {}  |   {}  |", d[0], d[1], d[2], d[3], d[4])?;
            writeln!(out, "|           |                 |                |               |              |")?;
            writeln!(out, "|  DNS lookup:{}        |                |               |              |", c[0])?;
            writeln!(out, "|                 TCP connected:{}       |               |              |", c[1])?;
            writeln!(out, "|                                       TLS done:{}      |              |", c[2])?;
            writeln!(out, "|                                                        WS done:{}     |", c[3])?;
            writeln!(out, "-                                                                         Total:{total}")?;
        } else {
            writeln!(out, "  DNS Lookup    TCP Connection    WS Handshake    {rtt}")?;
            writeln!(out, "|{}  |      {}  |    {}  |  {}   |", d[0], d[1], d[2], d[3])?;
            writeln!(out, "|           |                 |               |              |")?;
            writeln!(out, "|  DNS lookup:{}        |               |              |", c[0])?;
            writeln!(out, "|                 TCP connected:{}      |              |", c[1])?;
            writeln!(out, "|                                       WS done:{}     |", c[2])?;
            writeln!(out, "-                                                        Total:{total}")?;
        }
        writeln!(out)
    }

    /// The tiered diagram as a string.
    pub fn to_tiered_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_tiered(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn pad_left(ms: u128) -> String {
    format!("{ms:>7}ms")
}

fn pad_right(ms: u128) -> String {
    format!("{:<8}", format!("{ms}ms"))
}
