use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use url::Url;
use wsstat::report::{Palette, TimingReport};
use wsstat::stat::{Measurement, Phases};

fn sample(scheme: &str) -> Measurement {
    let phases = Phases {
        dns_lookup: Duration::from_micros(10_400),
        tcp_connection: Duration::from_micros(20_900),
        tls_handshake: (scheme == "wss").then(|| Duration::from_micros(30_100)),
        ws_handshake: Duration::from_micros(15_700),
        message_round_trip: Duration::from_micros(5_300),
    };
    let url = Url::parse(&format!("{scheme}://example.org/ws")).unwrap();
    Measurement::new(url, phases, 1)
}

fn benchmark_tiered(c: &mut Criterion) {
    let wss = sample("wss");
    let ws = sample("ws");

    c.bench_function("tiered_wss_colored", |b| {
        b.iter(|| TimingReport::new(black_box(&wss), Palette::new(true)).to_tiered_string())
    });
    c.bench_function("tiered_ws_plain", |b| {
        b.iter(|| TimingReport::new(black_box(&ws), Palette::plain()).to_tiered_string())
    });
}

fn benchmark_phases(c: &mut Criterion) {
    let wss = sample("wss");
    c.bench_function("rendered_phases", |b| {
        b.iter(|| TimingReport::new(black_box(&wss), Palette::plain()).phases())
    });
}

criterion_group!(benches, benchmark_tiered, benchmark_phases);
criterion_main!(benches);
