//! Benchmarks for directive scanning and flattening throughput
//!
//! Run with: cargo bench -p flattex-core

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use flattex_core::{find_directive, Config, Resolver};

const PLAIN_LINE: &str = "The quick brown fox jumps over the lazy dog, twice.\n";
const ESCAPED_LINE: &str = "A 50\\% rebate applies, \\emph{see} the \\input{notes} file.\n";
const COMMENTED_LINE: &str = "stop reading here % \\input{notes} is commented out\n";

/// A directive-free document, so flattening degenerates to a verbatim copy.
fn sample_document() -> String {
    let mut doc = String::with_capacity(16 * 1024);
    for i in 0..200 {
        doc.push_str("A line of ordinary prose with some \\emph{markup} in it.\n");
        if i % 10 == 0 {
            doc.push_str("% a comment mentioning \\input{nothing} for flavor\n");
        }
    }
    doc
}

fn bench_directive_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("directive_scan");
    for (name, line) in [
        ("plain", PLAIN_LINE),
        ("escaped", ESCAPED_LINE),
        ("commented", COMMENTED_LINE),
    ] {
        group.throughput(Throughput::Bytes(line.len() as u64));
        group.bench_function(name, |b| b.iter(|| find_directive(black_box(line))));
    }
    group.finish();
}

fn bench_identity_flatten(c: &mut Criterion) {
    let doc = sample_document();
    let mut group = c.benchmark_group("flatten");
    group.throughput(Throughput::Bytes(doc.len() as u64));
    group.bench_function("identity", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(doc.len());
            let mut resolver = Resolver::new(Config::default());
            resolver
                .resolve(black_box(doc.as_bytes()), &mut output)
                .unwrap();
            output
        })
    });
    group.finish();
}

criterion_group!(benches, bench_directive_scan, bench_identity_flatten);
criterion_main!(benches);
