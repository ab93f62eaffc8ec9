// benches/benchmarks.rs — Performance benchmarks (criterion)
//
//   1. Ingest throughput — decode + parse of a Shift_JIS sheet
//   2. Export throughput — re-serialize a populated sheet
//   3. Request body building for a long chat history

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sheetchat::core::formatter::{chat_request, request_body};
use sheetchat::core::types::{GenerationParams, Turn};
use sheetchat::sheet::export::to_csv_bytes;
use sheetchat::sheet::ingest::{ingest, IngestOptions};

/// Build a Shift_JIS CSV with `n` data rows.
fn build_sheet_bytes(n: usize) -> Vec<u8> {
    let mut csv = String::from("番号,本文\n");
    for i in 0..n {
        csv.push_str(&format!(
            "{i},\"実験{i}はすごく成功した。温度はとても高く, 結果はかなり良かった。\"\n"
        ));
    }
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(&csv);
    bytes.into_owned()
}

fn build_history(n: usize) -> Vec<Turn> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                Turn::user(format!("Question #{i}: is this phrasing precise enough?"))
            } else {
                Turn::assistant(format!("Answer #{i}: the word \"very\" needs a measurement."))
            }
        })
        .collect()
}

fn bench_ingest(c: &mut Criterion) {
    let bytes = build_sheet_bytes(1_000);
    let options = IngestOptions::default();
    c.bench_function("ingest_1000_rows_shift_jis", |b| {
        b.iter(|| ingest(black_box(&bytes), &options).expect("ingest"))
    });
}

fn bench_export(c: &mut Criterion) {
    let mut sheet = ingest(&build_sheet_bytes(1_000), &IngestOptions::default()).expect("ingest");
    for i in 0..sheet.rows.len() {
        sheet.set_result(i, "「すごく」は曖昧です。数値で示せますか?");
    }
    c.bench_function("export_1000_rows", |b| {
        b.iter(|| to_csv_bytes(black_box(&sheet)).expect("export"))
    });
}

fn bench_request_body(c: &mut Criterion) {
    let history = build_history(200);
    c.bench_function("request_body_200_turns", |b| {
        b.iter(|| {
            let req = chat_request(black_box(&history), "sys", GenerationParams::default());
            request_body(&req)
        })
    });
}

criterion_group!(benches, bench_ingest, bench_export, bench_request_body);
criterion_main!(benches);
