//! Criterion microbenches for label layout and sheet packing.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Building a preset label (barcode encoding, layout, validation)
//! - Rendering a label to SVG
//! - Planning a full A4 sheet of labels
//! - Rendering a sheet to PDF in memory

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use pinlabel::render::{PdfSurface, TextMeasurer};
use pinlabel::sheet::{Sheet, SheetConfig};
use pinlabel::styles::Style;

/// One full A4 landscape page of NHMD labels.
const SHEET_LABELS: u64 = 21 * 34;

fn sheet_labels() -> Vec<pinlabel::label::Label> {
    (1..=SHEET_LABELS)
        .map(|n| Style::Nhmd.label(n, None).expect("build label"))
        .collect()
}

/// Benchmark building single labels of each style.
fn bench_label_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("label_build");
    group.throughput(Throughput::Elements(1));

    for style in [Style::Nhmd, Style::Nhma] {
        group.bench_function(format!("{style:?}"), |b| {
            b.iter(|| {
                let label = style.label(black_box(123_456_789), None).unwrap();
                black_box(label)
            })
        });
    }

    group.finish();
}

/// Benchmark SVG serialization of a built label.
fn bench_label_svg(c: &mut Criterion) {
    let label = Style::Nhma
        .label(42, Some("Leg. X"))
        .expect("Failed to build label");

    c.bench_function("label_svg", |b| {
        b.iter(|| black_box(black_box(&label).to_svg_string()))
    });
}

/// Benchmark the packing algorithm alone.
fn bench_sheet_plan(c: &mut Criterion) {
    let labels = sheet_labels();
    let config = SheetConfig::default().with_double_sided(true);
    let sheet = Sheet::new(&labels, config).expect("Failed to create sheet");
    let measurer = TextMeasurer::default();

    let mut group = c.benchmark_group("sheet");
    group.throughput(Throughput::Elements(labels.len() as u64));

    group.bench_function("plan", |b| b.iter(|| black_box(sheet.plan(&measurer))));

    group.bench_function("pdf", |b| {
        b.iter(|| {
            let mut pdf = PdfSurface::new();
            sheet.generate(&mut pdf, &measurer).unwrap();
            black_box(pdf.finish().unwrap())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_label_build,
    bench_label_svg,
    bench_sheet_plan,
);
criterion_main!(benches);
