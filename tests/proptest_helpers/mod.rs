#![allow(dead_code)]

use pinlabel::label::{Alignment, Margins, Offset};
use pinlabel::sheet::SheetConfig;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS_MM: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn arb_alignment() -> BoxedStrategy<Alignment> {
    proptest::sample::select(Alignment::ALL.to_vec()).boxed()
}

/// Label size in mm, in steps of 0.5 mm.
pub fn arb_label_size() -> BoxedStrategy<(f64, f64)> {
    (4u32..=80, 4u32..=80)
        .prop_map(|(w, h)| (w as f64 / 2.0, h as f64 / 2.0))
        .boxed()
}

/// An offset keeping a point placed by `alignment` inside a `width` x `height` box.
pub fn arb_offset_within(alignment: Alignment, width: f64, height: f64) -> BoxedStrategy<Offset> {
    let (fx, fy) = alignment.fractions();
    let (ax, ay) = (fx * width, fy * height);
    (0.0f64..=1.0, 0.0f64..=1.0)
        .prop_map(move |(sx, sy)| Offset::new(sx * width - ax, sy * height - ay))
        .boxed()
}

/// Page setups that fit at least one `label_width` x `label_height` label.
pub fn arb_sheet_config(label_width: f64, label_height: f64) -> BoxedStrategy<SheetConfig> {
    (
        0u32..=30,
        0u32..=30,
        0u32..=10,
        any::<bool>(),
        0u32..=200,
        0u32..=200,
    )
        .prop_map(move |(margin_x, margin_y, padding, double_sided, extra_w, extra_h)| {
            let margin_x = margin_x as f64 / 2.0;
            let margin_y = margin_y as f64 / 2.0;
            SheetConfig {
                page_width: label_width + 2.0 * margin_x + extra_w as f64,
                page_height: label_height + 2.0 * margin_y + extra_h as f64,
                margins: Margins::new(margin_y, margin_x, margin_y, margin_x),
                label_padding: padding as f64 / 10.0,
                double_sided,
            }
        })
        .boxed()
}
