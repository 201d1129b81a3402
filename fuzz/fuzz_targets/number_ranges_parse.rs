//! Fuzz target for label number list parsing.
//!
//! Feeds arbitrary UTF-8 strings to the range parser, checking for panics
//! and for results that disagree with the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinlabel::numbers::parse_number_ranges;

fuzz_target!(|data: &[u8]| {
    // Huge ranges like "0-18446744073709551615" would only test the allocator
    if data.len() > 64 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if text.split(',').any(|part| {
        part.split_once('-').is_some_and(|(a, b)| {
            match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
                (Ok(a), Ok(b)) => b.saturating_sub(a) > 100_000,
                _ => false,
            }
        })
    }) {
        return;
    }

    if let Ok(numbers) = parse_number_ranges(text) {
        assert!(!numbers.is_empty());
    }
});
