#![no_main]
use libfuzzer_sys::fuzz_target;
use span_diff::diff::DiffEngine;
use std::time::Duration;

/// Fuzz the engine on raw byte sequences.
///
/// The first byte splits the input into the two sides. Every result must be
/// sorted, disjoint and in bounds, with equal content left over on both sides.
fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(rest.len());
    let (a, b) = rest.split_at(split);

    let result = DiffEngine::new()
        .with_max_time(Duration::from_millis(200))
        .diff(a, b);

    for (spans, len) in [(&result.old, a.len()), (&result.new, b.len())] {
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        for span in spans.iter() {
            assert!(!span.is_empty() && span.end <= len);
        }
    }

    let keep = |input: &[u8], spans: &[span_diff::Span]| {
        let mut out = Vec::new();
        let mut cursor = 0;
        for span in spans {
            out.extend_from_slice(&input[cursor..span.start]);
            cursor = span.end;
        }
        out.extend_from_slice(&input[cursor..]);
        out
    };
    assert_eq!(keep(a, &result.old), keep(b, &result.new));
});
