#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the string entry point and the report generators on top of it.
fuzz_target!(|data: (&str, &str)| {
    let (old, new) = data;
    let result = span_diff::diff::diff_str(old, new);
    let texts = span_diff::reports::TextPair::new(old, new);
    let config = span_diff::reports::ReportConfig::default();
    for format in [
        span_diff::ReportFormat::Json,
        span_diff::ReportFormat::Annotated,
        span_diff::ReportFormat::Spans,
    ] {
        let reporter = span_diff::reports::create_reporter_with_options(format, false);
        assert!(reporter.generate(&result, &texts, &config).is_ok());
    }
});
