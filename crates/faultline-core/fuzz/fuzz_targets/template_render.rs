//! Fuzzing target for template rendering
//!
//! Arbitrary templates must render without panicking, and a degraded
//! render must hand back the template unchanged.

#![no_main]

use faultline_core::{TemplateEngine, TokenBag, TokenValue};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);

    // First line is the template, the rest are name=value tokens
    let mut lines = input.lines();
    let template = lines.next().unwrap_or_default();
    let bag: TokenBag = lines
        .filter_map(|line| line.split_once('='))
        .map(|(name, value)| (name.to_string(), TokenValue::parse_loose(value)))
        .collect();

    let rendering = TemplateEngine::render_detailed(template, Some(&bag));
    if rendering.is_degraded() {
        assert_eq!(rendering.text, template);
    }

    let untouched = TemplateEngine::render_detailed(template, None);
    assert_eq!(untouched.text, template);
});
