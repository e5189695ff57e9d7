//! Fuzzing target for malformed placeholder syntax

#![no_main]

use faultline_core::{normalize_tokens, tokens, Template, TemplateEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let base = String::from_utf8_lossy(data);
    let bag = tokens! { "name" => "Ana", "count" => 7, "ratio" => 0.25 };

    let patterns = [
        format!("{{{}}}", base),
        format!("{{Name:{}}}", base),
        format!("{{Count:{}}}", base),
        format!("{{{{{}}}}}", base),
        format!("{}{{", base),
        format!("}}{}", base),
        format!("{{{}:{}}}", base, base),
        format!("{{0}} {{1}} {{{}}}", base),
        "{".repeat(base.len() % 64) + &base,
    ];

    for pattern in &patterns {
        let _ = TemplateEngine::render(pattern, Some(&bag));
        let _ = normalize_tokens(pattern);
        let parsed = Template::parse(pattern);
        let _ = parsed.to_positional(&bag);
    }
});
