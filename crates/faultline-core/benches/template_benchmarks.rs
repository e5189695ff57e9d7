//! Benchmarks for template rendering and message construction
//!
//! Copyright (c) 2025 Faultline Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use faultline_core::{tokens, RenderContext, Template, TemplateEngine, TokenBag, Validator};

fn wide_template(width: usize) -> (String, TokenBag) {
    let mut template = String::new();
    let mut bag = TokenBag::new();
    for i in 0..width {
        template.push_str(&format!("field {{Field{}:N}} and ", i));
        bag.insert(format!("field{}", i), i as i64 * 1000);
    }
    (template, bag)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let bag = tokens! { "name" => "Ana", "count" => 7 };
    group.bench_function("short", |b| {
        b.iter(|| {
            TemplateEngine::render(
                black_box("Hello {Name}, you have {Count:D} items"),
                Some(black_box(&bag)),
            )
        })
    });

    group.bench_function("degraded", |b| {
        let partial = tokens! { "name" => "Ana" };
        b.iter(|| {
            TemplateEngine::render(
                black_box("Hello {Name}, you have {Count:D} items"),
                Some(black_box(&partial)),
            )
        })
    });

    for width in [4, 32, 256] {
        let (template, bag) = wide_template(width);
        group.bench_with_input(BenchmarkId::new("wide", width), &width, |b, _| {
            b.iter(|| TemplateEngine::render(black_box(&template), Some(black_box(&bag))))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let (template, _) = wide_template(64);
    c.bench_function("parse_wide_64", |b| b.iter(|| Template::parse(black_box(&template))));
}

fn bench_messages(c: &mut Criterion) {
    let ctx = RenderContext::with_builtin_catalog("en-US");

    c.bench_function("not_found_message", |b| {
        b.iter(|| ctx.not_found_labeled(black_box("User"), black_box(42)))
    });

    c.bench_function("validator_chain", |b| {
        let emails = vec!["lisa@gmail.com".to_string()];
        b.iter(|| {
            let mut validator = Validator::new(&ctx);
            validator
                .validate_property_is_required("Name", &Some("Lisa"))
                .validate_string_length("Name", Some("Lisa"), 3, 5)
                .validate_collection_has_values("Emails", Some(emails.as_slice()));
            black_box(validator.has_errors())
        })
    });
}

criterion_group!(benches, bench_render, bench_parse, bench_messages);
criterion_main!(benches);
