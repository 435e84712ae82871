// Criterion benchmarks for the company profiler

use company_profiler::core::{is_plausible_url, normalize_profile, validate_website_url, ProfileView};
use company_profiler::models::RawProfile;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;

fn create_raw_profile(item_count: usize) -> RawProfile {
    let items: Vec<String> = (0..item_count).map(|i| format!("Service line {}", i % 50)).collect();
    let emails: Vec<String> = (0..item_count)
        .map(|i| format!("contact{}@example{}.com", i % 20, i % 3))
        .collect();

    RawProfile::from_value(json!({
        "company_name": "Acme Solar",
        "company_description": "Designs and installs photovoltaic systems for public buildings.",
        "service_lines": items.join(", "),
        "tier1_keywords": "- solar\n- photovoltaic\n- renewable energy",
        "tier2_keywords": ["energy", "Unknown", "utilities", "energy"],
        "emails": emails.join("\n"),
        "point_of_contact": "Jane Doe; John Smith",
    }))
}

fn bench_url_checks(c: &mut Criterion) {
    let inputs = [
        "https://acmesolar.com",
        "  http://www.example.co.uk/about/team?ref=home  ",
        "acmesolar.com",
        "ftp://files.example.org",
        "https://acme",
    ];

    let mut group = c.benchmark_group("url_checks");

    group.bench_function("is_plausible_url", |b| {
        b.iter(|| {
            for input in inputs.iter() {
                black_box(is_plausible_url(black_box(input)));
            }
        });
    });

    group.bench_function("validate_website_url", |b| {
        b.iter(|| {
            for input in inputs.iter() {
                let _ = black_box(validate_website_url(black_box(Some(*input))));
            }
        });
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_profile");

    for item_count in [10, 100, 1000].iter() {
        let raw = create_raw_profile(*item_count);

        group.bench_with_input(BenchmarkId::from_parameter(item_count), item_count, |b, _| {
            b.iter(|| normalize_profile(black_box(&raw)));
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let profile = normalize_profile(&create_raw_profile(100));

    c.bench_function("render_profile_view", |b| {
        b.iter(|| ProfileView::from(black_box(&profile)).to_string());
    });
}

criterion_group!(benches, bench_url_checks, bench_normalize, bench_render);

criterion_main!(benches);
