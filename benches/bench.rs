// Criterion benchmarks for Product Filter

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use product_filter::core::{build_filter_prompt, parse_filter_output};
use product_filter::models::{Product, UserProfile};
use serde_json::json;

fn create_user(history_len: usize) -> UserProfile {
    let history: Vec<String> = (0..history_len).map(|i| format!("P{:05}", i)).collect();
    serde_json::from_value(json!({
        "user_id": "C1_U001",
        "user_type": "student",
        "age": 21,
        "gender": "F",
        "price_range": [20, 300],
        "blocked_list": ["alcohol", "tobacco"],
        "search_history": history,
        "view_history": history,
        "cart_history": [],
        "purchase_history": history
    }))
    .unwrap()
}

fn create_product() -> Product {
    serde_json::from_value(json!({
        "product_id": "P00042",
        "name": "Noise cancelling headphones",
        "category": "electronics",
        "brand": "Acme",
        "price": 199,
        "stock": 8
    }))
    .unwrap()
}

fn bench_build_prompt(c: &mut Criterion) {
    let product = create_product();
    let mut group = c.benchmark_group("build_filter_prompt");

    for history_len in [0, 10, 100, 1000].iter() {
        let user = create_user(*history_len);
        group.bench_with_input(
            BenchmarkId::new("history_len", history_len),
            history_len,
            |b, _| {
                b.iter(|| build_filter_prompt(black_box(&user), black_box(&product)));
            },
        );
    }

    group.finish();
}

fn bench_parse_output(c: &mut Criterion) {
    let clean = "[Conclusion] not recommendable\n[Reason] The price is far above the user's band.";
    let noisy = format!(
        "{}\n[Reason] The price is far above the user's band.\n[Conclusion] not recommendable",
        "Let me think about this step by step.\n".repeat(50)
    );

    c.bench_function("parse_clean_output", |b| {
        b.iter(|| parse_filter_output(black_box(Some(clean))));
    });

    c.bench_function("parse_noisy_output", |b| {
        b.iter(|| parse_filter_output(black_box(Some(noisy.as_str()))));
    });
}

criterion_group!(benches, bench_build_prompt, bench_parse_output);

criterion_main!(benches);
