use criterion::{Criterion, criterion_group, criterion_main};
use jsonredact::Redactor;

const BIG_JSON: &str = r#"{
  "id": "req-8832",
  "user": {"name": "Ada", "email": "ada@example.com"},
  "items": [
    {"sku": "A1", "price": 10},
    {"sku": "A2", "price": 20},
    {"sku": "A3", "price": 30}
  ],
  "meta": {"created": "2024-01-01", "tags": ["a", "b", "c"]}
}"#;

fn bench_no_match(c: &mut Criterion) {
    // Demonstrates the lazy-buffer zero-allocation claim: every pattern
    // here is well-formed but never present in `BIG_JSON`, so `redact`
    // should return a borrowed `Cow` without copying a single byte.
    let redactor = Redactor::new(["nonexistent.path", "*.does_not_exist"], |raw: &str| {
        raw.to_string()
    });
    c.bench_function("redact_no_match", |b| {
        b.iter(|| {
            let out = redactor.redact(std::hint::black_box(BIG_JSON));
            assert!(matches!(out, std::borrow::Cow::Borrowed(_)));
            std::hint::black_box(out);
        })
    });
}

fn bench_scattered_match(c: &mut Criterion) {
    let redactor = Redactor::new(["user.email", "items.#.sku"], |_raw: &str| {
        "REDACTED".to_string()
    });
    c.bench_function("redact_scattered_match", |b| {
        b.iter(|| {
            let out = redactor.redact(std::hint::black_box(BIG_JSON));
            std::hint::black_box(out);
        })
    });
}

criterion_group!(benches, bench_no_match, bench_scattered_match);
criterion_main!(benches);
