use criterion::{criterion_group, criterion_main, Criterion};
use pressdex_core::tokenizer::tokenize;

fn bench_tokenize(c: &mut Criterion) {
    let text = include_str!("../../README.md").repeat(16);
    c.bench_function("tokenize_readme_x16", |b| b.iter(|| tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
