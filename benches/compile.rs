use criterion::{black_box, criterion_group, criterion_main, Criterion};
use varcode::{compile, tokenize, Namespace};

const MUTASE_RULE: &str = "1.3 or (1.3.N and 1.3.C) or 2 of {1.3l, 1.3s1(a), mcl1}";

fn namespace() -> Namespace {
    let mut ns = Namespace::new();
    for (abbr, role) in [
        ("1.3", "MethCoaMuta"),
        ("1.3.N", "MethCoaMutaN"),
        ("1.3.C", "MethCoaMutaC"),
        ("1.3l", "MethCoaMutaLarge"),
        ("1.3s1(a)", "MethCoaMutaSmall"),
        ("mcl1", "MalyCoaLyas"),
    ] {
        ns.define_role(abbr, role);
    }
    ns
}

/// A long flat rule alternating connectives, nested `n` groups deep.
fn nested_rule(n: usize) -> String {
    let mut text = String::new();
    for i in 0..n {
        let conn = if i % 2 == 0 { "and" } else { "or" };
        text.push_str(&format!("(1.3 {conn} not 1.3.N {conn} "));
    }
    text.push_str("mcl1");
    text.push_str(&")".repeat(n));
    text
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_mutase", |b| {
        b.iter(|| tokenize(black_box(MUTASE_RULE)).len());
    });
}

fn bench_compile(c: &mut Criterion) {
    let ns = namespace();
    let mut group = c.benchmark_group("compile");

    group.bench_function("mutase", |b| {
        b.iter(|| compile(black_box(MUTASE_RULE), &ns).unwrap());
    });

    for depth in [10, 100] {
        let text = nested_rule(depth);
        group.bench_function(format!("nested_{depth}"), |b| {
            b.iter(|| compile(black_box(&text), &ns).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_compile);
criterion_main!(benches);
