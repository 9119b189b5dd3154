use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scry::ast::{ArrayEntry, BinOp, Expr, Stmt, UpdateOp};
use scry::provider::{ProviderSource, resolve_provider_labels};

/// return ['case 0' => [...], ..., 'case N-1' => [...]];
fn returned_array(n: usize) -> Vec<Stmt> {
    let entries = (0..n)
        .map(|i| {
            ArrayEntry::keyed(
                Expr::str(format!("case {i}")),
                Expr::list(vec![Expr::num(i as f64), Expr::num((i * 2) as f64)]),
            )
        })
        .collect();
    vec![Stmt::ret(Expr::Array(entries))]
}

/// foreach (range(0, n-1) as $i) { yield sprintf('case %03d', $i) => [$i]; }
fn foreach_generator(n: usize) -> Vec<Stmt> {
    vec![Stmt::Foreach {
        source: Expr::call("range", vec![Expr::num(0.0), Expr::num((n - 1) as f64)]),
        key_var: None,
        value_var: "i".into(),
        body: vec![Stmt::yield_keyed(
            Expr::call("sprintf", vec![Expr::str("case %03d"), Expr::var("i")]),
            Expr::list(vec![Expr::var("i")]),
        )],
    }]
}

/// for ($i = 0; $i < n; $i++) { yield "run $i" => []; }
fn counting_for(n: usize) -> Vec<Stmt> {
    vec![Stmt::For {
        init: vec![Expr::assign("i", Expr::num(0.0))],
        cond: Some(Expr::bin(Expr::var("i"), BinOp::Lt, Expr::num(n as f64))),
        update: vec![Expr::Update { target: "i".into(), op: UpdateOp::Incr }],
        body: vec![Stmt::yield_keyed(
            Expr::bin(Expr::str("run "), BinOp::Concat, Expr::var("i")),
            Expr::Null,
        )],
    }]
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for (name, body) in [
        ("returned_array_100", returned_array(100)),
        ("foreach_sprintf_100", foreach_generator(100)),
        ("for_concat_100", counting_for(100)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| resolve_provider_labels(ProviderSource::Method(black_box(&body)), None))
        });
    }
    group.finish();
}

fn bench_runaway_cap(c: &mut Criterion) {
    // for (;;) { yield; } is the worst case the loop cap exists for.
    let body = vec![Stmt::For {
        init: vec![],
        cond: None,
        update: vec![],
        body: vec![Stmt::Yield { key: None, value: None }],
    }];
    c.bench_function("resolve/runaway_capped", |b| {
        b.iter(|| resolve_provider_labels(ProviderSource::Method(black_box(&body)), None))
    });
}

criterion_group!(benches, bench_resolve, bench_runaway_cap);
criterion_main!(benches);
