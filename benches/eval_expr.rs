use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scry::ast::{BinOp, Expr};
use scry::eval::Context;
use scry::value::Value;

fn deep_concat(depth: usize) -> Expr {
    let mut expr = Expr::str("seed");
    for i in 0..depth {
        expr = Expr::bin(expr, BinOp::Concat, Expr::num(i as f64));
    }
    expr
}

fn bench_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("expr");

    let concat = deep_concat(50);
    group.bench_function("concat_chain_50", |b| {
        b.iter(|| Context::new(None).resolve(black_box(&concat)))
    });

    let sprintf = Expr::call(
        "sprintf",
        vec![Expr::str("%-8s %05d %.3f"), Expr::str("name"), Expr::num(42.0), Expr::num(2.5)],
    );
    group.bench_function("sprintf", |b| {
        b.iter(|| Context::new(None).resolve(black_box(&sprintf)))
    });

    let range = Expr::call("range", vec![Expr::num(0.0), Expr::num(999.0)]);
    group.bench_function("range_1000", |b| {
        b.iter(|| Context::new(None).resolve(black_box(&range)))
    });

    let mut ctx = Context::new(None);
    ctx.set("x", Value::Num(3.0));
    let lookup = Expr::bin(Expr::var("x"), BinOp::Mul, Expr::var("x"));
    group.bench_function("var_lookup_mul", |b| b.iter(|| ctx.fork().resolve(black_box(&lookup))));

    group.finish();
}

criterion_group!(benches, bench_expr);
criterion_main!(benches);
