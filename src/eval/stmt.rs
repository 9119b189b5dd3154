//! The statement walker shared by all three loop kinds, and the loop
//! drivers themselves.
//!
//! A walk threads a mutable context and a `LabelSink` through nested
//! statements; yields contribute labels, assignments execute for their side
//! effects, and everything else contributes nothing. Loop drivers fork the
//! context once, then iterate their child up to `LOOP_LIMIT` times.

use crate::ast::{Expr, Stmt};
use crate::label::Label;
use crate::value::Value;

use super::expr::key_as_binding;
use super::{Context, LOOP_LIMIT, LabelSink, Signal};

/// Walk one statement body, collecting labels from yields and nested loops.
pub(crate) fn walk_body(ctx: &mut Context<'_>, body: &[Stmt], sink: &mut LabelSink) -> Option<Signal> {
    for stmt in body {
        match stmt {
            Stmt::Break => return Some(Signal::Break),
            Stmt::Continue => return Some(Signal::Continue),
            // A return ends the walk; the body's value is not our concern
            // here.
            Stmt::Return(_) => return Some(Signal::Break),
            Stmt::If { cond, then, otherwise } => {
                // An unresolvable condition makes the whole if contribute
                // nothing.
                let Some(c) = ctx.resolve(cond) else {
                    continue;
                };
                let branch = if c.truthy() { Some(then) } else { otherwise.as_ref() };
                if let Some(branch) = branch
                    && let Some(signal) = walk_body(ctx, branch, sink)
                {
                    return Some(signal);
                }
            }
            Stmt::Yield { key, value: _ } => match key {
                Some(key_expr) => match ctx.resolve(key_expr).and_then(|k| k.cast_key()) {
                    Some(k) => sink.push_named(Label::for_key(&k)),
                    None => sink.push_positional(),
                },
                None => sink.push_positional(),
            },
            Stmt::For { init, cond, update, body } => {
                run_for(ctx, init, cond.as_ref(), update, body, sink);
            }
            Stmt::Foreach { source, key_var, value_var, body } => {
                run_foreach(ctx, source, key_var.as_deref(), value_var, body, sink);
            }
            Stmt::While { cond, body } => {
                run_while(ctx, cond, body, sink);
            }
            Stmt::Expr(expr) => {
                // Side effects only (assignments, updates); no labels.
                let _ = ctx.resolve(expr);
            }
            Stmt::Unknown => {}
        }
    }
    None
}

/// Loop conditions that cannot be resolved count as true: the iteration cap,
/// not the condition, bounds such loops.
fn cond_holds(ctx: &mut Context<'_>, cond: Option<&Expr>) -> bool {
    match cond {
        Some(expr) => ctx.resolve(expr).is_none_or(|v| v.truthy()),
        None => true,
    }
}

pub(crate) fn run_for(
    parent: &Context<'_>,
    init: &[Expr],
    cond: Option<&Expr>,
    update: &[Expr],
    body: &[Stmt],
    sink: &mut LabelSink,
) {
    let mut ctx = parent.fork();
    for expr in init {
        let _ = ctx.resolve(expr);
    }
    for _ in 0..LOOP_LIMIT {
        if !cond_holds(&mut ctx, cond) {
            break;
        }
        match walk_body(&mut ctx, body, sink) {
            Some(Signal::Break) => break,
            Some(Signal::Continue) | None => {}
        }
        for expr in update {
            let _ = ctx.resolve(expr);
        }
    }
}

pub(crate) fn run_while(parent: &Context<'_>, cond: &Expr, body: &[Stmt], sink: &mut LabelSink) {
    let mut ctx = parent.fork();
    for _ in 0..LOOP_LIMIT {
        if !cond_holds(&mut ctx, Some(cond)) {
            break;
        }
        match walk_body(&mut ctx, body, sink) {
            Some(Signal::Break) => break,
            Some(Signal::Continue) | None => {}
        }
    }
}

/// A foreach source must resolve to an array (directly, through a variable,
/// or through a class constant); otherwise the loop contributes nothing.
pub(crate) fn run_foreach(
    parent: &Context<'_>,
    source: &Expr,
    key_var: Option<&str>,
    value_var: &str,
    body: &[Stmt],
    sink: &mut LabelSink,
) {
    let mut ctx = parent.fork();
    let Some(array) = ctx.resolve(source).and_then(Value::into_array) else {
        return;
    };
    for (key, value) in array.entries() {
        if let Some(kvar) = key_var {
            ctx.set(kvar, key_as_binding(key));
        }
        ctx.set(value_var, value.clone());
        match walk_body(&mut ctx, body, sink) {
            Some(Signal::Break) => break,
            Some(Signal::Continue) | None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AssignOp, BinOp, UpdateOp};

    fn labels(sink: LabelSink) -> Vec<String> {
        sink.labels.iter().map(Label::to_string).collect()
    }

    #[test]
    fn foreach_yield_keyed_by_value() {
        let ctx = Context::new(None);
        let mut sink = LabelSink::new();
        let source = Expr::list(vec![Expr::str("alpha"), Expr::str("beta"), Expr::str("gamma")]);
        let body = vec![Stmt::yield_keyed(Expr::var("v"), Expr::list(vec![Expr::var("v")]))];
        run_foreach(&ctx, &source, None, "v", &body, &mut sink);
        assert_eq!(labels(sink), vec!["\"alpha\"", "\"beta\"", "\"gamma\""]);
    }

    #[test]
    fn foreach_non_array_source_contributes_nothing() {
        let ctx = Context::new(None);
        let mut sink = LabelSink::new();
        let body = vec![Stmt::yield_value(Expr::var("v"))];
        run_foreach(&ctx, &Expr::var("missing"), None, "v", &body, &mut sink);
        assert!(sink.labels.is_empty());
    }

    #[test]
    fn for_loop_counts_with_its_control_variable() {
        let ctx = Context::new(None);
        let mut sink = LabelSink::new();
        let init = vec![Expr::assign("i", Expr::num(0.0))];
        let cond = Expr::bin(Expr::var("i"), BinOp::Lt, Expr::num(3.0));
        let update = vec![Expr::Update { target: "i".into(), op: UpdateOp::Incr }];
        let body = vec![Stmt::yield_keyed(
            Expr::bin(Expr::str("case "), BinOp::Concat, Expr::var("i")),
            Expr::Null,
        )];
        run_for(&ctx, &init, Some(&cond), &update, &body, &mut sink);
        assert_eq!(labels(sink), vec!["\"case 0\"", "\"case 1\"", "\"case 2\""]);
    }

    #[test]
    fn unresolvable_condition_hits_the_cap() {
        let ctx = Context::new(None);
        let mut sink = LabelSink::new();
        let cond = Expr::method_call(Expr::var("this"), "hasNext", vec![]);
        let body = vec![Stmt::Yield { key: None, value: None }];
        run_while(&ctx, &cond, &body, &mut sink);
        assert_eq!(sink.labels.len(), LOOP_LIMIT);
    }

    #[test]
    fn break_stops_continue_skips() {
        let ctx = Context::new(None);
        let mut sink = LabelSink::new();
        let source = Expr::list(vec![Expr::num(1.0), Expr::num(2.0), Expr::num(3.0)]);
        // if ($v == 2) continue; if ($v == 3) break; yield;
        let body = vec![
            Stmt::If {
                cond: Expr::bin(Expr::var("v"), BinOp::Eq, Expr::num(2.0)),
                then: vec![Stmt::Continue],
                otherwise: None,
            },
            Stmt::If {
                cond: Expr::bin(Expr::var("v"), BinOp::Eq, Expr::num(3.0)),
                then: vec![Stmt::Break],
                otherwise: None,
            },
            Stmt::Yield { key: None, value: None },
        ];
        run_foreach(&ctx, &source, None, "v", &body, &mut sink);
        assert_eq!(labels(sink), vec!["#0"]);
    }

    #[test]
    fn loop_bindings_do_not_escape() {
        let mut ctx = Context::new(None);
        ctx.set("x", Value::Num(1.0));
        let mut sink = LabelSink::new();
        let source = Expr::list(vec![Expr::num(10.0)]);
        let body = vec![Stmt::Expr(Expr::assign("x", Expr::num(99.0)))];
        run_foreach(&ctx, &source, None, "v", &body, &mut sink);
        assert_eq!(ctx.get("x"), Some(&Value::Num(1.0)));
    }

    #[test]
    fn nested_loops_splice_into_one_sink() {
        let ctx = Context::new(None);
        let mut sink = LabelSink::new();
        let outer_src = Expr::list(vec![Expr::str("a"), Expr::str("b")]);
        let inner_src = Expr::call("range", vec![Expr::num(0.0), Expr::num(1.0)]);
        let inner = Stmt::Foreach {
            source: inner_src,
            key_var: None,
            value_var: "n".into(),
            body: vec![Stmt::yield_keyed(
                Expr::bin(Expr::var("v"), BinOp::Concat, Expr::var("n")),
                Expr::Null,
            )],
        };
        run_foreach(&ctx, &outer_src, None, "v", &[inner], &mut sink);
        assert_eq!(labels(sink), vec!["\"a0\"", "\"a1\"", "\"b0\"", "\"b1\""]);
    }

    #[test]
    fn assignments_in_bodies_feed_later_yields() {
        let ctx = Context::new(None);
        let mut sink = LabelSink::new();
        let source = Expr::list(vec![Expr::num(1.0), Expr::num(2.0)]);
        let body = vec![
            Stmt::Expr(Expr::compound("total", AssignOp::Add, Expr::var("v"))),
            Stmt::yield_keyed(
                Expr::bin(Expr::str("sum "), BinOp::Concat, Expr::var("total")),
                Expr::Null,
            ),
        ];
        run_foreach(&ctx, &source, None, "v", &body, &mut sink);
        assert_eq!(labels(sink), vec!["\"sum 1\"", "\"sum 3\""]);
    }
}
