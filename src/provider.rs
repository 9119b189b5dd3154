//! The data-provider entry point and the policy that binds the pipeline
//! together: given a provider's body (or an inline source), decide whether
//! its labels come from a single returned array, from yields, or from a
//! loop, and extract them.

use crate::ast::{ClassBody, Expr, Stmt};
use crate::eval::{Context, LabelSink, run_for, run_foreach, run_while, walk_body};
use crate::label::{Label, labels_for};
use crate::value::Value;

/// Where a data provider's datasets come from.
pub enum ProviderSource<'a> {
    /// A provider method's statement body.
    Method(&'a [Stmt]),
    /// An inline expression used directly as a dataset source (an array
    /// literal in an attribute, for instance).
    Inline(&'a Expr),
    /// An inline closure's statement body.
    Closure(&'a [Stmt]),
}

/// Predict the labels a provider will produce at run time.
///
/// Silent on everything it cannot resolve: the worst case is an empty list,
/// never an error. Pure per call: the same tree and class body always
/// produce the same labels.
pub fn resolve_provider_labels(source: ProviderSource<'_>, class: Option<&ClassBody>) -> Vec<Label> {
    match source {
        ProviderSource::Method(body) | ProviderSource::Closure(body) => resolve_body(body, class),
        ProviderSource::Inline(expr) => match expr {
            Expr::Closure { body } => resolve_body(body, class),
            _ => match Context::new(class).resolve(expr) {
                Some(Value::Array(arr)) => labels_for(&arr),
                _ => Vec::new(),
            },
        },
    }
}

/// The labels, rendered the way the live runtime displays them
/// (`data set "…"` / `data set #N`).
pub fn resolve_dataset_names(source: ProviderSource<'_>, class: Option<&ClassBody>) -> Vec<String> {
    resolve_provider_labels(source, class)
        .iter()
        .map(Label::dataset)
        .collect()
}

/// Strict precedence: one returned array, else top-level yields, else the
/// first productive loop, else nothing.
fn resolve_body(body: &[Stmt], class: Option<&ClassBody>) -> Vec<Label> {
    // 1. A body governed by exactly one return of an array.
    if let Some(ret) = sole_return(body)
        && let Some(Value::Array(arr)) = Context::new(class).resolve(ret)
    {
        return labels_for(&arr);
    }

    // 2. A generator body: any top-level yield means every top-level
    //    statement runs in order, yields contributing labels.
    if body.iter().any(|s| matches!(s, Stmt::Yield { .. })) {
        let mut ctx = Context::new(class);
        let mut sink = LabelSink::new();
        let _ = walk_body(&mut ctx, body, &mut sink);
        return sink.labels;
    }

    // 3. The first top-level loop that produces labels. Assignments along
    //    the way run for their side effects so a loop can consume earlier
    //    locals.
    let mut ctx = Context::new(class);
    let mut sink = LabelSink::new();
    for stmt in body {
        match stmt {
            Stmt::Expr(expr) => {
                let _ = ctx.resolve(expr);
            }
            Stmt::For { init, cond, update, body } => {
                run_for(&ctx, init, cond.as_ref(), update, body, &mut sink);
            }
            Stmt::Foreach { source, key_var, value_var, body } => {
                run_foreach(&ctx, source, key_var.as_deref(), value_var, body, &mut sink);
            }
            Stmt::While { cond, body } => {
                run_while(&ctx, cond, body, &mut sink);
            }
            _ => {}
        }
        if !sink.labels.is_empty() {
            return sink.labels;
        }
    }

    // 4. A provider the interpreter intentionally does not understand.
    Vec::new()
}

/// The single return statement of a body, if there is exactly one anywhere
/// in it.
fn sole_return(body: &[Stmt]) -> Option<&Expr> {
    let mut found: Option<&Expr> = None;
    if count_returns(body, &mut found) == 1 {
        found
    } else {
        None
    }
}

fn count_returns<'a>(body: &'a [Stmt], found: &mut Option<&'a Expr>) -> usize {
    let mut n = 0;
    for stmt in body {
        match stmt {
            Stmt::Return(value) => {
                n += 1;
                if let Some(expr) = value {
                    found.get_or_insert(expr);
                }
            }
            Stmt::If { then, otherwise, .. } => {
                n += count_returns(then, found);
                if let Some(otherwise) = otherwise {
                    n += count_returns(otherwise, found);
                }
            }
            Stmt::For { body, .. } | Stmt::Foreach { body, .. } | Stmt::While { body, .. } => {
                n += count_returns(body, found);
            }
            _ => {}
        }
    }
    n
}
