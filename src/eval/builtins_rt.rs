//! Builtins that need the evaluation context or the syntactic shape of
//! their arguments: the array builtins the label pipeline understands.

use crate::ast::Expr;
use crate::value::{ArrayVal, Value};

use super::{Context, LOOP_LIMIT};

impl<'a> Context<'a> {
    /// `array_combine(keys, values)`. The keys argument must resolve to an
    /// array. Its string values become named keys; anything else keys by
    /// position. Values come from the second argument when it resolves,
    /// null placeholders otherwise; labels never depend on them.
    pub(crate) fn builtin_array_combine(&mut self, args: &[Expr]) -> Option<Value> {
        if args.len() < 2 {
            return None;
        }
        let keys = self.resolve(&args[0])?.into_array()?;
        let values = self.resolve(&args[1]).and_then(Value::into_array);

        let mut out = ArrayVal::new();
        for (i, (_, key_val)) in keys.entries().enumerate() {
            let value = values
                .as_ref()
                .and_then(|v| v.value_at(i))
                .cloned()
                .unwrap_or(Value::Null);
            match key_val {
                Value::Str(s) => out.insert(s.clone(), value),
                _ => out.insert(i.to_string(), value),
            }
        }
        Some(Value::Array(out))
    }

    /// `array_map(callback, array)`. The callback is never invoked, but it
    /// must itself resolve; a closure argument makes the whole call opaque.
    /// Labels derive from keys, so the result is the input array unchanged.
    pub(crate) fn builtin_array_map(&mut self, args: &[Expr]) -> Option<Value> {
        if args.len() < 2 {
            return None;
        }
        let _callback = self.resolve(&args[0])?;
        let array = self.resolve(&args[1])?.into_array()?;
        Some(Value::Array(array))
    }

    /// `implode(sep, array)` / `join(sep, array)`. Only an array built from
    /// a literal construction node is supported, and every entry must
    /// resolve to a scalar.
    pub(crate) fn builtin_implode(&mut self, args: &[Expr]) -> Option<Value> {
        if args.len() < 2 {
            return None;
        }
        let sep = self.resolve(&args[0])?;
        if matches!(sep, Value::Array(_)) {
            return None;
        }
        let Expr::Array(entries) = &args[1] else {
            return None;
        };
        let mut parts = Vec::with_capacity(entries.len());
        for entry in entries {
            let v = self.resolve(&entry.value)?;
            if matches!(v, Value::Array(_)) {
                return None;
            }
            parts.push(v.to_display());
        }
        Some(Value::Str(parts.join(&sep.to_display())))
    }

    /// `range(start, end[, step])`. Numeric endpoints, default step ±1 by
    /// direction, zero step rejected. Capped at `LOOP_LIMIT` entries.
    pub(crate) fn builtin_range(&mut self, args: &[Expr]) -> Option<Value> {
        if args.len() < 2 {
            return None;
        }
        let start = self.resolve(&args[0])?.as_number()?;
        let end = self.resolve(&args[1])?.as_number()?;
        let step = match args.get(2) {
            Some(step_expr) => {
                let s = self.resolve(step_expr)?.as_number()?;
                if s == 0.0 {
                    return None;
                }
                // The host accepts a step of either sign and walks toward
                // the endpoint.
                if (end >= start) == (s > 0.0) { s } else { -s }
            }
            None => {
                if end >= start {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        let mut out = ArrayVal::new();
        let mut cur = start;
        while out.len() < LOOP_LIMIT {
            if step > 0.0 && cur > end {
                break;
            }
            if step < 0.0 && cur < end {
                break;
            }
            out.push(Value::Num(cur));
            cur += step;
        }
        Some(Value::Array(out))
    }
}
