use std::cmp::Ordering;

use crate::ast::{AssignOp, BinOp, Expr, InterpPart, UpdateOp};
use crate::builtins;
use crate::value::{ArrayVal, Value};

use super::Context;

impl<'a> Context<'a> {
    /// Resolve an expression to a concrete value, or `None` when it cannot
    /// be resolved with certainty. Never errors out on malformed or
    /// unsupported shapes.
    pub fn resolve(&mut self, expr: &Expr) -> Option<Value> {
        match expr {
            Expr::Null => Some(Value::Null),
            Expr::Bool(b) => Some(Value::Bool(*b)),
            Expr::Num(n) => Some(Value::Num(*n)),
            Expr::Str(s) => Some(Value::Str(s.clone())),
            Expr::Var(name) => self.get(name).cloned(),
            Expr::Interp(parts) => Some(self.resolve_interp(parts)),
            Expr::Subscript { base, index } => self.resolve_subscript(base, index),
            Expr::Neg(inner) => {
                let n = self.resolve(inner)?.as_number()?;
                Some(Value::Num(-n))
            }
            Expr::Bin { op, lhs, rhs } => {
                let l = self.resolve(lhs)?;
                let r = self.resolve(rhs)?;
                resolve_binop(&l, *op, &r)
            }
            Expr::Ternary { cond, then, otherwise } => {
                let c = self.resolve(cond)?;
                if c.truthy() {
                    self.resolve(then)
                } else {
                    self.resolve(otherwise)
                }
            }
            Expr::Array(entries) => Some(Value::Array(self.resolve_array(entries))),
            Expr::Call { name, args, receiver } => {
                if receiver.is_some() {
                    // Method calls are never invoked.
                    return None;
                }
                self.resolve_call(&name.to_ascii_lowercase(), args)
            }
            Expr::ClassConst { class: _, name } => {
                let value = self.class()?.find_const(name)?.clone();
                self.resolve(&value)
            }
            Expr::Assign { target, op, value } => self.resolve_assign(target, *op, value),
            Expr::Update { target, op } => self.resolve_update(target, *op),
            Expr::Closure { .. } | Expr::Unknown => None,
        }
    }

    /// Interpolated strings always resolve: an unbound variable part prints
    /// its raw token back rather than poisoning the whole string.
    fn resolve_interp(&mut self, parts: &[InterpPart]) -> Value {
        let mut out = String::new();
        for part in parts {
            match part {
                InterpPart::Lit(text) => out.push_str(text),
                InterpPart::Var(name) => match self.get(name) {
                    Some(v) => out.push_str(&v.to_display()),
                    None => {
                        out.push('$');
                        out.push_str(name);
                    }
                },
            }
        }
        Value::Str(out)
    }

    fn resolve_subscript(&mut self, base: &Expr, index: &Expr) -> Option<Value> {
        let base = self.resolve(base)?;
        let idx = self.resolve(index)?.as_number()?;
        match base {
            Value::Str(s) => {
                let i = idx.trunc();
                if i < 0.0 {
                    return None;
                }
                s.chars().nth(i as usize).map(|c| Value::Str(c.to_string()))
            }
            Value::Array(a) => {
                let key = format!("{}", idx.trunc() as i64);
                a.get(&key).cloned()
            }
            _ => None,
        }
    }

    /// Build an ordered container from an array-construction node. Entries
    /// go left to right; explicit keys are cast to strings, unkeyed entries
    /// take the auto index. An unresolvable value is stored as null (labels
    /// derive from keys, not values); an unresolvable key drops the entry.
    fn resolve_array(&mut self, entries: &[crate::ast::ArrayEntry]) -> ArrayVal {
        let mut arr = ArrayVal::new();
        for entry in entries {
            let value = self.resolve(&entry.value).unwrap_or(Value::Null);
            match &entry.key {
                Some(key_expr) => {
                    let Some(key) = self.resolve(key_expr).and_then(|k| k.cast_key()) else {
                        continue;
                    };
                    arr.insert(key, value);
                }
                None => arr.push(value),
            }
        }
        arr
    }

    fn resolve_assign(&mut self, target: &str, op: AssignOp, value: &Expr) -> Option<Value> {
        let rhs = self.resolve(value)?;
        let result = match op {
            AssignOp::Set => rhs,
            compound => {
                // Compound ops are numeric-only; a missing current binding
                // defaults to the additive identity.
                let current = match self.get(target) {
                    Some(v) => v.as_number()?,
                    None => 0.0,
                };
                let r = rhs.as_number()?;
                let n = match compound {
                    AssignOp::Add => current + r,
                    AssignOp::Sub => current - r,
                    AssignOp::Mul => current * r,
                    // Mod; Set was handled above.
                    _ => {
                        let div = r.trunc() as i64;
                        if div == 0 {
                            return None;
                        }
                        ((current.trunc() as i64) % div) as f64
                    }
                };
                Value::Num(n)
            }
        };
        self.set(target, result.clone());
        Some(result)
    }

    fn resolve_update(&mut self, target: &str, op: UpdateOp) -> Option<Value> {
        // The binding must already exist and be numeric.
        let current = self.get(target)?.as_number()?;
        let n = match op {
            UpdateOp::Incr => current + 1.0,
            UpdateOp::Decr => current - 1.0,
        };
        let result = Value::Num(n);
        self.set(target, result.clone());
        Some(result)
    }

    fn resolve_call(&mut self, name: &str, args: &[Expr]) -> Option<Value> {
        match name {
            "array_combine" => self.builtin_array_combine(args),
            "array_map" => self.builtin_array_map(args),
            "implode" | "join" => self.builtin_implode(args),
            "range" => self.builtin_range(args),
            _ if builtins::is_pure_builtin(name) => {
                let mut resolved = Vec::with_capacity(args.len());
                for arg in args {
                    resolved.push(self.resolve(arg)?);
                }
                builtins::call_pure(name, &resolved)
            }
            // User functions, object construction, everything else: opaque.
            _ => None,
        }
    }
}

/// Loose ordering with the right operand coerced to the left operand's type.
/// A fixed approximation of the host language's loose comparison, reproduced
/// deliberately (including NaN comparing false against everything).
fn loose_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match left {
        Value::Num(l) => l.partial_cmp(&right.cast_number()),
        Value::Str(l) => Some(l.as_str().cmp(&right.to_display().as_str())),
        Value::Bool(l) => Some(l.cmp(&right.truthy())),
        // Null only participates in equality; ordering against it is not
        // resolvable.
        Value::Null => {
            if right.truthy() {
                None
            } else {
                Some(Ordering::Equal)
            }
        }
        Value::Array(_) => None,
    }
}

fn loose_eq(left: &Value, right: &Value) -> Option<bool> {
    match left {
        Value::Num(l) => Some(*l == right.cast_number()),
        Value::Str(l) => Some(*l == right.to_display()),
        Value::Bool(l) => Some(*l == right.truthy()),
        Value::Null => Some(!right.truthy()),
        Value::Array(_) => None,
    }
}

pub(crate) fn resolve_binop(left: &Value, op: BinOp, right: &Value) -> Option<Value> {
    match op {
        BinOp::Concat => {
            let mut s = left.to_display();
            s.push_str(&right.to_display());
            Some(Value::Str(s))
        }
        BinOp::Add => Some(Value::Num(left.as_number()? + right.as_number()?)),
        BinOp::Sub => Some(Value::Num(left.as_number()? - right.as_number()?)),
        BinOp::Mul => Some(Value::Num(left.as_number()? * right.as_number()?)),
        BinOp::Mod => {
            let l = left.as_number()?.trunc() as i64;
            let r = right.as_number()?.trunc() as i64;
            if r == 0 {
                return None;
            }
            Some(Value::Num((l % r) as f64))
        }
        BinOp::Lt => Some(Value::Bool(loose_cmp(left, right)? == Ordering::Less)),
        BinOp::Le => Some(Value::Bool(loose_cmp(left, right)? != Ordering::Greater)),
        BinOp::Gt => Some(Value::Bool(loose_cmp(left, right)? == Ordering::Greater)),
        BinOp::Ge => Some(Value::Bool(loose_cmp(left, right)? != Ordering::Less)),
        BinOp::Eq => Some(Value::Bool(loose_eq(left, right)?)),
        BinOp::Ne => Some(Value::Bool(!loose_eq(left, right)?)),
        // Strict comparison: same variant, same value, no coercion.
        BinOp::Identical => Some(Value::Bool(left == right)),
        BinOp::NotIdentical => Some(Value::Bool(left != right)),
    }
}

/// Foreach binds canonical integer keys as numbers, everything else as
/// strings.
pub(crate) fn key_as_binding(key: &str) -> Value {
    match key.parse::<u64>() {
        Ok(n) if n.to_string() == key => Value::Num(n as f64),
        _ => Value::Str(key.to_string()),
    }
}
