//! Pure builtin functions: total over already-resolved scalar operands,
//! absent when a required operand is missing or the wrong type.

pub mod printf;
pub mod string;

pub use self::printf::format_sprintf;

use crate::value::Value;

/// Is this (lowercased) name a builtin that works on resolved values alone?
/// The array builtins need the evaluation context and live with it.
pub fn is_pure_builtin(name: &str) -> bool {
    matches!(
        name,
        "lcfirst"
            | "ltrim"
            | "rtrim"
            | "trim"
            | "str_repeat"
            | "str_replace"
            | "substr"
            | "sprintf"
            | "strtolower"
            | "strtoupper"
            | "ucfirst"
    )
}

/// Dispatch a pure builtin over resolved arguments.
pub fn call_pure(name: &str, args: &[Value]) -> Option<Value> {
    match name {
        "sprintf" => {
            let fmt = scalar(args.first()?)?;
            format_sprintf(&fmt, &args[1..]).map(Value::Str)
        }
        _ => string::call(name, args),
    }
}

/// String cast for scalar operands; arrays are not the right type.
pub(crate) fn scalar(v: &Value) -> Option<String> {
    match v {
        Value::Array(_) => None,
        other => Some(other.to_display()),
    }
}
