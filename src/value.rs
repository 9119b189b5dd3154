//! Resolved runtime values.
//!
//! Absence ("could not be statically resolved") is `None` at the
//! `Option<Value>` level everywhere in the interpreter; `Value::Null` is the
//! in-language null and a different thing entirely.

/// An insertion-ordered key/value container modeling array-like values.
///
/// Keys are strings; canonical integer keys denote positional entries. The
/// auto-index counter advances only on unkeyed pushes and is never reset or
/// advanced by explicit keys, matching how the host language's array literal
/// auto-increments independently of named keys interleaved within it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayVal {
    entries: Vec<(String, Value)>,
    next_index: u64,
}

impl ArrayVal {
    pub fn new() -> Self {
        ArrayVal::default()
    }

    /// Append an entry under the next auto-incremented index.
    pub fn push(&mut self, value: Value) {
        self.entries.push((self.next_index.to_string(), value));
        self.next_index += 1;
    }

    /// Append an entry under an explicit key. Does not touch the auto index.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// The value at insertion position `idx`, regardless of key.
    pub fn value_at(&self, idx: usize) -> Option<&Value> {
        self.entries.get(idx).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &(String, Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<Value> for ArrayVal {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut arr = ArrayVal::new();
        for v in iter {
            arr.push(v);
        }
        arr
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(ArrayVal),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(s.into())
    }

    /// Numeric view where one genuinely exists: numbers, fully-numeric
    /// strings, and booleans. Null and arrays have none.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null | Value::Array(_) => None,
        }
    }

    /// Forced numeric coercion used by loose comparisons: non-numeric
    /// strings and arrays become NaN (which then compares false against
    /// everything), null becomes 0.
    pub fn cast_number(&self) -> f64 {
        match self {
            Value::Num(n) => *n,
            Value::Str(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Null => 0.0,
            Value::Array(_) => f64::NAN,
        }
    }

    /// String cast, the way the host runtime would print the value.
    pub fn to_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => {
                if *b {
                    "1".to_string()
                } else {
                    String::new()
                }
            }
            Value::Num(n) => format_number(*n),
            Value::Str(s) => s.clone(),
            Value::Array(_) => "Array".to_string(),
        }
    }

    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Num(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty() && s != "0",
            Value::Array(a) => !a.is_empty(),
        }
    }

    /// Array-key cast. Float keys truncate to their integer part; arrays
    /// cannot be keys.
    pub fn cast_key(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Num(n) => Some(format!("{}", n.trunc() as i64)),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayVal> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<ArrayVal> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

/// Format a number for display: integer form when exact, decimal otherwise.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NAN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if n == n.trunc() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
