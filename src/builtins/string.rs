//! String builtins: thin, total functions over scalar operands.

use crate::value::Value;

use super::scalar;

/// Default trim character set of the host runtime.
const TRIM_CHARS: &str = " \t\n\r\0\x0B";

/// Dispatch string builtins over resolved arguments. `None` when a required
/// argument is missing, an array, or (for counts and offsets) not numeric.
pub fn call(name: &str, args: &[Value]) -> Option<Value> {
    let result = match name {
        "lcfirst" => map_first_char(&scalar(args.first()?)?, char::to_lowercase),
        "ucfirst" => map_first_char(&scalar(args.first()?)?, char::to_uppercase),
        "strtolower" => scalar(args.first()?)?.to_lowercase(),
        "strtoupper" => scalar(args.first()?)?.to_uppercase(),
        "trim" => {
            let s = scalar(args.first()?)?;
            let cs = charset(args.get(1))?;
            s.trim_matches(|c| cs.contains(&c)).to_string()
        }
        "ltrim" => {
            let s = scalar(args.first()?)?;
            let cs = charset(args.get(1))?;
            s.trim_start_matches(|c| cs.contains(&c)).to_string()
        }
        "rtrim" => {
            let s = scalar(args.first()?)?;
            let cs = charset(args.get(1))?;
            s.trim_end_matches(|c| cs.contains(&c)).to_string()
        }
        "str_repeat" => {
            let s = scalar(args.first()?)?;
            let times = args.get(1)?.as_number()?;
            if times < 0.0 {
                return None;
            }
            s.repeat(times.trunc() as usize)
        }
        "str_replace" => {
            let search = scalar(args.first()?)?;
            let replace = scalar(args.get(1)?)?;
            let subject = scalar(args.get(2)?)?;
            if search.is_empty() {
                subject
            } else {
                subject.replace(&search, &replace)
            }
        }
        "substr" => {
            let s = scalar(args.first()?)?;
            let start = args.get(1)?.as_number()?;
            let length = match args.get(2) {
                Some(v) => Some(v.as_number()?),
                None => None,
            };
            substr(&s, start, length)
        }
        _ => return None,
    };
    Some(Value::Str(result))
}

fn map_first_char<I>(s: &str, f: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => f(first).chain(chars).collect(),
        None => String::new(),
    }
}

/// The trim family's optional character-list argument, default whitespace.
fn charset(charlist: Option<&Value>) -> Option<Vec<char>> {
    match charlist {
        Some(v) => Some(scalar(v)?.chars().collect()),
        None => Some(TRIM_CHARS.chars().collect()),
    }
}

/// Substring with the host's negative-offset semantics: a negative start
/// counts back from the end, a negative length leaves that many characters
/// off the end.
fn substr(s: &str, start: f64, length: Option<f64>) -> String {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len() as i64;

    let start = start.trunc() as i64;
    let from = if start < 0 { (n + start).max(0) } else { start.min(n) };

    let to = match length {
        None => n,
        Some(len) => {
            let len = len.trunc() as i64;
            if len < 0 { (n + len).max(from) } else { (from + len).min(n) }
        }
    };

    chars[from as usize..to.max(from) as usize].iter().collect()
}
