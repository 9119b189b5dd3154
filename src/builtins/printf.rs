//! A deliberately small sprintf: `%s`, `%d`, `%f` with an optional
//! positional index (`%2$s`), `-`/`0`/space flags, fixed width, and a
//! precision for `%f`. Anything outside that grammar makes the whole
//! format absent; a wrong label is worse than no label.

use crate::value::Value;

use super::scalar;

#[derive(Default)]
struct Spec {
    arg: Option<usize>,
    left_align: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
}

pub fn format_sprintf(fmt: &str, args: &[Value]) -> Option<String> {
    let chars: Vec<char> = fmt.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    let mut next_arg = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        i += 1;
        if i < chars.len() && chars[i] == '%' {
            out.push('%');
            i += 1;
            continue;
        }

        let (spec, conv) = parse_spec(&chars, &mut i)?;
        let arg = match spec.arg {
            // Positional references are 1-based and do not advance the
            // sequential cursor.
            Some(pos) => args.get(pos.checked_sub(1)?)?,
            None => {
                let a = args.get(next_arg)?;
                next_arg += 1;
                a
            }
        };

        let rendered = match conv {
            's' => {
                if spec.precision.is_some() {
                    return None;
                }
                scalar(arg)?
            }
            'd' => {
                if spec.precision.is_some() {
                    return None;
                }
                let n = arg.as_number()?.trunc() as i64;
                if spec.zero_pad && !spec.left_align {
                    format!("{:01$}", n, spec.width)
                } else {
                    n.to_string()
                }
            }
            'f' => {
                let n = arg.as_number()?;
                let prec = spec.precision.unwrap_or(6);
                if spec.zero_pad && !spec.left_align {
                    format!("{:01$.2$}", n, spec.width, prec)
                } else {
                    format!("{n:.prec$}")
                }
            }
            _ => return None,
        };
        push_padded(&mut out, &rendered, &spec, conv);
    }

    Some(out)
}

/// Parse everything between `%` and the conversion character, leaving the
/// cursor after the conversion.
fn parse_spec(chars: &[char], i: &mut usize) -> Option<(Spec, char)> {
    let mut spec = Spec::default();

    // Leading digits are an argument index only when a `$` follows.
    let digits_start = *i;
    let mut j = *i;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if j > digits_start && j < chars.len() && chars[j] == '$' {
        let pos: String = chars[digits_start..j].iter().collect();
        spec.arg = Some(pos.parse().ok()?);
        *i = j + 1;
    }

    while *i < chars.len() {
        match chars[*i] {
            '-' => spec.left_align = true,
            '0' => spec.zero_pad = true,
            ' ' => {} // space padding is the default
            _ => break,
        }
        *i += 1;
    }

    let width_start = *i;
    while *i < chars.len() && chars[*i].is_ascii_digit() {
        *i += 1;
    }
    if *i > width_start {
        let w: String = chars[width_start..*i].iter().collect();
        spec.width = w.parse().ok()?;
    }

    if *i < chars.len() && chars[*i] == '.' {
        *i += 1;
        let prec_start = *i;
        while *i < chars.len() && chars[*i].is_ascii_digit() {
            *i += 1;
        }
        let p: String = chars[prec_start..*i].iter().collect();
        spec.precision = Some(p.parse().unwrap_or(0));
    }

    if *i >= chars.len() {
        return None;
    }
    let conv = chars[*i];
    *i += 1;
    Some((spec, conv))
}

fn push_padded(out: &mut String, rendered: &str, spec: &Spec, conv: char) {
    let len = rendered.chars().count();
    if spec.width <= len {
        out.push_str(rendered);
        return;
    }
    // Numeric zero padding was already applied sign-aware during rendering.
    if spec.zero_pad && !spec.left_align && (conv == 'd' || conv == 'f') {
        out.push_str(rendered);
        return;
    }
    let pad = spec.width - len;
    if spec.left_align {
        out.push_str(rendered);
        out.extend(std::iter::repeat_n(' ', pad));
    } else {
        out.extend(std::iter::repeat_n(' ', pad));
        out.push_str(rendered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(f: &str, args: &[Value]) -> Option<String> {
        format_sprintf(f, args)
    }

    #[test]
    fn plain_conversions() {
        assert_eq!(
            fmt("%s is %d", &[Value::str("n"), Value::Num(4.0)]).as_deref(),
            Some("n is 4")
        );
        assert_eq!(fmt("%f", &[Value::Num(1.5)]).as_deref(), Some("1.500000"));
        assert_eq!(fmt("%.2f", &[Value::Num(1.5)]).as_deref(), Some("1.50"));
        assert_eq!(fmt("100%%", &[]).as_deref(), Some("100%"));
    }

    #[test]
    fn width_and_padding() {
        assert_eq!(fmt("%5d", &[Value::Num(42.0)]).as_deref(), Some("   42"));
        assert_eq!(fmt("%-5d|", &[Value::Num(42.0)]).as_deref(), Some("42   |"));
        assert_eq!(fmt("%05d", &[Value::Num(42.0)]).as_deref(), Some("00042"));
        assert_eq!(fmt("%05d", &[Value::Num(-42.0)]).as_deref(), Some("-0042"));
        assert_eq!(fmt("%6s", &[Value::str("ab")]).as_deref(), Some("    ab"));
    }

    #[test]
    fn positional_arguments() {
        assert_eq!(
            fmt("%2$s-%1$s", &[Value::str("a"), Value::str("b")]).as_deref(),
            Some("b-a")
        );
        // positional references do not advance the sequential cursor
        assert_eq!(
            fmt("%2$s %s", &[Value::str("a"), Value::str("b")]).as_deref(),
            Some("b a")
        );
        assert_eq!(fmt("%3$s", &[Value::str("a")]), None);
    }

    #[test]
    fn unsupported_grammar_is_absent() {
        assert_eq!(fmt("%x", &[Value::Num(255.0)]), None);
        assert_eq!(fmt("%b", &[Value::Num(2.0)]), None);
        assert_eq!(fmt("%d", &[]), None);
        assert_eq!(fmt("%d", &[Value::str("abc")]), None);
        assert_eq!(fmt("%", &[]), None);
    }

    #[test]
    fn numeric_strings_feed_numeric_conversions() {
        assert_eq!(fmt("%d", &[Value::str("7")]).as_deref(), Some("7"));
    }
}
