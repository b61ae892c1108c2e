//! core::strings
//!
//! Splitting and joining of multi-value display strings.
//!
//! A vector value is displayed as its element strings joined by `"; "`.
//! Import reverses that: split on `;`, then drop exactly one leading space
//! from every element after the first. Elements containing `;` do not
//! survive the trip.

/// Separator between vector elements on display.
pub const VECTOR_SEPARATOR: &str = "; ";

/// Delimiter recognised when splitting a vector display string.
pub const VECTOR_DELIMITER: char = ';';

/// Split `s` on `delim` the way a stream line reader does.
///
/// An empty input yields no parts, and a trailing delimiter does not
/// produce a trailing empty part. Empty parts elsewhere are kept.
///
/// ```
/// use filemeta::core::strings::split;
///
/// assert_eq!(split("a;b", ';'), vec!["a", "b"]);
/// assert_eq!(split("a;;b;", ';'), vec!["a", "", "b"]);
/// assert!(split("", ';').is_empty());
/// ```
pub fn split(s: &str, delim: char) -> Vec<&str> {
    let mut parts: Vec<&str> = s.split(delim).collect();
    if parts.last() == Some(&"") {
        parts.pop();
    }
    parts
}

/// Join parts with `sep`.
pub fn join<S: AsRef<str>>(parts: &[S], sep: &str) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(part.as_ref());
    }
    out
}

/// Split a vector display string back into its elements.
pub fn split_vector(display: &str) -> Vec<String> {
    split(display, VECTOR_DELIMITER)
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            if i > 0 {
                part.strip_prefix(' ').unwrap_or(part).to_string()
            } else {
                part.to_string()
            }
        })
        .collect()
}

/// Join vector elements into their display string.
pub fn join_vector<S: AsRef<str>>(items: &[S]) -> String {
    join(items, VECTOR_SEPARATOR)
}

/// Parse a decimal integer leniently: leading whitespace and sign, then as
/// many digits as are present. Trailing text is ignored, no digits gives 0,
/// and out-of-range values saturate at the 32-bit signed limits.
///
/// ```
/// use filemeta::core::strings::parse_leading_int;
///
/// assert_eq!(parse_leading_int("42"), 42);
/// assert_eq!(parse_leading_int("  -7abc"), -7);
/// assert_eq!(parse_leading_int("x"), 0);
/// assert_eq!(parse_leading_int("99999999999"), i32::MAX);
/// ```
pub fn parse_leading_int(s: &str) -> i32 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value * 10 + i64::from(b - b'0');
        if value > i64::from(i32::MAX) + 1 {
            break;
        }
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_interior_empties() {
        assert_eq!(split(";a", ';'), vec!["", "a"]);
        assert_eq!(split("a;;", ';'), vec!["a", ""]);
        assert_eq!(split(";", ';'), vec![""]);
    }

    #[test]
    fn split_vector_strips_one_space() {
        assert_eq!(split_vector("a; b;  c"), vec!["a", "b", " c"]);
        // The first element keeps its leading space
        assert_eq!(split_vector(" a; b"), vec![" a", "b"]);
        // Missing space is tolerated
        assert_eq!(split_vector("a;b"), vec!["a", "b"]);
    }

    #[test]
    fn join_vector_inverts_split_vector() {
        let items = vec!["hello", "Приветствия", "", "x y"];
        let display = join_vector(&items);
        assert_eq!(display, "hello; Приветствия; ; x y");
        assert_eq!(split_vector(&display), items);
    }

    #[test]
    fn leading_int_handles_signs_and_garbage() {
        assert_eq!(parse_leading_int("+12"), 12);
        assert_eq!(parse_leading_int("-2147483648"), i32::MIN);
        assert_eq!(parse_leading_int("-99999999999"), i32::MIN);
        assert_eq!(parse_leading_int("3.5"), 3);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("-"), 0);
    }
}
