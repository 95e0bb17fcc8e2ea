use crate::domain::ports::HasValue;
use regex::Regex;
use std::sync::LazyLock;

// ECMAScript whitespace and line terminators, an optional sign, then either a
// hex literal or a decimal digit run. U+0085 is deliberately absent.
static LEADING_INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[\t\n\x0B\x0C\r \u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]*",
        r"([+-]?)(?:0[xX]([0-9a-fA-F]+)|([0-9]+))",
    ))
        .expect("leading integer pattern is valid")
});

/// Best-effort integer parse of the leading numeric prefix of `input`.
///
/// Follows `parseInt` rules: leading whitespace is skipped, a sign and a `0x`
/// prefix are honoured, and parsing stops at the first non-digit. Anything
/// without a leading integer yields `0`. Out-of-range values saturate.
///
/// ```
/// use formwire::num_from_string;
///
/// assert_eq!(num_from_string("42px"), 42);
/// assert_eq!(num_from_string(""), 0);
/// ```
pub fn num_from_string(input: &str) -> i64 {
    let Some(captures) = LEADING_INTEGER.captures(input) else {
        return 0;
    };

    let negative = captures.get(1).is_some_and(|sign| sign.as_str() == "-");
    let (digits, radix) = match (captures.get(2), captures.get(3)) {
        (Some(hex), _) => (hex.as_str(), 16),
        (None, Some(decimal)) => (decimal.as_str(), 10),
        (None, None) => return 0,
    };

    // Negative values accumulate downwards so `i64::MIN` stays reachable.
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0i64, |acc, digit| {
            let shifted = acc.saturating_mul(i64::from(radix));
            if negative {
                shifted.saturating_sub(i64::from(digit))
            } else {
                shifted.saturating_add(i64::from(digit))
            }
        })
}

/// Assigns `value` when the element is present; does nothing otherwise.
pub fn set_value<E: HasValue + ?Sized>(element: Option<&mut E>, value: &str) {
    if let Some(element) = element {
        element.set_value(value);
    }
}
