//! Turning values into indicator labels.

use std::fmt::Write as _;

use crate::prop::CallbackWith;

/// Default label pattern.
pub const DEFAULT_PATTERN: &str = "%d";

/// Renders a value as label text.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueFormatter {
    /// A printf-style pattern. `%d` is replaced by the value and `%%` by a
    /// percent sign; `%d` accepts a `0` flag and a minimum width (`%03d`).
    /// Anything else is copied verbatim.
    Pattern(String),
    /// An arbitrary function.
    Callback(CallbackWith<i32, String>),
}

impl ValueFormatter {
    /// Formatter from a pattern.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        ValueFormatter::Pattern(pattern.into())
    }

    /// Formatter from a function.
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn(i32) -> String + Send + Sync + 'static,
    {
        ValueFormatter::Callback(CallbackWith::new(f))
    }

    /// Formats `value`.
    pub fn format(&self, value: i32) -> String {
        match self {
            ValueFormatter::Pattern(pattern) => format_pattern(pattern, value),
            ValueFormatter::Callback(callback) => callback.call(value),
        }
    }
}

impl Default for ValueFormatter {
    fn default() -> Self {
        ValueFormatter::pattern(DEFAULT_PATTERN)
    }
}

impl From<&str> for ValueFormatter {
    fn from(pattern: &str) -> Self {
        ValueFormatter::pattern(pattern)
    }
}

/// Maps the raw value before it is shown.
///
/// Useful when the slider position stands for something else, for example a
/// position `0..=10` displayed as `0..=100`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NumericTransformer {
    /// Show the value as is.
    #[default]
    Identity,
    /// Map to another number, then apply the [`ValueFormatter`].
    Map(CallbackWith<i32, i32>),
    /// Produce the label directly, bypassing the [`ValueFormatter`].
    Text(CallbackWith<i32, String>),
}

impl NumericTransformer {
    /// Label for `value`.
    pub fn label(&self, formatter: &ValueFormatter, value: i32) -> String {
        match self {
            NumericTransformer::Identity => formatter.format(value),
            NumericTransformer::Map(map) => formatter.format(map.call(value)),
            NumericTransformer::Text(text) => text.call(value),
        }
    }
}

/// Widest padded field a pattern may ask for.
const MAX_FIELD_WIDTH: usize = 64;

fn format_pattern(pattern: &str, value: i32) -> String {
    let mut out = String::with_capacity(pattern.len() + 11);
    let mut chars = pattern.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.next_if(|&(_, c)| c == '%').is_some() {
            out.push('%');
            continue;
        }
        let zero_pad = chars.next_if(|&(_, c)| c == '0').is_some();
        let mut width = Some(0usize);
        while let Some((_, digit)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
            width = width
                .and_then(|w| w.checked_mul(10))
                .and_then(|w| w.checked_add(digit.to_digit(10).unwrap_or(0) as usize));
        }
        // Wider fields are copied verbatim rather than padded.
        let width = width.filter(|&w| w <= MAX_FIELD_WIDTH);
        match (chars.next_if(|&(_, c)| c == 'd'), width) {
            (Some(_), Some(width)) if zero_pad => {
                let _ = write!(out, "{value:0width$}");
            }
            (Some(_), Some(width)) => {
                let _ = write!(out, "{value:width$}");
            }
            _ => {
                let end = chars.peek().map_or(pattern.len(), |&(i, _)| i);
                out.push_str(&pattern[start..end]);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pattern() {
        let formatter = ValueFormatter::default();
        assert_eq!(formatter.format(42), "42");
        assert_eq!(formatter.format(-7), "-7");
    }

    #[test]
    fn test_pattern_subset() {
        assert_eq!(ValueFormatter::pattern("%d%%").format(75), "75%");
        assert_eq!(ValueFormatter::pattern("x%03d").format(5), "x005");
        assert_eq!(ValueFormatter::pattern("%3d|").format(5), "  5|");
        assert_eq!(ValueFormatter::pattern("%s %d").format(1), "%s 1");
        assert_eq!(ValueFormatter::pattern("50%").format(1), "50%");
        assert_eq!(ValueFormatter::pattern("°%d°").format(9), "°9°");
    }

    #[test]
    fn test_oversized_width_is_literal() {
        assert_eq!(
            ValueFormatter::pattern("%99999999999999999999999d").format(1),
            "%99999999999999999999999d"
        );
        assert_eq!(ValueFormatter::pattern("[%999999999d]").format(1), "[%999999999d]");
        assert_eq!(ValueFormatter::pattern("%064d").format(7).len(), 64);
        assert_eq!(ValueFormatter::pattern("%65d").format(7), "%65d");
    }

    #[test]
    fn test_transformer_variants() {
        let formatter = ValueFormatter::pattern("%d km");
        assert_eq!(NumericTransformer::Identity.label(&formatter, 3), "3 km");
        let times_ten = NumericTransformer::Map(CallbackWith::new(|v: i32| v * 10));
        assert_eq!(times_ten.label(&formatter, 3), "30 km");
        let text = NumericTransformer::Text(CallbackWith::new(|v: i32| format!("#{v}")));
        assert_eq!(text.label(&formatter, 3), "#3");
    }
}
