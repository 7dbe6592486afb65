//! Property-based tests for numeric reading.
//!
//! Uses proptest to generate random values and verify that:
//! 1. The canonical decimal form of every value reads back to the same value
//! 2. The cursor ends exactly at the end of the numeric literal
//! 3. Failed reads never move the cursor

use cmdtree_text::StringReader;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// A word that can follow a number after a separator.
fn trailing_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("( [a-z]{1,8})?").expect("valid regex")
}

/// Finite doubles; NaN and infinities have no literal form the reader accepts.
/// `Display` for floats never switches to exponent notation, so every
/// rendering stays inside the numeric character set.
fn finite_f64() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::ZERO | prop::num::f64::SUBNORMAL
}

fn finite_f32() -> impl Strategy<Value = f32> {
    prop::num::f32::NORMAL | prop::num::f32::ZERO | prop::num::f32::SUBNORMAL
}

// =============================================================================
// ROUND TRIPS
// =============================================================================

proptest! {
    #[test]
    fn int_roundtrip(value in any::<i32>(), tail in trailing_strategy()) {
        let literal = value.to_string();
        let mut reader = StringReader::new(format!("{literal}{tail}"));
        prop_assert_eq!(reader.read_int().unwrap(), value);
        prop_assert_eq!(reader.cursor(), literal.len());
    }

    #[test]
    fn long_roundtrip(value in any::<i64>(), tail in trailing_strategy()) {
        let literal = value.to_string();
        let mut reader = StringReader::new(format!("{literal}{tail}"));
        prop_assert_eq!(reader.read_long().unwrap(), value);
        prop_assert_eq!(reader.cursor(), literal.len());
    }

    #[test]
    fn double_roundtrip(value in finite_f64(), tail in trailing_strategy()) {
        let literal = value.to_string();
        let mut reader = StringReader::new(format!("{literal}{tail}"));
        prop_assert_eq!(reader.read_double().unwrap(), value);
        prop_assert_eq!(reader.cursor(), literal.len());
    }

    #[test]
    fn float_roundtrip(value in finite_f32(), tail in trailing_strategy()) {
        let literal = value.to_string();
        let mut reader = StringReader::new(format!("{literal}{tail}"));
        prop_assert_eq!(reader.read_float().unwrap(), value);
        prop_assert_eq!(reader.cursor(), literal.len());
    }

    #[test]
    fn failed_int_read_keeps_cursor(prefix in "[a-z]{0,5} ", junk in "[0-9]{1,3}\\.[0-9.]{1,4}") {
        let mut reader = StringReader::new(format!("{prefix}{junk}"));
        reader.set_cursor(prefix.len());
        prop_assert!(reader.read_int().is_err());
        prop_assert_eq!(reader.cursor(), prefix.len());
    }

    #[test]
    fn unquoted_never_crosses_space(word in "[0-9A-Za-z_.+-]{0,12}", rest in " [ -~]{0,12}") {
        let mut reader = StringReader::new(format!("{word}{rest}"));
        prop_assert_eq!(reader.read_unquoted_string(), word.as_str());
        prop_assert_eq!(reader.peek(), Some(' '));
    }
}
