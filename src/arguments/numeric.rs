//! Bounded numeric arguments.
//!
//! Bounds are inclusive. A value outside them fails with the matching
//! too-low / too-high error, reported with the cursor at the start of the
//! number so the whole literal is highlighted.

use cmdtree_text::{CommandSyntaxError, StringReader, SyntaxErrorKind};

use super::ArgumentType;
use crate::Source;

macro_rules! numeric_argument {
    (
        $(#[$doc:meta])*
        $name:ident($value:ty) {
            read: $read:ident,
            too_low: $low:ident,
            too_high: $high:ident,
            examples: [$($example:literal),* $(,)?],
        }
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            min: $value,
            max: $value,
        }

        impl $name {
            /// Accept values in `min..=max`.
            pub fn new(min: $value, max: $value) -> Self {
                Self { min, max }
            }

            /// Inclusive lower bound.
            pub fn minimum(&self) -> $value {
                self.min
            }

            /// Inclusive upper bound.
            pub fn maximum(&self) -> $value {
                self.max
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(<$value>::MIN, <$value>::MAX)
            }
        }

        impl<S: Source> ArgumentType<S> for $name {
            type Value = $value;

            fn parse(&self, reader: &mut StringReader) -> Result<$value, CommandSyntaxError> {
                let start = reader.cursor();
                let found = reader.$read()?;
                if found < self.min {
                    reader.set_cursor(start);
                    return Err(SyntaxErrorKind::$low { found, min: self.min }.with_context(reader));
                }
                if found > self.max {
                    reader.set_cursor(start);
                    return Err(SyntaxErrorKind::$high { found, max: self.max }.with_context(reader));
                }
                Ok(found)
            }

            fn examples(&self) -> Vec<String> {
                vec![$($example.to_owned()),*]
            }
        }
    };
}

numeric_argument! {
    /// A 32-bit signed integer.
    IntegerArgument(i32) {
        read: read_int,
        too_low: IntegerTooLow,
        too_high: IntegerTooHigh,
        examples: ["0", "123", "-123"],
    }
}

numeric_argument! {
    /// A 64-bit signed integer.
    LongArgument(i64) {
        read: read_long,
        too_low: LongTooLow,
        too_high: LongTooHigh,
        examples: ["0", "123", "-123"],
    }
}

numeric_argument! {
    /// A 64-bit float.
    DoubleArgument(f64) {
        read: read_double,
        too_low: DoubleTooLow,
        too_high: DoubleTooHigh,
        examples: ["0", "1.2", ".5", "-1", "-.5", "-1234.56"],
    }
}

numeric_argument! {
    /// A 32-bit float.
    FloatArgument(f32) {
        read: read_float,
        too_low: FloatTooLow,
        too_high: FloatTooHigh,
        examples: ["0", "1.2", ".5", "-1", "-.5", "-1234.56"],
    }
}

/// Any `i32`.
pub fn integer() -> IntegerArgument {
    IntegerArgument::default()
}

/// An `i32` of at least `min`.
pub fn integer_min(min: i32) -> IntegerArgument {
    IntegerArgument::new(min, i32::MAX)
}

/// An `i32` in `min..=max`.
pub fn integer_between(min: i32, max: i32) -> IntegerArgument {
    IntegerArgument::new(min, max)
}

/// Any `i64`.
pub fn long() -> LongArgument {
    LongArgument::default()
}

/// An `i64` of at least `min`.
pub fn long_min(min: i64) -> LongArgument {
    LongArgument::new(min, i64::MAX)
}

/// An `i64` in `min..=max`.
pub fn long_between(min: i64, max: i64) -> LongArgument {
    LongArgument::new(min, max)
}

/// Any finite `f64`.
pub fn double() -> DoubleArgument {
    DoubleArgument::default()
}

/// An `f64` of at least `min`.
pub fn double_min(min: f64) -> DoubleArgument {
    DoubleArgument::new(min, f64::MAX)
}

/// An `f64` in `min..=max`.
pub fn double_between(min: f64, max: f64) -> DoubleArgument {
    DoubleArgument::new(min, max)
}

/// Any finite `f32`.
pub fn float() -> FloatArgument {
    FloatArgument::default()
}

/// An `f32` of at least `min`.
pub fn float_min(min: f32) -> FloatArgument {
    FloatArgument::new(min, f32::MAX)
}

/// An `f32` in `min..=max`.
pub fn float_between(min: f32, max: f32) -> FloatArgument {
    FloatArgument::new(min, max)
}
