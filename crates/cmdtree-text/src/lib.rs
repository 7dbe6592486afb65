//! # cmdtree-text
//!
//! The text layer of the cmdtree command grammar engine: everything that
//! deals with the characters of a command line and nothing that knows about
//! the grammar tree.
//!
//! ## Features
//!
//! - [`StringReader`]: cursor-based scanning of numbers, booleans, quoted and
//!   unquoted strings with explicit failure instead of out-of-range panics
//! - [`CommandSyntaxError`]: a closed error taxonomy plus descriptors for
//!   host-defined errors, rendered with a `...<--[HERE]` context window
//! - [`Suggestion`], [`Suggestions`], [`SuggestionsBuilder`]: completion
//!   proposals and their merge/sort algorithm
//! - Optional `serde` support for ranges and suggestions
//!
//! ## Quick Start
//!
//! ```rust
//! use cmdtree_text::StringReader;
//!
//! let mut reader = StringReader::new("\"hello world\" 42");
//! assert_eq!(reader.read_quoted_string().unwrap(), "hello world");
//! reader.skip();
//! assert_eq!(reader.read_int().unwrap(), 42);
//! assert!(!reader.can_read());
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod range;
pub mod reader;
pub mod suggestion;

pub use self::error::{
    CommandSyntaxError, CustomError, Dynamic1ErrorType, Dynamic2ErrorType, Dynamic3ErrorType,
    Dynamic4ErrorType, DynamicErrorType, DynamicNErrorType, ErrorArg, SimpleErrorType,
    SyntaxErrorKind,
};
pub use self::range::StringRange;
pub use self::reader::{StringReader, ARGUMENT_SEPARATOR};
pub use self::suggestion::{Suggestion, Suggestions, SuggestionsBuilder};
