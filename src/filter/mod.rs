//! Per-field regular expression filtering
//!
//! Each of the four log fields can carry its own pattern. Patterns share one
//! set of flags (case-insensitive on by default, multiline off). A record is
//! kept when every non-empty pattern finds a match in its field; while any
//! pattern fails to compile, nothing is kept.
//!
//! # Expression syntax
//!
//! ```text
//! field:pattern              Pattern for one field
//! field:"pattern with space" Quoted pattern
//! multiple terms             Combined with AND; each field at most once
//! ```
//!
//! # Fields
//!
//! - `date:` / `fecha:`
//! - `statuscode:` / `status:` / `code:`
//! - `description:` / `desc:` / `descripcion:`
//! - `iporigen:` / `ip:` / `origin:`
//!
//! # Examples
//!
//! ```text
//! status:^(200|404)$                 # OK and not-found lines
//! ip:^192\.168\. date:^2025-08       # LAN traffic in August 2025
//! desc:"timed out"                   # descriptions mentioning a timeout
//! ```

pub mod error;
pub mod matcher;
pub mod parser;

pub use error::{FilterParseError, RegexCompileError};
pub use matcher::{
    FieldMatcher, FieldPatterns, MatcherSet, RegexFlags, compile_matchers, filter_records,
};
pub use parser::{FilterExpression, FilterTerm};
