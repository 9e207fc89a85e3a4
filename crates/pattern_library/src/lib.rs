//! Pattern Library
//!
//! A catalog of predefined template patterns, one or more per category.
//! Patterns are immutable once published; instantiating one produces a
//! fresh, editable `Template` whose content and stylesheet are synthesized
//! through the same code path the customization service uses.

mod catalog;
mod error;
mod library;

pub use catalog::builtin_patterns;
pub use error::{LibraryError, LibraryResult};
pub use library::PatternLibrary;
