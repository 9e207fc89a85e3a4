//! Template Composition
//!
//! Turns a template plus runtime data and optional branding into a
//! render-ready HTML/CSS bundle:
//!
//! - exact placeholder substitution (`{{name}}`, `{{#each}}`, `{{#if}}`)
//! - section assembly in declared order, with reversible visibility
//! - additive branding injection over the template's style tokens
//! - deterministic output and an optional keyed cache
//!
//! Composition never partially fails: missing required variables are
//! collected exhaustively into a single error.

mod cache;
mod composer;
mod error;
mod placeholder;

pub use cache::{CacheStats, CompositionCache};
pub use composer::{Composer, LintWarning};
pub use error::{CompositionError, CompositionResult};
pub use placeholder::{referenced_variables, render, PlaceholderError};
