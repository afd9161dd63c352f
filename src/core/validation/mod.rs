//! Declarative request validation
//!
//! Rules are declared as `|`-separated strings (`required|string|max:255`),
//! parsed into typed [`Rule`]s and checked against JSON payloads by dotted
//! field path.

mod rule;
mod validator;

pub use rule::{Rule, RuleSet};
pub use validator::{Rules, ValidationErrors, lookup, validate};
