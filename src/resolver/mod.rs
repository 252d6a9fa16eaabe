//! Stack resolution engine
//!
//! Maps a free-text description of a development environment to a
//! [`Manifest`]: a stack label, OS packages and application dependencies.
//! Resolution is a pure function over the immutable built-in [`RuleSet`], so
//! it can be called from any number of threads without synchronization.
//!
//! # Example
//!
//! ```
//! use envzero::resolver::detect_stack;
//!
//! let manifest = detect_stack("FastAPI with React").unwrap();
//! assert_eq!(manifest.stack, "Python/FastAPI + JavaScript/React");
//! assert!(manifest.app_dependencies.contains(&"uvicorn[standard]".to_string()));
//! ```

pub mod error;
pub mod manifest;
pub mod rules;

pub use error::ResolveError;
pub use manifest::{Manifest, STACK_SEPARATOR};
pub use rules::{builtin_definitions, Rule, RuleDefinition, RuleSet, FALLBACK_SYSTEM_PACKAGE};

use serde_json::Value;

/// Resolves a prompt against the built-in rule table
pub fn detect_stack(prompt: &str) -> Result<Manifest, ResolveError> {
    RuleSet::builtin().resolve(prompt)
}

/// Resolves an untyped prompt, rejecting anything that is not a JSON string
pub fn detect_stack_value(prompt: &Value) -> Result<Manifest, ResolveError> {
    match prompt {
        Value::String(text) => detect_stack(text),
        other => Err(ResolveError::InvalidInputType {
            found: json_type_name(other),
        }),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
