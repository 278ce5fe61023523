//! Text data binding
//!
//! A text box's `Text` property may reference live data instead of holding a
//! literal: a value starting with [`REFERENCE_MARKER`] names a dotted path
//! (`player.score`) looked up in a [`BindingContext`] the host fills in.
//! Only paths present in the context can be read; nothing is evaluated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Prefix marking a text value as a reference
pub const REFERENCE_MARKER: char = '>';

/// Errors raised while resolving a reference
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The reference is not a valid dotted path
    #[error("Malformed reference '{expression}'")]
    Malformed {
        /// Reference text after the marker
        expression: String,
    },

    /// The path is well formed but not bound in the context
    #[error("Nothing bound at '{path}'")]
    Unbound {
        /// Path that was looked up
        path: String,
    },
}

/// Whitelisted values text boxes may reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingContext {
    values: BTreeMap<String, String>,
}

impl BindingContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value at `path`, replacing any previous value
    pub fn set(&mut self, path: impl Into<String>, value: impl ToString) {
        self.values.insert(path.into(), value.to_string());
    }

    /// Builder form of [`BindingContext::set`]
    pub fn with(mut self, path: impl Into<String>, value: impl ToString) -> Self {
        self.set(path, value);
        self
    }

    /// Remove a binding
    pub fn unset(&mut self, path: &str) -> Option<String> {
        self.values.remove(path)
    }

    /// Look up a reference expression
    pub fn lookup(&self, expression: &str) -> Result<&str, BindingError> {
        let path = expression.trim();
        if !is_valid_path(path) {
            return Err(BindingError::Malformed {
                expression: expression.to_string(),
            });
        }
        self.values
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| BindingError::Unbound { path: path.to_string() })
    }
}

/// Resolve a raw `Text` property value
///
/// Values without the marker are literal. References that fail to resolve
/// fall back to the raw value, marker included.
pub fn resolve_text(raw: &str, context: &BindingContext) -> String {
    if !raw.starts_with(REFERENCE_MARKER) {
        return raw.to_string();
    }
    let expression = raw.trim_matches(REFERENCE_MARKER);
    match context.lookup(expression) {
        Ok(value) => value.to_string(),
        Err(err @ BindingError::Unbound { .. }) => {
            log::debug!("Text reference '{}' unresolved, using literal: {}", raw, err);
            raw.to_string()
        }
        Err(err) => {
            log::warn!("Text reference '{}' rejected, using literal: {}", raw, err);
            raw.to_string()
        }
    }
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars
                .next()
                .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
