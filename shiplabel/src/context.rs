//! Per-call operation context.
//!
//! Every store write and label operation receives a [`Context`]. It carries
//! the caller's session handle and a small set of string overrides the
//! store may honour (for example a default attachment type).

use std::collections::BTreeMap;

/// Override naming the default type of attachments created by the store.
pub const DEFAULT_TYPE_KEY: &str = "default_type";

/// Explicit context passed through every call boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    session: u64,
    values: BTreeMap<String, String>,
}

impl Context {
    /// Create a context for the given session.
    pub fn new(session: u64) -> Self {
        Self {
            session,
            values: BTreeMap::new(),
        }
    }

    /// Session handle of the caller.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Return a copy of this context with an override set.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Return a copy of this context without the given override.
    pub fn without(&self, key: &str) -> Self {
        let mut ctx = self.clone();
        ctx.values.remove(key);
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_and_get() {
        let ctx = Context::new(7).with_value(DEFAULT_TYPE_KEY, "url");
        assert_eq!(ctx.session(), 7);
        assert_eq!(ctx.get(DEFAULT_TYPE_KEY), Some("url"));
        assert_eq!(ctx.get("lang"), None);
    }

    #[test]
    fn test_without_leaves_original_untouched() {
        let ctx = Context::new(1)
            .with_value(DEFAULT_TYPE_KEY, "url")
            .with_value("lang", "es_ES");
        let stripped = ctx.without(DEFAULT_TYPE_KEY);

        assert_eq!(stripped.get(DEFAULT_TYPE_KEY), None);
        assert_eq!(stripped.get("lang"), Some("es_ES"));
        assert_eq!(stripped.session(), 1);
        assert_eq!(ctx.get(DEFAULT_TYPE_KEY), Some("url"));
    }
}
