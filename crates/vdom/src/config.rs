//! Reconciler options.
//!
//! Options can be constructed programmatically or read from environment
//! variables, so hosts can flip them without a rebuild.

use std::env;

/// When the key → old index map of the children diff is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyMapStrategy {
    /// Build it the first time no end of the window matches.
    #[default]
    Lazy,
    /// Build it up front for every child list that reaches the keyed diff.
    Eager,
}

impl KeyMapStrategy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lazy" => Some(Self::Lazy),
            "eager" => Some(Self::Eager),
            _ => None,
        }
    }
}

/// Runtime configuration of a [`Reconciler`](crate::Reconciler).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Key map construction strategy; both produce the same mutations.
    pub key_map: KeyMapStrategy,
    /// Fail instead of re-materializing when an old node has no real node bound.
    pub strict_handles: bool,
}

impl ReconcilerConfig {
    #[inline]
    #[must_use]
    pub const fn new(key_map: KeyMapStrategy, strict_handles: bool) -> Self {
        Self {
            key_map,
            strict_handles,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `VDOM_KEY_MAP`: `lazy` or `eager` (default: lazy)
    /// - `VDOM_STRICT_HANDLES`: Set to "1" to reject unbound old nodes (default: disabled)
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        let key_map = env::var("VDOM_KEY_MAP")
            .ok()
            .and_then(|val| KeyMapStrategy::parse(&val))
            .unwrap_or_default();
        let strict_handles = env::var("VDOM_STRICT_HANDLES").ok().as_deref() == Some("1");
        Self {
            key_map,
            strict_handles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_names() {
        assert_eq!(KeyMapStrategy::parse("eager"), Some(KeyMapStrategy::Eager));
        assert_eq!(KeyMapStrategy::parse(" Lazy "), Some(KeyMapStrategy::Lazy));
        assert_eq!(KeyMapStrategy::parse("sometimes"), None);
    }

    #[test]
    fn defaults_are_lenient_and_lazy() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.key_map, KeyMapStrategy::Lazy);
        assert!(!config.strict_handles);
    }
}
