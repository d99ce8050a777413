//! Key binding definitions and matching.
//!
//! A [`Binding`] pairs one or more key spellings (the canonical
//! `Display` form of [`tea::KeyMsg`], e.g. `"q"`, `"ctrl+c"`,
//! `"left"`) with help text for footer hints. Bindings can be disabled
//! without being removed from a keymap.
//!
//! # Example
//!
//! ```rust
//! use trinkets::binding::{Binding, matches};
//!
//! let prev = Binding::new().keys(&["left", "h"]).help("←/h", "prev page");
//! let next = Binding::new().keys(&["right", "l"]).help("→/l", "next page");
//!
//! assert!(matches("l", &[&prev, &next]));
//! assert!(!matches("x", &[&prev, &next]));
//! ```

use std::fmt;

/// Help text for a binding: the display spelling and a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key(s) as shown in help text (e.g. "↑/k").
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A key binding with associated help text.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<String>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Create an empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key spellings that trigger this binding.
    #[must_use]
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|&k| k.to_string()).collect();
        self
    }

    /// Set the help text.
    #[must_use]
    pub fn help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Disable the binding; a disabled binding never matches.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Enable or disable the binding in place.
    pub fn enable(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// The key spellings of this binding.
    #[must_use]
    pub fn get_keys(&self) -> &[String] {
        &self.keys
    }

    /// The help text of this binding.
    #[must_use]
    pub fn get_help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding can match: enabled and non-empty.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }
}

/// Check whether a key matches any of the given bindings.
///
/// The key is compared by its `Display` form, so both a raw string and
/// a [`tea::KeyMsg`] work. Disabled bindings never match.
pub fn matches<K: fmt::Display>(key: K, bindings: &[&Binding]) -> bool {
    let key_str = key.to_string();
    bindings
        .iter()
        .any(|b| b.enabled() && b.keys.iter().any(|k| *k == key_str))
}
