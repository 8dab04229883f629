//! Tag handle table: `%TAG` handle → prefix bindings.
//!
//! Reset between documents. The defaults `!` → `!` and
//! `!!` → `tag:yaml.org,2002:` may be overridden once by a `%TAG`
//! directive; a second explicit binding of the same handle is an error the
//! grammar reports fatally.

use indexmap::IndexMap;

use yamlet_core::tags;

#[derive(Debug, Clone)]
struct PrefixEntry {
    prefix: String,
    /// True for `%TAG`-declared bindings, false for the defaults.
    explicit: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TagHandles {
    entries: IndexMap<String, PrefixEntry>,
}

impl TagHandles {
    pub fn new() -> Self {
        let mut table = Self::default();
        table.reset();
        table
    }

    /// Install the default primary and secondary handles, dropping any
    /// document-local `%TAG` bindings.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.entries.insert(
            "!".to_string(),
            PrefixEntry {
                prefix: "!".to_string(),
                explicit: false,
            },
        );
        self.entries.insert(
            "!!".to_string(),
            PrefixEntry {
                prefix: tags::CORE_PREFIX.to_string(),
                explicit: false,
            },
        );
    }

    /// Bind a handle. Returns false when the handle was already declared by
    /// a `%TAG` directive in this document.
    pub fn add(&mut self, handle: String, prefix: String) -> bool {
        if self.entries.get(&handle).is_some_and(|e| e.explicit) {
            return false;
        }
        self.entries.insert(
            handle,
            PrefixEntry {
                prefix,
                explicit: true,
            },
        );
        true
    }

    pub fn resolve(&self, handle: &str) -> Option<&str> {
        self.entries.get(handle).map(|e| e.prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_present_after_reset() {
        let table = TagHandles::new();
        assert_eq!(table.resolve("!"), Some("!"));
        assert_eq!(table.resolve("!!"), Some(tags::CORE_PREFIX));
        assert_eq!(table.resolve("!e!"), None);
    }

    #[test]
    fn defaults_may_be_overridden_once() {
        let mut table = TagHandles::new();
        assert!(table.add("!!".into(), "tag:example.com,2024:".into()));
        assert_eq!(table.resolve("!!"), Some("tag:example.com,2024:"));
        assert!(!table.add("!!".into(), "tag:other.org,2024:".into()));
    }

    #[test]
    fn duplicate_named_handle_rejected() {
        let mut table = TagHandles::new();
        assert!(table.add("!e!".into(), "tag:example.com,2024:".into()));
        assert!(!table.add("!e!".into(), "tag:example.com,2025:".into()));
    }

    #[test]
    fn reset_forgets_explicit_bindings() {
        let mut table = TagHandles::new();
        table.add("!e!".into(), "tag:example.com,2024:".into());
        table.reset();
        assert_eq!(table.resolve("!e!"), None);
        assert!(table.add("!e!".into(), "tag:example.com,2025:".into()));
    }
}
