//! Plain-scalar tag auto-detection.
//!
//! The resolver is data, not code: an ordered list of `(tag, pattern)`
//! rules matched against the decoded scalar text. The first match wins.
//! Quoted and block scalars never consult the resolver; they are `!!str`
//! unless tagged explicitly.

use regex::Regex;

use yamlet_core::tags;

/// One auto-detection rule.
#[derive(Debug, Clone)]
pub struct ScalarRule {
    tag: String,
    pattern: Regex,
}

impl ScalarRule {
    /// Patterns should be anchored (`^…$`); `resolve` tests the whole value.
    pub fn new(tag: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            tag: tag.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// Ordered rule set consulted for untagged plain scalars.
#[derive(Debug, Clone, Default)]
pub struct ScalarRules {
    rules: Vec<ScalarRule>,
}

impl ScalarRules {
    /// No auto-detection: every untagged plain scalar stays `!!str`.
    pub fn none() -> Self {
        Self::default()
    }

    /// The core schema plus timestamps: null, bool, int, float, timestamp.
    pub fn core_schema() -> Self {
        let mut rules = Self::none();
        rules.add(tags::NULL, r"^(?:~|null|Null|NULL|)$");
        rules.add(tags::BOOL, r"^(?:true|True|TRUE|false|False|FALSE)$");
        rules.add(tags::INT, r"^(?:[-+]?[0-9]+|0o[0-7]+|0x[0-9a-fA-F]+)$");
        rules.add(
            tags::FLOAT,
            r"^(?:[-+]?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
        );
        rules.add(
            tags::TIMESTAMP,
            r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?:[Tt ][0-9]{1,2}:[0-9]{2}:[0-9]{2}(?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9]{1,2}(?::[0-9]{2})?))?)?$",
        );
        rules
    }

    fn add(&mut self, tag: &str, pattern: &str) {
        let rule = ScalarRule::new(tag, pattern).expect("built-in pattern is valid");
        self.rules.push(rule);
    }

    /// Append a custom rule; later rules only fire when no earlier rule
    /// matched.
    pub fn with(mut self, rule: ScalarRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn resolve(&self, value: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(value))
            .map(|r| r.tag.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
