//! Well-known tag IRIs.
//!
//! Every resolved node carries a full tag IRI. The constants here cover the
//! core schema plus the timestamp type; local tags keep their leading `!`.

/// Prefix shared by all `tag:yaml.org,2002:*` tags.
pub const CORE_PREFIX: &str = "tag:yaml.org,2002:";

pub const STR: &str = "tag:yaml.org,2002:str";
pub const SEQ: &str = "tag:yaml.org,2002:seq";
pub const MAP: &str = "tag:yaml.org,2002:map";
pub const NULL: &str = "tag:yaml.org,2002:null";
pub const BOOL: &str = "tag:yaml.org,2002:bool";
pub const INT: &str = "tag:yaml.org,2002:int";
pub const FLOAT: &str = "tag:yaml.org,2002:float";
pub const TIMESTAMP: &str = "tag:yaml.org,2002:timestamp";

/// Build a core-schema tag from its suffix, e.g. `core("str")`.
pub fn core(suffix: &str) -> String {
    format!("{CORE_PREFIX}{suffix}")
}

/// Render a tag the way YAML spells it: `!!str` for core tags, everything
/// else verbatim. Used by dumps and diagnostics, never for resolution.
pub fn display(tag: &str) -> String {
    match tag.strip_prefix(CORE_PREFIX) {
        Some(suffix) => format!("!!{suffix}"),
        None => tag.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_builds_full_iri() {
        assert_eq!(core("str"), STR);
        assert_eq!(core("timestamp"), TIMESTAMP);
    }

    #[test]
    fn display_shortens_core_tags_only() {
        assert_eq!(display(STR), "!!str");
        assert_eq!(display("!local"), "!local");
        assert_eq!(display("tag:example.com,2024:point"), "tag:example.com,2024:point");
    }
}
