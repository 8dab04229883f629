//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::resolver::ScalarRules;

/// Line-break sequence written into scalar content when normalisation is
/// on. The input itself may mix LF, CR and CR LF freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineBreak {
    #[default]
    Lf,
    Cr,
    CrLf,
}

impl LineBreak {
    pub(crate) fn units(self) -> &'static [u16] {
        match self {
            LineBreak::Lf => &[0x000A],
            LineBreak::Cr => &[0x000D],
            LineBreak::CrLf => &[0x000D, 0x000A],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::Cr => "\r",
            LineBreak::CrLf => "\r\n",
        }
    }
}

/// Options accepted by [`parse_with`](crate::parse_with).
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Replace unescaped input line breaks with [`ParseOptions::line_break`]
    /// when they are decoded into scalar content. When off, the original
    /// break units are preserved verbatim.
    pub normalize_line_breaks: bool,
    pub line_break: LineBreak,
    /// Auto-detection rules for untagged plain scalars.
    pub resolver: ScalarRules,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            normalize_line_breaks: true,
            line_break: LineBreak::default(),
            resolver: ScalarRules::core_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = ParseOptions::default();
        assert!(opts.normalize_line_breaks);
        assert_eq!(opts.line_break, LineBreak::Lf);
        assert!(!opts.resolver.is_empty());
    }

    #[test]
    fn break_units_match_str() {
        for lb in [LineBreak::Lf, LineBreak::Cr, LineBreak::CrLf] {
            let from_units: String = char::decode_utf16(lb.units().iter().copied())
                .map(|r| r.unwrap())
                .collect();
            assert_eq!(from_units, lb.as_str());
        }
    }
}
