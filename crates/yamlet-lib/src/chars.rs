//! Character classes over UTF-16 code units.
//!
//! Two shapes of classifier:
//! - unit classes (`is_*`) are predicates on a single code unit;
//! - code-point classes (`nb_char`, `ns_char`, …) take the unit slice and a
//!   position and return how many units matched: 0 for no match, 2 for a
//!   high surrogate followed by a low surrogate, 1 otherwise. An isolated
//!   surrogate matches code-point classes with length 1 — deliberate
//!   leniency for JSON compatibility.
//!
//! YAML 1.2 rule numbers are noted for the classes that map to one.

pub(crate) const TAB: u16 = 0x0009;
pub(crate) const LF: u16 = 0x000A;
pub(crate) const CR: u16 = 0x000D;
pub(crate) const SPACE: u16 = 0x0020;
pub(crate) const BOM: u16 = 0xFEFF;

pub(crate) const fn is_break(u: u16) -> bool {
    // [28] b-char — YAML 1.2 dropped NEL/LS/PS/FF from this set
    u == LF || u == CR
}

pub(crate) const fn is_space(u: u16) -> bool {
    u == SPACE
}

pub(crate) const fn is_white(u: u16) -> bool {
    u == SPACE || u == TAB
}

/// Code units that were line breaks in YAML 1.1 but are content in 1.2.
pub(crate) const fn is_yaml11_break(u: u16) -> bool {
    matches!(u, 0x0085 | 0x2028 | 0x2029 | 0x000C)
}

pub(crate) fn is_dec_digit(u: u16) -> bool {
    (0x30..=0x39).contains(&u)
}

pub(crate) fn is_hex_digit(u: u16) -> bool {
    is_dec_digit(u) || (0x41..=0x46).contains(&u) || (0x61..=0x66).contains(&u)
}

pub(crate) fn hex_value(u: u16) -> Option<u32> {
    match u {
        0x30..=0x39 => Some(u as u32 - 0x30),
        0x41..=0x46 => Some(u as u32 - 0x41 + 10),
        0x61..=0x66 => Some(u as u32 - 0x61 + 10),
        _ => None,
    }
}

pub(crate) fn is_ascii_letter(u: u16) -> bool {
    (0x41..=0x5A).contains(&u) || (0x61..=0x7A).contains(&u)
}

/// [38] ns-word-char
pub(crate) fn is_word_char(u: u16) -> bool {
    is_dec_digit(u) || is_ascii_letter(u) || u == b'-' as u16
}

/// [22] c-indicator
pub(crate) fn is_indicator(u: u16) -> bool {
    u < 0x80
        && matches!(
            u as u8 as char,
            '-' | '?'
                | ':'
                | ','
                | '['
                | ']'
                | '{'
                | '}'
                | '#'
                | '&'
                | '*'
                | '!'
                | '|'
                | '>'
                | '\''
                | '"'
                | '%'
                | '@'
                | '`'
        )
}

/// [23] c-flow-indicator
pub(crate) fn is_flow_indicator(u: u16) -> bool {
    u < 0x80 && matches!(u as u8 as char, ',' | '[' | ']' | '{' | '}')
}

/// [1] c-printable, at the code-unit level. Surrogate units are not in this
/// set; the code-point classes treat them leniently on their own.
pub(crate) fn is_printable(u: u16) -> bool {
    matches!(u, TAB | LF | CR | 0x85)
        || (0x20..=0x7E).contains(&u)
        || (0xA0..=0xD7FF).contains(&u)
        || (0xE000..=0xFFFD).contains(&u)
}

/// [39] ns-uri-char, minus the `%XX` escape form (handled by the grammar).
pub(crate) fn is_uri_char_sub(u: u16) -> bool {
    is_word_char(u)
        || (u < 0x80
            && matches!(
                u as u8 as char,
                '#' | ';'
                    | '/'
                    | '?'
                    | ':'
                    | '@'
                    | '&'
                    | '='
                    | '+'
                    | '$'
                    | ','
                    | '_'
                    | '.'
                    | '!'
                    | '~'
                    | '*'
                    | '\''
                    | '('
                    | ')'
                    | '['
                    | ']'
            ))
}

/// [40] ns-tag-char, minus the `%XX` escape form.
pub(crate) fn is_tag_char_sub(u: u16) -> bool {
    is_uri_char_sub(u) && u != b'!' as u16 && !is_flow_indicator(u)
}

pub(crate) fn is_high_surrogate(u: u16) -> bool {
    (0xD800..=0xDBFF).contains(&u)
}

pub(crate) fn is_low_surrogate(u: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&u)
}

fn is_surrogate(u: u16) -> bool {
    (0xD800..=0xDFFF).contains(&u)
}

/// Units matched by a surrogate at `at`: 2 for a proper pair, 1 otherwise.
fn surrogate_len(units: &[u16], at: usize) -> usize {
    if is_high_surrogate(units[at]) && is_low_surrogate(units[at + 1]) {
        2
    } else {
        1
    }
}

/// [27] nb-char: printable minus breaks minus BOM.
pub(crate) fn nb_char(units: &[u16], at: usize) -> usize {
    let u = units[at];
    if is_surrogate(u) {
        return surrogate_len(units, at);
    }
    if is_printable(u) && !is_break(u) && u != BOM {
        1
    } else {
        0
    }
}

/// [34] ns-char: nb-char minus whitespace.
pub(crate) fn ns_char(units: &[u16], at: usize) -> usize {
    if is_white(units[at]) {
        0
    } else {
        nb_char(units, at)
    }
}

/// [2] nb-json: tab or anything from U+0020 up.
pub(crate) fn nb_json(units: &[u16], at: usize) -> usize {
    let u = units[at];
    if is_surrogate(u) {
        return surrogate_len(units, at);
    }
    if u == TAB || u >= 0x20 { 1 } else { 0 }
}

/// [102] ns-anchor-char: ns-char minus flow indicators.
pub(crate) fn ns_anchor_char(units: &[u16], at: usize) -> usize {
    if is_flow_indicator(units[at]) {
        0
    } else {
        ns_char(units, at)
    }
}

/// [127-129] ns-plain-safe: ns-char everywhere, minus flow indicators
/// inside flow collections and flow keys.
pub(crate) fn ns_plain_safe(units: &[u16], at: usize, in_flow: bool) -> usize {
    if in_flow && is_flow_indicator(units[at]) {
        0
    } else {
        ns_char(units, at)
    }
}

/// [126] ns-plain-first, minus the `- ? :` lookahead cases the grammar
/// handles itself.
pub(crate) fn ns_plain_first_sub(units: &[u16], at: usize) -> usize {
    if is_indicator(units[at]) {
        0
    } else {
        ns_char(units, at)
    }
}
