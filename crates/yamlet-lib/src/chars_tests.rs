use crate::chars::*;

fn units(text: &str) -> Vec<u16> {
    let mut v: Vec<u16> = text.encode_utf16().collect();
    v.push(0);
    v
}

#[test]
fn breaks_are_lf_and_cr_only() {
    assert!(is_break(LF));
    assert!(is_break(CR));
    assert!(!is_break(0x85));
    assert!(!is_break(0x2028));
}

#[test]
fn yaml11_breaks_flagged() {
    for u in [0x0085, 0x2028, 0x2029, 0x000C] {
        assert!(is_yaml11_break(u));
        assert!(!is_break(u));
    }
    assert!(!is_yaml11_break(LF));
}

#[test]
fn indicators() {
    for c in "-?:,[]{}#&*!|>'\"%@`".chars() {
        assert!(is_indicator(c as u16), "{c} should be an indicator");
    }
    assert!(!is_indicator(b'a' as u16));
    assert!(!is_indicator(b'.' as u16));
}

#[test]
fn flow_indicators_are_a_subset() {
    for c in ",[]{}".chars() {
        assert!(is_flow_indicator(c as u16));
        assert!(is_indicator(c as u16));
    }
    assert!(!is_flow_indicator(b'-' as u16));
}

#[test]
fn surrogate_pair_matches_length_two() {
    let u = units("\u{1F600}");
    assert_eq!(u.len(), 3);
    assert_eq!(nb_char(&u, 0), 2);
    assert_eq!(ns_char(&u, 0), 2);
    assert_eq!(nb_json(&u, 0), 2);
}

#[test]
fn isolated_surrogate_matches_length_one() {
    // a high surrogate followed by an ordinary letter
    let u = vec![0xD83D, b'x' as u16, 0];
    assert_eq!(nb_char(&u, 0), 1);
    assert_eq!(ns_char(&u, 0), 1);
    // a low surrogate on its own
    let u = vec![0xDE00, 0];
    assert_eq!(nb_json(&u, 0), 1);
}

#[test]
fn nb_char_excludes_breaks_and_bom() {
    let u = units("\na");
    assert_eq!(nb_char(&u, 0), 0);
    assert_eq!(nb_char(&u, 1), 1);
    let u = vec![BOM, 0];
    assert_eq!(nb_char(&u, 0), 0);
}

#[test]
fn ns_char_excludes_whitespace() {
    let u = units(" \ta");
    assert_eq!(ns_char(&u, 0), 0);
    assert_eq!(ns_char(&u, 1), 0);
    assert_eq!(ns_char(&u, 2), 1);
}

#[test]
fn plain_safe_depends_on_flow_context() {
    let u = units(",a");
    assert_eq!(ns_plain_safe(&u, 0, true), 0);
    assert_eq!(ns_plain_safe(&u, 0, false), 1);
    assert_eq!(ns_plain_safe(&u, 1, true), 1);
}

#[test]
fn plain_first_excludes_indicators() {
    let u = units("-a");
    assert_eq!(ns_plain_first_sub(&u, 0), 0);
    assert_eq!(ns_plain_first_sub(&u, 1), 1);
}

#[test]
fn anchor_char_excludes_flow_indicators() {
    let u = units("a]");
    assert_eq!(ns_anchor_char(&u, 0), 1);
    assert_eq!(ns_anchor_char(&u, 1), 0);
}

#[test]
fn tag_and_uri_chars() {
    assert!(is_uri_char_sub(b'/' as u16));
    assert!(is_uri_char_sub(b'!' as u16));
    assert!(is_uri_char_sub(b'[' as u16));
    assert!(!is_uri_char_sub(b'<' as u16));
    assert!(!is_uri_char_sub(b'%' as u16));

    assert!(is_tag_char_sub(b'/' as u16));
    assert!(!is_tag_char_sub(b'!' as u16));
    assert!(!is_tag_char_sub(b',' as u16));
}

#[test]
fn hex_values() {
    assert_eq!(hex_value(b'0' as u16), Some(0));
    assert_eq!(hex_value(b'a' as u16), Some(10));
    assert_eq!(hex_value(b'F' as u16), Some(15));
    assert_eq!(hex_value(b'g' as u16), None);
}

#[test]
fn nb_json_accepts_controls_above_space_only() {
    let u = vec![0x07, TAB, 0x20, 0];
    assert_eq!(nb_json(&u, 0), 0);
    assert_eq!(nb_json(&u, 1), 1);
    assert_eq!(nb_json(&u, 2), 1);
}
