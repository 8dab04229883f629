use indoc::indoc;
use yamlet_core::tags;

use super::{fails, root, single, value_of};
use crate::{ParseOptions, parse_with};

#[test]
fn literal_clip_keeps_one_trailing_break() {
    let input = indoc! {"
        |
          line1
          line2
    "};
    let s = single(input);
    let node = root(&s);
    assert_eq!(node.as_str(), Some("line1\nline2\n"));
    assert_eq!(node.tag(), tags::STR);
}

#[test]
fn literal_strip_drops_trailing_breaks() {
    let input = indoc! {"
        |-
          line1
          line2
    "};
    let s = single(input);
    assert_eq!(root(&s).as_str(), Some("line1\nline2"));
}

#[test]
fn literal_keep_retains_trailing_breaks() {
    let input = "|+\n  a\n\n\n";
    let s = single(input);
    assert_eq!(root(&s).as_str(), Some("a\n\n\n"));
}

#[test]
fn literal_preserves_inner_blank_lines() {
    let input = indoc! {"
        |
          a

          b
    "};
    let s = single(input);
    assert_eq!(root(&s).as_str(), Some("a\n\nb\n"));
}

#[test]
fn folded_joins_lines_with_spaces() {
    let input = indoc! {"
        >
          one
          two
    "};
    let s = single(input);
    assert_eq!(root(&s).as_str(), Some("one two\n"));
}

#[test]
fn folded_keeps_more_indented_lines_verbatim() {
    let input = indoc! {"
        >
          one
          two
            indented
          three
    "};
    let s = single(input);
    assert_eq!(root(&s).as_str(), Some("one two\n  indented\nthree\n"));
}

#[test]
fn folded_blank_line_becomes_a_feed() {
    let input = indoc! {"
        >
          a

          b
    "};
    let s = single(input);
    assert_eq!(root(&s).as_str(), Some("a\nb\n"));
}

#[test]
fn folded_with_keep_chomping_warns() {
    let input = indoc! {"
        >+
          a
    "};
    let s = single(input);
    assert_eq!(root(&s).as_str(), Some("a\n"));
    assert_eq!(s.warnings().len(), 1);
    assert!(s.warnings()[0].message.contains(">+"), "{}", s.warnings()[0].message);
}

#[test]
fn literal_with_keep_does_not_warn() {
    let s = single("|+\n  a\n");
    assert!(s.warnings().is_empty());
}

#[test]
fn explicit_indentation_indicator() {
    // indentation indicator 2 on a nested scalar: content starts two
    // columns past the key's indentation
    let input = "a: |2\n   x\n";
    let s = single(input);
    assert_eq!(value_of(root(&s), "a").as_str(), Some(" x\n"));
}

#[test]
fn indicator_zero_is_fatal() {
    let message = fails("a: |0\n  x\n");
    assert!(message.contains("between 1 and 9"), "{message}");
}

#[test]
fn content_on_the_header_line_is_fatal() {
    let message = fails("a: | text\n");
    assert!(message.contains("header"), "{message}");
}

#[test]
fn missing_final_break_is_not_invented() {
    // the input ends without a newline; clip has nothing to keep
    let s = single("|\n  text");
    assert_eq!(root(&s).as_str(), Some("text"));
}

#[test]
fn leading_blank_lines_become_content_feeds() {
    let s = single("|\n\n  text\n");
    assert_eq!(root(&s).as_str(), Some("\ntext\n"));
}

#[test]
fn over_indented_leading_blank_line_is_fatal() {
    let message = fails("|\n    \n  text\n");
    assert!(message.contains("more indented"), "{message}");
}

#[test]
fn tab_as_block_scalar_indentation_is_fatal() {
    let message = fails("a: |\n\tx\n");
    assert!(message.contains("tab"), "{message}");
}

#[test]
fn block_scalar_value_then_sibling_entry() {
    let input = indoc! {"
        text: |
          first
          second
        after: 1
    "};
    let s = single(input);
    assert_eq!(value_of(root(&s), "text").as_str(), Some("first\nsecond\n"));
    assert_eq!(value_of(root(&s), "after").as_str(), Some("1"));
}

#[test]
fn trailing_comments_belong_to_the_scalar() {
    let input = indoc! {"
        a: |
          text
        # a comment about the scalar
        b: 2
    "};
    let s = single(input);
    assert_eq!(value_of(root(&s), "a").as_str(), Some("text\n"));
    assert_eq!(value_of(root(&s), "b").as_str(), Some("2"));
}

#[test]
fn block_scalars_are_str_even_when_numeric() {
    let s = single("|\n  42\n");
    assert_eq!(root(&s).tag(), tags::STR);
}

#[test]
fn raw_breaks_survive_when_normalisation_is_off() {
    let options = ParseOptions {
        normalize_line_breaks: false,
        ..ParseOptions::default()
    };
    let s = parse_with("|\n  a\r\n  b\r\n", &options).unwrap();
    assert_eq!(root(&s).as_str(), Some("a\r\nb\r\n"));
}

#[test]
fn document_marker_ends_a_root_block_scalar() {
    let input = "|\n  text\n---\nnext\n";
    let s = super::stream(input);
    assert_eq!(s.documents().len(), 2);
    assert_eq!(s.document(0).unwrap().as_str(), Some("text\n"));
    assert_eq!(s.document(1).unwrap().as_str(), Some("next"));
}
