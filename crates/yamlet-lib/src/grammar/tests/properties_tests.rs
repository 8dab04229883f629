use indoc::indoc;
use yamlet_core::tags;

use super::{fails, root, single, value_of};

#[test]
fn secondary_tag_overrides_the_resolver() {
    let s = single("!!str 123\n");
    let node = root(&s);
    assert_eq!(node.as_str(), Some("123"));
    assert_eq!(node.tag(), tags::STR);
}

#[test]
fn secondary_tag_forces_a_type() {
    let s = single("!!int 123\n");
    assert_eq!(root(&s).tag(), tags::INT);
}

#[test]
fn non_specific_tag_disables_auto_detection() {
    let s = single("! 123\n");
    let node = root(&s);
    assert_eq!(node.as_str(), Some("123"));
    assert_eq!(node.tag(), tags::STR);
}

#[test]
fn local_tag_keeps_its_bang() {
    let s = single("!thing value\n");
    assert_eq!(root(&s).tag(), "!thing");
}

#[test]
fn verbatim_tag_bypasses_the_handle_table() {
    let s = single("!<tag:example.com,2024:x> v\n");
    assert_eq!(root(&s).tag(), "tag:example.com,2024:x");
    assert!(s.warnings().is_empty());
}

#[test]
fn verbatim_local_tag() {
    let s = single("!<!local> v\n");
    assert_eq!(root(&s).tag(), "!local");
}

#[test]
fn verbatim_bang_alone_is_fatal() {
    let message = fails("!<!> v\n");
    assert!(message.contains("!<!>"), "{message}");
}

#[test]
fn verbatim_rfc4151_shape_warns() {
    let s = single("!<tag:no-date> v\n");
    assert_eq!(s.warnings().len(), 1);
    assert!(s.warnings()[0].message.contains("RFC 4151"));
}

#[test]
fn undeclared_named_handle_is_fatal() {
    let message = fails("!e!point x\n");
    assert!(message.contains("undeclared tag handle !e!"), "{message}");
}

#[test]
fn tag_then_anchor_and_anchor_then_tag() {
    let s = single("a: !!str &x v\n");
    assert_eq!(value_of(root(&s), "a").tag(), tags::STR);

    let s = single("a: &x !!str v\n");
    let node = value_of(root(&s), "a");
    assert_eq!(node.tag(), tags::STR);
    assert_eq!(node.as_str(), Some("v"));
}

#[test]
fn tagged_collection_via_properties_line() {
    let input = indoc! {"
        !!seq
        - 1
        - 2
    "};
    let s = single(input);
    let node = root(&s);
    assert!(node.is_sequence());
    assert_eq!(node.tag(), tags::SEQ);
    assert_eq!(node.len(), 2);
}

#[test]
fn tagged_flow_collection() {
    let s = single("!!set {a, b}\n");
    let node = root(&s);
    assert!(node.is_mapping());
    assert_eq!(node.tag(), "tag:yaml.org,2002:set");
}

#[test]
fn properties_without_content_attach_to_the_empty_scalar() {
    let input = indoc! {"
        a: !!str
        b: 1
    "};
    let s = single(input);
    let a = value_of(root(&s), "a");
    assert_eq!(a.as_str(), Some(""));
    assert_eq!(a.tag(), tags::STR);
}

#[test]
fn anchor_without_content_attaches_to_the_empty_scalar() {
    let input = indoc! {"
        a: &x
        b: *x
    "};
    let s = single(input);
    assert_eq!(
        value_of(root(&s), "a").id(),
        value_of(root(&s), "b").id()
    );
}

#[test]
fn quoted_scalars_are_str_by_hint() {
    let s = single("'123'\n");
    assert_eq!(root(&s).tag(), tags::STR);
    let s = single("\"123\"\n");
    assert_eq!(root(&s).tag(), tags::STR);
}

#[test]
fn tagged_key_and_value() {
    let s = single("!!str 1: !!str 2\n");
    let (key, value) = root(&s).entries().next().unwrap();
    assert_eq!(key.tag(), tags::STR);
    assert_eq!(key.as_str(), Some("1"));
    assert_eq!(value.tag(), tags::STR);
}

#[test]
fn empty_suffix_after_secondary_handle_is_fatal() {
    let message = fails("!! x\n");
    assert!(message.contains("tag suffix"), "{message}");
}
