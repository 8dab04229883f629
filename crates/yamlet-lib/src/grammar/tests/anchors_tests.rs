use indoc::indoc;
use yamlet_core::tags;

use super::{fails, root, single, value_of};

#[test]
fn alias_shares_the_anchored_node() {
    let input = indoc! {"
        a: &shared foo
        b: *shared
    "};
    let s = single(input);
    let node = root(&s);
    let a = value_of(node, "a");
    let b = value_of(node, "b");
    assert_eq!(a.id(), b.id());
    assert_eq!(b.as_str(), Some("foo"));
}

#[test]
fn redefined_anchor_binds_at_each_alias_site() {
    let input = indoc! {"
        a: &anchor foo
        c: *anchor
        b: &anchor bar
        d: *anchor
    "};
    let s = single(input);
    let node = root(&s);
    assert_eq!(node.len(), 4);

    let a = value_of(node, "a");
    let c = value_of(node, "c");
    let b = value_of(node, "b");
    let d = value_of(node, "d");

    assert_eq!(a.id(), c.id());
    assert_eq!(b.id(), d.id());
    assert_ne!(a.id(), b.id());
    assert_eq!(c.as_str(), Some("foo"));
    assert_eq!(d.as_str(), Some("bar"));
}

#[test]
fn aliases_resolve_to_earlier_nodes() {
    let input = indoc! {"
        a: &x 1
        b: *x
        c: &y 2
        d: *y
    "};
    let s = single(input);
    let node = root(&s);
    // an alias target is always an earlier node than the key it follows
    let (b_key, b_value) = node.entries().nth(1).unwrap();
    assert!(b_value.id() < b_key.id());
    let (d_key, d_value) = node.entries().nth(3).unwrap();
    assert!(d_value.id() < d_key.id());
}

#[test]
fn self_referential_sequence_is_cyclic() {
    let s = single("&a [*a]\n");
    let node = root(&s);
    assert!(node.is_sequence());
    assert_eq!(node.len(), 1);
    let inner = node.items().next().unwrap();
    assert_eq!(inner.id(), node.id());
    // the cycle is navigable indefinitely
    let deeper = inner.items().next().unwrap();
    assert_eq!(deeper.id(), node.id());
}

#[test]
fn anchored_collection_shared_by_alias() {
    let input = indoc! {"
        base: &b [1, 2]
        copy: *b
    "};
    let s = single(input);
    let node = root(&s);
    assert_eq!(value_of(node, "base").id(), value_of(node, "copy").id());
}

#[test]
fn unknown_alias_is_fatal() {
    let message = fails("a: *missing\n");
    assert!(message.contains("unknown anchor 'missing'"), "{message}");
}

#[test]
fn alias_before_definition_is_fatal() {
    let input = indoc! {"
        a: *later
        b: &later x
    "};
    assert!(fails(input).contains("unknown anchor"));
}

#[test]
fn anchors_do_not_cross_documents() {
    let input = indoc! {"
        a: &x 1
        ---
        b: *x
    "};
    assert!(fails(input).contains("unknown anchor"));
}

#[test]
fn anchor_on_a_key_node() {
    let input = "&k key: *k\n";
    let s = single(input);
    let (key, value) = root(&s).entries().next().unwrap();
    assert_eq!(key.id(), value.id());
    assert_eq!(key.as_str(), Some("key"));
}

#[test]
fn anchor_in_flow_sequence_entry() {
    let s = single("[&x 1, *x, 2]");
    let node = root(&s);
    let first = node.items().next().unwrap();
    let second = node.items().nth(1).unwrap();
    assert_eq!(first.id(), second.id());
    assert_eq!(first.tag(), tags::INT);
}

#[test]
fn anchored_empty_node() {
    let input = indoc! {"
        a: &e
        b: *e
    "};
    let s = single(input);
    let node = root(&s);
    let a = value_of(node, "a");
    assert_eq!(a.tag(), tags::NULL);
    assert_eq!(a.id(), value_of(node, "b").id());
}
