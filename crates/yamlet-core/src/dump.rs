//! Human-readable graph dumps for tests and the CLI.

use crate::{Graph, NodeId, NodeKind, tags};

/// Render one document as an indented tree. Nodes shared through aliases
/// are printed at every occurrence; a node that appears among its own
/// ancestors is cut off with `(cycle)`.
pub fn dump_document(graph: &Graph, root: NodeId) -> String {
    let mut out = String::new();
    let mut stack = Vec::new();
    write_node(graph, root, 0, &mut stack, &mut out);
    out
}

fn write_node(graph: &Graph, id: NodeId, depth: usize, stack: &mut Vec<NodeId>, out: &mut String) {
    let pad = "  ".repeat(depth);
    if stack.contains(&id) {
        out.push_str(&format!("{pad}(cycle)\n"));
        return;
    }
    let data = graph.get(id);
    let tag = tags::display(&data.tag);
    match &data.kind {
        NodeKind::Scalar(value) => {
            out.push_str(&format!("{pad}Scalar {value:?} {tag}\n"));
        }
        NodeKind::Sequence(items) => {
            out.push_str(&format!("{pad}Sequence {tag}\n"));
            stack.push(id);
            for &item in items {
                write_node(graph, item, depth + 1, stack, out);
            }
            stack.pop();
        }
        NodeKind::Mapping(entries) => {
            out.push_str(&format!("{pad}Mapping {tag}\n"));
            stack.push(id);
            for &(key, value) in entries {
                out.push_str(&format!("{pad}  Entry\n"));
                write_node(graph, key, depth + 2, stack, out);
                write_node(graph, value, depth + 2, stack, out);
            }
            stack.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, tags};

    #[test]
    fn dump_nested() {
        let mut graph = Graph::new();
        let a = graph.scalar(tags::STR.into(), "a".into(), Position::START);
        let one = graph.scalar(tags::INT.into(), "1".into(), Position::new(1, 4));
        let map = graph.mapping(tags::MAP.into(), Position::START);
        graph.push_entry(map, a, one);

        insta::assert_snapshot!(dump_document(&graph, map), @r#"
        Mapping !!map
          Entry
            Scalar "a" !!str
            Scalar "1" !!int
        "#);
    }

    #[test]
    fn dump_cycle_is_cut_off() {
        let mut graph = Graph::new();
        let seq = graph.sequence(tags::SEQ.into(), Position::START);
        graph.push_item(seq, seq);

        insta::assert_snapshot!(dump_document(&graph, seq), @r#"
        Sequence !!seq
          (cycle)
        "#);
    }
}
