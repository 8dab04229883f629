//! Depth-stamped anchor bindings.
//!
//! Plain scalars that look like implicit keys are parsed speculatively, so
//! an anchor defined inside a production that later rewinds must vanish.
//! Every binding carries the depth counter at definition time; `rewind`
//! trims everything at or above the saved mark.

use yamlet_core::NodeId;

#[derive(Debug, Clone)]
struct Binding {
    name: String,
    node: NodeId,
    depth: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AnchorTable {
    bindings: Vec<Binding>,
    depth: usize,
}

impl AnchorTable {
    /// Record a binding at the current depth. Redefinition is legal; later
    /// lookups see the most recent binding.
    pub fn add(&mut self, name: String, node: NodeId) {
        self.bindings.push(Binding {
            name,
            node,
            depth: self.depth,
        });
        self.depth += 1;
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.bindings
            .iter()
            .rev()
            .find(|b| b.name == name)
            .map(|b| b.node)
    }

    /// Current depth, used as a rewind mark.
    pub fn mark(&self) -> usize {
        self.depth
    }

    /// Drop every binding defined at or after `mark`.
    pub fn rewind(&mut self, mark: usize) {
        let keep = self.bindings.partition_point(|b| b.depth < mark);
        self.bindings.truncate(keep);
        self.depth = mark;
    }

    /// Anchors do not cross document boundaries.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> NodeId {
        NodeId::from_index(i)
    }

    #[test]
    fn lookup_finds_most_recent() {
        let mut table = AnchorTable::default();
        table.add("a".into(), id(0));
        table.add("a".into(), id(1));
        assert_eq!(table.lookup("a"), Some(id(1)));
        assert_eq!(table.lookup("missing"), None);
    }

    #[test]
    fn rewind_drops_later_bindings() {
        let mut table = AnchorTable::default();
        table.add("a".into(), id(0));
        let mark = table.mark();
        table.add("b".into(), id(1));
        table.add("a".into(), id(2));

        table.rewind(mark);
        assert_eq!(table.lookup("a"), Some(id(0)));
        assert_eq!(table.lookup("b"), None);
        assert_eq!(table.mark(), mark);
    }

    #[test]
    fn rewind_then_add_reuses_depth() {
        let mut table = AnchorTable::default();
        table.add("a".into(), id(0));
        let mark = table.mark();
        table.add("b".into(), id(1));
        table.rewind(mark);
        table.add("c".into(), id(2));
        assert_eq!(table.lookup("c"), Some(id(2)));
        assert_eq!(table.lookup("b"), None);
    }

    #[test]
    fn clear_empties_everything() {
        let mut table = AnchorTable::default();
        table.add("a".into(), id(0));
        table.clear();
        assert_eq!(table.lookup("a"), None);
        assert_eq!(table.mark(), 0);
    }
}
