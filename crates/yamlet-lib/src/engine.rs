//! Backtracking parse engine.
//!
//! One cursor over the code units, a scratch buffer that grammar rules
//! decode scalar content into, and a small pending-state block holding the
//! properties of the next node. `with_rewind` snapshots all three plus an
//! anchor-table mark; a production that returns `Ok(false)` is undone
//! completely. Fatal problems travel as `Err` and are never caught.
//!
//! The line map and the warning list are deliberately outside the
//! snapshot: positions and warnings survive speculative parses.

use indexmap::IndexMap;
use tracing::trace;

use yamlet_core::{Graph, NodeId, Position, tags};

use crate::anchors::AnchorTable;
use crate::chars;
use crate::diagnostics::Warning;
use crate::handles::TagHandles;
use crate::options::ParseOptions;
use crate::source::{SENTINEL, Source};
use crate::{Error, Result};

/// Outcome of one production: matched, or rewound without matching.
pub(crate) type Match = Result<bool>;

/// How a scalar was written; decides the fallback tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarStyle {
    /// Untagged plain scalars go through the resolver.
    Plain,
    /// Quoted and block scalars are `!!str` unless tagged.
    Quoted,
}

/// Properties buffered for the next node, plus the single value slot the
/// most recent production wrote its result into.
#[derive(Debug, Clone, Default)]
pub(crate) struct Pending {
    /// Resolved tag for the next node; `Some("")` is the non-specific `!`.
    pub tag: Option<String>,
    pub anchor: Option<String>,
    pub value: Option<NodeId>,
}

pub(crate) struct Snapshot {
    pos: usize,
    scratch_len: usize,
    pending: Pending,
    anchor_mark: usize,
}

const MAX_NESTING: u32 = 512;

pub(crate) struct Parser<'opt> {
    pub(crate) src: Source,
    pub(crate) pos: usize,
    pub(crate) scratch: Vec<u16>,
    pub(crate) pending: Pending,
    pub(crate) anchors: AnchorTable,
    pub(crate) handles: TagHandles,
    pub(crate) opts: &'opt ParseOptions,
    pub(crate) graph: Graph,
    pub(crate) roots: Vec<NodeId>,
    /// Set once the current document has seen a `%YAML` directive.
    pub(crate) version_seen: bool,
    /// Current node nesting depth, bounded by [`MAX_NESTING`].
    depth: u32,
    /// Keyed by message for deduplication; insertion order is kept.
    warnings: IndexMap<String, Option<Position>>,
}

impl<'opt> Parser<'opt> {
    pub fn new(text: &str, opts: &'opt ParseOptions) -> Self {
        Self {
            src: Source::new(text),
            pos: 0,
            scratch: Vec::new(),
            pending: Pending::default(),
            anchors: AnchorTable::default(),
            handles: TagHandles::new(),
            opts,
            graph: Graph::new(),
            roots: Vec::new(),
            version_seen: false,
            depth: 0,
            warnings: IndexMap::new(),
        }
    }

    pub fn finish(self) -> (Graph, Vec<NodeId>, Vec<Warning>) {
        let warnings = self
            .warnings
            .into_iter()
            .map(|(message, position)| Warning { message, position })
            .collect();
        (self.graph, self.roots, warnings)
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// Current unit; the sentinel once the input is exhausted.
    pub fn unit(&self) -> u16 {
        self.src.units()[self.pos]
    }

    /// Lookahead without bounds worries.
    pub fn peek(&self, offset: usize) -> u16 {
        self.src
            .units()
            .get(self.pos + offset)
            .copied()
            .unwrap_or(SENTINEL)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub fn bump(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.src.len(), "cursor past the sentinel");
        self.pos += n;
    }

    pub fn eat(&mut self, unit: u16) -> bool {
        if self.unit() == unit {
            self.bump(1);
            true
        } else {
            false
        }
    }

    /// Consume a literal ASCII sequence.
    pub fn eat_ascii(&mut self, text: &str) -> bool {
        let units = self.src.units();
        let matches = text
            .bytes()
            .enumerate()
            .all(|(i, b)| units.get(self.pos + i) == Some(&(b as u16)));
        if matches {
            self.pos += text.len();
        }
        matches
    }

    /// Consume one unit matched by a unit class.
    pub fn eat_class(&mut self, class: impl Fn(u16) -> bool) -> bool {
        if class(self.unit()) {
            self.bump(1);
            true
        } else {
            false
        }
    }

    /// Consume the units matched by a code-point class.
    pub fn eat_span(&mut self, class: impl Fn(&[u16], usize) -> usize) -> bool {
        let len = class(self.src.units(), self.pos);
        if len > 0 {
            self.bump(len);
            true
        } else {
            false
        }
    }

    /// Consume one line break; CR LF counts as one.
    pub fn eat_break(&mut self) -> bool {
        if self.eat(chars::CR) {
            self.eat(chars::LF);
            true
        } else {
            self.eat(chars::LF)
        }
    }

    pub fn start_of_line(&self) -> bool {
        self.pos == 0 || chars::is_break(self.src.units()[self.pos - 1])
    }

    /// Text consumed since `start`, lossily decoded.
    pub fn text_from(&self, start: usize) -> String {
        String::from_utf16_lossy(&self.src.units()[start..self.pos])
    }

    // ------------------------------------------------------------------
    // Rewind discipline
    // ------------------------------------------------------------------

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.pos,
            scratch_len: self.scratch.len(),
            pending: self.pending.clone(),
            anchor_mark: self.anchors.mark(),
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.pos = snapshot.pos;
        self.scratch.truncate(snapshot.scratch_len);
        self.pending = snapshot.pending;
        self.anchors.rewind(snapshot.anchor_mark);
    }

    /// Run a rule; on `Ok(false)` restore cursor, scratch, pending state
    /// and anchor table to their pre-call values.
    pub fn with_rewind(&mut self, rule: impl FnOnce(&mut Self) -> Match) -> Match {
        let snapshot = self.snapshot();
        let matched = rule(self)?;
        if !matched {
            self.restore(snapshot);
        }
        Ok(matched)
    }

    /// Rule-or-nothing; always succeeds.
    pub fn opt(&mut self, rule: impl FnOnce(&mut Self) -> Match) -> Match {
        self.with_rewind(rule)?;
        Ok(true)
    }

    /// Run a rule while it matches *and* advances the cursor; the advance
    /// guard keeps rules that can match emptily from looping forever.
    pub fn star(&mut self, mut rule: impl FnMut(&mut Self) -> Match) -> Match {
        loop {
            let before = self.pos;
            if !self.with_rewind(&mut rule)? || self.pos == before {
                return Ok(true);
            }
        }
    }

    pub fn plus(&mut self, mut rule: impl FnMut(&mut Self) -> Match) -> Match {
        if !self.with_rewind(&mut rule)? {
            return Ok(false);
        }
        self.star(rule)
    }

    /// Guard against pathological nesting. Callers must pair this with
    /// `exit_nested` on every path, including matches and mismatches.
    pub fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("nesting is too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ------------------------------------------------------------------
    // Scratch buffer
    // ------------------------------------------------------------------

    pub fn push_unit(&mut self, unit: u16) {
        self.scratch.push(unit);
    }

    pub fn push_char(&mut self, c: char) {
        let mut buf = [0u16; 2];
        self.scratch.extend_from_slice(c.encode_utf16(&mut buf));
    }

    /// Copy `n` units at the cursor into the scratch buffer and advance,
    /// warning about characters that stopped being line breaks in 1.2.
    pub fn push_content(&mut self, n: usize) {
        for i in 0..n {
            let unit = self.src.units()[self.pos + i];
            if chars::is_yaml11_break(unit) {
                self.warn_at(
                    self.pos + i,
                    format!(
                        "U+{unit:04X} was a line break in YAML 1.1 but is content in YAML 1.2"
                    ),
                );
            }
        }
        let (start, end) = (self.pos, self.pos + n);
        self.scratch.extend_from_slice(&self.src.units()[start..end]);
        self.pos = end;
    }

    /// A line break that became scalar content: normalised to the
    /// configured sequence, or preserved verbatim.
    pub fn push_input_break(&mut self, start: usize, end: usize) {
        if self.opts.normalize_line_breaks {
            self.scratch.extend_from_slice(self.opts.line_break.units());
        } else {
            self.scratch.extend_from_slice(&self.src.units()[start..end]);
        }
    }

    /// Materialise the scratch buffer, clearing it. Unpaired surrogates
    /// degrade to U+FFFD here, not earlier, so escaped pairs combine.
    pub fn take_scratch(&mut self) -> String {
        let text = String::from_utf16_lossy(&self.scratch);
        self.scratch.clear();
        text
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    pub fn warn_at(&mut self, at: usize, message: impl Into<String>) {
        let position = self.src.position(at);
        let message = message.into();
        trace!(%message, %position, "warning");
        self.warnings.entry(message).or_insert(Some(position));
    }

    pub fn error(&self, message: impl Into<String>) -> Error {
        self.error_at(self.pos, message)
    }

    pub fn error_at(&self, at: usize, message: impl Into<String>) -> Error {
        Error {
            message: message.into(),
            position: self.src.position(at),
        }
    }

    /// Fatal in committed contexts, a plain mismatch during speculation.
    pub fn error_unless(&self, fatal: bool, message: impl Into<String>) -> Match {
        if fatal {
            Err(self.error(message))
        } else {
            Ok(false)
        }
    }

    // ------------------------------------------------------------------
    // Node construction
    // ------------------------------------------------------------------

    /// Build a scalar from the scratch buffer, resolve its tag, attach any
    /// pending anchor, and leave it in the value slot.
    pub fn create_scalar(&mut self, style: ScalarStyle, start: usize) -> NodeId {
        let value = self.take_scratch();
        let tag = match self.pending.tag.take() {
            Some(tag) if !tag.is_empty() => tag,
            Some(_) => tags::STR.to_string(), // non-specific "!"
            None => match style {
                ScalarStyle::Quoted => tags::STR.to_string(),
                ScalarStyle::Plain => self
                    .opts
                    .resolver
                    .resolve(&value)
                    .unwrap_or(tags::STR)
                    .to_string(),
            },
        };
        let id = self.graph.scalar(tag, value, self.src.position(start));
        self.attach_anchor(id);
        self.pending.value = Some(id);
        id
    }

    /// Open a sequence node. The anchor is registered immediately so the
    /// collection can reference itself through aliases.
    pub fn begin_sequence(&mut self, start: usize) -> NodeId {
        let tag = self.take_collection_tag(tags::SEQ);
        let id = self.graph.sequence(tag, self.src.position(start));
        self.attach_anchor(id);
        id
    }

    pub fn begin_mapping(&mut self, start: usize) -> NodeId {
        let tag = self.take_collection_tag(tags::MAP);
        let id = self.graph.mapping(tag, self.src.position(start));
        self.attach_anchor(id);
        id
    }

    /// A collection production that matched leaves its node in the value
    /// slot, overwriting whatever its children left there.
    pub fn finish_collection(&mut self, id: NodeId) {
        self.pending.value = Some(id);
    }

    pub fn take_value(&mut self) -> NodeId {
        self.pending
            .value
            .take()
            .expect("a matched node production must leave a value")
    }

    fn take_collection_tag(&mut self, default: &str) -> String {
        match self.pending.tag.take() {
            Some(tag) if !tag.is_empty() => tag,
            _ => default.to_string(),
        }
    }

    fn attach_anchor(&mut self, id: NodeId) {
        if let Some(name) = self.pending.anchor.take() {
            self.anchors.add(name, id);
        }
    }
}
