use std::fmt;
use std::ops::Range;

use crate::block::Block;
use crate::constants::ArityError;
use crate::registry::Registry;

/// One position in a sequence: the name the block was created under and the block.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub type_name: String,
    pub block: Block,
}

/// Why a line of sequence text produced no block.
#[derive(Debug, Clone, PartialEq)]
pub enum LineErrorKind {
    UnknownType(String),
    Arity(ArityError),
}

impl fmt::Display for LineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineErrorKind::UnknownType(name) => write!(f, "unknown block type '{}'", name),
            LineErrorKind::Arity(err) => err.fmt(f),
        }
    }
}

/// A rejected line of sequence text.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidLine {
    /// 1-based line number within the imported text.
    pub line_number: usize,
    /// Byte span of the line (without its terminator) in the imported text.
    pub span: Range<usize>,
    /// The line as it appeared in the input.
    pub text: String,
    pub reason: LineErrorKind,
}

/// Concatenate rejected lines, each terminated by a newline.
pub fn report(invalid: &[InvalidLine]) -> String {
    let mut out = String::new();
    for line in invalid {
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

/// An ordered chain of blocks, evaluated left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sequence {
    entries: Vec<Entry>,
}

impl Sequence {
    pub fn new() -> Self {
        Sequence {
            entries: Vec::new(),
        }
    }

    /// Parse every non-blank line of `text` and append the blocks that
    /// parse. Returns the rejected lines, each newline-terminated.
    pub fn append_from(&mut self, registry: &Registry, text: &str) -> String {
        report(&self.append_from_detailed(registry, text))
    }

    /// Like `append_from`, but reports each rejected line with its location
    /// and reason.
    pub fn append_from_detailed(&mut self, registry: &Registry, text: &str) -> Vec<InvalidLine> {
        let mut invalid = Vec::new();
        let mut offset = 0;

        for (index, raw) in text.split('\n').enumerate() {
            let start = offset;
            offset += raw.len() + 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            let mut tokens = line.split_whitespace();
            let Some(type_name) = tokens.next() else {
                continue;
            };
            let constants: Vec<&str> = tokens.collect();

            let reason = match registry.create(type_name, &constants) {
                Some(Ok(block)) => {
                    self.entries.push(Entry {
                        type_name: type_name.to_string(),
                        block,
                    });
                    continue;
                }
                Some(Err(err)) => LineErrorKind::Arity(err),
                None => LineErrorKind::UnknownType(type_name.to_string()),
            };

            tracing::debug!(line = index + 1, %reason, "rejected sequence line");
            invalid.push(InvalidLine {
                line_number: index + 1,
                span: start..start + line.len(),
                text: line.to_string(),
                reason,
            });
        }

        invalid
    }

    /// Replace the whole sequence with the blocks parsed from `text`.
    pub fn load_from(&mut self, registry: &Registry, text: &str) -> String {
        self.entries.clear();
        self.append_from(registry, text)
    }

    pub fn load_from_detailed(&mut self, registry: &Registry, text: &str) -> Vec<InvalidLine> {
        self.entries.clear();
        self.append_from_detailed(registry, text)
    }

    /// Write one `<type_name> <c1> ... <cN> ` line per block, optionally
    /// prefixed with its 1-based position.
    pub fn dump(&self, to: &mut impl fmt::Write, with_position_labels: bool) -> fmt::Result {
        for (index, entry) in self.entries.iter().enumerate() {
            if with_position_labels {
                write!(to, "{}: ", index + 1)?;
            }
            write!(to, "{} ", entry.type_name)?;
            entry.block.dump(to)?;
            writeln!(to)?;
        }
        Ok(())
    }

    /// The unlabelled dump, suitable for `load_from`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.dump(&mut out, false);
        out
    }

    pub fn eval(&self, input: f64) -> f64 {
        self.entries
            .iter()
            .fold(input, |value, entry| entry.block.eval(value))
    }

    /// Delete the entry at `index`; out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.entries.len() {
            self.entries.remove(index);
        }
    }

    /// Swap the entry at `index` with the first one; out of range or 0 is a no-op.
    pub fn move_to_front(&mut self, index: usize) {
        if index > 0 && index < self.entries.len() {
            self.entries.swap(0, index);
        }
    }

    pub fn push(&mut self, type_name: impl Into<String>, block: Block) {
        self.entries.push(Entry {
            type_name: type_name.into(),
            block,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, true)
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
