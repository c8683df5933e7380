use std::path::Path;

use mathlab::{InvalidLine, Registry, Sequence};

use crate::error::SessionError;

/// What a load read from disk, kept for diagnostics.
#[derive(Debug)]
pub struct Loaded {
    /// The file contents as read.
    pub source: String,
    /// Lines that did not produce a block.
    pub invalid: Vec<InvalidLine>,
}

impl Loaded {
    /// The rejected lines, each newline-terminated.
    pub fn report(&self) -> String {
        mathlab::sequence::report(&self.invalid)
    }
}

/// Replace `sequence` with the contents of the file at `path`.
/// Returns `Ok(None)` and leaves the sequence untouched if the file does not exist.
pub fn load_sequence(
    path: &Path,
    registry: &Registry,
    sequence: &mut Sequence,
) -> Result<Option<Loaded>, SessionError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no sequence file");
        return Ok(None);
    }
    let source = std::fs::read_to_string(path)
        .map_err(|e| SessionError::IoError(format!("cannot read '{}': {}", path.display(), e)))?;
    let invalid = sequence.load_from_detailed(registry, &source);
    tracing::info!(
        path = %path.display(),
        blocks = sequence.len(),
        invalid = invalid.len(),
        "loaded sequence"
    );
    Ok(Some(Loaded { source, invalid }))
}

/// Write the unlabelled dump of `sequence` to `path`.
pub fn save_sequence(path: &Path, sequence: &Sequence) -> Result<(), SessionError> {
    std::fs::write(path, sequence.to_text())
        .map_err(|e| SessionError::IoError(format!("cannot write '{}': {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), blocks = sequence.len(), "saved sequence");
    Ok(())
}
