use std::io::Write;
use std::path::{Path, PathBuf};

use mathlab::{Registry, Sequence};

use crate::batch;
use crate::command::{Command, USAGE};
use crate::error::SessionError;
use crate::store::{self, Loaded};

pub const DEFAULT_RESULTS_FILE: &str = "eval_results.txt";

/// Whether the caller should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A registry and the sequence being edited, driven by textual commands.
#[derive(Debug)]
pub struct Session {
    registry: Registry,
    sequence: Sequence,
    /// Directory that relative file names are resolved against.
    base_dir: PathBuf,
    /// Where `ef` writes its results, relative to `base_dir` unless absolute.
    results_file: PathBuf,
}

impl Session {
    pub fn new(registry: Registry, base_dir: PathBuf) -> Self {
        Session {
            registry,
            sequence: Sequence::new(),
            base_dir,
            results_file: PathBuf::from(DEFAULT_RESULTS_FILE),
        }
    }

    pub fn with_results_file(mut self, results_file: impl Into<PathBuf>) -> Self {
        self.results_file = results_file.into();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn sequence_mut(&mut self) -> &mut Sequence {
        &mut self.sequence
    }

    pub fn resolve(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(file_name)
    }

    /// Replace the sequence with the contents of `path`, if it exists.
    pub fn load(&mut self, path: &Path) -> Result<Option<Loaded>, SessionError> {
        store::load_sequence(path, &self.registry, &mut self.sequence)
    }

    /// Replace the sequence with blocks parsed from `text`; returns the invalid lines.
    pub fn load_text(&mut self, text: &str) -> String {
        self.sequence.load_from(&self.registry, text)
    }

    pub fn save(&self, path: &Path) -> Result<(), SessionError> {
        store::save_sequence(path, &self.sequence)
    }

    /// Parse and execute one line of input.
    pub fn execute_line(&mut self, line: &str, output: &mut dyn Write) -> Result<Flow, SessionError> {
        let command = Command::parse(line)?;
        self.execute(command, output)
    }

    pub fn execute(&mut self, command: Command, output: &mut dyn Write) -> Result<Flow, SessionError> {
        tracing::trace!(?command, "executing");
        match command {
            Command::Empty => {}
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => write!(output, "{}", USAGE)?,
            Command::ListRegistered => {
                for name in self.registry.list_registered() {
                    write!(output, "{} ", name)?;
                }
                writeln!(output)?;
            }
            Command::ListSequence => writeln!(output, "{}", self.sequence)?,
            Command::Add(text) => {
                let invalid = self.sequence.append_from(&self.registry, &text);
                if !invalid.is_empty() {
                    write!(output, "!! Unknown block types:\n{}", invalid)?;
                }
            }
            Command::Remove(index) => self.sequence.remove_at(index),
            Command::MoveToFront(index) => self.sequence.move_to_front(index),
            Command::Eval(input) => writeln!(output, "{}", self.sequence.eval(input))?,
            Command::EvalFile(file_name) => {
                let input_path = self.resolve(&file_name);
                let output_path = self.resolve(&self.results_file);
                batch::eval_file(&self.sequence, &input_path, &output_path)?;
                writeln!(output, "Results are written to: {}", output_path.display())?;
            }
        }
        Ok(Flow::Continue)
    }
}
