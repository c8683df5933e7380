use std::fmt::Write as _;
use std::path::Path;

use mathlab::Sequence;

use crate::error::SessionError;

/// Evaluate every whitespace-delimited number in `input`.
/// Reading stops at the first token that is not a number.
pub fn eval_text(sequence: &Sequence, input: &str) -> Vec<f64> {
    input
        .split_whitespace()
        .map_while(|token| token.parse::<f64>().ok())
        .map(|number| sequence.eval(number))
        .collect()
}

/// Evaluate the numbers in `input_path` and write one result per line to
/// `output_path`. Returns how many results were written.
pub fn eval_file(
    sequence: &Sequence,
    input_path: &Path,
    output_path: &Path,
) -> Result<usize, SessionError> {
    let input = std::fs::read_to_string(input_path).map_err(|e| {
        SessionError::IoError(format!("unable to open '{}': {}", input_path.display(), e))
    })?;

    let results = eval_text(sequence, &input);
    let mut output = String::new();
    for result in &results {
        let _ = writeln!(output, "{}", result);
    }

    std::fs::write(output_path, output).map_err(|e| {
        SessionError::IoError(format!("cannot write '{}': {}", output_path.display(), e))
    })?;
    tracing::debug!(results = results.len(), output = %output_path.display(), "batch evaluated");
    Ok(results.len())
}
