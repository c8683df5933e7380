use std::fmt;

/// A known block type was given constants that do not satisfy its arity.
#[derive(Debug, Clone, PartialEq)]
pub enum ArityError {
    /// Fewer constant tokens than the block type requires.
    Missing { expected: usize, found: usize },
    /// One of the first `expected` tokens is not a floating point number.
    NotANumber {
        expected: usize,
        position: usize,
        token: String,
    },
}

impl fmt::Display for ArityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityError::Missing { expected, found } => {
                write!(f, "expected {} constant(s), found {}", expected, found)
            }
            ArityError::NotANumber {
                expected,
                position,
                token,
            } => write!(
                f,
                "constant {} of {} is not a number: '{}'",
                position + 1,
                expected,
                token
            ),
        }
    }
}

impl std::error::Error for ArityError {}

/// Parse exactly `out.len()` leading tokens into `out`.
/// Tokens past the arity are left for the caller and ignored here.
pub fn parse_constants(tokens: &[&str], out: &mut [f64]) -> Result<(), ArityError> {
    let expected = out.len();
    if tokens.len() < expected {
        return Err(ArityError::Missing {
            expected,
            found: tokens.len(),
        });
    }
    for (position, (slot, token)) in out.iter_mut().zip(tokens).enumerate() {
        *slot = token.parse::<f64>().map_err(|_| ArityError::NotANumber {
            expected,
            position,
            token: token.to_string(),
        })?;
    }
    Ok(())
}

/// Write each constant followed by a single space.
///
/// `f64`'s `Display` is the shortest representation that parses back to the
/// same bits, so the output of this function always re-parses to an identical
/// constant list (including `NaN` and `inf`).
pub fn write_constants(to: &mut impl fmt::Write, constants: &[f64]) -> fmt::Result {
    for constant in constants {
        write!(to, "{} ", constant)?;
    }
    Ok(())
}
