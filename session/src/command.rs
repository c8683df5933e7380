use crate::error::SessionError;

pub const USAGE: &str = "\
Commands:
  lr - list all registered blocks
  l - list all blocks in sequence
  a block_type [constant1] [constantN] - adds new block to sequence
  r position - removes block from specified position
  m position - moves block from specified position to first position
  e number - evaluates sequence using specified number
  ef file_name - evaluates sequence with numbers from file
  h - prints help
  x - closes application and saves current sequence
";

/// One line of user input, split into its verb and arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Blank input.
    Empty,
    ListRegistered,
    ListSequence,
    /// Block text (`<type> [constants...]`) to append.
    Add(String),
    /// 0-based position.
    Remove(usize),
    /// 0-based position.
    MoveToFront(usize),
    Eval(f64),
    EvalFile(String),
    Help,
    Exit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, SessionError> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim_start()),
            None => (line, ""),
        };

        match verb {
            "" => Ok(Command::Empty),
            "x" => Ok(Command::Exit),
            "h" => Ok(Command::Help),
            "lr" => Ok(Command::ListRegistered),
            "l" => Ok(Command::ListSequence),
            "a" => Ok(Command::Add(rest.to_string())),
            "r" => parse_position(rest).map(Command::Remove),
            "m" => parse_position(rest).map(Command::MoveToFront),
            "e" => parse_number(rest).map(Command::Eval),
            "ef" => {
                if rest.is_empty() {
                    Err(SessionError::InvalidFileName)
                } else {
                    Ok(Command::EvalFile(rest.to_string()))
                }
            }
            other => Err(SessionError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parse a 1-based position into a 0-based index.
fn parse_position(rest: &str) -> Result<usize, SessionError> {
    let token = rest.split_whitespace().next().unwrap_or("");
    match token.parse::<i64>() {
        Ok(position) if position > 0 => {
            usize::try_from(position - 1).map_err(|_| SessionError::InvalidPosition)
        }
        _ => Err(SessionError::InvalidPosition),
    }
}

fn parse_number(rest: &str) -> Result<f64, SessionError> {
    let token = rest.split_whitespace().next().unwrap_or("");
    token
        .parse::<f64>()
        .map_err(|_| SessionError::InvalidNumber(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_verbs() {
        assert_eq!(Command::parse("").unwrap(), Command::Empty);
        assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
        assert_eq!(Command::parse("x").unwrap(), Command::Exit);
        assert_eq!(Command::parse("h").unwrap(), Command::Help);
        assert_eq!(Command::parse("lr").unwrap(), Command::ListRegistered);
        assert_eq!(Command::parse(" l ").unwrap(), Command::ListSequence);
    }

    #[test]
    fn add_keeps_block_text() {
        assert_eq!(
            Command::parse("a limit  1 2").unwrap(),
            Command::Add("limit  1 2".to_string())
        );
        assert_eq!(Command::parse("a").unwrap(), Command::Add(String::new()));
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(Command::parse("r 1").unwrap(), Command::Remove(0));
        assert_eq!(Command::parse("m 3").unwrap(), Command::MoveToFront(2));
    }

    #[test]
    fn bad_positions_are_rejected() {
        for line in ["r", "r 0", "r -2", "m abc", "m 1.5"] {
            assert!(
                matches!(Command::parse(line), Err(SessionError::InvalidPosition)),
                "{} should be rejected",
                line
            );
        }
    }

    #[test]
    fn eval_needs_a_number() {
        assert_eq!(Command::parse("e 2.5").unwrap(), Command::Eval(2.5));
        assert!(matches!(
            Command::parse("e"),
            Err(SessionError::InvalidNumber(_))
        ));
        let err = Command::parse("e ten").unwrap_err();
        assert_eq!(err.to_string(), "invalid number: ten");
    }

    #[test]
    fn eval_file_needs_a_name() {
        assert_eq!(
            Command::parse("ef inputs.txt").unwrap(),
            Command::EvalFile("inputs.txt".to_string())
        );
        assert!(matches!(
            Command::parse("ef"),
            Err(SessionError::InvalidFileName)
        ));
    }

    #[test]
    fn unknown_verb() {
        let err = Command::parse("frobnicate 1").unwrap_err();
        assert_eq!(err.to_string(), "invalid command: frobnicate");
    }
}
