use std::fmt;

#[derive(Debug)]
pub enum SessionError {
    UnknownCommand(String),
    InvalidPosition,
    InvalidNumber(String),
    InvalidFileName,
    IoError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownCommand(verb) => write!(f, "invalid command: {}", verb),
            SessionError::InvalidPosition => write!(f, "invalid position"),
            SessionError::InvalidNumber(token) => {
                if token.is_empty() {
                    write!(f, "missing number")
                } else {
                    write!(f, "invalid number: {}", token)
                }
            }
            SessionError::InvalidFileName => write!(f, "invalid file name"),
            SessionError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(error: std::io::Error) -> Self {
        SessionError::IoError(error.to_string())
    }
}
