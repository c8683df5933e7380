use std::io::{BufRead, Write};

use session::{Flow, Session, SessionError, USAGE};

/// Read commands from `input` until `x` or end of input.
/// Command failures are reported as `!! <message>` and never end the loop.
pub fn run(
    session: &mut Session,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    prompt: &str,
) -> Result<(), SessionError> {
    write!(output, "{}", USAGE)?;
    let mut line = String::new();
    loop {
        write!(output, "{}", prompt)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        match session.execute_line(&line, output) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(err) => writeln!(output, "!! {}", err)?,
        }
    }
}
