use std::path::Path;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use mathlab::{InvalidLine, Registry};

pub fn color_choice(no_color: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

/// Render each rejected line of `source` as a warning on stderr.
pub fn emit_invalid_lines(
    path: &Path,
    source: &str,
    invalid: &[InvalidLine],
    registry: &Registry,
    no_color: bool,
) {
    let mut files = SimpleFiles::new();
    let file_id = files.add(path.display().to_string(), source);
    let writer = StandardStream::stderr(color_choice(no_color));
    let config = term::Config::default();
    let registered = registry.list_registered();
    for line in invalid {
        let diagnostic = line.to_diagnostic(file_id, &registered);
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
    }
}
