use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::sequence::{InvalidLine, LineErrorKind};

impl InvalidLine {
    /// Convert to a codespan-reporting Diagnostic for display.
    /// `registered` is listed in a note when the type name was not found.
    pub fn to_diagnostic(&self, file_id: usize, registered: &[&str]) -> Diagnostic<usize> {
        let label = match &self.reason {
            LineErrorKind::UnknownType(_) => "no block type with this name",
            LineErrorKind::Arity(_) => "wrong constants for this block type",
        };
        let mut notes = vec![format!("line {} was skipped", self.line_number)];
        if matches!(self.reason, LineErrorKind::UnknownType(_)) && !registered.is_empty() {
            notes.push(format!("registered block types: {}", registered.join(", ")));
        }
        Diagnostic::warning()
            .with_message(self.reason.to_string())
            .with_labels(vec![
                Label::primary(file_id, self.span.clone()).with_message(label),
            ])
            .with_notes(notes)
    }
}

#[cfg(test)]
mod tests {
    use codespan_reporting::diagnostic::Severity;

    use crate::{Registry, Sequence};

    #[test]
    fn unknown_type_lists_registered_names() {
        let registry = Registry::with_builtins();
        let mut sequence = Sequence::new();
        let invalid = sequence.append_from_detailed(&registry, "addition 1\nsquare\n");
        let diagnostic = invalid[0].to_diagnostic(7, &registry.list_registered());

        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.message, "unknown block type 'square'");
        assert_eq!(diagnostic.labels[0].file_id, 7);
        assert_eq!(diagnostic.labels[0].range, 11..17);
        assert_eq!(diagnostic.notes.len(), 2);
        assert!(diagnostic.notes[1].contains("multiplication"));
    }

    #[test]
    fn arity_error_has_no_registry_note() {
        let registry = Registry::with_builtins();
        let mut sequence = Sequence::new();
        let invalid = sequence.append_from_detailed(&registry, "limit 1\n");
        let diagnostic = invalid[0].to_diagnostic(0, &registry.list_registered());

        assert_eq!(diagnostic.message, "expected 2 constant(s), found 1");
        assert_eq!(diagnostic.notes, vec!["line 1 was skipped".to_string()]);
    }
}
