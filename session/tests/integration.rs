use std::path::PathBuf;

use mathlab::{BlockKind, Registry};
use session::{Flow, Session, SessionError};

fn session() -> Session {
    Session::new(Registry::with_builtins(), PathBuf::from("."))
}

fn run(session: &mut Session, line: &str) -> String {
    let mut output = Vec::new();
    session
        .execute_line(line, &mut output)
        .expect("command failed");
    String::from_utf8(output).unwrap()
}

#[test]
fn list_registered() {
    let mut s = session();
    assert_eq!(
        run(&mut s, "lr"),
        "addition condition identity limit multiplication power \n"
    );
}

#[test]
fn add_list_and_eval() {
    let mut s = session();
    assert_eq!(run(&mut s, "a addition 100"), "");
    assert_eq!(run(&mut s, "a multiplication 2"), "");
    assert_eq!(
        run(&mut s, "l"),
        "1: addition 100 \n2: multiplication 2 \n\n"
    );
    assert_eq!(run(&mut s, "e 100"), "400\n");
}

#[test]
fn add_reports_rejected_block() {
    let mut s = session();
    assert_eq!(
        run(&mut s, "a square 2"),
        "!! Unknown block types:\nsquare 2\n"
    );
    assert_eq!(
        run(&mut s, "a limit 1"),
        "!! Unknown block types:\nlimit 1\n"
    );
    assert!(s.sequence().is_empty());
}

#[test]
fn remove_and_move_use_one_based_positions() {
    let mut s = session();
    run(&mut s, "a addition 1");
    run(&mut s, "a addition 2");
    run(&mut s, "a addition 3");

    run(&mut s, "m 3");
    assert_eq!(
        s.sequence().to_text(),
        "addition 3 \naddition 2 \naddition 1 \n"
    );

    run(&mut s, "r 2");
    assert_eq!(s.sequence().to_text(), "addition 3 \naddition 1 \n");

    // Past the end: silently ignored.
    run(&mut s, "r 9");
    run(&mut s, "m 9");
    assert_eq!(s.sequence().len(), 2);
}

#[test]
fn invalid_position_is_an_error() {
    let mut s = session();
    let mut output = Vec::new();
    let err = s.execute_line("r 0", &mut output).unwrap_err();
    assert!(matches!(err, SessionError::InvalidPosition));
    assert_eq!(err.to_string(), "invalid position");
}

#[test]
fn exit_stops_the_session() {
    let mut s = session();
    let mut output = Vec::new();
    assert_eq!(s.execute_line("x", &mut output).unwrap(), Flow::Exit);
    assert_eq!(s.execute_line("", &mut output).unwrap(), Flow::Continue);
    assert!(output.is_empty());
}

#[test]
fn help_prints_usage() {
    let mut s = session();
    let output = run(&mut s, "h");
    assert!(output.starts_with("Commands:\n"));
    assert!(output.contains("ef file_name"));
}

#[test]
fn aliases_registered_by_caller() {
    let mut registry = Registry::new();
    registry.register_kind("add", BlockKind::Addition);
    registry.register_kind("multiply", BlockKind::Multiplication);
    let mut s = Session::new(registry, PathBuf::from("."));
    run(&mut s, "a add 100.");
    run(&mut s, "a multiply 2.");
    assert_eq!(run(&mut s, "e 100."), "400\n");
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sequence.txt");

    let mut s = session();
    run(&mut s, "a limit -1 1");
    run(&mut s, "a power 0.5");
    run(&mut s, "a identity");
    s.save(&path).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "limit -1 1 \npower 0.5 \nidentity \n"
    );

    let mut reloaded = session();
    let loaded = reloaded.load(&path).unwrap().expect("file exists");
    assert!(loaded.invalid.is_empty());
    assert_eq!(reloaded.sequence(), s.sequence());
}

#[test]
fn load_reports_invalid_lines_and_replaces_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sequence.txt");
    std::fs::write(&path, "dummy\naddition 100.\ndummy\n").unwrap();

    let mut s = session();
    run(&mut s, "a multiplication 5");
    let loaded = s.load(&path).unwrap().unwrap();
    assert_eq!(loaded.report(), "dummy\ndummy\n");
    assert_eq!(loaded.invalid[1].line_number, 3);
    assert_eq!(s.sequence().len(), 1);
    assert_eq!(s.sequence().eval(0.0), 100.0);
}

#[test]
fn load_missing_file_keeps_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = session();
    run(&mut s, "a addition 1");
    assert!(s.load(&dir.path().join("absent.txt")).unwrap().is_none());
    assert_eq!(s.sequence().len(), 1);
}

#[test]
fn eval_file_writes_one_result_per_line() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("inputs.txt"), "1 2.5\n-4\n").unwrap();

    let mut s = Session::new(Registry::with_builtins(), dir.path().to_path_buf())
        .with_results_file("out.txt");
    run(&mut s, "a multiplication 2");
    let output = run(&mut s, "ef inputs.txt");
    assert!(output.starts_with("Results are written to: "));
    assert!(output.trim_end().ends_with("out.txt"));

    let results = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
    assert_eq!(results, "2\n5\n-8\n");
}

#[test]
fn eval_file_missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut s = Session::new(Registry::with_builtins(), dir.path().to_path_buf());
    let mut output = Vec::new();
    let err = s.execute_line("ef nope.txt", &mut output).unwrap_err();
    assert!(matches!(err, SessionError::IoError(_)));
    assert!(err.to_string().contains("unable to open"));
}
