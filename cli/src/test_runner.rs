use std::path::{Path, PathBuf};

use serde::Deserialize;

use mathlab::Registry;
use session::{Flow, Session};

pub const SCENARIO_SUFFIX: &str = ".session.md";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Human-readable scenario description.
    #[serde(default)]
    pub description: Option<String>,

    /// Sequence text loaded before the first command.
    #[serde(default)]
    pub sequence: Option<String>,

    /// Expected output of all commands (trimmed comparison).
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Some command must fail with a message containing this substring.
    #[serde(default)]
    pub expect_error: Option<String>,

    /// Expected unlabelled dump of the sequence after the last command.
    #[serde(default)]
    pub expect_sequence: Option<String>,
}

/// Split a scenario file into its TOML config and its command script.
fn parse_scenario_file(content: &str) -> Result<(ScenarioConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let after_open = content
        .strip_prefix("---")
        .ok_or("missing opening --- frontmatter delimiter")?;
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest = &after_open[close_pos + 4..];
    let script = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    let config: ScenarioConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, script))
}

pub enum Outcome {
    Pass,
    Fail(String),
}

pub struct ScenarioResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: Outcome,
}

/// Run `script` one line at a time in a fresh session and check the expectations.
fn check_scenario(config: &ScenarioConfig, script: &str, base_dir: PathBuf) -> Outcome {
    let mut session = Session::new(Registry::with_builtins(), base_dir);
    if let Some(text) = &config.sequence {
        let invalid = session.load_text(text);
        if !invalid.is_empty() {
            return Outcome::Fail(format!("invalid lines in `sequence`:\n{}", invalid));
        }
    }

    let mut output = Vec::new();
    let mut errors = Vec::new();
    for line in script.lines() {
        match session.execute_line(line, &mut output) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(err) => errors.push(err.to_string()),
        }
    }

    if let Some(expected) = &config.expect_error {
        if !errors.iter().any(|e| e.contains(expected.as_str())) {
            return Outcome::Fail(format!(
                "expected error containing \"{}\", got: {}",
                expected,
                if errors.is_empty() {
                    "no errors".to_string()
                } else {
                    errors.join("; ")
                }
            ));
        }
    } else if !errors.is_empty() {
        return Outcome::Fail(format!("unexpected error: {}", errors.join("; ")));
    }

    if let Some(expected) = &config.expect_output {
        let actual = String::from_utf8_lossy(&output);
        if actual.trim() != expected.trim() {
            return Outcome::Fail(format!(
                "output mismatch\n  expected: {}\n  actual:   {}",
                expected.trim(),
                actual.trim()
            ));
        }
    }

    if let Some(expected) = &config.expect_sequence {
        let actual = session.sequence().to_text();
        if &actual != expected {
            return Outcome::Fail(format!(
                "sequence mismatch\n  expected: {:?}\n  actual:   {:?}",
                expected, actual
            ));
        }
    }

    Outcome::Pass
}

fn run_single_scenario(path: &Path) -> ScenarioResult {
    let fail = |reason: String| ScenarioResult {
        path: path.to_path_buf(),
        description: None,
        outcome: Outcome::Fail(reason),
    };

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return fail(format!("cannot read file: {}", e)),
    };
    let (config, script) = match parse_scenario_file(&content) {
        Ok(pair) => pair,
        Err(e) => return fail(format!("frontmatter error: {}", e)),
    };

    let base_dir = path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    ScenarioResult {
        path: path.to_path_buf(),
        outcome: check_scenario(&config, script, base_dir),
        description: config.description,
    }
}

/// Collect scenario files under `dir`, sorted.
fn discover(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect(dir, &mut found);
    found.sort();
    found
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
        } else if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(SCENARIO_SUFFIX))
        {
            out.push(path);
        }
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

/// Run a scenario file, or every scenario under a directory.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_scenarios(path: &Path, no_color: bool) -> i32 {
    let files = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        discover(path)
    };

    if files.is_empty() {
        eprintln!("no {} files found in {}", SCENARIO_SUFFIX, path.display());
        return 1;
    }

    let mut passed = 0usize;
    let mut failures = Vec::new();

    for file in &files {
        let result = run_single_scenario(file);
        let label = result.description.clone().unwrap_or_else(|| {
            file.file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("?")
                .trim_end_matches(SCENARIO_SUFFIX)
                .to_string()
        });
        match &result.outcome {
            Outcome::Pass => {
                passed += 1;
                eprintln!("  {}  {}", pass_label(no_color), label);
            }
            Outcome::Fail(_) => {
                eprintln!("  {}  {}", fail_label(no_color), label);
                failures.push(result);
            }
        }
    }

    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let Outcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    eprintln!();
    let failed = failures.len();
    if failed == 0 {
        eprintln!("test result: ok. {} passed, 0 failed", passed);
        0
    } else {
        eprintln!(
            "test result: FAILED. {} passed, {} failed (of {})",
            passed,
            failed,
            passed + failed
        );
        1
    }
}
