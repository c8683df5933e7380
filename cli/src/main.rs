mod config;
mod diagnostics;
mod logging;
mod repl;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use mathlab::Registry;
use session::Session;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "mathlab", version, about = "Evaluate chains of arithmetic blocks")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file (defaults to ./mathlab.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sequence file, overriding the config
    #[arg(short, long, global = true)]
    sequence: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Edit and evaluate the sequence interactively (default)
    Repl,

    /// Evaluate the saved sequence for each number
    Eval(EvalArgs),

    /// Validate a sequence file and report invalid lines
    Check(CheckArgs),

    /// Run .session.md scenario files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct EvalArgs {
    /// Input numbers
    #[arg(required = true, allow_negative_numbers = true)]
    numbers: Vec<f64>,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Sequence file to validate
    file: PathBuf,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .session.md file or a directory containing them
    path: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.no_color);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("error: cannot determine current directory: {}", e);
            process::exit(1);
        }
    };

    match cli.command.unwrap_or(Command::Repl) {
        Command::Test(args) => {
            process::exit(test_runner::run_scenarios(&args.path, cli.no_color));
        }
        Command::Check(args) => do_check(&args.file, cli.no_color),
        command => {
            let config = match Config::load(cli.config.as_deref(), &cwd) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("error: {}", e);
                    process::exit(1);
                }
            };
            let sequence_path = cwd.join(
                cli.sequence
                    .as_deref()
                    .unwrap_or(config.sequence_file.as_path()),
            );
            let mut session = Session::new(Registry::with_builtins(), cwd)
                .with_results_file(config.results_file.clone());
            match command {
                Command::Eval(args) => do_eval(&mut session, &sequence_path, &args, cli.no_color),
                _ => do_repl(&mut session, &sequence_path, &config, cli.no_color),
            }
        }
    }
}

/// Load the sequence file into `session`, reporting invalid lines.
fn load_into(session: &mut Session, path: &Path, no_color: bool) {
    match session.load(path) {
        Ok(Some(loaded)) => {
            eprintln!("Loading sequence from file {}", path.display());
            if !loaded.invalid.is_empty() {
                diagnostics::emit_invalid_lines(
                    path,
                    &loaded.source,
                    &loaded.invalid,
                    session.registry(),
                    no_color,
                );
            }
        }
        Ok(None) => {}
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn do_repl(session: &mut Session, sequence_path: &Path, config: &Config, no_color: bool) {
    load_into(session, sequence_path, no_color);

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut stdout = std::io::stdout();
    if let Err(e) = repl::run(session, &mut input, &mut stdout, &config.prompt) {
        eprintln!("error: {}", e);
    }

    if config.save_on_exit {
        eprintln!("Saving sequence to file {}", sequence_path.display());
        if let Err(e) = session.save(sequence_path) {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn do_eval(session: &mut Session, sequence_path: &Path, args: &EvalArgs, no_color: bool) {
    load_into(session, sequence_path, no_color);
    for number in &args.numbers {
        println!("{}", session.sequence().eval(*number));
    }
}

fn do_check(path: &Path, no_color: bool) {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    };

    let registry = Registry::with_builtins();
    let mut sequence = mathlab::Sequence::new();
    let invalid = sequence.load_from_detailed(&registry, &source);
    if invalid.is_empty() {
        eprintln!("ok: {} ({} blocks)", path.display(), sequence.len());
        return;
    }

    diagnostics::emit_invalid_lines(path, &source, &invalid, &registry, no_color);
    eprintln!(
        "{}: {} invalid line(s), {} block(s) accepted",
        path.display(),
        invalid.len(),
        sequence.len()
    );
    process::exit(1);
}
