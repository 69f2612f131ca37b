use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use zhrl::{Interpreter, Repl, Sexp, ZhrlError};

#[derive(Parser)]
#[command(author, version, about = "ZHRL language interpreter")]
struct Args {
    /// Log filter used when RUST_LOG is unset (e.g. `debug`, `zhrl=trace`)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate the program stored as a JSON nested list in FILE
    Run {
        script: PathBuf,
        /// Treat FILE as a JSON array of programs and evaluate each in turn
        #[arg(long)]
        many: bool,
    },
    /// Start an interactive session reading one JSON program per line
    Repl,
    /// Evaluate a program given as a JSON nested list
    Eval { source: String },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let outcome = match args.command.unwrap_or(Command::Repl) {
        Command::Run { script, many } => run_script(script, many),
        Command::Repl => Repl::new().run(),
        Command::Eval { source } => eval_snippet(&source),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn eval_snippet(source: &str) -> Result<(), ZhrlError> {
    let interpreter = Interpreter::new();
    let input = Sexp::from_json(source)?;
    println!("{}", interpreter.top_evaluate(&input)?);
    Ok(())
}

fn run_script(path: PathBuf, many: bool) -> Result<(), ZhrlError> {
    let source = fs::read_to_string(&path)?;
    let interpreter = Interpreter::new();
    let input = Sexp::from_json(&source)?;
    let programs = match input {
        Sexp::List(programs) if many => programs,
        single => vec![single],
    };
    for program in &programs {
        println!("{}", interpreter.top_evaluate(program)?);
    }
    Ok(())
}
