//! smc: compile a state machine description into its dispatch table.
//!
//! ```text
//! smc machine.sm                      # dispatch table as text
//! smc machine.sm --emit ast -f json   # parse tree as JSON
//! smc machine.sm --validate -o out.yaml -f yaml
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use thiserror::Error;

use smc::config::{default_config_path, load_config, Config};
use smc::dsl::{compile::compile, validate, CompileError, Compiler, ValidationIssue};
use smc::emit::{render_program, render_table, render_tokens, EmitError, EmitFormat, EmitKind};
use smc::logging::{filter_for_verbosity, init_tracing};

#[derive(Debug, Parser)]
#[command(name = "smc", version, about = "State machine description compiler")]
struct Cli {
    /// Source file to compile.
    input: PathBuf,

    /// Pipeline stage to print.
    #[arg(long, value_enum)]
    emit: Option<EmitKind>,

    /// Output encoding.
    #[arg(short, long, value_enum)]
    format: Option<EmitFormat>,

    /// Write to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reject transitions that use undeclared states or symbols.
    #[arg(long)]
    validate: bool,

    /// Config file (default: ~/.smc/config.yaml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum Failure {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("{} validation issue(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

fn render(source: &str, emit: EmitKind, format: EmitFormat, check: bool) -> Result<String, Failure> {
    if emit == EmitKind::Tokens {
        let tokens = Compiler::tokenize(source)?;
        return Ok(render_tokens(&tokens, format)?);
    }

    let program = Compiler::parse(source)?;
    if check {
        let issues = validate(&program);
        if !issues.is_empty() {
            return Err(Failure::Invalid(issues));
        }
    }

    match emit {
        EmitKind::Ast => Ok(render_program(&program, format)?),
        _ => Ok(render_table(&compile(program), format)?),
    }
}

fn report(path: &Path, failure: &Failure) {
    match failure {
        Failure::Compile(err) => eprintln!("{}:{err}", path.display()),
        Failure::Invalid(issues) => {
            for issue in issues {
                eprintln!("{}: {issue}", path.display());
            }
            eprintln!("smc: {failure}");
        }
        Failure::Emit(err) => eprintln!("smc: {err}"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("smc: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    init_tracing(&filter_for_verbosity(cli.verbose, &config.log_filter));

    let source = match std::fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("smc: failed to read {}: {e}", cli.input.display());
            return ExitCode::FAILURE;
        }
    };

    let emit = cli.emit.unwrap_or(config.emit);
    let format = cli.format.unwrap_or(config.format);
    let check = cli.validate || config.validate;
    tracing::debug!(input = %cli.input.display(), ?emit, ?format, validate = check, "compiling");

    let output = match render(&source, emit, format, check) {
        Ok(output) => output,
        Err(failure) => {
            report(&cli.input, &failure);
            return ExitCode::FAILURE;
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, output) {
                eprintln!("smc: failed to write {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        }
        None => print!("{output}"),
    }
    ExitCode::SUCCESS
}
