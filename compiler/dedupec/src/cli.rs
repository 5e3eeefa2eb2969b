//! Command-line interface of the `dedupe` binary.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::{is_binding_prefix, stringify_json, DedupeError, EmitConfig, TypeEscape};

/// What the binary was asked to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Run(RunOptions),
}

/// Options for a serialization run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub config: EmitConfig,
    /// Input file; stdin when `None`.
    pub input: Option<PathBuf>,
}

/// CLI failure. Every variant is reported on stderr with exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid indent width '{0}' (expected a number from 0 to 16)")]
    InvalidIndent(String),

    #[error("invalid binding prefix '{0}' (expected an identifier start such as 'v' or '_r')")]
    InvalidPrefix(String),

    #[error("unexpected argument '{0}' (only one input file is accepted)")]
    ExtraInput(String),

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read standard input: {0}")]
    Stdin(std::io::Error),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Dedupe(#[from] DedupeError),
}

/// Largest accepted `--indent` value.
pub const MAX_INDENT: usize = 16;

/// Parse the arguments that follow the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command, CliError> {
    let mut options = RunOptions::default();

    for arg in args {
        let arg = arg.as_ref();
        match arg {
            "help" | "--help" | "-h" => return Ok(Command::Help),
            "version" | "--version" | "-V" => return Ok(Command::Version),
            "--flow" => options.config.type_escape = TypeEscape::Flow,
            "-" => set_input(&mut options, arg)?,
            _ => {
                if let Some(width) = arg.strip_prefix("--indent=") {
                    options.config.indent_width = parse_indent(width)?;
                } else if let Some(prefix) = arg.strip_prefix("--prefix=") {
                    if !is_binding_prefix(prefix) {
                        return Err(CliError::InvalidPrefix(prefix.to_string()));
                    }
                    options.config.binding_prefix = prefix.to_string();
                } else if arg.starts_with('-') {
                    return Err(CliError::UnknownOption(arg.to_string()));
                } else {
                    set_input(&mut options, arg)?;
                }
            }
        }
    }

    Ok(Command::Run(options))
}

fn set_input(options: &mut RunOptions, arg: &str) -> Result<(), CliError> {
    if options.input.is_some() {
        return Err(CliError::ExtraInput(arg.to_string()));
    }
    options.input = Some(PathBuf::from(arg));
    Ok(())
}

fn parse_indent(width: &str) -> Result<usize, CliError> {
    match width.parse::<usize>() {
        Ok(n) if n <= MAX_INDENT => Ok(n),
        _ => Err(CliError::InvalidIndent(width.to_string())),
    }
}

/// Read the input named by `options` and serialize it.
pub fn run(options: &RunOptions) -> Result<String, CliError> {
    let source = match options.input.as_deref() {
        None => read_stdin()?,
        Some(path) if path == Path::new("-") => read_stdin()?,
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?,
    };
    tracing::debug!(bytes = source.len(), "read input");
    render(&source, &options.config)
}

/// Parse `source` as JSON and serialize it.
pub fn render(source: &str, config: &EmitConfig) -> Result<String, CliError> {
    let json: serde_json::Value = serde_json::from_str(source)?;
    Ok(stringify_json(&json, config)?)
}

fn read_stdin() -> Result<String, CliError> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .map_err(CliError::Stdin)?;
    Ok(source)
}

/// Print usage to stdout.
pub fn print_usage() {
    println!("dedupe - serialize JSON with repeated subtrees hoisted into bindings");
    println!();
    println!("Usage: dedupe [options] [FILE]");
    println!();
    println!("Reads JSON from FILE (or standard input when FILE is omitted or '-')");
    println!("and prints an expression that evaluates to the same value.");
    println!();
    println!("Options:");
    println!("  --flow             Annotate bindings and bound empty arrays with /*: any*/");
    println!("  --indent=<n>       Spaces per nesting level (default: 2, max: {MAX_INDENT})");
    println!("  --prefix=<name>    Binding name prefix (default: v)");
    println!("  -h, --help, help   Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Set RUST_LOG=debug to trace the analysis on stderr.");
}
