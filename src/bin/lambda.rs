//! Command-line interface for lambda-syntax
//! Lexes and parses lambda expressions and prints the result in one of the registered
//! output formats.
//!
//! Usage:
//!   lambda parse `<path|->` [--format `<format>`] [--config `<file>`] [--show-ranges]
//!   lambda tokens `<path|->`
//!   lambda formats
//!
//! Diagnostics go to stderr. The exit code is 1 when any lex or parse error was reported.

use clap::{Arg, ArgAction, ArgMatches, Command};
use config::ConfigError;
use lambda_syntax::lambda::config::{LambdaConfig, Loader};
use lambda_syntax::lambda::diagnostics::render_errors;
use lambda_syntax::lambda::formats::{
    FormatError, FormatRegistry, Formatter, TokensFormatter, TreevizFormatter,
};
use lambda_syntax::lambda::{parse_source, SourceOutput};
use std::io::Read;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Read from the working directory when no --config is given.
const LOCAL_CONFIG: &str = "lambda.toml";

fn main() {
    let matches = Command::new("lambda")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for lexing and parsing lambda-calculus expressions")
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse an expression and print the tree")
                .arg(path_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (see `lambda formats`)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the defaults"),
                )
                .arg(
                    Arg::new("show-ranges")
                        .long("show-ranges")
                        .help("Show source ranges in treeviz output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the tokens of an expression, one per line")
                .arg(path_arg()),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    let code = match matches.subcommand() {
        Some(("parse", sub)) => handle_parse_command(sub),
        Some(("tokens", sub)) => handle_tokens_command(sub),
        Some(("formats", _)) => handle_formats_command(),
        _ => 2,
    };
    process::exit(code);
}

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the source file, or - for stdin")
        .required(true)
        .index(1)
}

fn init_tracing(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    let result = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map(|_| buffer)
    } else {
        std::fs::read_to_string(path)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        process::exit(1);
    })
}

fn load_config(matches: &ArgMatches) -> LambdaConfig {
    build_config(matches).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    })
}

/// Defaults, then the user file, then command-line flags.
fn build_config(matches: &ArgMatches) -> Result<LambdaConfig, ConfigError> {
    let mut loader = match matches.get_one::<String>("config") {
        Some(path) => Loader::new().with_file(path),
        None => Loader::new().with_optional_file(LOCAL_CONFIG),
    };
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("show-ranges") {
        loader = loader.set_override("treeviz.show_ranges", true)?;
    }
    loader.build()
}

/// Print every diagnostic to stderr and return the exit code.
fn report(source: &str, output: &SourceOutput) -> i32 {
    if output.is_ok() {
        return 0;
    }
    eprint!("{}", render_errors(source, output));
    info!(errors = output.error_count(), "source had errors");
    1
}

fn handle_parse_command(matches: &ArgMatches) -> i32 {
    let config = load_config(matches);
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let source = read_source(path);
    let output = parse_source(&source);

    let mut registry = FormatRegistry::with_defaults();
    registry.register(TreevizFormatter::new(config.treeviz.show_ranges));

    debug!(format = %config.output.format, "rendering");
    match registry.serialize(&output, &config.output.format) {
        Ok(rendered) => print!("{}", rendered),
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, FormatError::FormatNotFound(_)) {
                eprintln!("Available formats: {}", registry.list_formats().join(", "));
            }
            return 1;
        }
    }

    report(&source, &output)
}

fn handle_tokens_command(matches: &ArgMatches) -> i32 {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let source = read_source(path);
    let output = parse_source(&source);

    match TokensFormatter.serialize(&output) {
        Ok(rendered) => print!("{}", rendered),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    }

    for error in &output.lex_errors {
        eprintln!("lex error: {}", error);
    }
    i32::from(!output.lex_errors.is_empty())
}

fn handle_formats_command() -> i32 {
    let registry = FormatRegistry::with_defaults();
    println!("Available output formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {:<10} {}", name, description);
    }
    0
}
