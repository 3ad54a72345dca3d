use std::{fs::read_to_string, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use lakec::{
    errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse, render_error,
    resolver::resolver::resolve, type_checker::type_checker::type_check,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lakec", version, about = "Type checker for Lake programs")]
struct Cli {
    /// Source file to check.
    path: PathBuf,

    #[arg(long)]
    /// Dump the token stream before parsing.
    dump_tokens: bool,

    #[arg(long)]
    /// Dump the parsed AST.
    dump_ast: bool,

    #[arg(long)]
    /// Dump the type assigned to every node.
    dump_types: bool,

    #[arg(long)]
    /// Display phase timing information.
    time: bool,
}

/// Installs the global subscriber. `LAKEC_LOG` takes precedence over
/// `RUST_LOG`; without either only warnings are shown.
fn init_logging() {
    let filter = EnvFilter::try_from_env("LAKEC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_errors<'a>(errors: impl IntoIterator<Item = &'a Error>, source: &str) {
    for error in errors {
        eprintln!("{}", render_error(error, source));
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let file_name = cli
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.path.to_string_lossy().into_owned());

    let source = read_to_string(&cli.path)
        .with_context(|| format!("failed to read {}", cli.path.display()))?;
    debug!(path = %cli.path.display(), bytes = source.len(), "read source");

    let start = Instant::now();

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            print_errors([&error], &source);
            return Ok(false);
        }
    };
    if cli.time {
        println!("Tokenized in {:?}", start.elapsed());
    }
    if cli.dump_tokens {
        for token in &tokens {
            println!("{}", token);
        }
    }

    let parse_start = Instant::now();
    let program = match parse(tokens, Rc::new(file_name.clone())) {
        Ok(program) => program,
        Err(error) => {
            print_errors([&error], &source);
            return Ok(false);
        }
    };
    if cli.time {
        println!("Parsed in {:?}", parse_start.elapsed());
    }
    if cli.dump_ast {
        println!("{:#?}", program);
    }

    let resolve_start = Instant::now();
    let symbols = match resolve(&program) {
        Ok(symbols) => symbols,
        Err(errors) => {
            print_errors(&errors, &source);
            return Ok(false);
        }
    };
    if cli.time {
        println!("Resolved in {:?}", resolve_start.elapsed());
    }

    let type_check_start = Instant::now();
    let result = type_check(&program, &symbols).context("type checker fault")?;
    if cli.time {
        println!("Type checked in {:?}", type_check_start.elapsed());
    }

    if cli.dump_types {
        for (node, data_type) in result.annotations.iter() {
            println!("{:>6}  {}", node.to_string(), data_type);
        }
    }

    print_errors(&result.diagnostics, &source);

    if cli.time {
        println!("Total time: {:?}", start.elapsed());
    }

    info!(
        file = %file_name,
        diagnostics = result.diagnostics.len(),
        "finished"
    );

    Ok(result.success)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("Type check failed");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
