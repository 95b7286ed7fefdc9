use include_path::{PathConfig, PathError, PathParser};
use std::env;
use std::io::{self, Write};
use std::process;

fn print_usage(program: &str) {
    eprintln!("Prints the eager-load include path for each navigation lambda.");
    eprintln!();
    eprintln!(
        "Usage: {} [--config <path/to/config.json>] <lambda> [<lambda>...]",
        program
    );
    eprintln!("Example: {} \"x => x.Orders.Select(o => o.Items)\"", program);
}

/// The command line after the program name.
#[derive(Debug, PartialEq)]
struct Invocation<'a> {
    config_path: Option<&'a str>,
    lambdas: &'a [String],
}

/// Splits the arguments into an optional config file and the lambdas.
/// `None` means the usage message should be shown.
fn parse_args(args: &[String]) -> Option<Invocation<'_>> {
    let (config_path, lambdas) = match args {
        [flag, rest @ ..] if flag == "--config" => {
            let (path, lambdas) = rest.split_first()?;
            (Some(path.as_str()), lambdas)
        }
        _ => (None, args),
    };

    if lambdas.is_empty() {
        return None;
    }
    Some(Invocation {
        config_path,
        lambdas,
    })
}

/// Resolves every lambda and writes its include path, one per line.
fn run(invocation: &Invocation<'_>, out: &mut impl Write) -> Result<(), PathError> {
    let config = match invocation.config_path {
        Some(path) => {
            let config = PathConfig::from_file(path)?;
            log::info!("Loaded configuration from '{}'", path);
            config
        }
        None => PathConfig::default(),
    };

    let parser = PathParser::with_config(config)?;
    for lambda in invocation.lambdas {
        writeln!(out, "{}", parser.parse_str(lambda)?)?;
    }
    Ok(())
}

/// A simple CLI that resolves lambdas given as arguments into include paths.
fn main() -> Result<(), PathError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("include-path");

    let Some(invocation) = parse_args(args.get(1..).unwrap_or_default()) else {
        print_usage(program);
        process::exit(1);
    };

    run(&invocation, &mut io::stdout().lock())
}
