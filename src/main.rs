use std::{fs::read_to_string, path::PathBuf, process, str::FromStr, time::Instant};

use clap::{Parser as ClapParser, ValueEnum};
use log::{debug, error, info, LevelFilter};

use jsparse::{
    binder::binder::bind, display_error, lexer::lexer::tokenize, parser::parser::Parser,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The AST as pretty-printed JSON
    Json,
    /// The AST in Rust debug notation
    Debug,
    /// The token stream, one token per line
    Tokens,
}

/// Parses a JavaScript file and prints its syntax tree
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input file
    input: PathBuf,

    /// What to print
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Also print the parent of every node
    #[arg(long)]
    bind: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    debug!(args:?; "Parsed arguments");

    if let Err(message) = run(&args) {
        error!("{message}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.to_string_lossy().into_owned());

    let source = read_to_string(&args.input)
        .map_err(|err| format!("failed to read {}: {}", args.input.display(), err))?;

    let start = Instant::now();

    if args.format == Format::Tokens {
        let tokens = tokenize(&source, Some(file_name.clone())).map_err(|err| {
            display_error(&err, &source, &file_name);
            format!("failed to tokenize {}", file_name)
        })?;
        info!(tokens = tokens.len(), elapsed:? = start.elapsed(); "Tokenized");

        for token in &tokens {
            println!("{} {}", token.span.start, token.debug());
        }
        return Ok(());
    }

    let program = Parser::with_file(&source, &file_name)
        .parse()
        .map_err(|err| {
            display_error(&err, &source, &file_name);
            format!("failed to parse {}", file_name)
        })?;
    info!(statements = program.body.len(), elapsed:? = start.elapsed(); "Parsed");

    match args.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&program)
                .map_err(|err| format!("failed to serialize the tree: {}", err))?;
            println!("{}", json);
        }
        Format::Debug => println!("{:#?}", program),
        Format::Tokens => {}
    }

    if args.bind {
        let table = bind(&program);
        println!("{} nodes", table.len());
        for (id, node) in table.iter() {
            match node.parent {
                Some(parent) => println!("{} {:?} {} <- {}", id, node.kind, node.span.start, parent),
                None => println!("{} {:?} {}", id, node.kind, node.span.start),
            }
        }
    }

    Ok(())
}
