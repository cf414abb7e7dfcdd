use std::{
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use clap::Parser as ClapParser;
use monkey::{
    ast::ast::Program, errors::errors::Error, format_error, lexer::lexer::Lexer,
    parser::parser::Parser,
};
use owo_colors::OwoColorize;

/// Tokenizes and parses Monkey source
#[derive(Debug, ClapParser)]
#[command(name = "monkey", version)]
#[command(about = "Tokenizes and parses Monkey source", long_about = None)]
struct Cli {
    /// The file to parse. Starts a REPL when omitted
    path: Option<PathBuf>,

    /// Print the token stream instead of the AST
    #[arg(short, long)]
    tokens: bool,

    /// Print the AST with its Debug representation
    #[arg(short, long)]
    debug: bool,

    /// Report how long tokenizing and parsing took
    #[arg(long)]
    timings: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match &cli.path {
        Some(path) => run_file(&cli, path),
        None => match run_repl(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run_file(cli: &Cli, path: &Path) -> ExitCode {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read '{}': {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    match process(cli, &source, Some(file_name)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprint!("{}", format_error(&error, &source));
            ExitCode::FAILURE
        }
    }
}

fn run_repl(cli: &Cli) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "monkey v{}", env!("CARGO_PKG_VERSION"))?;

    let mut lines = io::stdin().lock().lines();
    loop {
        write!(stdout, "{} ", ">>".green())?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            writeln!(stdout, "{}", "exiting...".yellow())?;
            return Ok(());
        };
        let line = line?;

        match process(cli, &line, None) {
            Ok(output) if output.is_empty() => {}
            Ok(output) => writeln!(stdout, "{}", output)?,
            Err(error) => write!(stdout, "{}", format_error(&error, &line).red())?,
        }
    }
}

/// Runs one source through the front end and renders what the flags ask for.
fn process(cli: &Cli, source: &str, file: Option<String>) -> Result<String, Error> {
    let start = Instant::now();

    if cli.tokens {
        let tokens: Vec<String> = Lexer::new(source, file)
            .map(|token| token.to_string())
            .collect();

        if cli.timings {
            println!("Tokenized in {:?}", start.elapsed());
        }
        return Ok(tokens.join(" "));
    }

    let program = Parser::new(Lexer::new(source, file)).parse_program()?;

    if cli.timings {
        println!("Parsed in {:?}", start.elapsed());
    }

    Ok(render(cli, &program))
}

fn render(cli: &Cli, program: &Program) -> String {
    if cli.debug {
        format!("{:#?}", program)
    } else {
        program
            .statements
            .iter()
            .map(|stmt| stmt.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
