use clap::error::ErrorKind;
use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use lox_scanner::config::{Config, OutputFormat};
use lox_scanner::diagnostics::{Diagnostics, Reporter, StderrReporter};
use lox_scanner::error::CompilerError;
use lox_scanner::{lexer, logging, Token};
use tracing::{debug, info, warn};

#[derive(ClapParser)]
#[command(author, version, about = "Lox scanner", args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Script to scan. Starts an interactive prompt when omitted
    script: Option<PathBuf>,

    /// How to echo the scanned tokens, overrides the config file
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the driver configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a config file with defaults if none exists
    Init,
    /// Print where the config file lives
    Path,
}

fn echo_tokens(tokens: &[Token], format: OutputFormat) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for token in tokens {
                writeln!(out, "{}", token)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, tokens).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()
}

fn run_file(path: &Path, format: OutputFormat) -> Result<(), CompilerError> {
    let bytes = fs::read(path).map_err(|source| CompilerError::IO {
        path: path.to_path_buf(),
        source,
    })?;
    // Invalid UTF-8 becomes U+FFFD and is reported by the scanner like any other stray char.
    let source = String::from_utf8_lossy(&bytes);
    info!(target: "lox::driver", path = %path.display(), bytes = source.len(), "scanning file");

    let mut diagnostics = Diagnostics::new();
    let tokens = lexer::scan(&source, &mut diagnostics);
    for diagnostic in diagnostics.iter() {
        eprintln!("{}", diagnostic);
    }
    echo_tokens(&tokens, format).map_err(CompilerError::Output)?;

    if !diagnostics.is_empty() {
        return Err(CompilerError::Scan {
            count: diagnostics.len(),
        });
    }
    Ok(())
}

fn run_prompt(config: &Config, format: OutputFormat) -> Result<(), CompilerError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut reporter = StderrReporter::new();
    let mut line = String::new();

    loop {
        print!("{}", config.prompt);
        io::stdout().flush().map_err(CompilerError::Output)?;

        line.clear();
        let read = input.read_line(&mut line).map_err(CompilerError::Output)?;
        if read == 0 {
            break;
        }

        let tokens = lexer::scan(line.trim_end_matches(&['\n', '\r'][..]), &mut reporter);
        echo_tokens(&tokens, format).map_err(CompilerError::Output)?;

        if reporter.had_error() {
            debug!(target: "lox::driver", errors = reporter.count(), "line had errors");
        }
        reporter.reset();
    }

    Ok(())
}

fn run_config(command: ConfigCommands, config: &Config) -> Result<(), CompilerError> {
    let config_path = Config::get_config_path();
    match command {
        ConfigCommands::Show => {
            let contents = serde_json::to_string_pretty(config).map_err(io::Error::from);
            println!("{}", contents.map_err(CompilerError::Output)?);
        }
        ConfigCommands::Init => {
            if config_path.exists() {
                println!("Config file already exists at: {}", config_path.display());
            } else {
                Config::default().save_to(&config_path)?;
                println!("Initialized new config file at: {}", config_path.display());
            }
        }
        ConfigCommands::Path => println!("{}", config_path.display()),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CompilerError> {
    let (config, load_error) = Config::load();
    logging::init(&config.log_level);
    if let Some(err) = load_error {
        warn!(target: "lox::driver", %err, "using default config");
    }

    let format = cli.format.unwrap_or(config.format);
    match (cli.command, cli.script) {
        (Some(Commands::Config { command }), _) => run_config(command, &config),
        (None, Some(script)) => run_file(&script, format),
        (None, None) => run_prompt(&config, format),
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            let _ = err.print();
            eprintln!("{}", CompilerError::Usage);
            process::exit(CompilerError::Usage.exit_code());
        }
    };

    if let Err(err) = run(cli) {
        // Scan errors were already printed line by line.
        if !matches!(err, CompilerError::Scan { .. }) {
            eprintln!("{}", err);
        }
        process::exit(err.exit_code());
    }
}
