//! pokedex: interactive console for looking up creatures in the public catalog.
//!
//! - Search by name, with suggestions for misspellings
//! - Stats, evolution lineage and move lists for a creature
//! - Recent search history kept between runs

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pokedex::{Config, HttpFetcher};
use pokedex_cli::{Console, InputClosed, Session, Terminal};
use tracing_subscriber::filter::{Directive, EnvFilter};

const PIKACHU: &str = r#"
    `;-.          ___,
      `.`\_...._/`.-"`
        \        /      ,
        /()   () \    .' `-._
       |)  .    ()\  /   _.'
       \  -'-     ,; '. <
        ;.__     ,;|   > \
       / ,    / ,  |.-'.-'
      (_/    (_/ ,;|.<`
        \    ,     ;-`
         >   \    /
        (_,-'`> .'
             (_,'
    "#;

const GOODBYE: &str = r#"

     _______  _______  _______  ______   _______  __   __  _______  __
    |       ||       ||       ||      | |  _    ||  | |  ||       ||  |
    |    ___||   _   ||   _   ||  _    || |_|   ||  |_|  ||    ___||  |
    |   | __ |  | |  ||  | |  || | |   ||       ||       ||   |___ |  |
    |   ||  ||  |_|  ||  |_|  || |_|   ||  _   | |_     _||    ___||__|
    |   |_| ||       ||       ||       || |_|   |  |   |  |   |___  __
    |_______||_______||_______||______| |_______|  |___|  |_______||__|
"#;

/// Look up creatures, their stats, evolutions and moves
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./pokedex.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base URL of the catalog service
    #[arg(long)]
    api_url: Option<String>,

    /// Where search history is stored
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// Log requests and cache activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            &std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
            cli.verbose,
        ))
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Crates whose debug output `--verbose` turns on.
const VERBOSE_TARGETS: [&str; 2] = ["pokedex", "pokedex_cli"];

/// `RUST_LOG`-style directives plus warnings from everything; with `verbose`,
/// debug from this tool only so the HTTP client and config layer stay quiet.
fn log_filter(env_directives: &str, verbose: bool) -> EnvFilter {
    let mut filter = EnvFilter::new(env_directives).add_directive(tracing::Level::WARN.into());
    if verbose {
        for target in VERBOSE_TARGETS {
            match format!("{}=debug", target).parse::<Directive>() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(e) => eprintln!("Ignoring log directive for {}: {}", target, e),
            }
        }
    }
    filter
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_file(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Config::load(&cwd)
        }
    };

    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.clone();
    }
    if let Some(history_file) = &cli.history_file {
        config.history_file = history_file.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let fetcher = HttpFetcher::new(config.api_url.clone());
    let mut session = Session::new(config, fetcher);
    let mut console = Terminal::new();

    console.success("Welcome to the Pokemon Tool!");
    console.line("Loading history...");
    session.load_history();
    console.success(PIKACHU);

    match session.run(&mut console) {
        Ok(()) => {}
        // Closing stdin counts as leaving the application
        Err(e) if e.is::<InputClosed>() => console.line(""),
        Err(e) => return Err(e),
    }

    console.success(GOODBYE);
    Ok(())
}
