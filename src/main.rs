//! Topology Layout CLI
//!
//! Usage:
//!   topology-layout [OPTIONS] <FILE>
//!
//! Options:
//!   -c, --catalog <FILE>     Extra device templates (TOML), layered over the built-ins
//!   -s, --stylesheet <FILE>  Link and route styles (TOML)
//!   -o, --output <FILE>      Write the layout JSON here instead of stdout
//!   -l, --lint               Print lint warnings to stderr
//!   --log-level <LEVEL>      off, error, warn, info, debug or trace
//!   -h, --help               Print help

use std::fs;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::{error, info, LevelFilter};

use topology_layout::blueprint::Blueprint;
use topology_layout::layout::lint;
use topology_layout::{instantiate_layout, DeviceLibrary, PipelineError, Stylesheet};

#[derive(Parser, Debug)]
#[command(name = "topology-layout")]
#[command(about = "Deterministic layout for network topology diagrams")]
struct Cli {
    /// Blueprint file (.toml or .json)
    file: PathBuf,

    /// Device template file (TOML), merged over the built-in library
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Stylesheet file for link and route styles (TOML)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Output file (stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print lint warnings to stderr
    #[arg(short, long)]
    lint: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {}. Using 'warn' instead.", cli.log_level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    if let Err(err) = run(&cli) {
        error!(err:% = err; "Run failed");
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut catalog = DeviceLibrary::builtin();
    if let Some(path) = &cli.catalog {
        info!(path:? = path; "Loading device catalog");
        catalog = catalog.merge(DeviceLibrary::from_file(path)?);
    }

    let mut blueprint = Blueprint::from_file(&cli.file).map_err(PipelineError::from)?;
    if let Some(path) = &cli.stylesheet {
        info!(path:? = path; "Loading stylesheet");
        let sheet = Stylesheet::from_file(path)?;
        blueprint.settings = blueprint.settings.with_stylesheet(&sheet);
    }

    let layout = instantiate_layout(&blueprint, &catalog).map_err(PipelineError::from)?;

    if cli.lint {
        for warning in lint::check(&layout, &blueprint) {
            eprintln!("warning: {warning}");
        }
    }

    let json = layout.to_json()?;
    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(path:? = path; "Layout written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
