//! VSS CLI - look up and validate Vehicle Signal Specification signals
//!
//! - `vss find <NAME>` prints a resolved signal, as text or JSON
//! - `vss clamp <NAME> <VALUE>` restricts a value to a signal's range

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vss::{Numeric, Resolver, VssConfig, VssError, VssTree};

mod error;
mod output;

pub use error::{CliError, CliResult};

/// VSS CLI application
#[derive(Parser)]
#[command(name = "vss")]
#[command(about = "Look up Vehicle Signal Specification signals", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "VSS_CONFIG")]
    config: Option<PathBuf>,

    /// Tree to resolve against: a bundled catalog name or a JSON file
    #[arg(short, long, env = "VSS_TREE")]
    tree: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Resolve a signal and print it
    Find {
        /// Dotted signal name, e.g. Vehicle.Cabin.Door.Row1.DriverSide.IsOpen
        name: String,

        /// Print the signal as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clamp a value to a signal's [min, max]
    Clamp {
        /// Dotted signal name
        name: String,

        /// Value to clamp
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Run using the current process arguments.
pub fn run() -> CliResult<()> {
    run_with_args(std::env::args_os())
}

/// Run using the provided argument iterator.
pub fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .try_init();

    // Load config
    let config = match &cli.config {
        Some(path) => VssConfig::load(path)?,
        None => VssConfig::default(),
    };
    let units = config.unit_registry()?;
    let tree = match &cli.tree {
        Some(name) => load_tree(name)?,
        None => config.load_tree()?,
    };
    let resolver = Resolver::new(&tree, &units);

    // Execute command
    match cli.command {
        Commands::Find { name, json } => {
            let signal = resolver.resolve(name.as_str())?;
            if json {
                println!("{}", output::render_json(&signal)?);
            } else {
                print!("{}", output::render_signal(&signal));
            }
            Ok(())
        }
        Commands::Clamp { name, value } => {
            let signal = resolver.resolve(name.as_str())?;
            let input: Numeric = value
                .parse()
                .map_err(|_| CliError::InvalidValue(value.clone()))?;
            let clamped = signal.clamp(input)?;
            tracing::debug!(signal = %signal, %input, %clamped, "Clamped value");
            println!("{}", clamped);
            Ok(())
        }
    }
}

/// A bundled catalog by name, otherwise a file on disk.
fn load_tree(name: &str) -> Result<VssTree, VssError> {
    let tree = if vss_tree::bundled_trees().any(|bundled| bundled == name) {
        vss_tree::load_tree(name)?
    } else {
        vss_tree::load_tree_file(Path::new(name))?
    };
    Ok(tree)
}
