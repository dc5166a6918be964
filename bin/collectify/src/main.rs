//! Collectify CLI
//!
//! Validates static-site content collections against their schemas.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use collectify::cmd::schema::SchemaFormat;
use color_eyre::eyre::Result;

/// Command-line interface for Collectify.
#[derive(Parser)]
#[command(
    name = "collectify",
    version,
    about = "Validate content collections and their references"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "collectify.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate every collection and resolve references
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print the collection registry
    Schema {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = SchemaFormat::Yaml)]
        format: SchemaFormat,
    },
    /// Print one entry with its references resolved
    Show {
        /// Collection name (e.g., posts)
        collection: String,
        /// Entry id (e.g., hello-world)
        id: String,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    collectify::init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { strict } => {
            collectify::cmd::check::run(&cli.config, strict)?;
        }
        Commands::Schema { format } => {
            collectify::cmd::schema::run(&cli.config, format)?;
        }
        Commands::Show { collection, id } => {
            collectify::cmd::show::run(&cli.config, &collection, &id)?;
        }
    }

    Ok(())
}
