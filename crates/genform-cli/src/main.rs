//! genform CLI
//!
//! Command-line tool for checking, rendering and submitting form schemas.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use commands::Outcome;

/// Declarative forms from JSON schema files.
#[derive(Parser)]
#[command(name = "genform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema file (JSON).
    #[arg(short, long, env = "GENFORM_SCHEMA")]
    schema: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the schema and list its fields.
    Check,

    /// Print the form as HTML.
    Render {
        /// Values file (JSON object keyed by field).
        #[arg(long)]
        values: Option<PathBuf>,

        /// Validate the values first and render their errors.
        #[arg(long)]
        validate: bool,
    },

    /// Validate values and print the accepted value bag.
    Submit {
        /// Values file (JSON object keyed by field).
        #[arg(long)]
        values: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let schema = commands::load_schema(&cli.schema)?;
    info!(
        "Loaded {} fields from {}",
        schema.fields().len(),
        cli.schema.display()
    );

    match cli.command {
        Commands::Check => {
            print!("{}", commands::check(&schema));
        }

        Commands::Render { values, validate } => {
            let values = match values {
                Some(path) => commands::load_values(&path)?,
                None => Default::default(),
            };
            println!("{}", commands::render(schema, values, validate)?);
        }

        Commands::Submit { values } => {
            let values = commands::load_values(&values)?;
            match commands::submit(schema, values)? {
                Outcome::Accepted(json) => println!("{json}"),
                Outcome::Rejected(errors) => {
                    for (field, message) in errors.all_errors() {
                        eprintln!("{field}: {message}");
                    }
                    anyhow::bail!("submission rejected: {} invalid fields", errors.len());
                }
            }
        }
    }

    Ok(())
}
