//! sds - split and compose SCAP source datastream collections.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use sds_core::{compose_from_file, decompose};

/// sds - SCAP source datastream split/compose tool
#[derive(Parser)]
#[command(name = "sds")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a datastream collection into standalone component files
    Split {
        /// Path to the collection document
        #[arg(short, long, env = "INPUT_DS")]
        input: PathBuf,

        /// Datastream id to split (defaults to the first datastream)
        #[arg(short, long)]
        datastream: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: String,
    },

    /// Build a collection skeleton referencing a single component file
    Compose {
        /// Component file to reference (classified by its suffix)
        #[arg(short, long)]
        input: PathBuf,

        /// Output collection document
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split { input, datastream, output } => {
            cmd_split(&input, datastream.as_deref(), &output)?;
        }
        Commands::Compose { input, output } => {
            cmd_compose(&input, &output)?;
        }
    }

    Ok(())
}

fn cmd_split(input: &PathBuf, datastream: Option<&str>, output: &str) -> Result<()> {
    println!("Splitting: {} -> {}", input.display(), output);

    let report = decompose(input, datastream, output)
        .context("Failed to split datastream collection")?;

    for problem in &report.problems {
        eprintln!("warning: {}", problem);
    }

    println!(
        "Wrote {} files ({} warnings)",
        report.files_written,
        report.problems.len()
    );

    Ok(())
}

fn cmd_compose(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let filepath = input
        .to_str()
        .context("Input path is not valid UTF-8")?;

    let doc = compose_from_file(filepath).context("Failed to compose collection")?;
    doc.write_to(output).context("Failed to write output file")?;

    println!("Wrote {}", output.display());

    Ok(())
}
