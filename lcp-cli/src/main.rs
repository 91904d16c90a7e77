use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lcp_core::Level;
use std::path::PathBuf;

mod commands;
mod config;
mod fasta;

use commands::parse::ParseSettings;
use config::Config;

#[derive(Parser)]
#[command(name = "lcptools")]
#[command(about = "lcptools - Locally Consistent Parsing for DNA")]
#[command(version)]
#[command(long_about = "
lcptools splits DNA sequences into locally consistent cores and deepens them
level by level into a compact, position-stable multi-resolution index.

Examples:
  lcptools parse genome.fa --level 4 --out genome.lcp
  lcptools parse reads.fq.gz --level 2 --reverse-complement --out reads.lcp
  lcptools inspect genome.lcp --labels
  lcptools config --output lcptools.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse FASTA/FASTQ records into binary LPS records
    Parse {
        /// Input sequence file (FASTA/FASTQ, optionally gzipped)
        input: PathBuf,

        /// Output file for the LPS records
        #[arg(short, long, required = true)]
        out: PathBuf,

        /// Target level
        #[arg(short, long)]
        level: Option<Level>,

        /// Parse the reverse-complement strand
        #[arg(long)]
        reverse_complement: bool,

        /// Pack short DCT runs into labels instead of hashing them
        #[arg(long)]
        compressed: bool,

        /// Encoding table with `<char> <code> <rc_code>` lines
        #[arg(long)]
        alphabet: Option<PathBuf>,

        /// Window length for segmented parsing
        #[arg(long)]
        segment_length: Option<usize>,

        /// Overlap between consecutive windows
        #[arg(long)]
        overlap_length: Option<usize>,
    },

    /// Summarise the records of an LPS file
    Inspect {
        /// LPS file written by `parse`
        input: PathBuf,

        /// Print every record's labels
        #[arg(long)]
        labels: bool,
    },

    /// Print or save the default configuration
    Config {
        /// Write the configuration to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet)?;

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Set global thread count if specified
    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    match cli.command {
        Commands::Parse {
            input,
            out,
            level,
            reverse_complement,
            compressed,
            alphabet,
            segment_length,
            overlap_length,
        } => {
            let settings = ParseSettings::resolve(
                &config,
                level,
                reverse_complement,
                compressed,
                alphabet,
                segment_length,
                overlap_length,
            );
            commands::parse::execute(&input, &out, &settings)?;
        }

        Commands::Inspect { input, labels } => {
            commands::inspect::execute(&input, labels)?;
        }

        Commands::Config { output } => match output {
            Some(path) => {
                Config::default().save_to_file(&path)?;
                log::info!("Default configuration written to: {}", path.display());
            }
            None => print!("{}", Config::example_toml()?),
        },
    }

    Ok(())
}
