//! CLI argument definitions for the SINAN importer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sinan-godata",
    version,
    about = "Import SINAN notification exports into a Go.Data outbreak",
    long_about = "Convert SINAN notifiable-disease exports to Go.Data case records\n\
                  and upsert them into the target outbreak.\n\n\
                  Connection settings come from GODATA_URL, GODATA_TOKEN,\n\
                  GODATA_USERNAME and GODATA_PASSWORD."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a notification export and upsert it into an outbreak.
    Import(ImportArgs),

    /// List the disease modules this build ships.
    Diseases,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the notification export CSV.
    #[arg(value_name = "CASES_CSV")]
    pub cases: PathBuf,

    /// Residence-municipality reference dictionary CSV.
    #[arg(long, value_name = "CSV")]
    pub dictionary: PathBuf,

    /// Disease module to apply (see `diseases`).
    #[arg(long)]
    pub disease: String,

    /// Target outbreak, by exact name.
    #[arg(long)]
    pub outbreak: String,

    /// Overwrite personally identifying columns with fixed placeholders.
    #[arg(long)]
    pub anonymize: bool,

    /// Size of the upload worker pool.
    #[arg(long, default_value_t = godata_client::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Write every assembled case as one JSON object per line.
    #[arg(long = "dump-json", value_name = "PATH")]
    pub dump_json: Option<PathBuf>,

    /// Assemble (and dump) without uploading anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
