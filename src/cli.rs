use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bandcamp-importer")]
#[command(about = "Move Bandcamp album downloads into a media library", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); overrides the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Library root to import into; overrides the config file
    #[arg(long, global = true)]
    pub media_root: Option<PathBuf>,

    /// List every imported archive
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for the import report
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Without a subcommand, the configured downloads directory is scanned
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import the given archives
    Import(ImportArgs),
    /// Import every *.zip in a directory
    Scan(ScanArgs),
    /// Print the resolved configuration
    Config,
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Album archives named "<artist> - <album>.zip"
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan (defaults to library.downloads)
    pub dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
