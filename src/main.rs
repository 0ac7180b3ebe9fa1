mod cli;

use bandcamp_importer::config::{Config, DEFAULT_LOG_LEVEL, Overrides};
use bandcamp_importer::importer::{ImportEngine, ImportReport};
use bandcamp_importer::observability;
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use tracing::debug;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();

    // Config loading logs, so tracing starts first at the best level known now
    let bootstrap_level = cli
        .log_level
        .as_deref()
        .filter(|level| observability::parse_level(level).is_ok())
        .unwrap_or(DEFAULT_LOG_LEVEL);
    let log_handle = observability::init_tracing(bootstrap_level)?;

    let overrides = Overrides {
        log_level: cli.log_level.clone(),
        media_root: cli.media_root.clone(),
    };
    let config = Config::load_with_overrides(cli.config_file.clone(), &overrides)?;
    log_handle.set_level(&config.logging.level)?;
    debug!(?config, "Configuration resolved");

    let engine = ImportEngine::new(config.import_settings());
    let report = match cli.command {
        Some(Commands::Import(args)) => engine.import_files(args.files.as_slice())?,
        Some(Commands::Scan(args)) => {
            let dir = args.dir.unwrap_or_else(|| config.library.downloads.clone());
            engine.import_directory(&dir)?
        }
        Some(Commands::Config) => {
            print!("{}", toml::to_string_pretty(&config)?);
            return Ok(());
        }
        None => {
            debug!("No command specified; scanning the downloads directory");
            engine.import_directory(&config.library.downloads)?
        }
    };

    print_report(&report, cli.format, cli.verbose)?;
    Ok(())
}

fn print_report(
    report: &ImportReport,
    format: OutputFormat,
    verbose: bool,
) -> Result<(), AnyError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!("Imported {} album(s)", report.imported.len());
            if verbose {
                for path in &report.imported {
                    println!("  {}", path.display());
                }
            }
        }
    }
    Ok(())
}
