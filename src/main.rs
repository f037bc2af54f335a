//! Flavour Trios - guided selection of ingredient triples
//!
//! CLI commands:
//! - gui: Launch the interactive viewer
//! - list: List items at one level of the hierarchy
//! - copy: Print the tab-separated trios of a pair
//! - export: Write the whole hierarchy as JSON

mod catalog;
mod color;
mod config;
mod filter;
mod gui;
mod index;
mod logging;
mod report;
mod session;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::index::Indexes;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "flavour_trios")]
#[command(about = "Pick three ingredients step by step from a catalog of valid trios")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to trios.yaml config
    #[arg(short, long, default_value = "trios.yaml")]
    config: PathBuf,

    /// Catalog file, overrides the config and TRIOS_CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive viewer
    Gui,

    /// List firsts, the seconds of a first, or the thirds of a pair
    List {
        #[arg(long)]
        first: Option<String>,

        #[arg(long, requires = "first")]
        second: Option<String>,

        /// Case-insensitive substring filter
        #[arg(short, long, default_value = "")]
        search: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the tab-separated trios of a pair
    Copy {
        #[arg(long)]
        first: String,

        #[arg(long)]
        second: String,
    },

    /// Write the whole hierarchy as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let env = config::Env::load();

    // Initialize logging first
    let _log_guard = logging::init_logging(&env.log_dir)?;
    tracing::info!("Flavour Trios starting up");

    let cli = Cli::parse();
    tracing::debug!("CLI args parsed: config={:?} csv={:?}", cli.config, cli.csv);

    let mut config = if cli.config.exists() {
        tracing::info!("Loading config from {:?}", cli.config);
        config::Config::load(&cli.config)?
    } else {
        tracing::warn!("Config file not found: {:?}, using defaults", cli.config);
        config::Config::default()
    };
    config.apply_env(&env);
    if let Some(csv) = cli.csv {
        config.csv_path = csv;
    }

    let catalog = Catalog::load(&config.csv_path, &config.columns, config.delimiter_byte())
        .with_context(|| format!("cannot start without a catalog ({})", config.csv_path.display()))?;
    let indexes = Indexes::build(&catalog);

    match cli.command {
        Commands::Gui => {
            tracing::info!("Launching viewer");
            gui::run_viewer(config, indexes)?;
        }

        Commands::List { first, second, search, json } => {
            let entries = report::entries(&indexes, first.as_deref(), second.as_deref(), &search);
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                eprintln!("No results");
            } else {
                println!("{}", report::render_text(&entries));
            }
        }

        Commands::Copy { first, second } => {
            println!("{}", copy_text(&indexes, &first, &second)?);
        }

        Commands::Export { output } => {
            export(&indexes, output.as_deref())?;
        }
    }

    Ok(())
}

/// Walk a session through both selections and request the copy text
fn copy_text(indexes: &Indexes, first: &str, second: &str) -> anyhow::Result<String> {
    let mut session = Session::new();
    session.select_first(first);
    session.select_second(second);

    if !session.request_copy(indexes) {
        anyhow::bail!("No trios for {} + {}", first, second);
    }
    Ok(session.copy_text().to_string())
}

/// Write the JSON snapshot to a file or stdout
fn export(indexes: &Indexes, output: Option<&Path>) -> anyhow::Result<()> {
    let snapshot = report::snapshot(indexes);
    let json = serde_json::to_string_pretty(&snapshot)?;

    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            println!("Exported {} firsts -> {:?}", snapshot.firsts.len(), path);
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexes() -> Indexes {
        let data = "A,B,C\nLemon,Mint,Thyme\nLemon,Mint,Basil\n";
        let catalog = Catalog::from_reader(
            data.as_bytes(),
            Path::new("inline.csv"),
            &config::Columns::default(),
            b',',
        )
        .unwrap();
        Indexes::build(&catalog)
    }

    #[test]
    fn test_copy_text() {
        assert_eq!(
            copy_text(&indexes(), "Lemon", "Mint").unwrap(),
            "Lemon\tMint\tBasil\nLemon\tMint\tThyme"
        );
    }

    #[test]
    fn test_copy_text_unknown_pair() {
        let err = copy_text(&indexes(), "Lemon", "Ginger").unwrap_err();
        assert_eq!(err.to_string(), "No trios for Lemon + Ginger");
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trios.json");
        export(&indexes(), Some(path.as_path())).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["firsts"][0]["name"], "Lemon");
    }

    #[test]
    fn test_cli_second_requires_first() {
        assert!(Cli::try_parse_from(["flavour_trios", "list", "--second", "Mint"]).is_err());
        assert!(Cli::try_parse_from(["flavour_trios", "list", "--first", "Lemon", "--second", "Mint"]).is_ok());
    }
}
