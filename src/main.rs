use clap::{Parser, Subcommand};
use std::path::PathBuf;
use webreltree::{config, db, export, feedback, output, thumbs};

#[derive(Parser)]
#[command(name = "webreltree")]
#[command(about = "Relationship-chart data exporter for genealogy snapshots")]
#[command(long_about = "\
Relationship-chart data exporter for genealogy snapshots

Reads a genealogy database snapshot and writes a self-contained data
directory for an interactive relationship chart.

Snapshot format (a single JSON file):

  {
    \"persons\":  [ {\"handle\": \"a1b2\", \"id\": \"I0001\", ...}, ... ],
    \"families\": [ {\"handle\": \"c3d4\", \"id\": \"F0001\"}, ... ],
    \"events\":   [ {\"handle\": \"e5f6\", \"date\": {\"year\": 1850, \"month\": 3, \"day\": 2}}, ... ],
    \"media\":    [ {\"handle\": \"g7h8\", \"id\": \"O0001\", \"path\": \"...\", \"mime\": \"image/jpeg\"}, ... ]
  }

Output directory:

  <output>/persons.js       # person records + start-person id
  <output>/thumbs/*.png     # copied thumbnail images

The companion HTML/SVG front-end renders the directory as-is, without
further database access.

Run 'webreltree gen-config' to generate a documented webreltree.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export chart data and thumbnails from a snapshot
    Export(ExportArgs),
    /// Validate a snapshot without writing output
    Check(CheckArgs),
    /// Print a stock webreltree.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ExportArgs {
    /// Snapshot file or directory (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Id of the person the chart opens centered on
    #[arg(long)]
    start_person: Option<String>,

    /// Prefix for personal-page links; empty disables links
    #[arg(long)]
    link_prefix: Option<String>,

    /// Export records marked private
    #[arg(long)]
    include_private: bool,

    /// Suppress the progress bar and the closing inventory
    #[arg(long)]
    quiet: bool,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Snapshot file or directory (overrides config)
    #[arg(long)]
    database: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Command::Export(args) => run_export(&cfg, args),
        Command::Check(args) => {
            let database = args
                .database
                .unwrap_or_else(|| PathBuf::from(&cfg.database));
            let snapshot = db::snapshot_path(&database);
            println!("==> Checking {}", snapshot.display());
            let tree = db::SnapshotDb::load(&snapshot)?;
            output::print_check_output(&tree);
            if tree.dangling_references().is_empty() {
                println!("==> Snapshot is valid");
                Ok(())
            } else {
                std::process::exit(1);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
    }
}

fn run_export(
    cfg: &config::ReportConfig,
    args: ExportArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let database = args
        .database
        .unwrap_or_else(|| PathBuf::from(&cfg.database));
    let tree = db::SnapshotDb::load(&db::snapshot_path(&database))?;

    let options = export::ExportOptions {
        output_dir: args.output.unwrap_or_else(|| PathBuf::from(&cfg.output)),
        start_person: args
            .start_person
            .unwrap_or_else(|| cfg.start_person.clone()),
        link_prefix: args.link_prefix.unwrap_or_else(|| cfg.link_prefix.clone()),
        include_private: args.include_private || cfg.include_private,
    };

    let cache = thumbs::ThumbnailCache::new(
        PathBuf::from(&cfg.thumbnails.cache_dir),
        cfg.thumbnails.size,
    );
    let console = feedback::ConsoleFeedback::new();

    let result = if args.quiet {
        export::export(&tree, &cache, &feedback::Silent, &console, &options)
    } else {
        export::export(&tree, &cache, &console, &console, &options)
    };

    match result {
        Ok(summary) => {
            if !args.quiet {
                output::print_export_output(&summary);
            }
            Ok(())
        }
        // Already surfaced through the notifier; just fail the process.
        Err(export::ExportError::DirCreation(..)) => std::process::exit(1),
        Err(err) => Err(err.into()),
    }
}
