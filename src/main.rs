//! tunetree - Browse a tree-dump of a music collection from the terminal.
//!
//! Usage:
//!   tt show                  Render the collection as a tree
//!   tt show --search synth   Filter by name
//!   tt stats                 Totals and audio file count
//!   tt folders               List folder names
//!   tt export                Export the tree to JSON
//!   tt link NAME             Search URL for a song
//!   tt cache info|clear      Inspect or drop the cache
//!   tt --help                Show help

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use tunetree_analyze::{
    FilterState, ViewKind, collect_folders, filter_tree, render, song_query, song_search_url,
    summary,
};
use tunetree_core::{MusicTree, ParseConfig, TreeOrigin, TreeStats};
use tunetree_service::{FileCacheStore, FileSource, MusicDataService, ServiceConfig};

#[derive(Parser)]
#[command(
    name = "tunetree",
    version,
    about = "Browse a tree-dump of a music collection",
    long_about = "tunetree reads the text produced by `tree` over a music folder and \
                  lets you browse, search and export it.\n\n\
                  Parsed collections are cached for an hour."
)]
struct Cli {
    /// Tree listing to read
    #[arg(short, long, default_value = "music.txt", global = true)]
    input: PathBuf,

    /// Skip the cache entirely
    #[arg(long, global = true)]
    no_cache: bool,

    /// Cache directory (defaults to the platform cache dir)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Columns per nesting level in the listing
    #[arg(long, default_value = "4", global = true)]
    indent_width: usize,

    /// Drop the `N directories, M files` line that `tree` prints last
    #[arg(long, global = true)]
    skip_summary: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the collection
    Show {
        /// Layout
        #[arg(short, long, default_value = "tree")]
        view: ViewKind,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Only keep files with this extension
        #[arg(short = 't', long = "type")]
        file_type: Option<String>,

        /// Only keep entries whose path contains this
        #[arg(short, long)]
        folder: Option<String>,

        /// Columns in grid view
        #[arg(long, default_value = "4")]
        columns: usize,
    },

    /// Show collection statistics
    Stats {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List folder names
    Folders,

    /// Export the tree to JSON
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the search URL for a song
    Link {
        /// File name of the song
        name: String,
    },

    /// Inspect or clear the cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Show cache age and size
    Info,
    /// Remove the cached collection
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();

    // Doesn't need the collection.
    if let Command::Link { name } = &cli.command {
        println!("{}", song_query(name));
        println!("{}", song_search_url(name));
        return Ok(());
    }

    let service = build_service(&cli)?;

    match cli.command {
        Command::Show {
            view,
            search,
            file_type,
            folder,
            columns,
        } => {
            let filter = FilterState {
                search_term: search,
                file_type,
                folder,
            };
            run_show(&service, view, &filter, columns).await;
        }
        Command::Stats { format } => run_stats(&service, format).await?,
        Command::Folders => {
            let tree = load(&service).await;
            for folder in collect_folders(&tree.root) {
                println!("{folder}");
            }
        }
        Command::Export { output } => run_export(&service, output).await?,
        Command::Cache { action } => run_cache(&service, action)?,
        Command::Link { .. } => {}
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TUNETREE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_service(cli: &Cli) -> Result<MusicDataService> {
    let parse = ParseConfig::builder()
        .indent_width(cli.indent_width)
        .skip_summary(cli.skip_summary)
        .build()
        .context("Invalid parser settings")?;
    let config = ServiceConfig::builder()
        .parse(parse)
        .use_cache(!cli.no_cache)
        .build()
        .context("Invalid service settings")?;

    let source = FileSource::new(&cli.input);
    let store = match &cli.cache_dir {
        Some(dir) => FileCacheStore::new(dir),
        None => FileCacheStore::default(),
    };
    Ok(MusicDataService::with_cache(source, Arc::new(store), config))
}

/// Load the collection, noting on stderr when sample data is served.
async fn load(service: &MusicDataService) -> Arc<MusicTree> {
    let tree = service.load().await;

    match tree.origin {
        TreeOrigin::Fallback => {
            let reason = service.last_error().unwrap_or_default();
            eprintln!("Could not load listing ({reason}); showing sample data");
        }
        TreeOrigin::Cache => eprintln!("Loaded from cache"),
        TreeOrigin::Source => {
            if tree.has_warnings() {
                eprintln!("{} warning(s) while parsing", tree.warnings.len());
            }
        }
    }

    tree
}

async fn run_show(service: &MusicDataService, view: ViewKind, filter: &FilterState, columns: usize) {
    let tree = load(service).await;

    let (root, stats) = if filter.is_active() {
        let filtered = filter_tree(&tree.root, filter);
        let stats = TreeStats::from_node(&filtered);
        (filtered, stats)
    } else {
        (tree.root.clone(), tree.stats)
    };

    println!("{}", root.name);
    for line in render(&root, view, columns.max(1)) {
        println!("{line}");
    }
    println!();
    println!("{}", summary(&stats, filter.is_active()));
}

async fn run_stats(service: &MusicDataService, format: OutputFormat) -> Result<()> {
    let tree = load(service).await;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(40));
            println!(" {}", tree.root.name);
            println!("{}", "─".repeat(40));
            println!(" Files:       {}", tree.stats.total_files);
            println!(" Folders:     {}", tree.stats.total_folders);
            println!(" Audio files: {}", tree.stats.audio_files);
            println!(" Max depth:   {}", tree.stats.max_depth);
            if tree.origin == TreeOrigin::Source {
                println!(" Parsed in {:.2}ms", tree.parse_duration.as_secs_f64() * 1000.0);
            }
            println!();
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree.stats)?);
        }
    }

    Ok(())
}

async fn run_export(service: &MusicDataService, output: Option<PathBuf>) -> Result<()> {
    let tree = load(service).await;
    let json = serde_json::to_string_pretty(&tree.root)?;

    match output {
        Some(output_path) => {
            std::fs::write(&output_path, json)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}

fn run_cache(service: &MusicDataService, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Info => match service.cache_info()? {
            None => println!("Caching is disabled"),
            Some(info) if !info.cached => println!("Nothing cached"),
            Some(info) => {
                println!(
                    "Cached {} ago, {}",
                    format_age(info.age),
                    humansize::format_size(info.size_bytes, humansize::BINARY)
                );
            }
        },
        CacheAction::Clear => {
            service.clear_cache()?;
            println!("Cache cleared");
        }
    }

    Ok(())
}

/// Format an age as the largest whole unit.
fn format_age(age: std::time::Duration) -> String {
    let secs = age.as_secs();
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86399 => format!("{}h", secs / 3600),
        _ => format!("{}d", secs / 86400),
    }
}
