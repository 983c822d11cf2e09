//! pathsync - Mirror declared source paths onto their targets.
//!
//! Usage:
//!   pathsync sync                Run every enabled mapping from the config store
//!   pathsync sync --only ID      Run selected mappings
//!   pathsync sync --dry-run      Show what each mapping would do
//!   pathsync tree [PATH]         List a directory the way the sync view shows it
//!   pathsync mappings            List configured mappings
//!   pathsync --help              Show help

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use pathsync_core::{FileTreeNode, JsonFileStore, SyncConfig, SyncMapping};
use pathsync_ops::{SyncEngine, summarize};

#[derive(Parser)]
#[command(
    name = "pathsync",
    version,
    about = "Mirror declared source paths onto their targets",
    long_about = "pathsync copies each configured source file or directory onto its target.\n\n\
                  Mappings and the working directory are read from a JSON config store; \
                  relative paths resolve against the working directory."
)]
struct Cli {
    /// Config store file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the working directory relative paths resolve against
    #[arg(short = 'C', long, global = true)]
    working_dir: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run configured mappings
    Sync {
        /// Only run mappings with these ids
        #[arg(long = "only", value_name = "ID")]
        only: Vec<String>,

        /// Print the planned copies without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List a directory tree
    Tree {
        /// Directory to list (relative to the working directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Directory levels to expand
        #[arg(short, long)]
        depth: Option<u32>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List configured mappings
    Mappings {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = load_config(cli.config.as_deref(), cli.working_dir)?;

    match cli.command {
        Command::Sync {
            only,
            dry_run,
            format,
        } => run_sync(config, &only, dry_run, format),
        Command::Tree {
            path,
            depth,
            format,
        } => run_tree(config, &path, depth, format),
        Command::Mappings { format } => run_mappings(&config, format),
    }
}

/// Route `tracing` output to stderr, honouring `RUST_LOG`.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}

/// Load the session config from the JSON store.
fn load_config(store_path: Option<&Path>, working_dir: Option<PathBuf>) -> Result<SyncConfig> {
    let store_path = store_path
        .map(Path::to_path_buf)
        .unwrap_or_else(JsonFileStore::default_path);
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("Failed to open config store {}", store_path.display()))?;
    let mut config = SyncConfig::load(&store).context("Failed to load configuration")?;

    if working_dir.is_some() {
        config.working_dir = working_dir;
    }

    tracing::info!(
        store = %store_path.display(),
        mappings = config.mappings.len(),
        "configuration loaded"
    );

    Ok(config)
}

/// Run (or preview) the configured mappings.
fn run_sync(
    mut config: SyncConfig,
    only: &[String],
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    if !only.is_empty() {
        config.mappings.retain(|m| only.contains(&m.id));
        if config.mappings.is_empty() {
            bail!("No configured mapping matches {}", only.join(", "));
        }
    }

    let engine = SyncEngine::new(config);

    if dry_run {
        for (mapping, plan) in engine.plan_configured() {
            match plan {
                Ok(plan) => println!(
                    " {:<16} {} -> {}",
                    mapping.id,
                    plan.source().display(),
                    plan.destination().display()
                ),
                Err(e) => println!(" {:<16} would fail: {e}", mapping.id),
            }
        }
        return Ok(());
    }

    let batch = engine.sync_configured();
    let summary = summarize(&batch.results);

    match format {
        OutputFormat::Text => {
            println!();
            for result in &batch.results {
                if result.success {
                    println!(
                        " ok    {:<16} {} ({} files, {})",
                        result.id,
                        result.detail.as_deref().unwrap_or_default(),
                        result.stats.files_copied,
                        format_size(result.stats.bytes_copied)
                    );
                } else {
                    println!(
                        " FAIL  {:<16} {}",
                        result.id,
                        result.error.as_deref().unwrap_or("unknown error")
                    );
                }
            }
            println!();
            println!("{}", "─".repeat(60));
            println!(" {}", summary.message());
            println!(
                " {} copied in {:.2}s",
                format_size(batch.total_stats().bytes_copied),
                (batch.finished_at - batch.started_at).num_milliseconds() as f64 / 1000.0
            );
            if batch.cancelled {
                println!(" Batch was cancelled before all mappings ran");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
    }

    if !summary.is_success() {
        bail!("{}", summary.message());
    }

    Ok(())
}

/// List a directory tree.
fn run_tree(
    mut config: SyncConfig,
    path: &Path,
    depth: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(depth) = depth {
        config.tree_depth = depth;
    }

    let engine = SyncEngine::new(config);
    let root = engine.executor().resolver().resolve(path);
    let listing = engine.read_tree_with_diagnostics(&root);

    match format {
        OutputFormat::Text => {
            println!("{}", root.display());
            for node in &listing.nodes {
                print_node(node, 1);
            }
            if !listing.is_complete() {
                eprintln!();
                for path in listing.unreadable_paths() {
                    eprintln!("could not read {}", path.display());
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing.nodes)?);
        }
    }

    Ok(())
}

/// List configured mappings.
fn run_mappings(config: &SyncConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if config.mappings.is_empty() {
                println!(" No mappings configured.");
            }
            for mapping in &config.mappings {
                print_mapping(mapping);
            }
            if let Some(dir) = &config.working_dir {
                println!();
                println!(" Working directory: {}", dir.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config.mappings)?);
        }
    }

    Ok(())
}

fn print_mapping(mapping: &SyncMapping) {
    println!(
        " [{}] {:<16} {} -> {}",
        if mapping.enabled { "x" } else { " " },
        mapping.id,
        mapping.source.display(),
        mapping.target.display()
    );
}

/// Print a node and its children.
fn print_node(node: &FileTreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = if node.is_dir() { "/" } else { "" };
    println!("{indent}{}{marker}", node.name);

    for child in node.children() {
        print_node(child, depth + 1);
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}
