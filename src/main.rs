//! Binary entrypoint for the ror2wiki CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml`
//! - `import [--monsters P] [--items P] [--survivors P]` - load the source files
//! - `list <collection>` / `show <collection> <name>` - list and detail pages
//! - `home`, `classes`, `page <path>` - landing page, survivor classes, any site path
//! - `status` - record counts and store location
//!
//! See the library crate docs for module-level details: `ror2wiki::`.
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use ror2wiki::catalog::{CatalogStore, EntityKind, Importer};
use ror2wiki::config::Config;
use ror2wiki::web::{render_json, render_text, Page, Route, Views};

#[derive(Parser)]
#[command(name = "ror2wiki")]
#[command(about = "Import and browse Risk of Rain 2 survivors, monsters and items")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Import the monster, item and survivor source files
    Import {
        /// Monster source file (overrides config)
        #[arg(long)]
        monsters: Option<PathBuf>,
        /// Item source file (overrides config)
        #[arg(long)]
        items: Option<PathBuf>,
        /// Survivor source file (overrides config)
        #[arg(long)]
        survivors: Option<PathBuf>,
    },
    /// List every record in a collection
    List {
        /// monsters, items or survivors
        kind: EntityKind,
        #[arg(long)]
        json: bool,
    },
    /// Show one record
    Show {
        /// monster, item or survivor
        kind: EntityKind,
        /// Record name, exactly as imported
        name: String,
        #[arg(long)]
        json: bool,
    },
    /// Show the landing page with all three collections
    Home {
        #[arg(long)]
        json: bool,
    },
    /// Print the distinct survivor classes
    Classes,
    /// Render the page at a site path, e.g. /survivor/Commando/
    Page {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Show catalog status and record counts
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(&None, cli.verbose);
        info!("Initializing new catalog configuration");
        if Path::new(&cli.config).exists() {
            bail!("{} already exists; remove it first to regenerate", cli.config);
        }
        Config::create_default(&cli.config).await?;
        info!("Configuration file created at {}", cli.config);
        return Ok(());
    }

    // Without a config file, run on defaults so a fresh checkout works out of the box
    let config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config).await?
    } else {
        Config::default()
    };
    init_logging(&Some(config.clone()), cli.verbose);

    let db_path = config.db_path();
    let store = CatalogStore::open(&db_path)
        .with_context(|| format!("Failed to open catalog store at {}", db_path.display()))?;
    let views = Views::new(&store, config.catalog.name.clone());

    match cli.command {
        Commands::Init => {} // handled above
        Commands::Import {
            monsters,
            items,
            survivors,
        } => {
            let mut sources = config.import.sources();
            if let Some(path) = monsters {
                sources.monsters = path;
            }
            if let Some(path) = items {
                sources.items = path;
            }
            if let Some(path) = survivors {
                sources.survivors = path;
            }
            let delimiter = config.import.delimiter_byte()?;
            let summary = Importer::new(&store)
                .with_delimiter(delimiter)
                .import_all(&sources)
                .context("Import aborted")?;
            store.flush()?;
            for skipped in summary.skipped() {
                warn!(
                    "{} import skipped ({})",
                    skipped.kind.title(),
                    skipped.path.display()
                );
            }
            println!(
                "Import finished: {} created in {} ms",
                summary.total_created(),
                (summary.finished_at - summary.started_at).num_milliseconds()
            );
        }
        Commands::List { kind, json } => {
            let page = views.render_route(&Route::list(kind))?;
            print_page(&page, json)?;
        }
        Commands::Show { kind, name, json } => {
            let page = views.render_route(&Route::detail(kind, name))?;
            print_page(&page, json)?;
            if page.is_not_found() {
                std::process::exit(1);
            }
        }
        Commands::Home { json } => {
            let page = views.render_route(&Route::Home)?;
            print_page(&page, json)?;
        }
        Commands::Classes => {
            for class in views.site()?.survivor_classes {
                println!("{}", class);
            }
        }
        Commands::Page { path, json } => {
            let page = views.page(&path)?;
            print_page(&page, json)?;
            if page.is_not_found() {
                std::process::exit(1);
            }
        }
        Commands::Status => {
            println!("=== {} Status ===", config.catalog.name);
            println!("Store: {}", store.path().display());
            for kind in EntityKind::IMPORT_ORDER {
                println!("{}: {}", kind.title(), store.count(kind));
            }
            println!("Survivor classes: {}", views.site()?.survivor_classes.join(", "));
        }
    }

    Ok(())
}

fn print_page(page: &Page, json: bool) -> Result<()> {
    if json {
        println!("{}", render_json(page)?);
    } else {
        println!("{}", render_text(page));
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity raises the configured level, never lowers it
    let configured = config
        .as_ref()
        .map(|cfg| cfg.logging.level_filter())
        .unwrap_or(log::LevelFilter::Info);
    let base_level = match verbosity {
        0 => configured,
        1 => configured.max(log::LevelFilter::Debug),
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|file| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
                .ok()
        });

    if let Some(f) = log_file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Mirror to the console only when attached to a terminal
        let is_tty = atty::is(atty::Stream::Stdout);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
