//! campus-partners: Terminal catalog browser for a university partnership program
//!
//! Browse partner offers and store branches, filter and sort them, and submit
//! reviews, either interactively or through one-shot listing commands.

#![allow(clippy::too_many_lines, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use campus_partners::{
    catalog::SortKey,
    cli::{self, OffersFilter, OutputFormat},
    config::{self, AppConfig},
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `--version` long form: the version plus how to point the tool at a backend.
const fn build_long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        "\n\nBackend selection (in precedence order):",
        "\n  --base-url flag, CAMPUS_PARTNERS_API_BASE, api.base_url config key",
        "\n\nOffline use:",
        "\n  browse/offers/detail/stores accept --sample to serve the bundled catalog"
    )
}

#[derive(Parser)]
#[command(name = "campus-partners")]
#[command(version, long_version = build_long_version())]
#[command(about = "Terminal catalog browser for university partnership offers", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Error occurred
    2  Review draft rejected by local validation

EXAMPLES:
    # Browse the catalog interactively
    campus-partners browse

    # Try the TUI without a backend
    campus-partners browse --sample

    # Second page of food offers, most viewed first
    campus-partners offers --category 음식 --sort popularity-desc --page 2

    # One offer's detail and review feed, as JSON
    campus-partners detail 42 --output json

    # Branches of a partnership
    campus-partners stores 42 --page 2

    # Submit a review with a receipt and one photo
    campus-partners review 42 --text \"재학생 확인 후 바로 적용\" --receipt receipt.jpg --photo a.jpg")]
struct Cli {
    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// API origin, e.g. https://partners.example.edu
    #[arg(long, global = true, env = "CAMPUS_PARTNERS_API_BASE")]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Explicit config file, skipping discovery
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `browse` subcommand
#[derive(Parser)]
struct BrowseArgs {
    /// Use the bundled sample catalog instead of a backend
    #[arg(long)]
    sample: bool,

    /// Theme override (dark, light)
    #[arg(long)]
    theme: Option<String>,

    /// Disable mouse capture (clicking outside a menu then no longer closes it)
    #[arg(long)]
    no_mouse: bool,
}

/// Arguments for the `offers` subcommand
#[derive(Parser)]
struct OffersArgs {
    /// Restrict to an organization tag. Repeat for several.
    #[arg(long = "organization", value_name = "TAG")]
    organizations: Vec<String>,

    /// Restrict to a category. Repeat for several.
    #[arg(long = "category", value_name = "TAG")]
    categories: Vec<String>,

    /// Restrict to a benefit type. Repeat for several.
    #[arg(long = "benefit", value_name = "TAG")]
    benefit_types: Vec<String>,

    /// Listing order
    #[arg(long, value_enum, default_value = "registration-asc")]
    sort: SortKey,

    /// 1-based page to fetch
    #[arg(long, default_value = "1")]
    page: u32,

    /// Use the bundled sample catalog instead of a backend
    #[arg(long)]
    sample: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Arguments for the `detail` subcommand
#[derive(Parser)]
struct DetailArgs {
    /// Offer id from the listing
    id: u64,

    /// Use the bundled sample catalog instead of a backend
    #[arg(long)]
    sample: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Arguments for the `stores` subcommand
#[derive(Parser)]
struct StoresArgs {
    /// Partnership id whose branches to list
    id: u64,

    /// 1-based page to fetch
    #[arg(long, default_value = "1")]
    page: u32,

    /// Use the bundled sample catalog instead of a backend
    #[arg(long)]
    sample: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Arguments for the `review` subcommand
#[derive(Parser)]
struct ReviewArgs {
    /// Offer id to review
    id: u64,

    /// Review text (at most 1000 characters)
    #[arg(long)]
    text: String,

    /// Receipt image path (required by the backend)
    #[arg(long, value_name = "PATH")]
    receipt: PathBuf,

    /// Review photo path. Repeat for up to three photos.
    #[arg(long = "photo", value_name = "PATH")]
    photos: Vec<PathBuf>,

    /// Validate the draft locally and exit without sending it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog in an interactive TUI
    Browse(BrowseArgs),

    /// List one page of partnership offers
    Offers(OffersArgs),

    /// Show one offer's detail and review feed
    Detail(DetailArgs),

    /// List a partnership's store branches
    Stores(StoresArgs),

    /// Submit a review for an offer
    Review(ReviewArgs),

    /// Emit a completion script for a shell
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Inspect or scaffold the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the loaded configuration as YAML
    Show,
    /// Show where config files are looked for, and which one is active
    Path,
    /// Write an example .campus-partners.yaml to the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let mut config = effective_config(&cli);

    let exit_code = match cli.command {
        Commands::Browse(args) => {
            if let Some(theme) = args.theme {
                config.tui.theme = theme;
            }
            if args.no_mouse {
                config.tui.mouse_enabled = false;
            }
            cli::run_browse(config, args.sample)?
        }

        Commands::Offers(args) => {
            let filter = OffersFilter {
                organizations: args.organizations,
                categories: args.categories,
                benefit_types: args.benefit_types,
                sort: args.sort,
                page: args.page,
            };
            cli::run_offers(config, filter, args.sample, args.output)?
        }

        Commands::Detail(args) => cli::run_detail(config, args.id, args.sample, args.output)?,

        Commands::Stores(args) => {
            cli::run_stores(config, args.id, args.page, args.sample, args.output)?
        }

        Commands::Review(args) => cli::run_review(
            config,
            args.id,
            &args.text,
            &args.receipt,
            &args.photos,
            args.dry_run,
        )?,

        Commands::Completions { shell } => {
            generate(
                shell,
                &mut Cli::command(),
                "campus-partners",
                &mut io::stdout(),
            );
            0
        }

        Commands::Config { action } => {
            run_config(action, cli.config.as_deref())?;
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// RUST_LOG wins over the verbosity flags when both are present.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// The `config` subcommand. Diagnostics go to stderr so `config show`
/// stays pipeable YAML.
fn run_config(action: ConfigAction, explicit: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let (file_config, loaded_from) = config::load_or_default(explicit);
            match &loaded_from {
                Some(path) => eprintln!("# source: {}", path.display()),
                None => eprintln!("# no config file found, these are the defaults"),
            }
            let yaml =
                serde_yaml_ng::to_string(&file_config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            eprintln!("Search order:");
            if let Ok(cwd) = std::env::current_dir() {
                eprintln!("  {}", cwd.display());
            }
            eprintln!("  <git repository root, when inside one>");
            if let Some(dir) = dirs::config_dir() {
                eprintln!("  {}", dir.join("campus-partners").display());
            }
            if let Some(home) = dirs::home_dir() {
                eprintln!("  {}", home.display());
            }
            eprintln!();
            eprintln!("File names tried in each:");
            for name in [
                ".campus-partners.yaml",
                ".campus-partners.yml",
                "campus-partners.yaml",
                "campus-partners.yml",
            ] {
                eprintln!("  {name}");
            }
            eprintln!();
            match config::discover_config_file(explicit) {
                Some(path) => eprintln!("Found: {}", path.display()),
                None => eprintln!("Found: none"),
            }
        }
        ConfigAction::Init => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".campus-partners.yaml");
            if target.exists() {
                anyhow::bail!("refusing to overwrite {}", target.display());
            }
            std::fs::write(&target, config::generate_full_example_config())
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Wrote {}", target.display());
        }
    }
    Ok(())
}

/// File config with the global CLI flags layered on top.
fn effective_config(cli: &Cli) -> AppConfig {
    let mut overrides = AppConfig::default();
    if let Some(base_url) = &cli.base_url {
        overrides.api.base_url = Some(base_url.clone());
    }
    if let Some(timeout) = cli.timeout {
        overrides.api.timeout_secs = timeout;
    }
    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config
}
