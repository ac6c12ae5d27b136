//! sitemapper binary entry point.

use clap::{Parser, Subcommand};
use sitemapper::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sitemapper",
    version,
    about = "Generate and analyze website sitemaps"
)]
struct Cli {
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Suppress informational output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Show per-URL details
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Locate a site's sitemaps (well-known paths, robots.txt, home page)
    Discover {
        /// Site root, with or without scheme
        site: String,
    },
    /// Fetch a sitemap tree and summarize it
    Fetch {
        /// Site root, with or without scheme
        site: String,
        /// Explicit sitemap URL, skipping discovery
        #[arg(long)]
        sitemap_url: Option<String>,
        /// Also load the URL entries of every sub-sitemap
        #[arg(long)]
        include_urls: bool,
        /// Ignore the cache and re-fetch
        #[arg(long)]
        fresh: bool,
    },
    /// HEAD-scan every URL a sitemap lists and report findings
    Audit {
        /// Site root or sitemap URL
        target: String,
        /// Concurrent HEAD requests
        #[arg(long, default_value_t = sitemapper::fetch::DEFAULT_CONCURRENCY)]
        concurrency: usize,
    },
    /// Build sitemap XML files from a URL list
    Generate {
        /// File with one URL per line (# comments allowed)
        input: PathBuf,
        /// Site root the sitemap belongs to
        #[arg(long)]
        site: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// xml-stylesheet href to reference
        #[arg(long)]
        xsl: Option<String>,
        /// Maximum URLs per file before splitting into an index
        #[arg(long, default_value_t = sitemapper::validate::MAX_URLS_PER_SITEMAP)]
        split: usize,
    },
    /// Manage the sitemap cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Remove cached sitemaps
    Clear {
        /// Only this host's entry
        host: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Global flags travel via env so helpers deep in the command tree
    // can read them without threading a context through.
    if cli.json {
        std::env::set_var("SITEMAPPER_JSON", "1");
    }
    if cli.quiet {
        std::env::set_var("SITEMAPPER_QUIET", "1");
    }
    if cli.verbose {
        std::env::set_var("SITEMAPPER_VERBOSE", "1");
    }
    if cli.no_color {
        std::env::set_var("SITEMAPPER_NO_COLOR", "1");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sitemapper=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Discover { site } => cli::discover_cmd::run(&site).await,
        Command::Fetch {
            site,
            sitemap_url,
            include_urls,
            fresh,
        } => cli::fetch_cmd::run(&site, sitemap_url.as_deref(), include_urls, fresh).await,
        Command::Audit {
            target,
            concurrency,
        } => cli::audit_cmd::run(&target, concurrency).await,
        Command::Generate {
            input,
            site,
            out,
            xsl,
            split,
        } => cli::generate_cmd::run(&input, &site, &out, xsl.as_deref(), split).await,
        Command::Cache { action } => match action {
            CacheAction::Clear { host } => cli::cache_cmd::run_clear(host.as_deref()).await,
        },
    }
}
