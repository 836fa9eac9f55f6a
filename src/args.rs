use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-mapper")]
#[command(about = "Crawls a single domain and prints its sitemap")]
#[command(version)]
pub struct Args {
    /// Domain root to crawl, including the scheme (e.g. http://example.com)
    pub domain: String,

    /// Path to a JSON configuration file
    #[arg(short = 'f', long)]
    pub config: Option<PathBuf>,

    /// Number of concurrent fetches (overrides the config file)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds (overrides the config file)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Print the sitemap as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}
