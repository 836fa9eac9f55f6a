use clap::Parser;
use site_mapper::{CrawlerConfig, SitemapBuilder};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Domain root to crawl
    #[arg(short, long)]
    domain: String,

    /// Path to crawler configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Override max concurrency
    #[arg(short = 'n', long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from file
    let config = CrawlerConfig::from_file(&args.config)?;

    // Print the loaded configuration (for debugging)
    println!("Crawler configuration:");
    println!("  Max concurrency: {}", config.max_concurrency);
    println!("  Request timeout: {}s", config.request_timeout_secs);
    println!("  Max redirects: {}", config.max_redirects);
    println!("  User agent: {}", config.user_agent);

    let mut builder = SitemapBuilder::new(args.domain.as_str()).with_config(config);

    // Apply overrides if specified
    if let Some(concurrency) = args.concurrency {
        println!("Overriding max concurrency: {}", concurrency);
        builder = builder.with_max_concurrency(concurrency);
    }

    let start_time = std::time::Instant::now();
    let sitemap = builder.build().await?;

    for (i, page) in sitemap.pages().iter().enumerate() {
        println!(
            "Page {}: {} ({}) - {} links, {} assets",
            i + 1,
            page.url(),
            page.title(),
            page.links().count(),
            page.assets().len()
        );
    }

    println!(
        "Crawling complete. Mapped {} pages in {:.2} seconds.",
        sitemap.len(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
