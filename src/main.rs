use clap::Parser;
use site_mapper::{Sitemap, SitemapBuilder, SitemapError};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    // Keep stdout clean for JSON consumers
    if !args.json {
        println!("Crawling {} ...", args.domain);
    }
    let start_time = std::time::Instant::now();

    let sitemap = match crawl(&args).await {
        Ok(sitemap) => sitemap,
        Err(e) => {
            ::log::error!("Failed to start crawler: {}", e);
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stats = sitemap.stats();
    ::log::info!(
        "Crawling complete - {} pages from {} fetches in {:.2} seconds ({} failed, {} bad status, {} not HTML)",
        sitemap.len(),
        stats.fetched,
        start_time.elapsed().as_secs_f64(),
        stats.fetch_failed,
        stats.bad_status,
        stats.unsupported_content
    );

    if args.json {
        match sitemap.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: failed to serialize sitemap: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{sitemap}");
        println!("Done.");
    }

    ExitCode::SUCCESS
}

async fn crawl(args: &Args) -> Result<Sitemap, SitemapError> {
    let mut builder = SitemapBuilder::new(args.domain.as_str());

    // Apply configuration from file if specified
    if let Some(path) = &args.config {
        ::log::info!("Loading configuration from file: {}", path.display());
        builder = builder.with_config_file(path)?;
    }

    // Apply command-line overrides
    if let Some(concurrency) = args.concurrency {
        builder = builder.with_max_concurrency(concurrency);
    }
    if let Some(timeout) = args.timeout {
        builder = builder.with_request_timeout(timeout);
    }

    builder.build().await
}
