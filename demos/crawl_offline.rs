//! Maps a small in-memory site, no network required.

use site_mapper::{FetchResponse, MemoryFetcher, Sitemap};
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let fetcher = Arc::new(
        MemoryFetcher::new()
            .with_page(
                "http://example.com/",
                r#"<html><head><title>Home</title>
                   <link rel="stylesheet" href="/css/site.css"></head>
                   <body><a href="/about">About</a> <a href="/blog">Blog</a>
                   <a href="https://github.com/example">GitHub</a></body></html>"#,
            )
            .with_page(
                "http://example.com/about",
                r#"<title>About</title><img src="/img/team.png">
                   <form action="/contact"><input name="email"></form>
                   <a href="/">Home</a>"#,
            )
            .with_page(
                "http://example.com/blog",
                r#"<title>Blog</title><link rel="next" href="/blog/page/2">
                   <a href="/about">About</a> <a href="/old-post">Old post</a>"#,
            )
            .with_response(
                "http://example.com/old-post",
                FetchResponse::new(404, "text/html", "Not found"),
            ),
    );

    let sitemap = Sitemap::crawl("http://example.com", fetcher.clone(), 1).await?;
    print!("{sitemap}");

    println!("\nFetched:");
    for url in fetcher.requests() {
        println!("  {url}");
    }

    Ok(())
}
