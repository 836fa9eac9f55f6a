pub mod fetcher;
pub mod scheduler;

pub use fetcher::{FetchResponse, Fetcher, HttpFetcher, MemoryFetcher};
pub use scheduler::{CrawlStats, DropReason, Frontier, Scheduler};
