//! Retrieval adapters for the news search API, the RSS feed and market data.

mod market_data;
mod news_search;
mod rss;

pub use market_data::MarketDataClient;
pub use news_search::SerpApiClient;
pub use rss::{filter_by_keyword, parse_feed_items, RssFeedClient};

/// Every adapter returns at most this many items.
pub const MAX_RESULTS: usize = 5;
