//! 抓取模块：基于 reqwest 的页面抓取实现
pub mod http_fetcher;

pub use self::http_fetcher::HttpPageFetcher;
