// 声明子模块
mod fetcher;
mod http_client;

// 重导出公共API
pub use self::fetcher::SourceFetcher;
pub use self::http_client::HttpClient;
