pub mod admin;
pub mod aggregator;
pub mod args;
pub mod config;
pub mod r#const;
pub mod document;
pub mod error;
pub mod metrics;
pub mod poller;
pub mod source;
pub mod store;
pub mod transform;

// 重导出常用组件
pub use admin::AdminServer;
pub use aggregator::Aggregator;
pub use args::Args;
pub use config::{Config, SourceConfig, TlsPolicy};
pub use document::{AggregatedDocument, BackendGroup, FetchedRoute, OutputRoute, TlsDomain};
pub use error::{AppError, ConfigError, FetchError};
pub use metrics::AggregatorMetrics;
pub use poller::Poller;
pub use r#const::subsystem_names;
pub use source::{HttpClient, SourceFetcher};
pub use store::ConfigStore;
