use crate::config::HttpClientConfig;
use crate::error::AppError;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;

/// 下游 API 共用的 HTTP 客户端
///
/// 所有下游共享一个连接池；`request_timeout` 作用于每一次请求，
/// 卡住的下游只会拖慢所在周期，不会影响读取方。
pub struct HttpClient;

impl HttpClient {
    pub fn create(config: &HttpClientConfig, request_timeout: Duration) -> Result<Client, AppError> {
        debug!(
            "Building downstream HTTP client: connect_timeout={}s, request_timeout={:?}, idle_timeout={:?}, keepalive={:?}",
            config.connect_timeout, request_timeout, config.idle_timeout, config.keepalive
        );

        let builder = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .timeout(request_timeout)
            .tcp_keepalive(config.keepalive.map(|secs| Duration::from_secs(secs.into())))
            .pool_idle_timeout(config.idle_timeout.map(Duration::from_secs));

        let builder = match config.agent.as_deref() {
            Some(agent) => builder.user_agent(agent),
            None => builder,
        };

        builder
            .build()
            .map_err(|e| AppError::HttpClient(format!("Failed to create HTTP client: {}", e)))
    }
}
