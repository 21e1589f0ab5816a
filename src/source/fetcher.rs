use crate::config::SourceConfig;
use crate::document::{AggregatedDocument, FetchedRoute};
use crate::error::FetchError;
use crate::r#const::downstream_api;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// 下游 Traefik API 拉取器
///
/// 支持两种模式：普通模式拉取 `/api/http/routers` 路由列表，
/// 直通模式直接从 api_url 拉取完整的动态配置文档。
#[derive(Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
}

impl SourceFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// 拉取下游的路由列表
    pub async fn fetch_routes(&self, source: &SourceConfig) -> Result<Vec<FetchedRoute>, FetchError> {
        let url = routers_url(&source.api_url)?;
        self.get_json(url, source.bearer_token()).await
    }

    /// 直通模式：拉取完整配置文档
    pub async fn fetch_document(
        &self,
        source: &SourceConfig,
    ) -> Result<AggregatedDocument, FetchError> {
        let url = Url::parse(&source.api_url)
            .map_err(|e| FetchError::InvalidAddress(format!("{}: {}", source.api_url, e)))?;
        self.get_json(url, source.bearer_token()).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<T, FetchError> {
        debug!("Fetching downstream API: {}", url);

        // 构建请求
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        // 发送请求并获取响应
        let response = request.send().await?;

        // 检查响应状态
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::unexpected_status(status.as_u16(), &body));
        }

        // 先读完响应体，解码失败与传输失败分开上报
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

// 在 api_url 的路径后拼接路由列表子路径
fn routers_url(api_url: &str) -> Result<Url, FetchError> {
    let mut url =
        Url::parse(api_url).map_err(|e| FetchError::InvalidAddress(format!("{}: {}", api_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(FetchError::InvalidAddress(api_url.to_string()));
    }

    let path = format!(
        "{}{}",
        url.path().trim_end_matches('/'),
        downstream_api::ROUTERS_PATH
    );
    url.set_path(&path);
    Ok(url)
}
