use serde::{Deserialize, Serialize};

/// 下游 TLS 策略
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct TlsPolicy {
    // 证书解析器名称，会覆盖下游路由自带的 certResolver
    #[serde(default)]
    pub cert_resolver: Option<String>,
    // 从输出中移除 certResolver，优先级最高
    #[serde(default)]
    pub strip_resolver: bool,
}

impl TlsPolicy {
    pub fn cert_resolver(&self) -> Option<&str> {
        non_empty(&self.cert_resolver)
    }
}

/// 单个下游 Traefik 实例的配置
///
/// 进程启动时加载一次，聚合周期内只读。`name` 作为命名空间前缀，
/// 在所有下游之间必须唯一。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct SourceConfig {
    // 逻辑名称
    pub name: String,
    // 下游 API 地址
    pub api_url: String,
    // Bearer 令牌（可选）
    #[serde(default)]
    pub api_key: Option<String>,
    // 后端地址覆盖（可选）
    #[serde(default)]
    pub backend_override: Option<String>,
    // TLS 策略（可选）
    #[serde(default)]
    pub tls: Option<TlsPolicy>,
    // 入口点覆盖列表
    #[serde(default, rename = "entrypoints")]
    pub entry_points: Vec<String>,
    // 附加到每条路由的中间件引用
    #[serde(default)]
    pub middlewares: Vec<String>,
    // 需要忽略的入口点
    #[serde(default, rename = "ignore_entrypoints")]
    pub ignore_entry_points: Vec<String>,
    // 将 HostRegexp 转换为通配符域名
    #[serde(default)]
    pub wildcard_fix: bool,
    // 直通模式：拉取完整的动态配置文档
    #[serde(default)]
    pub passthrough: bool,
    // 后端 serversTransport 引用（可选）
    #[serde(default)]
    pub server_transport: Option<String>,
}

impl SourceConfig {
    pub fn bearer_token(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn override_address(&self) -> Option<&str> {
        non_empty(&self.backend_override)
    }

    pub fn transport(&self) -> Option<&str> {
        non_empty(&self.server_transport)
    }
}

// 空字符串视为未配置
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
