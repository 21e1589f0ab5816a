// Traefik HTTP provider 动态配置文档及下游 API 记录

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// 字段缺失或为 null 时都取默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// TLS 选项表：选项名 -> 值
pub type TlsOptions = BTreeMap<String, Value>;

/// 下游 `/api/http/routers` 返回的单条路由记录
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct FetchedRoute {
    // 路由名称，可能带有 provider 后缀（如 app@kubernetes）
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "entryPoints")]
    pub entry_points: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsOptions>,
}

impl FetchedRoute {
    // 下游路由是否携带非空 TLS 选项
    pub fn has_tls(&self) -> bool {
        self.tls.as_ref().is_some_and(|tls| !tls.is_empty())
    }
}

/// 输出文档中的路由
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct OutputRoute {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "entryPoints")]
    pub entry_points: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub middlewares: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsOptions>,
}

/// 后端服务器
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct Server {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// 负载均衡配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct LoadBalancer {
    #[serde(
        default,
        rename = "serversTransport",
        skip_serializing_if = "Option::is_none"
    )]
    pub servers_transport: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub servers: Vec<Server>,
}

/// 输出文档中的后端服务组
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct BackendGroup {
    #[serde(default, deserialize_with = "null_as_default", rename = "loadBalancer")]
    pub load_balancer: LoadBalancer,
}

impl BackendGroup {
    // 单一后端地址的服务组
    pub fn single(url: String, transport: Option<&str>) -> Self {
        Self {
            load_balancer: LoadBalancer {
                servers_transport: transport.map(str::to_string),
                servers: vec![Server { url }],
            },
        }
    }
}

/// TLS 证书域名描述
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct TlsDomain {
    pub main: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sans: Vec<String>,
}

/// routers / services / middlewares 三张表
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct HttpBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub routers: BTreeMap<String, OutputRoute>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: BTreeMap<String, BackendGroup>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub middlewares: BTreeMap<String, Value>,
}

/// 聚合后的完整配置文档，序列化为 `{"http": {...}}`
///
/// 发布之后不再修改；每个周期都会构建一份全新的文档。
/// 直通模式的下游也返回同样结构的文档。
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AggregatedDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub http: HttpBlock,
}

impl AggregatedDocument {
    pub fn routers(&self) -> &BTreeMap<String, OutputRoute> {
        &self.http.routers
    }

    pub fn services(&self) -> &BTreeMap<String, BackendGroup> {
        &self.http.services
    }

    pub fn middlewares(&self) -> &BTreeMap<String, Value> {
        &self.http.middlewares
    }

    pub fn is_empty(&self) -> bool {
        self.http.routers.is_empty()
            && self.http.services.is_empty()
            && self.http.middlewares.is_empty()
    }
}
