use crate::error::ConfigError;
use crate::r#const::{http_client_limits, poll_limits, server_defaults};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, net::SocketAddr, path::Path, str::FromStr, time::Duration};
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod core;
pub mod source;

pub use self::core::*;
pub use self::source::*;

// 配置结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// 自定义验证函数 - 验证Socket地址格式
pub fn validate_socket_addr(addr: &str) -> Result<(), ValidationError> {
    match SocketAddr::from_str(addr) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("invalid_socket_addr")),
    }
}

// 自定义验证函数 - 验证轮询间隔
pub fn validate_poll_interval(interval: &Duration) -> Result<(), ValidationError> {
    if *interval < Duration::from_secs(poll_limits::MIN_INTERVAL) {
        return Err(ValidationError::new("poll_interval_too_short"));
    }
    Ok(())
}

// 自定义验证函数 - 验证下游名称非空且唯一
pub fn validate_source_names(config: &Config) -> Result<(), ValidationError> {
    let mut names = HashSet::new();
    for source in &config.downstream {
        if source.name.is_empty() {
            return Err(ValidationError::new("empty_source_name"));
        }
        if !names.insert(source.name.as_str()) {
            return Err(ValidationError::new("duplicate_source_name"));
        }
    }
    Ok(())
}

// 自定义验证函数 - 验证下游 API 地址非空
pub fn validate_source_urls(config: &Config) -> Result<(), ValidationError> {
    if config.downstream.iter().any(|s| s.api_url.trim().is_empty()) {
        return Err(ValidationError::new("missing_api_url"));
    }
    Ok(())
}

fn default_poll_interval() -> Duration {
    Duration::from_secs(poll_limits::DEFAULT_INTERVAL)
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(http_client_limits::DEFAULT_REQUEST_TIMEOUT)
}

fn default_listen() -> String {
    server_defaults::DEFAULT_LISTEN.to_string()
}

// 应用配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Validate)]
#[validate(schema(
    function = "validate_source_names",
    message = "Downstream names must be non-empty and unique"
))]
#[validate(schema(
    function = "validate_source_urls",
    message = "Every downstream requires an api_url"
))]
pub struct Config {
    // 下游 Traefik 实例列表
    #[serde(default)]
    pub downstream: Vec<SourceConfig>,
    // 轮询间隔
    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    #[validate(custom(
        function = "validate_poll_interval",
        message = "Poll interval must be at least 1 second"
    ))]
    pub poll_interval: Duration,
    // 单次请求超时
    #[serde(default = "default_http_timeout", with = "humantime_serde")]
    pub http_timeout: Duration,
    // 日志级别（可选）
    #[serde(default)]
    pub log_level: Option<LogLevel>,
    // HTTP 服务监听地址
    #[serde(default = "default_listen")]
    #[validate(custom(
        function = "validate_socket_addr",
        message = "Listen address must be a valid socket address"
    ))]
    pub listen: String,
    // HTTP客户端配置（可选）
    #[serde(default)]
    #[validate(nested)]
    pub http_client: Option<HttpClientConfig>,
}

impl Config {
    // 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        debug!("Loading configuration file: {:?}", path.as_ref());
        let content = fs::read_to_string(path).map_err(ConfigError::LoadError)?;
        Self::from_yaml(&content)
    }

    // 从 YAML 文本加载配置
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    // 验证配置有效性
    pub fn validate(&self) -> ConfigResult<()> {
        // 使用 validator 库进行验证
        if let Err(errors) = Validate::validate(self) {
            return Err(ConfigError::ValidationError(format_validation_errors(
                &errors,
            )));
        }
        Ok(())
    }

    // 解析监听地址
    pub fn listen_addr(&self) -> ConfigResult<SocketAddr> {
        self.listen
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidListenAddress(e.to_string()))
    }
}

// 将 ValidationErrors 转换为友好的错误信息
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    // 格式化字段错误
    for (field, error_kind) in errors.errors() {
        match error_kind {
            validator::ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    messages.push(format!("Field '{}': {}", field, message));
                }
            }
            validator::ValidationErrorsKind::Struct(struct_errors) => {
                messages.push(format!(
                    "Struct '{}' validation failed: {}",
                    field,
                    format_validation_errors(struct_errors)
                ));
            }
            validator::ValidationErrorsKind::List(list_errors) => {
                for (index, err) in list_errors {
                    messages.push(format!(
                        "List '{}' at index {}: {}",
                        field,
                        index,
                        format_validation_errors(err)
                    ));
                }
            }
        }
    }

    if messages.is_empty() {
        "Unknown validation error".to_string()
    } else {
        messages.join("\n")
    }
}

// 默认配置实现
impl Default for Config {
    fn default() -> Self {
        Config {
            downstream: Vec::new(),
            poll_interval: default_poll_interval(),
            http_timeout: default_http_timeout(),
            log_level: None,
            listen: default_listen(),
            http_client: None,
        }
    }
}
