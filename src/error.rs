use crate::r#const::{downstream_api, fetch_error_labels};
use std::io;
use thiserror::Error;

// 进程级错误：启动失败或子系统退出
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Shutdown timeout {0}s is outside the allowed range of 1-120 seconds")]
    InvalidShutdownTimeout(u64),
}

// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadError(#[from] io::Error),

    #[error("YAML parsing error: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid listen address: {0}")]
    InvalidListenAddress(String),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// 单个下游在单次聚合周期内的拉取错误
///
/// 所有变体都只影响当前下游：记录日志后跳过，不会中断整个周期。
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid API URL: {0}")]
    InvalidAddress(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    // 构造状态码错误，响应体超过上限时截断
    pub fn unexpected_status(status: u16, body: &str) -> Self {
        Self::UnexpectedStatus {
            status,
            body: truncate_body(body),
        }
    }

    // 指标标签
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidAddress(_) => fetch_error_labels::INVALID_ADDRESS,
            Self::Transport(_) => fetch_error_labels::TRANSPORT,
            Self::UnexpectedStatus { .. } => fetch_error_labels::UNEXPECTED_STATUS,
            Self::Decode(_) => fetch_error_labels::DECODE,
        }
    }
}

// 截断过长的错误响应体，保证切分点落在字符边界上
fn truncate_body(body: &str) -> String {
    if body.len() <= downstream_api::MAX_ERROR_BODY_LEN {
        return body.to_string();
    }

    let mut end = downstream_api::MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}{}", &body[..end], downstream_api::TRUNCATION_MARKER)
}
