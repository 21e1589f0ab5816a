use crate::config::SourceConfig;
use crate::r#const::scheme;

/// 计算下游服务的后端地址
///
/// - 配置了 backend_override：已带协议时原样返回（忽略 `use_tls`），否则补上协议
/// - 否则从 api_url 提取 host[:port]，去掉路径；没有端口时补默认端口，已有端口保持不变
pub fn resolve_backend_url(source: &SourceConfig, use_tls: bool) -> String {
    let (protocol, default_port) = if use_tls {
        (scheme::HTTPS, scheme::HTTPS_DEFAULT_PORT)
    } else {
        (scheme::HTTP, scheme::HTTP_DEFAULT_PORT)
    };

    if let Some(backend) = source.override_address() {
        if has_scheme(backend) {
            return backend.to_string();
        }
        return format!("{}{}", protocol, backend);
    }

    let address = strip_scheme(&source.api_url);
    let host = address.split('/').next().unwrap_or_default();

    if host.contains(':') {
        format!("{}{}", protocol, host)
    } else {
        format!("{}{}{}", protocol, host, default_port)
    }
}

fn has_scheme(address: &str) -> bool {
    address.starts_with(scheme::HTTP) || address.starts_with(scheme::HTTPS)
}

fn strip_scheme(address: &str) -> &str {
    let address = address.strip_prefix(scheme::HTTP).unwrap_or(address);
    address.strip_prefix(scheme::HTTPS).unwrap_or(address)
}
