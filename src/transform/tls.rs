use super::domain::extract_domains;
use crate::config::TlsPolicy;
use crate::document::{TlsDomain, TlsOptions};
use crate::r#const::tls_keys;
use serde_json::Value;

/// 构建输出路由的 TLS 选项
///
/// 处理顺序：
/// 1. 复制下游已有选项（`domains` 除外，稍后重建）
/// 2. 下游策略配置了 certResolver 时覆盖
/// 3. 策略要求 strip_resolver 时移除 certResolver，无论来源
/// 4. 根据规则中的域名重建 `domains`，第一个域名为 main，其余为 sans
///
/// 结果可能为空，调用方只应在非空时挂到路由上。
pub fn build_tls_options(
    policy: Option<&TlsPolicy>,
    rule: &str,
    existing: Option<&TlsOptions>,
    wildcard_fix: bool,
) -> TlsOptions {
    let mut options: TlsOptions = existing
        .map(|existing| {
            existing
                .iter()
                .filter(|(key, _)| key.as_str() != tls_keys::DOMAINS)
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    if let Some(resolver) = policy.and_then(TlsPolicy::cert_resolver) {
        options.insert(
            tls_keys::CERT_RESOLVER.to_string(),
            Value::String(resolver.to_string()),
        );
    }

    if policy.is_some_and(|p| p.strip_resolver) {
        options.remove(tls_keys::CERT_RESOLVER);
    }

    let mut domains = extract_domains(rule, wildcard_fix).into_iter();
    if let Some(main) = domains.next() {
        let descriptor = TlsDomain {
            main,
            sans: domains.collect(),
        };
        options.insert(tls_keys::DOMAINS.to_string(), domains_value(descriptor));
    }

    options
}

// TlsDomain 只包含字符串字段，手动构造避免序列化失败分支
fn domains_value(domain: TlsDomain) -> Value {
    let mut entry = serde_json::Map::new();
    entry.insert(tls_keys::DOMAIN_MAIN.to_string(), Value::String(domain.main));
    if !domain.sans.is_empty() {
        entry.insert(
            tls_keys::DOMAIN_SANS.to_string(),
            Value::Array(domain.sans.into_iter().map(Value::String).collect()),
        );
    }
    Value::Array(vec![Value::Object(entry)])
}
