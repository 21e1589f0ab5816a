use crate::r#const::rule_matchers;
use once_cell::sync::Lazy;
use regex::Regex;

// 规则文本只做固定模式扫描，不解析表达式
static HOST_MATCHER: Lazy<Regex> =
    Lazy::new(|| Regex::new(rule_matchers::HOST).expect("Host matcher pattern is valid"));
static HOST_REGEXP_MATCHER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(rule_matchers::HOST_REGEXP).expect("HostRegexp matcher pattern is valid")
});

/// 将 HostRegexp 表达式转换为通配符域名
///
/// 只识别少数常见的前缀写法（字符串前缀比较，不执行正则），例如
/// `^[a-zA-Z0-9-]+\.pages\.example\.com$` -> `*.pages.example.com`。
/// 无法转换时返回 `None`。
pub fn convert_regexp_to_wildcard(pattern: &str) -> Option<String> {
    rule_matchers::WILDCARD_PREFIXES
        .iter()
        .find_map(|prefix| pattern.strip_prefix(prefix))
        .map(|remainder| {
            let remainder = remainder.strip_suffix('$').unwrap_or(remainder);
            format!(
                "{}{}",
                rule_matchers::WILDCARD_DOMAIN_PREFIX,
                remainder.replace(r"\.", ".")
            )
        })
}

/// 从路由规则中提取域名
///
/// `Host(...)` 的结果总是排在 `HostRegexp(...)` 之前，与它们在规则中的
/// 相对位置无关。`wildcard_fix` 关闭时忽略所有 HostRegexp。
pub fn extract_domains(rule: &str, wildcard_fix: bool) -> Vec<String> {
    let mut domains: Vec<String> = HOST_MATCHER
        .captures_iter(rule)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    if wildcard_fix {
        domains.extend(
            HOST_REGEXP_MATCHER
                .captures_iter(rule)
                .filter_map(|caps| caps.get(1))
                .filter_map(|m| convert_regexp_to_wildcard(m.as_str())),
        );
    }

    domains
}
