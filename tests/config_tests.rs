use assert_matches::assert_matches;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use traefik_aggregator::config::{Config, LogLevel};
use traefik_aggregator::ConfigError;

// 辅助函数：创建临时配置文件
fn create_temp_config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_basic_config_loading() {
    let config_content = r#"
downstream:
  - name: "team-a"
    api_url: "http://traefik-a:8080"
"#;

    let file = create_temp_config_file(config_content);
    let result = Config::from_file(file.path());

    assert!(
        result.is_ok(),
        "Failed to load valid config: {:?}",
        result.err()
    );
    let config = result.unwrap();

    assert_eq!(config.downstream.len(), 1);
    let source = &config.downstream[0];
    assert_eq!(source.name, "team-a");
    assert_eq!(source.api_url, "http://traefik-a:8080");

    // 验证默认值
    assert_eq!(config.poll_interval, Duration::from_secs(30));
    assert_eq!(config.http_timeout, Duration::from_secs(10));
    assert_eq!(config.listen, "0.0.0.0:8080");
    assert!(config.log_level.is_none());
    assert!(config.http_client.is_none());
    assert!(!source.passthrough);
    assert!(!source.wildcard_fix);
    assert!(source.tls.is_none());
    assert!(source.entry_points.is_empty());
    assert!(source.middlewares.is_empty());
    assert!(source.ignore_entry_points.is_empty());
}

#[test]
fn test_full_config_loading() {
    let config_content = r#"
poll_interval: 1m30s
http_timeout: 5s
log_level: debug
listen: "127.0.0.1:9000"
http_client:
  connect_timeout: 3
  idle_timeout: 60
  keepalive: 15
  agent: "aggregator/1.0"
downstream:
  - name: "team-a"
    api_url: "https://traefik-a.internal:8443/"
    api_key: "secret"
    backend_override: "10.0.0.10:443"
    entrypoints: ["websecure"]
    middlewares: ["auth@file"]
    ignore_entrypoints: ["traefik"]
    wildcard_fix: true
    server_transport: "insecure@file"
    tls:
      cert_resolver: "letsencrypt"
  - name: "team-b"
    api_url: "http://traefik-b:8080/dynamic"
    passthrough: true
    tls:
      strip_resolver: true
"#;

    let file = create_temp_config_file(config_content);
    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.poll_interval, Duration::from_secs(90));
    assert_eq!(config.http_timeout, Duration::from_secs(5));
    assert_eq!(config.log_level, Some(LogLevel::Debug));
    assert_eq!(config.listen_addr().unwrap().port(), 9000);

    let http_client = config.http_client.as_ref().unwrap();
    assert_eq!(http_client.connect_timeout, 3);
    assert_eq!(http_client.idle_timeout, Some(60));
    assert_eq!(http_client.keepalive, Some(15));
    assert_eq!(http_client.agent.as_deref(), Some("aggregator/1.0"));

    let team_a = &config.downstream[0];
    assert_eq!(team_a.bearer_token(), Some("secret"));
    assert_eq!(team_a.override_address(), Some("10.0.0.10:443"));
    assert_eq!(team_a.entry_points, vec!["websecure"]);
    assert_eq!(team_a.middlewares, vec!["auth@file"]);
    assert_eq!(team_a.ignore_entry_points, vec!["traefik"]);
    assert!(team_a.wildcard_fix);
    assert_eq!(team_a.transport(), Some("insecure@file"));
    assert_eq!(
        team_a.tls.as_ref().unwrap().cert_resolver(),
        Some("letsencrypt")
    );

    let team_b = &config.downstream[1];
    assert!(team_b.passthrough);
    assert!(team_b.tls.as_ref().unwrap().strip_resolver);
    assert!(team_b.bearer_token().is_none());
}

#[test]
fn test_empty_optional_strings_count_as_absent() {
    let config_content = r#"
downstream:
  - name: "ds"
    api_url: "http://traefik:8080"
    api_key: ""
    backend_override: ""
    server_transport: ""
    tls:
      cert_resolver: ""
"#;

    let config = Config::from_yaml(config_content).unwrap();
    let source = &config.downstream[0];

    assert!(source.bearer_token().is_none());
    assert!(source.override_address().is_none());
    assert!(source.transport().is_none());
    assert!(source.tls.as_ref().unwrap().cert_resolver().is_none());
}

#[test]
fn test_empty_downstream_list_is_valid() {
    let config = Config::from_yaml("poll_interval: 10s\n").unwrap();
    assert!(config.downstream.is_empty());
    assert_eq!(config.poll_interval, Duration::from_secs(10));
}

#[test]
fn test_duplicate_source_names() {
    let config_content = r#"
downstream:
  - name: "dup"
    api_url: "http://a:8080"
  - name: "dup"
    api_url: "http://b:8080"
"#;

    let result = Config::from_yaml(config_content);
    assert_matches!(result, Err(ConfigError::ValidationError(ref msg)) if msg.contains("unique"));
}

#[test]
fn test_source_name_characters_are_not_restricted() {
    let config_content = r#"
downstream:
  - name: "team a/b"
    api_url: "http://a:8080"
"#;

    let config = Config::from_yaml(config_content).unwrap();
    assert_eq!(config.downstream[0].name, "team a/b");
}

#[test]
fn test_empty_source_name() {
    let config_content = r#"
downstream:
  - name: ""
    api_url: "http://a:8080"
"#;

    assert_matches!(
        Config::from_yaml(config_content),
        Err(ConfigError::ValidationError(ref msg)) if msg.contains("non-empty")
    );
}

#[test]
fn test_missing_api_url() {
    // 字段缺失属于解析错误
    let missing = r#"
downstream:
  - name: "ds"
"#;
    assert_matches!(Config::from_yaml(missing), Err(ConfigError::ParseError(_)));

    // 字段为空属于验证错误
    let empty = r#"
downstream:
  - name: "ds"
    api_url: "  "
"#;
    assert_matches!(
        Config::from_yaml(empty),
        Err(ConfigError::ValidationError(ref msg)) if msg.contains("api_url")
    );
}

#[test]
fn test_poll_interval_limits() {
    assert_matches!(
        Config::from_yaml("poll_interval: 500ms\n"),
        Err(ConfigError::ValidationError(ref msg)) if msg.contains("poll_interval")
    );

    // 无法解析的时长不会静默回退到默认值
    assert_matches!(
        Config::from_yaml("poll_interval: soon\n"),
        Err(ConfigError::ParseError(_))
    );
}

#[test]
fn test_invalid_listen_address() {
    assert_matches!(
        Config::from_yaml("listen: \"not-an-address\"\n"),
        Err(ConfigError::ValidationError(ref msg)) if msg.contains("listen")
    );
}

#[test]
fn test_http_client_range_validation() {
    let config_content = r#"
http_client:
  connect_timeout: 0
"#;
    assert_matches!(
        Config::from_yaml(config_content),
        Err(ConfigError::ValidationError(_))
    );
}

#[test]
fn test_invalid_log_level() {
    assert_matches!(
        Config::from_yaml("log_level: verbose\n"),
        Err(ConfigError::ParseError(_))
    );
}

#[test]
fn test_missing_file() {
    let result = Config::from_file("/nonexistent/path/config.yml");
    assert_matches!(result, Err(ConfigError::LoadError(_)));
}

#[test]
fn test_invalid_yaml() {
    let file = create_temp_config_file("downstream: [unclosed\n");
    assert_matches!(
        Config::from_file(file.path()),
        Err(ConfigError::ParseError(_))
    );
}

#[test]
fn test_default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(
        config.listen_addr().unwrap(),
        "0.0.0.0:8080".parse().unwrap()
    );
}
