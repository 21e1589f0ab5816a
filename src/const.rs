// 应用常量定义

//
// 配置参数限制常量
//

// 应用关闭等待时间限制
pub mod shutdown_timeout {
    // 默认值
    pub const DEFAULT: u64 = 30;
    // 最小值
    pub const MIN: u64 = 1;
    // 最大值
    pub const MAX: u64 = 120;
}

// 轮询周期配置
pub mod poll_limits {
    // 默认轮询间隔（秒）
    pub const DEFAULT_INTERVAL: u64 = 30;
    // 最小轮询间隔（秒）
    pub const MIN_INTERVAL: u64 = 1;
}

// HTTP客户端配置限制
pub mod http_client_limits {
    // 默认请求超时（秒）
    pub const DEFAULT_REQUEST_TIMEOUT: u64 = 10;
    // 默认连接超时（秒）
    pub const DEFAULT_CONNECT_TIMEOUT: u64 = 5;
    // 最小连接超时（秒）
    pub const MIN_CONNECT_TIMEOUT: u64 = 1;
    // 最大连接超时（秒）
    pub const MAX_CONNECT_TIMEOUT: u64 = 120;
    // 默认空闲超时（秒）
    pub const DEFAULT_IDLE_TIMEOUT: u64 = 90;
    // 最小空闲超时（秒）
    pub const MIN_IDLE_TIMEOUT: u64 = 5;
    // 最大空闲超时（秒）
    pub const MAX_IDLE_TIMEOUT: u64 = 1800;
    // 默认keepalive时间（秒）
    pub const DEFAULT_KEEPALIVE: u32 = 30;
    // 最小keepalive时间（秒）
    pub const MIN_KEEPALIVE: u32 = 5;
    // 最大keepalive时间（秒）
    pub const MAX_KEEPALIVE: u32 = 600;
}

// 下游 API 交互常量
pub mod downstream_api {
    // 路由列表子路径
    pub const ROUTERS_PATH: &str = "/api/http/routers";
    // 错误响应体最大保留长度（字节）
    pub const MAX_ERROR_BODY_LEN: usize = 256;
    // 截断标记
    pub const TRUNCATION_MARKER: &str = "...(truncated)";
}

// URL 协议与默认端口
pub mod scheme {
    pub const HTTP: &str = "http://";
    pub const HTTPS: &str = "https://";
    pub const HTTP_DEFAULT_PORT: &str = ":80";
    pub const HTTPS_DEFAULT_PORT: &str = ":443";
}

// 命名空间常量
pub mod naming {
    // 名称前缀分隔符
    pub const SEPARATOR: &str = "-";
    // 生成的服务名前缀
    pub const SERVICE_PREFIX: &str = "service";
    // provider 后缀分隔符，例如 app@kubernetes
    pub const PROVIDER_SEPARATOR: char = '@';
}

// TLS 选项键名（与 Traefik 动态配置保持一致）
pub mod tls_keys {
    pub const CERT_RESOLVER: &str = "certResolver";
    pub const DOMAINS: &str = "domains";
    // domains 列表中每个域名描述的字段，与 TlsDomain 的序列化字段一致
    pub const DOMAIN_MAIN: &str = "main";
    pub const DOMAIN_SANS: &str = "sans";
}

// 规则匹配器
pub mod rule_matchers {
    // Host(`example.com`)
    pub const HOST: &str = r"Host\(`([^`]+)`\)";
    // HostRegexp(`^[a-z]+\.example\.com$`)
    pub const HOST_REGEXP: &str = r"HostRegexp\(`([^`]+)`\)";

    // 可转换为通配符的正则前缀，按优先级排列
    pub const WILDCARD_PREFIXES: [&str; 5] = [
        r"^[a-zA-Z0-9-]+\.",
        r"^[a-zA-Z0-9_-]+\.",
        r"^[^.]+\.",
        r"^.+\.",
        r"^.*\.",
    ];
    // 通配符域名前缀
    pub const WILDCARD_DOMAIN_PREFIX: &str = "*.";
}

// 服务器默认值
pub mod server_defaults {
    // 默认HTTP监听地址
    pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
    // 默认配置文件路径
    pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
    // 配置文件路径环境变量
    pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
}

// HTTP 端点路径
pub mod endpoints {
    pub const TRAEFIK_CONFIG: &str = "/traefik-config";
    pub const HEALTH: &str = "/health";
    pub const METRICS: &str = "/metrics";
}

//
// 指标标签常量
//

// 下游模式标签
pub mod mode_labels {
    pub const NORMAL: &str = "normal";
    pub const PASSTHROUGH: &str = "passthrough";
}

// 拉取错误类型标签
pub mod fetch_error_labels {
    pub const INVALID_ADDRESS: &str = "invalid_address";
    pub const TRANSPORT: &str = "transport";
    pub const UNEXPECTED_STATUS: &str = "unexpected_status";
    pub const DECODE: &str = "decode";
}

// 文档条目类型标签
pub mod document_labels {
    pub const ROUTERS: &str = "routers";
    pub const SERVICES: &str = "services";
    pub const MIDDLEWARES: &str = "middlewares";
}

// 子系统名称
pub mod subsystem_names {
    // 聚合轮询子系统
    pub const POLLER: &str = "poller";
    // HTTP 服务子系统
    pub const ADMIN_SERVER: &str = "admin_server";
}
