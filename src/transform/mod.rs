// 下游路由到输出文档的转换步骤

pub mod backend;
pub mod domain;
pub mod filter;
pub mod namespace;
pub mod tls;

pub use self::backend::resolve_backend_url;
pub use self::domain::{convert_regexp_to_wildcard, extract_domains};
pub use self::filter::should_ignore;
pub use self::namespace::{merge_passthrough, RouteNames};
pub use self::tls::build_tls_options;
