use crate::config::SourceConfig;
use crate::document::{AggregatedDocument, FetchedRoute};
use crate::r#const::naming;

/// 普通模式下一条路由的命名结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteNames {
    // 输出路由名：<source>-<base>
    pub router: String,
    // 新生成的服务名：service-<source>-<base>
    pub service: String,
}

impl RouteNames {
    pub fn new(source_name: &str, fetched_name: &str) -> Self {
        let base = base_name(fetched_name);
        Self {
            router: prefixed(source_name, base),
            service: format!(
                "{}{}{}",
                naming::SERVICE_PREFIX,
                naming::SEPARATOR,
                prefixed(source_name, base)
            ),
        }
    }
}

// 去掉 provider 后缀：app@kubernetes -> app
pub fn base_name(name: &str) -> &str {
    name.split(naming::PROVIDER_SEPARATOR)
        .next()
        .unwrap_or(name)
}

// <source>-<name>
pub fn prefixed(source_name: &str, name: &str) -> String {
    format!("{}{}{}", source_name, naming::SEPARATOR, name)
}

// 下游配置了入口点覆盖时使用覆盖值，否则沿用路由自身的入口点
pub fn entry_points_for(source: &SourceConfig, route: &FetchedRoute) -> Vec<String> {
    if source.entry_points.is_empty() {
        route.entry_points.clone()
    } else {
        source.entry_points.clone()
    }
}

/// 将直通模式拉取到的文档加上前缀后合并到目标文档
///
/// 路由、服务、中间件的键名统一加 `<source>-` 前缀，路由内部对服务和中间件
/// 的引用同步改写；服务内容（后端地址、transport）原样保留。
/// 键名冲突时后写入者覆盖先写入者。
pub fn merge_passthrough(
    target: &mut AggregatedDocument,
    source_name: &str,
    fetched: AggregatedDocument,
) {
    let http = fetched.http;

    for (name, middleware) in http.middlewares {
        target
            .http
            .middlewares
            .insert(prefixed(source_name, &name), middleware);
    }

    for (name, mut router) in http.routers {
        router.service = prefixed(source_name, &router.service);
        router.middlewares = router
            .middlewares
            .iter()
            .map(|mw| prefixed(source_name, mw))
            .collect();
        target
            .http
            .routers
            .insert(prefixed(source_name, &name), router);
    }

    for (name, service) in http.services {
        target
            .http
            .services
            .insert(prefixed(source_name, &name), service);
    }
}
