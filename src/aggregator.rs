use crate::config::SourceConfig;
use crate::document::{AggregatedDocument, BackendGroup, FetchedRoute, OutputRoute};
use crate::error::FetchError;
use crate::metrics::METRICS;
use crate::r#const::{document_labels, mode_labels};
use crate::source::SourceFetcher;
use crate::store::ConfigStore;
use crate::transform::namespace::entry_points_for;
use crate::transform::{
    build_tls_options, merge_passthrough, resolve_backend_url, should_ignore, RouteNames,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// 聚合引擎
///
/// 一个周期内按声明顺序处理所有下游：拉取、过滤、转换、加命名空间，
/// 全部写入一份新文档，完成后整体发布到 [`ConfigStore`]。
/// 单个下游失败只会让它在本周期没有贡献，不会中断其他下游。
pub struct Aggregator {
    // 下游配置，进程生命周期内只读
    sources: Vec<SourceConfig>,
    // 下游拉取器
    fetcher: SourceFetcher,
    // 发布目标
    store: Arc<ConfigStore>,
}

impl Aggregator {
    // 创建聚合引擎
    pub fn new(sources: Vec<SourceConfig>, fetcher: SourceFetcher, store: Arc<ConfigStore>) -> Self {
        Self {
            sources,
            fetcher,
            store,
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    /// 执行一次完整周期并发布结果
    pub async fn run_cycle(&self) {
        let start = Instant::now();

        let document = self.aggregate().await;
        let (routers, services, middlewares) = (
            document.routers().len(),
            document.services().len(),
            document.middlewares().len(),
        );

        self.store.publish(document);

        // 更新指标
        METRICS.cycles_total().inc();
        METRICS
            .cycle_duration_seconds()
            .observe(start.elapsed().as_secs_f64());
        METRICS
            .document_entries()
            .with_label_values(&[document_labels::ROUTERS])
            .set(routers as i64);
        METRICS
            .document_entries()
            .with_label_values(&[document_labels::SERVICES])
            .set(services as i64);
        METRICS
            .document_entries()
            .with_label_values(&[document_labels::MIDDLEWARES])
            .set(middlewares as i64);

        info!(
            "Config aggregation complete: {} routers, {} services, {} middlewares ({:?})",
            routers,
            services,
            middlewares,
            start.elapsed()
        );
    }

    /// 构建一份新的聚合文档，不发布
    pub async fn aggregate(&self) -> AggregatedDocument {
        let mut document = AggregatedDocument::default();

        for source in &self.sources {
            if source.passthrough {
                self.merge_passthrough_source(&mut document, source).await;
            } else {
                self.merge_routes_source(&mut document, source).await;
            }
        }

        document
    }

    // 直通模式：拉取完整文档后加前缀合并
    async fn merge_passthrough_source(&self, document: &mut AggregatedDocument, source: &SourceConfig) {
        let fetched = match self.fetcher.fetch_document(source).await {
            Ok(fetched) => fetched,
            Err(e) => {
                self.record_failure(source, mode_labels::PASSTHROUGH, &e);
                return;
            }
        };

        let routers = fetched.routers().len();
        info!(
            "Passthrough {}: {} routers, {} services, {} middlewares",
            source.name,
            routers,
            fetched.services().len(),
            fetched.middlewares().len()
        );

        merge_passthrough(document, &source.name, fetched);

        METRICS
            .source_routers()
            .with_label_values(&[source.name.as_str(), mode_labels::PASSTHROUGH])
            .set(routers as i64);
    }

    // 普通模式：逐条转换下游路由
    async fn merge_routes_source(&self, document: &mut AggregatedDocument, source: &SourceConfig) {
        let routes = match self.fetcher.fetch_routes(source).await {
            Ok(routes) => routes,
            Err(e) => {
                self.record_failure(source, mode_labels::NORMAL, &e);
                return;
            }
        };

        info!("Processing {} with {} routers", source.name, routes.len());

        let mut added = 0usize;
        for route in &routes {
            // 跳过绑定到忽略入口点的路由
            if should_ignore(&route.entry_points, &source.ignore_entry_points) {
                warn!("Skipping router {} (ignored entrypoint)", route.name);
                continue;
            }

            let (names, output, backend) = build_route(source, route);
            debug!(
                "Added HTTP route {}: {} -> {:?} (TLS: {})",
                names.router,
                output.rule,
                backend.load_balancer.servers,
                route.has_tls()
            );

            document.http.routers.insert(names.router, output);
            document.http.services.insert(names.service, backend);
            added += 1;
        }

        METRICS
            .source_routers()
            .with_label_values(&[source.name.as_str(), mode_labels::NORMAL])
            .set(added as i64);
    }

    // 记录下游失败，本周期该下游不产生任何条目
    fn record_failure(&self, source: &SourceConfig, mode: &str, err: &FetchError) {
        error!("Error fetching from {} ({} mode): {}", source.name, mode, err);

        METRICS
            .source_errors_total()
            .with_label_values(&[source.name.as_str(), err.error_type()])
            .inc();
        METRICS
            .source_routers()
            .with_label_values(&[source.name.as_str(), mode])
            .set(0);
    }
}

/// 将一条下游路由转换为输出路由及其后端服务
///
/// 是否使用 https 后端只取决于下游路由自身是否携带 TLS 选项，
/// 下游的 TLS 策略不会改变后端协议。
pub fn build_route(
    source: &SourceConfig,
    route: &FetchedRoute,
) -> (RouteNames, OutputRoute, BackendGroup) {
    let use_tls = route.has_tls();
    let backend_url = resolve_backend_url(source, use_tls);
    let names = RouteNames::new(&source.name, &route.name);

    // 下游配置了 TLS 策略或路由自带 TLS 时才构建 TLS 选项
    let tls = if source.tls.is_some() || use_tls {
        Some(build_tls_options(
            source.tls.as_ref(),
            &route.rule,
            route.tls.as_ref(),
            source.wildcard_fix,
        ))
        .filter(|tls| !tls.is_empty())
    } else {
        None
    };

    let output = OutputRoute {
        rule: route.rule.clone(),
        service: names.service.clone(),
        entry_points: entry_points_for(source, route),
        middlewares: source.middlewares.clone(),
        tls,
    };
    let backend = BackendGroup::single(backend_url, source.transport());

    (names, output, backend)
}
