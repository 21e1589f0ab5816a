use axum::http::{header, StatusCode};
use axum::{routing::get, Router};
use once_cell::sync::Lazy;
use prometheus::{opts, Histogram, IntCounter, IntCounterVec, IntGaugeVec, Registry};

use crate::r#const::endpoints;

// 全局静态指标实例
pub static METRICS: Lazy<AggregatorMetrics> = Lazy::new(AggregatorMetrics::new);

// 聚合器指标
pub struct AggregatorMetrics {
    registry: Registry,

    // 1. 聚合周期指标
    cycles_total: IntCounter,
    cycle_duration_seconds: Histogram,

    // 2. 下游指标
    source_errors_total: IntCounterVec,
    source_routers: IntGaugeVec,

    // 3. 发布文档指标
    document_entries: IntGaugeVec,
}

impl Default for AggregatorMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregatorMetrics {
    // 创建新的指标收集器
    pub fn new() -> Self {
        let registry = Registry::new();

        // 1. 聚合周期指标
        let cycles_total = IntCounter::new(
            "aggregator_cycles_total",
            "Total number of completed aggregation cycles",
        )
        .unwrap();

        let cycle_duration_seconds = Histogram::with_opts(prometheus::histogram_opts!(
            "aggregator_cycle_duration_seconds",
            "Aggregation cycle duration in seconds, including all downstream fetches",
            vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
        ))
        .unwrap();

        // 2. 下游指标
        let source_errors_total = IntCounterVec::new(
            opts!(
                "aggregator_source_errors_total",
                "Total downstream fetch failures, classified by source and error type"
            ),
            &["source", "error_type"],
        )
        .unwrap();

        let source_routers = IntGaugeVec::new(
            opts!(
                "aggregator_source_routers",
                "Routers contributed by each downstream in the last cycle, classified by mode"
            ),
            &["source", "mode"],
        )
        .unwrap();

        // 3. 发布文档指标
        let document_entries = IntGaugeVec::new(
            opts!(
                "aggregator_document_entries",
                "Entries in the published document, classified by kind (routers, services, middlewares)"
            ),
            &["kind"],
        )
        .unwrap();

        let metrics = AggregatorMetrics {
            registry,
            cycles_total,
            cycle_duration_seconds,
            source_errors_total,
            source_routers,
            document_entries,
        };

        // 注册所有指标
        metrics.register_all_metrics();

        metrics
    }

    // 注册所有指标
    fn register_all_metrics(&self) {
        self.registry
            .register(Box::new(self.cycles_total.clone()))
            .unwrap();
        self.registry
            .register(Box::new(self.cycle_duration_seconds.clone()))
            .unwrap();
        self.registry
            .register(Box::new(self.source_errors_total.clone()))
            .unwrap();
        self.registry
            .register(Box::new(self.source_routers.clone()))
            .unwrap();
        self.registry
            .register(Box::new(self.document_entries.clone()))
            .unwrap();
    }

    // 获取 Prometheus 注册表
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    // 导出所有指标为输出字符串
    pub fn export_metrics(&self) -> String {
        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = String::new();
        if let Err(e) = encoder.encode_utf8(&metric_families, &mut buffer) {
            tracing::error!("Failed to encode metrics: {}", e);
        }
        buffer
    }

    pub fn cycles_total(&self) -> &IntCounter {
        &self.cycles_total
    }

    pub fn cycle_duration_seconds(&self) -> &Histogram {
        &self.cycle_duration_seconds
    }

    pub fn source_errors_total(&self) -> &IntCounterVec {
        &self.source_errors_total
    }

    pub fn source_routers(&self) -> &IntGaugeVec {
        &self.source_routers
    }

    pub fn document_entries(&self) -> &IntGaugeVec {
        &self.document_entries
    }
}

// 提供指标导出路由
pub fn metrics_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        endpoints::METRICS,
        get(|| async {
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
                METRICS.export_metrics(),
            )
        }),
    )
}
