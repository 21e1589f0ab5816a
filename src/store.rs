use crate::document::AggregatedDocument;
use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 最近一次成功聚合的配置文档
///
/// 写入方（聚合周期）整体替换文档，读取方拿到的总是一份完整快照。
/// 替换和读取都只涉及一次指针交换，不会互相阻塞；耗时的拉取和转换
/// 全部在发布之前完成。
pub struct ConfigStore {
    current: ArcSwap<AggregatedDocument>,
    generation: AtomicU64,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    // 以空文档初始化
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(AggregatedDocument::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// 发布新文档，替换当前文档
    pub fn publish(&self, document: AggregatedDocument) {
        self.current.store(Arc::new(document));
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// 当前文档快照
    pub fn current(&self) -> Arc<AggregatedDocument> {
        self.current.load_full()
    }

    // 已发布次数，0 表示首个周期尚未完成
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
