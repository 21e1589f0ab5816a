use crate::aggregator::Aggregator;
use crate::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tokio_graceful_shutdown::SubsystemHandle;
use tracing::info;

/// 周期性触发聚合
///
/// 第一个 tick 立即触发（启动时聚合一次），之后每隔 `poll_interval` 执行。
/// 周期串行执行；超时的周期结束后立即开始下一轮，不会堆积。
pub struct Poller {
    aggregator: Arc<Aggregator>,
    poll_interval: Duration,
}

impl Poller {
    pub fn new(aggregator: Arc<Aggregator>, poll_interval: Duration) -> Self {
        Self {
            aggregator,
            poll_interval,
        }
    }

    // 轮询循环，不会主动退出
    async fn poll_loop(&self) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.aggregator.run_cycle().await;
        }
    }

    /// 作为子系统运行，收到关闭请求时放弃进行中的周期
    pub async fn run(self, subsys: SubsystemHandle) -> Result<(), AppError> {
        info!("Poller started, poll interval: {:?}", self.poll_interval);

        tokio::select! {
            _ = self.poll_loop() => Ok(()),
            _ = subsys.on_shutdown_requested() => {
                info!("Received subsystem shutdown request, poller is stopping");
                Ok(())
            }
        }
    }
}
