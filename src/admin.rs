// HTTP 服务：对外提供聚合后的配置、健康检查和指标

use crate::error::AppError;
use crate::metrics;
use crate::r#const::endpoints;
use crate::store::ConfigStore;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_graceful_shutdown::SubsystemHandle;
use tracing::{error, info};

/// 应用程序状态结构体
#[derive(Clone)]
pub struct AppState {
    /// 已发布配置
    pub store: Arc<ConfigStore>,
}

// HTTP 服务器
pub struct AdminServer {
    // 监听地址
    listen_addr: SocketAddr,
    // 已发布配置
    store: Arc<ConfigStore>,
    // 停止信号发送端
    shutdown_tx: oneshot::Sender<()>,
    // 停止信号接收端
    shutdown_rx: oneshot::Receiver<()>,
}

impl AdminServer {
    // 创建新的HTTP服务器
    pub fn new(listen_addr: SocketAddr, store: Arc<ConfigStore>) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        Self {
            listen_addr,
            store,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// 创建应用路由
    pub fn router(store: Arc<ConfigStore>) -> Router {
        Router::new()
            .route(endpoints::TRAEFIK_CONFIG, get(config_handler))
            .route(endpoints::HEALTH, get(health_handler))
            .merge(metrics::metrics_routes())
            .with_state(AppState { store })
    }

    /// 作为子系统运行
    pub async fn run(self, subsys: SubsystemHandle) -> Result<(), AppError> {
        let app = Self::router(self.store);

        // 创建 TCP 监听器
        let listener = match TcpListener::bind(self.listen_addr).await {
            Ok(listener) => {
                info!("HTTP server listening on {}", self.listen_addr);
                listener
            }
            Err(e) => {
                error!("Failed to bind HTTP server: {}", e);
                return Err(AppError::Io(e));
            }
        };

        let shutdown_rx = self.shutdown_rx;

        tokio::select! {
            result = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("HTTP server received shutdown signal");
            }) => {
                if let Err(e) = result {
                    error!("HTTP server error: {}", e);
                    return Err(AppError::Io(e));
                }
                info!("HTTP server stopped");
                Ok(())
            }
            _ = subsys.on_shutdown_requested() => {
                info!("Received subsystem shutdown request, HTTP server is stopping");
                let _ = self.shutdown_tx.send(());
                Ok(())
            }
        }
    }
}

// 返回当前已发布的配置文档
async fn config_handler(State(state): State<AppState>) -> Response {
    let document = state.store.current();

    match serde_json::to_vec(document.as_ref()) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Error encoding config response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// 健康检查处理程序
async fn health_handler() -> &'static str {
    "OK"
}
