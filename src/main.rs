use mimalloc::MiMalloc;
use std::process;
use std::sync::Arc;
use traefik_aggregator::{
    config::LogLevel, subsystem_names, AdminServer, AppError, Aggregator, Args, Config,
    ConfigStore, HttpClient, Poller, SourceFetcher,
};
use tokio_graceful_shutdown::{SubsystemBuilder, Toplevel};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// 使用 mimalloc 分配器提高内存效率
#[global_allocator]
static GLOBAL: MiMalloc = mimalloc::MiMalloc;

// 日志级别优先级：RUST_LOG > --debug > 配置文件 log_level > info
fn init_logging(args: &Args, log_level: Option<LogLevel>) {
    let default_level = if args.debug {
        LogLevel::Debug
    } else {
        log_level.unwrap_or(LogLevel::Info)
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_line_number(false)
        .with_env_filter(filter);

    // 单次模式的标准输出留给配置文档
    if args.once {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.init();
    }
}

// 程序入口
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 解析命令行参数
    let args = Args::parse_args();

    // 加载配置，日志级别依赖配置内容
    let loaded = Config::from_file(&args.config);
    init_logging(&args, loaded.as_ref().ok().and_then(|c| c.log_level));

    // 验证参数
    if let Err(e) = args.validation() {
        error!("Invalid command line arguments: {}", e);
        process::exit(1);
    }

    info!("Starting Traefik config aggregator");

    let config = match loaded {
        Ok(config) => {
            info!("Successfully loaded configuration: {:?}", args.config);
            config
        }
        Err(e) => {
            error!("Failed to load configuration file: {}", e);
            process::exit(1);
        }
    };

    // 如果是测试模式，成功验证配置后退出
    if args.test_config {
        info!("Configuration file validation successful");
        return Ok(());
    }

    // 单次模式：执行一个周期，把结果打印到标准输出
    if args.once {
        return match run_once(config).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("Single aggregation cycle failed: {}", e);
                process::exit(1);
            }
        };
    }

    // 创建应用组件
    let components = match create_components(config) {
        Ok(components) => components,
        Err(e) => {
            error!("Failed to create application components: {}", e);
            process::exit(1);
        }
    };

    // 创建优雅关闭顶层管理器
    let toplevel = Toplevel::new(|s| async move {
        // 启动轮询子系统
        let poller = components.poller;
        s.start(SubsystemBuilder::new(
            subsystem_names::POLLER,
            move |s| async move { poller.run(s).await },
        ));
        // 启动HTTP服务子系统
        let admin_server = components.admin_server;
        s.start(SubsystemBuilder::new(
            subsystem_names::ADMIN_SERVER,
            move |s| async move { admin_server.run(s).await },
        ));
    });

    // 等待关闭
    info!("All services started, waiting for requests...");
    match toplevel
        .catch_signals()
        .handle_shutdown_requests(tokio::time::Duration::from_secs(args.shutdown_timeout))
        .await
    {
        Ok(_) => {
            info!("Application gracefully shut down");
            Ok(())
        }
        Err(e) => {
            error!("Application shutdown error: {}", e);
            process::exit(1);
        }
    }
}

// 应用组件
struct AppComponents {
    // 聚合轮询器
    poller: Poller,
    // HTTP 服务器
    admin_server: AdminServer,
}

// 创建应用组件
fn create_components(config: Config) -> Result<AppComponents, AppError> {
    let listen_addr = config.listen_addr()?;

    // 准备HTTP客户端
    let http_client_config = config.http_client.clone().unwrap_or_default();
    let client = HttpClient::create(&http_client_config, config.http_timeout)?;

    // 配置存储由轮询器和HTTP服务共享
    let store = Arc::new(ConfigStore::new());

    info!(
        "Aggregating {} downstream instances every {:?} (request timeout: {:?})",
        config.downstream.len(),
        config.poll_interval,
        config.http_timeout
    );

    let aggregator = Arc::new(Aggregator::new(
        config.downstream,
        SourceFetcher::new(client),
        Arc::clone(&store),
    ));

    Ok(AppComponents {
        poller: Poller::new(aggregator, config.poll_interval),
        admin_server: AdminServer::new(listen_addr, store),
    })
}

// 执行一次聚合，不启动 HTTP 服务
async fn run_once(config: Config) -> Result<(), AppError> {
    let http_client_config = config.http_client.clone().unwrap_or_default();
    let client = HttpClient::create(&http_client_config, config.http_timeout)?;

    let aggregator = Aggregator::new(
        config.downstream,
        SourceFetcher::new(client),
        Arc::new(ConfigStore::new()),
    );
    let document = aggregator.aggregate().await;

    let output = serde_json::to_string_pretty(&document)
        .map_err(|e| AppError::Io(std::io::Error::other(e)))?;
    println!("{}", output);
    Ok(())
}
