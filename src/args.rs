use crate::error::AppError;
use crate::r#const::{server_defaults, shutdown_timeout};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// 命令行参数
#[derive(Parser, Debug, Clone)]
#[command(
    name = "traefik-aggregator",
    author,
    version,
    about = "Merges the routers of several Traefik instances into one HTTP provider document",
    long_about = "Polls every configured downstream Traefik, namespaces its routers, services \
                  and middlewares with the downstream name, and serves the merged document on \
                  /traefik-config for a front Traefik's HTTP provider.\n\n\
                  Downstreams run in one of two modes:\n\
                  - routers: /api/http/routers is rewritten into router + backend service pairs\n\
                  - passthrough: a complete dynamic configuration document is merged with prefixed keys"
)]
pub struct Args {
    /// YAML configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        env = server_defaults::CONFIG_PATH_ENV,
        default_value = server_defaults::DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    /// Validate the configuration file and exit
    #[arg(short = 't', long = "test", action = ArgAction::SetTrue)]
    pub test_config: bool,

    /// Run a single aggregation cycle, print the document to stdout and exit
    #[arg(long = "once", action = ArgAction::SetTrue, conflicts_with = "test_config")]
    pub once: bool,

    /// Force debug logging (RUST_LOG still takes precedence)
    #[arg(short = 'd', long = "debug", action = ArgAction::SetTrue)]
    pub debug: bool,

    /// Seconds to wait for subsystems to stop after a shutdown signal
    #[arg(
        long = "shutdown-timeout",
        value_name = "SECS",
        default_value_t = shutdown_timeout::DEFAULT
    )]
    pub shutdown_timeout: u64,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    // 关闭超时必须落在允许范围内
    pub fn validation(&self) -> Result<(), AppError> {
        let allowed = shutdown_timeout::MIN..=shutdown_timeout::MAX;
        if !allowed.contains(&self.shutdown_timeout) {
            return Err(AppError::InvalidShutdownTimeout(self.shutdown_timeout));
        }
        Ok(())
    }
}
