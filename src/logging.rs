//! Logging - tracing 订阅器初始化

use crate::config::LogConfig;

/// 初始化日志
///
/// 进程启动时调用一次。`RUST_LOG` 环境变量优先于配置中的级别。
pub fn init_logging(config: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
