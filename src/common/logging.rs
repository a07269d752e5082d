// src/common/logging.rs

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 初始化全局日志订阅者
///
/// 调试模式下输出 `oxide_cfdoh=debug` 并显示线程信息，否则只输出 info 及以上级别。
/// 重复调用不会报错，仅首次生效。
pub fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("oxide_cfdoh=debug")
    } else {
        EnvFilter::new("oxide_cfdoh=info")
    };

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_thread_ids(debug)
        .with_thread_names(debug);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
