use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::config::LogConfig;

/// Builds the filter directive string: base level, then per-target levels.
/// Statement logging needs `sqlx::query` at info regardless of `ext_level`.
pub fn filter_directives(log_config: &LogConfig, sql_logging: bool) -> String {
    let mut directives = log_config.level.clone();

    if let Some(ext_levels) = &log_config.ext_level {
        let mut targets: Vec<_> = ext_levels.iter().collect();
        targets.sort();
        for (target, level) in targets {
            directives.push_str(&format!(",{}={}", target, level));
        }
    }

    if sql_logging {
        directives.push_str(",sqlx::query=info");
    }
    directives
}

/// Console output goes to stderr so stdout only carries command output.
pub fn init_logging(log_config: &LogConfig, sql_logging: bool) {
    let file_layer = if log_config.file_enabled {
        log_config.dir.as_ref().map(|dir| {
            let file_appender = tracing_appender::rolling::daily(dir, "ormless.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keep the writer alive for the lifetime of the process
            std::mem::forget(guard);

            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_span_events(FmtSpan::CLOSE)
                .with_current_span(true)
                .with_target(true)
                .boxed()
        })
    } else {
        None
    };

    let console_layer = match log_config.console_format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        "pretty" => fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        _ => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_config, sql_logging)));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer);

    if let Some(file_layer) = file_layer {
        subscriber.with(file_layer).init();
    } else {
        subscriber.init();
    }
}
