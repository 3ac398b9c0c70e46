use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// 初始化日誌：寫入檔案，verbose 時另外輸出到 stderr。
///
/// 回傳的 guard 必須存活到程式結束，否則尚未寫出的日誌會遺失。
/// 全域 subscriber 已存在時回傳錯誤。
pub fn init_cli_logger(log_file: &Path, verbose: bool) -> std::io::Result<WorkerGuard> {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("client_registry=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("client_registry=info"))
    };

    if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // 互動畫面使用 stdout，日誌不得混入
    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(stderr_layer)
        .try_init()
        .map_err(std::io::Error::other)?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_second_init_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("logs").join("sky_app.log");
        let second = temp_dir.path().join("otro.log");

        let _guard = init_cli_logger(&first, false).unwrap();
        assert!(first.exists());
        assert!(init_cli_logger(&second, false).is_err());
    }
}
