use anyhow::Context;
use clap::Parser;
use client_registry::core::ConfigProvider;
use client_registry::utils::logger;
use client_registry::{CliConfig, ClientRegistry, LocalStorage, Shell};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 驗證並合併配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let guard = logger::init_cli_logger(config.log_file(), cli.verbose)
        .with_context(|| format!("cannot initialise logging to {}", config.log_file().display()))?;

    tracing::info!("Starting client-registry");
    tracing::debug!("Resolved config: {:?}", config);

    let storage = LocalStorage::new(config.data_dir());
    let registry = ClientRegistry::new(storage);
    let mut shell = Shell::new(
        registry,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .with_clear_lines(config.clear_lines());

    tokio::select! {
        result = shell.run() => {
            result.context("interactive shell failed")?;
            tracing::info!("Application finished");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Application terminated by user (Ctrl+C)");
            println!();
            drop(guard);
            // stdin 讀取仍在阻塞執行緒上，直接結束行程
            std::process::exit(0);
        }
    }

    drop(guard);
    Ok(())
}
