pub mod cli;
pub mod toml_config;

use self::toml_config::RegistrySettings;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_DATA_DIR: &str = "./clientes";
pub const DEFAULT_LOG_FILE: &str = "./sky_app.log";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "client-registry")]
#[command(about = "Interactive client and service request registry")]
pub struct CliConfig {
    /// Directory holding the client records
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// File receiving the operational log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Optional TOML settings file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Also print log events to stderr")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 < 設定檔 < 命令列參數
    pub fn resolve(&self) -> Result<RegistryConfig> {
        let mut config = RegistryConfig::default();

        if let Some(path) = &self.config {
            let settings = RegistrySettings::from_file(path)?;
            config = config.merge_settings(&settings);
        }

        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(file) = &self.log_file {
            config.log_file = file.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Resolved runtime configuration, passed explicitly to the shell and storage.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub clear_lines: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            clear_lines: 0,
        }
    }
}

impl RegistryConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn merge_settings(mut self, settings: &RegistrySettings) -> Self {
        if let Some(dir) = settings.storage.as_ref().and_then(|s| s.data_dir.clone()) {
            self.data_dir = dir;
        }
        if let Some(file) = settings.logging.as_ref().and_then(|l| l.file.clone()) {
            self.log_file = file;
        }
        if let Some(lines) = settings.shell.as_ref().and_then(|s| s.clear_lines) {
            self.clear_lines = lines;
        }
        self
    }
}

impl ConfigProvider for RegistryConfig {
    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn log_file(&self) -> &Path {
        &self.log_file
    }

    fn clear_lines(&self) -> usize {
        self.clear_lines
    }
}

impl Validate for RegistryConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir.to_string_lossy())?;
        validate_path("log_file", &self.log_file.to_string_lossy())?;
        Ok(())
    }
}
