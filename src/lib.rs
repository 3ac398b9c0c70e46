pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, RegistryConfig};

pub use crate::app::Shell;
pub use crate::core::registry::ClientRegistry;
pub use domain::model::{Client, ClientCategory, ServiceKind, ServiceRequest, Timestamp};
pub use utils::error::{RegistryError, Result};
