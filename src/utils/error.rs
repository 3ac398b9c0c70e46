use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Timestamp error: {0}")]
    TimestampError(#[from] chrono::ParseError),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Unknown {kind} label: '{value}'")]
    UnknownLabel { kind: &'static str, value: String },

    #[error("Validation error in '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl RegistryError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 給操作員看的訊息（不含內部細節）
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(_) => {
                "No se pudo acceder al almacenamiento. Verifique los permisos.".to_string()
            }
            Self::SerializationError(_) | Self::TimestampError(_) | Self::ParseError { .. } => {
                "El registro almacenado está dañado o tiene un formato inválido.".to_string()
            }
            Self::UnknownLabel { value, .. } => format!("Valor desconocido: '{}'.", value),
            Self::ValidationError { message, .. } => message.clone(),
            Self::ConfigError { message } => format!("Configuración inválida: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
