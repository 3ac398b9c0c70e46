use crate::utils::error::{RegistryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(RegistryError::validation(field_name, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(RegistryError::validation(
            field_name,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

/// 客戶名稱只檢查是否為空白，其餘內容一律接受
pub fn validate_client_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RegistryError::validation(
            "nombre",
            "El nombre no puede estar vacío.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data_dir", "./clientes").is_ok());
        assert!(validate_path("data_dir", "").is_err());
        assert!(validate_path("data_dir", "   ").is_err());
        assert!(validate_path("data_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_client_name() {
        assert!(validate_client_name("Juan Perez").is_ok());
        assert!(validate_client_name("x").is_ok());
        assert!(validate_client_name("").is_err());
        assert!(validate_client_name(" \t ").is_err());
    }
}
