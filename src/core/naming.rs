use crate::utils::error::{RegistryError, Result};

pub const TEXT_EXTENSION: &str = "txt";
pub const JSON_EXTENSION: &str = "json";

/// Storage key for a client name: trimmed, lowercased, spaces replaced by `_`.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Reverse of the space normalization, used for listings. Case is not restored.
pub fn display_name(stem: &str) -> String {
    stem.replace('_', " ")
}

/// 儲存鍵必須是單一路徑元件，記錄一律平放在根目錄下
fn storage_key(name: &str) -> Result<String> {
    let key = normalize_name(name);
    let invalid = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if invalid {
        return Err(RegistryError::validation(
            "nombre",
            format!("'{}' no es un nombre de archivo válido.", name.trim()),
        ));
    }
    Ok(key)
}

pub fn text_file_name(name: &str) -> Result<String> {
    Ok(format!("{}.{}", storage_key(name)?, TEXT_EXTENSION))
}

pub fn json_file_name(name: &str) -> Result<String> {
    Ok(format!("{}.{}", storage_key(name)?, JSON_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_case_and_space_insensitive() {
        assert_eq!(normalize_name("Ana Li"), "ana_li");
        assert_eq!(normalize_name("ana li"), normalize_name("ANA LI"));
        assert_eq!(normalize_name("  ACME Corp "), "acme_corp");
    }

    #[test]
    fn test_file_names_share_stem() {
        assert_eq!(text_file_name("Juan Perez").unwrap(), "juan_perez.txt");
        assert_eq!(json_file_name("Juan Perez").unwrap(), "juan_perez.json");
        assert_eq!(text_file_name("O'Brien & Hijos").unwrap(), "o'brien_&_hijos.txt");
    }

    #[test]
    fn test_keys_must_be_a_single_path_component() {
        for name in ["Perez/Hijos", "../fuera", "..", ".", "a\\b", "   "] {
            assert!(text_file_name(name).is_err(), "{name:?} should be rejected");
            assert!(json_file_name(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("juan_perez"), "juan perez");
        assert_eq!(display_name("acme"), "acme");
    }
}
