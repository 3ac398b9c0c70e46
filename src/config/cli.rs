use crate::core::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(fs::try_exists(self.base_path.join(path)).await?)
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.base_path.join(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        // 根目錄需先由 ensure_root 建立
        fs::write(self.base_path.join(path), data).await?;
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_root_lists_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("clientes"));
        assert!(storage.list_files().await.unwrap().is_empty());
        assert!(!storage.exists("x.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("clientes"));
        storage.ensure_root().await.unwrap();
        storage.ensure_root().await.unwrap();

        storage.write_file("a.txt", b"hola").await.unwrap();
        std::fs::create_dir(temp_dir.path().join("clientes").join("sub.txt")).unwrap();

        assert!(storage.exists("a.txt").await.unwrap());
        assert_eq!(storage.read_file("a.txt").await.unwrap(), b"hola");
        assert_eq!(storage.list_files().await.unwrap(), vec!["a.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_write_does_not_create_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("clientes");
        let storage = LocalStorage::new(&root);
        storage.ensure_root().await.unwrap();

        assert!(storage.write_file("perez/hijos.txt", b"x").await.is_err());
        assert!(!root.join("perez").exists());
    }
}
