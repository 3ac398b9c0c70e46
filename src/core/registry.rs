use crate::core::naming::{self, display_name, TEXT_EXTENSION};
use crate::core::text_format::parse_record_text;
use crate::domain::model::Client;
use crate::domain::ports::Storage;
use crate::utils::error::Result;

/// Client persistence over a [`Storage`] root.
///
/// Every save writes both the `.txt` report and the `.json` sibling. Loads
/// read the `.json` sibling when present and only fall back to parsing the
/// text report for records that never had one.
pub struct ClientRegistry<S: Storage> {
    storage: S,
}

impl<S: Storage> ClientRegistry<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 儲存客戶；失敗只記錄日誌並回傳 false
    pub async fn save(&self, client: &Client) -> bool {
        match self.try_save(client).await {
            Ok(()) => {
                tracing::info!("Client '{}' saved", client.name);
                true
            }
            Err(e) => {
                tracing::error!("Failed to save client '{}': {}", client.name, e);
                false
            }
        }
    }

    pub async fn try_save(&self, client: &Client) -> Result<()> {
        let text_path = naming::text_file_name(&client.name)?;
        let json_path = naming::json_file_name(&client.name)?;
        self.storage.ensure_root().await?;

        self.storage
            .write_file(&text_path, client.to_record_text().as_bytes())
            .await?;

        let json = serde_json::to_string_pretty(&client.render_structured())?;
        self.storage.write_file(&json_path, json.as_bytes()).await?;

        tracing::debug!("Wrote {} and {}", text_path, json_path);
        Ok(())
    }

    /// Whether a record with this normalized name exists (checks the text file).
    pub async fn exists(&self, name: &str) -> bool {
        let path = match naming::text_file_name(name) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Rejected lookup for '{}': {}", name, e);
                return false;
            }
        };
        match self.storage.exists(&path).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!("Failed to check existence of '{}': {}", name, e);
                false
            }
        }
    }

    /// 依名稱載入客戶。找不到或檔案損毀時回傳 None。
    pub async fn load(&self, name: &str) -> Option<Client> {
        if !self.exists(name).await {
            tracing::warn!("Client '{}' not found", name);
            return None;
        }

        match self.try_load(name).await {
            Ok(client) => {
                tracing::info!("Client '{}' loaded", name);
                Some(client)
            }
            Err(e) => {
                tracing::error!("Failed to load client '{}': {}", name, e);
                None
            }
        }
    }

    async fn try_load(&self, name: &str) -> Result<Client> {
        let json_path = naming::json_file_name(name)?;
        if self.storage.exists(&json_path).await? {
            let data = self.storage.read_file(&json_path).await?;
            return Ok(serde_json::from_slice(&data)?);
        }

        tracing::debug!("No structured record for '{}', parsing text report", name);
        let data = self.storage.read_file(&naming::text_file_name(name)?).await?;
        parse_record_text(&String::from_utf8_lossy(&data))
    }

    /// Display names of every stored client. Order follows the storage listing.
    pub async fn list_all(&self) -> Vec<String> {
        match self.storage.list_files().await {
            Ok(files) => files
                .iter()
                .filter_map(|file| {
                    let (stem, ext) = file.rsplit_once('.')?;
                    (ext == TEXT_EXTENSION && !stem.is_empty()).then(|| display_name(stem))
                })
                .collect(),
            Err(e) => {
                tracing::error!("Failed to list clients: {}", e);
                Vec::new()
            }
        }
    }
}
