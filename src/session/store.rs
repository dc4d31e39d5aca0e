//! 令牌持久化
//!
//! 以键值方式保存令牌，`FileTokenStore` 写入本地 JSON 文件，
//! `MemoryTokenStore` 仅保存在进程内。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::{PortalError, Result};

#[async_trait]
pub trait TokenStore: Send + Sync {
    // 读取
    async fn get(&self, key: &str) -> Result<Option<String>>;
    // 写入（覆盖）
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    // 删除，不存在时视为成功
    async fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: DashMap<String, String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key);
        Ok(())
    }
}

pub struct FileTokenStore {
    path: PathBuf,
    // 串行化读-改-写
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(raw) if raw.is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_slice(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// 读-改-写前的读取，文件损坏时按空处理，随后的写入会覆盖它
    async fn read_for_update(&self) -> Result<BTreeMap<String, String>> {
        match self.read_all().await {
            Err(e @ PortalError::Serialization(_)) => {
                warn!(
                    "Token store {} is corrupt, overwriting it: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if entries.is_empty() {
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        // 先写临时文件再改名，避免留下写了一半的文件
        let raw = serde_json::to_vec_pretty(entries)?;
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        tokio::fs::write(&staging, raw).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        debug!("Token store written to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        match self.read_all().await {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.write_all(&entries).await?;
                }
                Ok(())
            }
            // 损坏的文件里没有可保留的内容，直接删除
            Err(e @ PortalError::Serialization(_)) => {
                warn!(
                    "Token store {} is corrupt, removing it: {}",
                    self.path.display(),
                    e
                );
                self.write_all(&BTreeMap::new()).await
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get("accessToken").await.unwrap(), None);
        store.set("accessToken", "abc").await.unwrap();
        assert_eq!(store.get("accessToken").await.unwrap().as_deref(), Some("abc"));
        store.remove("accessToken").await.unwrap();
        store.remove("accessToken").await.unwrap();
        assert_eq!(store.get("accessToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileTokenStore::new(&path)
            .set("accessToken", "abc")
            .await
            .unwrap();
        let reopened = FileTokenStore::new(&path);
        assert_eq!(
            reopened.get("accessToken").await.unwrap().as_deref(),
            Some("abc")
        );

        reopened.remove("accessToken").await.unwrap();
        assert!(!path.exists());
        assert_eq!(reopened.get("accessToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("session.json"));
        store.set("accessToken", "abc").await.unwrap();
        store.set("theme", "dark").await.unwrap();
        store.remove("accessToken").await.unwrap();
        assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();
        let err = FileTokenStore::new(&path).get("accessToken").await.unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[tokio::test]
    async fn test_file_store_overwrites_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, br#"{"accessToken": "trunc"#).await.unwrap();

        let store = FileTokenStore::new(&path);
        store.set("accessToken", "fresh").await.unwrap();
        assert_eq!(store.get("accessToken").await.unwrap().as_deref(), Some("fresh"));
        assert!(!dir.path().join("session.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_remove_clears_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = FileTokenStore::new(&path);
        store.remove("accessToken").await.unwrap();
        assert!(!path.exists());
        assert_eq!(store.get("accessToken").await.unwrap(), None);
    }
}
