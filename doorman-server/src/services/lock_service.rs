use std::collections::BTreeMap;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

use crate::configs::settings::Store;
use crate::errors::StoreError;
use crate::models::LockEntry;

/// Persisted lockout flags, one JSON file holding the whole mapping.
///
/// Every operation reads the file fresh and mutating ones rewrite it whole.
/// There is no guard against concurrent writers; two overlapping toggles for
/// the same name race and the later write wins.
#[derive(Clone)]
pub struct LockService {
    path: PathBuf,
}

impl LockService {
    pub fn new(store: Store) -> Self {
        Self {
            path: PathBuf::from(store.path),
        }
    }

    /// Whether `name` is currently locked out. Names match case-insensitively
    /// and an absent file or entry means unlocked.
    pub async fn is_locked(&self, name: &str) -> Result<bool, StoreError> {
        let entries = self.load().await?;

        Ok(entries
            .iter()
            .find(|(key, _)| key.to_lowercase() == name.to_lowercase())
            .map(|(_, entry)| entry.locked)
            .unwrap_or(false))
    }

    /// Upsert the flag for `name`. An existing entry differing only in case
    /// is updated in place, keeping its stored casing, so the file never
    /// grows a second entry for the same door.
    pub async fn set_locked(&self, name: &str, locked: bool) -> Result<(), StoreError> {
        let mut entries = self.load().await?;

        let key = entries
            .keys()
            .find(|key| key.to_lowercase() == name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| name.to_string());
        entries.insert(key, LockEntry { locked });

        self.save(&entries).await
    }

    pub async fn lock(&self, name: &str) -> Result<bool, StoreError> {
        self.set_locked(name, true).await?;
        self.is_locked(name).await
    }

    pub async fn unlock(&self, name: &str) -> Result<bool, StoreError> {
        self.set_locked(name, false).await?;
        Ok(!self.is_locked(name).await?)
    }

    async fn load(&self) -> Result<BTreeMap<String, LockEntry>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })
    }

    async fn save(&self, entries: &BTreeMap<String, LockEntry>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(entries).map_err(io::Error::from)?;

        tokio::fs::write(&self.path, bytes).await?;

        Ok(())
    }
}
