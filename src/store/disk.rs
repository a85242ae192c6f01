use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use tracing::debug;

use crate::core::prefs::PreferenceStore;

/// Preference store backed by an on-disk fjall keyspace. Keys and values
/// are stored as raw UTF-8.
pub struct DiskStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition =
            keyspace.open_partition("preferences", PartitionCreateOptions::default())?;
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl PreferenceStore for DiskStore {
    async fn get(&self, key: &str) -> Option<String> {
        match self.partition.get(key) {
            Ok(Some(value)) => match String::from_utf8(value.to_vec()) {
                Ok(value) => {
                    debug!("Preference GET {}: {}", key, value);
                    Some(value)
                }
                Err(e) => {
                    debug!("Preference {} holds invalid utf-8: {}", key, e);
                    None
                }
            },
            Ok(None) => {
                debug!("Preference GET {}: not set", key);
                None
            }
            Err(e) => {
                debug!("DiskStore get error for {}: {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) {
        let res: Result<()> = (|| {
            self.partition.insert(key, value)?;
            // Each command is a short-lived process; flush eagerly so the
            // write survives exit.
            self.keyspace.persist(PersistMode::SyncAll)?;
            debug!("Preference SET {}: {}", key, value);
            Ok(())
        })();
        if let Err(e) = res {
            debug!("DiskStore set error for {}: {}", key, e);
        }
    }
}
