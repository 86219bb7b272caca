use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::Storage;

/// Directory-backed storage: each key is one `<key>.json` file
pub struct JsonFileStorage {
    base_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)
            .with_context(|| format!("Failed to create storage directory: {}", base_path.display()))?;

        info!(path = %base_path.display(), "Initialized JSON storage");

        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            bail!("Invalid storage key: {:?}", key);
        }

        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read storage file: {}", path.display()))?;

        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        // Write beside the target and rename over it so readers never see a partial file
        let mut temp = NamedTempFile::new_in(&self.base_path).with_context(|| {
            format!("Failed to create temp file in: {}", self.base_path.display())
        })?;
        temp.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
        temp.as_file()
            .sync_all()
            .with_context(|| format!("Failed to sync temp file for: {}", path.display()))?;
        temp.persist(&path)
            .with_context(|| format!("Failed to replace storage file: {}", path.display()))?;

        debug!(key, bytes = value.len(), "Wrote storage value");

        Ok(())
    }
}
