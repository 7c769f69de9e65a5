// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::etfdb::CatalogRecord;
use crate::profile::EtfProfile;
use crate::utils::error::StorageError;

const LISTING_FILE: &str = "etfs.json";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates `/base_dir/<SYMBOL>/` if needed.
    fn symbol_dir(&self, symbol: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(symbol.to_uppercase());
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Saves the profile as `/base_dir/<SYMBOL>/<SYMBOL>_profile.json`
    pub fn save_profile(&self, symbol: &str, profile: &EtfProfile) -> Result<PathBuf, StorageError> {
        let file_path = self
            .symbol_dir(symbol)?
            .join(format!("{}_profile.json", symbol.to_uppercase()));

        write_json(&file_path, profile)?;
        tracing::info!("Saved profile to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves a summary of the profile next to it, as `<SYMBOL>_profile_meta.json`
    pub fn save_profile_metadata(&self, symbol: &str, profile: &EtfProfile) -> Result<PathBuf, StorageError> {
        let file_path = self
            .symbol_dir(symbol)?
            .join(format!("{}_profile_meta.json", symbol.to_uppercase()));

        let metadata = serde_json::json!({
            "ticker": symbol.to_uppercase(),
            "url": profile.url(),
            "field_count": profile.fields.len(),
            "holdings_count": profile.holdings.len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        write_json(&file_path, &metadata)?;
        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }

    /// Writes the screener listing to `path` so it can serve as the symbol catalog.
    pub fn save_catalog<P: AsRef<Path>>(path: P, records: &[CatalogRecord]) -> Result<PathBuf, StorageError> {
        let file_path = path.as_ref().to_path_buf();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(StorageError::IoError)?;
        }

        write_json(&file_path, records)?;
        tracing::info!("Refreshed symbol catalog {} ({} ETFs)", file_path.display(), records.len());

        Ok(file_path)
    }

    /// Saves the screener listing as `/base_dir/etfs.json`
    pub fn save_listing(&self, records: &[CatalogRecord]) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(LISTING_FILE);

        write_json(&file_path, records)?;
        tracing::info!("Saved {} ETFs to {}", records.len(), file_path.display());

        Ok(file_path)
    }
}

fn write_json<S: Serialize + ?Sized>(path: &Path, value: &S) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    fs::write(path, json).map_err(StorageError::IoError)
}
