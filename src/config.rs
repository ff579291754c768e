//! Settings for the ledger, read from a TOML file.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/discount-ledger"
//! document = "transactions.json"
//!
//! [payment]
//! scheme = "upi"
//! recipient = "shop@bank"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::persistence::{JsonFileStore, DEFAULT_DOCUMENT};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub payment: PaymentSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the ledger document
    pub data_dir: PathBuf,
    /// File name of the ledger document
    pub document: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            document: DEFAULT_DOCUMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    pub scheme: String,
    /// Payee address placed in the `pa` parameter
    pub recipient: String,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            scheme: "upi".to_string(),
            recipient: String::new(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        let settings = Self::from_toml(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;

        info!(
            data_dir = %settings.storage.data_dir.display(),
            document = %settings.storage.document,
            "Settings loaded"
        );

        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content).context("Failed to parse settings")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let document = self.storage.document.trim();
        anyhow::ensure!(!document.is_empty(), "storage.document must not be empty");
        anyhow::ensure!(
            !document.contains(['/', '\\']),
            "storage.document must be a file name, got '{}'",
            document
        );
        anyhow::ensure!(
            !self.payment.scheme.trim().is_empty(),
            "payment.scheme must not be empty"
        );
        anyhow::ensure!(
            !self.payment.recipient.trim().is_empty(),
            "payment.recipient must not be empty"
        );
        Ok(())
    }

    /// Ledger store described by the storage section
    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::with_document(&self.storage.data_dir, self.storage.document.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let settings = Settings::from_toml("[payment]\nrecipient = \"shop@bank\"\n").unwrap();

        assert_eq!(settings.storage.data_dir, PathBuf::from("."));
        assert_eq!(settings.storage.document, "transactions.json");
        assert_eq!(settings.payment.scheme, "upi");
        assert_eq!(
            settings.open_store().path(),
            Path::new("./transactions.json")
        );
    }

    #[test]
    fn test_missing_recipient_rejected() {
        let err = Settings::from_toml("").unwrap_err();
        assert!(err.to_string().contains("recipient"));
    }

    #[test]
    fn test_document_must_be_file_name() {
        let toml = "[storage]\ndocument = \"../x.json\"\n[payment]\nrecipient = \"a@b\"\n";
        assert!(Settings::from_toml(toml).is_err());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Settings::load("/nonexistent/settings.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
