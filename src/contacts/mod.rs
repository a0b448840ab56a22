//! Emergency contact persistence
//!
//! Synchronous JSON key-value storage for the single contact record.
//! Single writer, single reader, last write wins; the file survives process
//! restarts.

use crate::types::EmergencyContact;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Persisted contact store
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Create a store backed by the given file, creating parent directories
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create contact storage directory")?;
        }
        Ok(Self { path })
    }

    /// Create a store at the default location
    pub fn default_path() -> Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Self::new(home.join(".vitalguard").join("emergency_contact.json"))
    }

    /// Read the stored contact, falling back to the empty default
    ///
    /// A missing or unreadable file is not an error for readers; the
    /// orchestrator renders the default as "None listed".
    pub fn get(&self) -> EmergencyContact {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                eprintln!("[CONTACTS] Ignoring corrupt contact record: {}", e);
                EmergencyContact::default()
            }),
            Err(_) => EmergencyContact::default(),
        }
    }

    /// Validate and persist the contact record
    pub fn set(&self, contact: &EmergencyContact) -> Result<()> {
        contact.validate()?;

        let json =
            serde_json::to_string_pretty(contact).context("Failed to serialize contact")?;
        fs::write(&self.path, json).context("Failed to write contact file")?;
        Ok(())
    }

    /// Storage file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (ContactStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ContactStore::new(temp_dir.path().join("contact.json")).unwrap();
        (store, temp_dir)
    }

    fn sample_contact() -> EmergencyContact {
        EmergencyContact {
            name: "Jane Doe".to_string(),
            relationship: "Spouse".to_string(),
            phone: "+1 555-0199".to_string(),
        }
    }

    #[test]
    fn test_get_returns_default_when_missing() {
        let (store, _temp) = create_test_store();
        assert_eq!(store.get(), EmergencyContact::default());
    }

    #[test]
    fn test_set_and_get_round_trip() {
        let (store, _temp) = create_test_store();
        store.set(&sample_contact()).unwrap();
        assert_eq!(store.get(), sample_contact());
    }

    #[test]
    fn test_set_rejects_missing_required_field() {
        let (store, _temp) = create_test_store();
        let mut contact = sample_contact();
        contact.phone = String::new();

        assert!(store.set(&contact).is_err());
        // Rejected save must not touch the stored record
        assert_eq!(store.get(), EmergencyContact::default());
    }

    #[test]
    fn test_last_write_wins() {
        let (store, _temp) = create_test_store();
        store.set(&sample_contact()).unwrap();

        let mut updated = sample_contact();
        updated.phone = "+1 555-0200".to_string();
        store.set(&updated).unwrap();

        assert_eq!(store.get().phone, "+1 555-0200");
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let (store, _temp) = create_test_store();
        fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.get(), EmergencyContact::default());
    }
}
