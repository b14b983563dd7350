// SPDX-License-Identifier: GPL-3.0-or-later

//! Offline backend reading a JSON export of the API.
//!
//! The file is a single object holding the three collections under their
//! API names; any of them may be omitted:
//!
//! ```json
//! { "animals": [...], "adoptions": [...], "donations": [...] }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::wire::{Adoption, Animal, Donation};
use super::{FetchError, RecordSource};

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    animals: Vec<Animal>,
    #[serde(default)]
    adoptions: Vec<Adoption>,
    #[serde(default)]
    donations: Vec<Donation>,
}

pub struct SnapshotFile {
    name: String,
    snapshot: Snapshot,
}

impl SnapshotFile {
    /// Read and parse the whole file up front.
    pub fn open(path: &Path) -> Result<Self, FetchError> {
        let content = fs::read_to_string(path).map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|source| FetchError::Decode {
                what: path.display().to_string(),
                source,
            })?;

        info!(
            "Loaded snapshot {}: {} animals, {} adoptions, {} donations",
            path.display(),
            snapshot.animals.len(),
            snapshot.adoptions.len(),
            snapshot.donations.len()
        );

        Ok(Self {
            name: path.display().to_string(),
            snapshot,
        })
    }
}

impl RecordSource for SnapshotFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn adoptions(&self) -> Result<Vec<Adoption>, FetchError> {
        Ok(self.snapshot.adoptions.clone())
    }

    fn animals(&self) -> Result<Vec<Animal>, FetchError> {
        Ok(self.snapshot.animals.clone())
    }

    fn donations(&self) -> Result<Vec<Donation>, FetchError> {
        Ok(self.snapshot.donations.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("snapshot.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn open_reads_all_collections() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"{
                "animals": [{"id_animal": 1, "especie": "Gato", "status": "disponivel"}],
                "adoptions": [{"id": 1, "animalId": 1, "dataAdocao": "2024-01-01", "status": "aprovada"}],
                "donations": [{"tipo": "financeira", "valor": 20, "data": "2024-01-01"}]
            }"#,
        );

        let source = SnapshotFile::open(&path).unwrap();
        assert_eq!(source.name(), path.display().to_string());
        assert_eq!(source.animals().unwrap().len(), 1);
        assert_eq!(source.adoptions().unwrap().len(), 1);
        assert_eq!(source.donations().unwrap().len(), 1);
        assert_eq!(source.candidate_pool_size(2024).unwrap(), 2);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "{}");
        let source = SnapshotFile::open(&path).unwrap();
        assert!(source.fetch_donations_for_year(2024).unwrap().is_empty());
        assert!(source.fetch_adoptions_for_year(2024).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SnapshotFile::open(&dir.path().join("nope.json"))
            .err()
            .expect("should fail");
        assert!(matches!(err, FetchError::Io { .. }));
    }

    #[test]
    fn invalid_json_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "[not json");
        let err = SnapshotFile::open(&path).err().expect("should fail");
        assert!(matches!(err, FetchError::Decode { .. }));
    }
}
