//! File-backed medium.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use super::StorageMedium;

const ENTRY_EXTENSION: &str = "json";

/// Key/value medium storing one file per key under a root directory.
///
/// File names are the hex SHA-256 digest of the key, so every key maps to a
/// fixed-length safe file name. The first line of each file holds the key as
/// a JSON string and the stored value follows verbatim. Writes go to a temp
/// file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    /// Open a medium rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.root
            .join(format!("{}.{ENTRY_EXTENSION}", hex::encode(digest)))
    }

    fn read_entry(path: &Path) -> io::Result<Option<(String, String)>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let (header, value) = text
            .split_once('\n')
            .ok_or_else(|| invalid_entry(path, "missing key header"))?;
        let key: String = serde_json::from_str(header)
            .map_err(|_| invalid_entry(path, "malformed key header"))?;
        Ok(Some((key, value.to_string())))
    }
}

fn invalid_entry(path: &Path, reason: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{}: {reason}", path.display()),
    )
}

impl StorageMedium for FileMedium {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(Self::read_entry(&self.entry_path(key))?
            .filter(|(stored_key, _)| stored_key == key)
            .map(|(_, value)| value))
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.entry_path(key);
        let temp_path = path.with_extension("json.tmp");
        let header = serde_json::to_string(key).map_err(io::Error::other)?;

        let mut file = File::create(&temp_path)?;
        file.write_all(header.as_bytes())?;
        file.write_all(b"\n")?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;

        fs::rename(&temp_path, &path)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Keys of all readable entries. Files without a valid key header are
    /// skipped.
    fn keys(&self) -> io::Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != ENTRY_EXTENSION) {
                continue;
            }
            if let Ok(Some((key, _))) = Self::read_entry(&path) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_through_files() {
        let dir = tempdir().unwrap();
        let medium = FileMedium::open(dir.path().join("store")).unwrap();

        assert_eq!(medium.get("esg_report_rep-1").unwrap(), None);
        medium.set("esg_report_rep-1", "{}").unwrap();
        assert_eq!(
            medium.get("esg_report_rep-1").unwrap().as_deref(),
            Some("{}")
        );

        let path = medium.entry_path("esg_report_rep-1");
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_long_keys_use_fixed_length_file_names() {
        let dir = tempdir().unwrap();
        let medium = FileMedium::open(dir.path()).unwrap();
        let key = format!("esg_report_{}", "r".repeat(300));

        medium.set(&key, r#"{"answers":{}}"#).unwrap();
        assert_eq!(
            medium.get(&key).unwrap().as_deref(),
            Some(r#"{"answers":{}}"#)
        );
        assert_eq!(medium.keys().unwrap(), vec![key.clone()]);

        let file_name = medium.entry_path(&key);
        let stem = file_name.file_stem().unwrap().to_str().unwrap();
        assert_eq!(stem.len(), 64);
    }

    #[test]
    fn test_values_with_newlines_survive() {
        let dir = tempdir().unwrap();
        let medium = FileMedium::open(dir.path()).unwrap();
        medium.set("multi\nline key", "{\n  \"a\": 1\n}").unwrap();

        assert_eq!(
            medium.get("multi\nline key").unwrap().as_deref(),
            Some("{\n  \"a\": 1\n}")
        );
        assert_eq!(medium.keys().unwrap(), vec!["multi\nline key".to_string()]);
    }

    #[test]
    fn test_keys_read_entry_headers() {
        let dir = tempdir().unwrap();
        let medium = FileMedium::open(dir.path()).unwrap();
        medium.set("b/../weird key", "1").unwrap();
        medium.set("a", "2").unwrap();
        fs::write(dir.path().join("unrelated.txt"), "x").unwrap();
        fs::write(dir.path().join("headerless.json"), "{}").unwrap();

        assert_eq!(
            medium.keys().unwrap(),
            vec!["a".to_string(), "b/../weird key".to_string()]
        );
    }

    #[test]
    fn test_remove_missing_entry_is_ok() {
        let dir = tempdir().unwrap();
        let medium = FileMedium::open(dir.path()).unwrap();
        medium.remove("never-written").unwrap();

        medium.set("k", "v").unwrap();
        medium.remove("k").unwrap();
        assert_eq!(medium.get("k").unwrap(), None);
    }
}
