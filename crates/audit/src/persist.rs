//! Raw report persistence
//!
//! Artifacts are written verbatim, create-or-overwrite, with no locking;
//! concurrent writers to the same path race with last-write-wins. The
//! target directory must already exist - creating it is the caller's job.

use std::path::Path;

use sitepulse_common::Result;

/// Write a raw report body to `path` as text.
pub fn save_report(path: &Path, body: &str) -> Result<()> {
    std::fs::write(path, body)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_writes_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lighthouse-1000.json");
        let body = "{\"lhr\": {\"requestedUrl\": \"https://example.com/\"}}";

        save_report(&path, body).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), body);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lighthouse-1000.json");

        save_report(&path, "first").unwrap();
        save_report(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_save_does_not_create_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("lighthouse-1000.json");

        assert!(save_report(&path, "body").is_err());
    }
}
