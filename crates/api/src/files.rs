//! Durable storage for uploaded project files.
//!
//! Handlers receive upload bytes via multipart and hand them to a
//! [`FileStore`]; only the public URL the store returns is persisted.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

/// Storage seam for uploaded files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store the upload durably and return its public URL.
    async fn store(&self, data: &[u8], original_name: &str) -> std::io::Result<String>;
}

/// Stores uploads on the local filesystem under a single directory,
/// served under `public_base`.
pub struct DiskFileStore {
    root: PathBuf,
    public_base: String,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn store(&self, data: &[u8], original_name: &str) -> std::io::Result<String> {
        // Uuid prefix keeps stored names collision-free across uploads of
        // the same filename.
        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&stored_name), data).await?;

        Ok(format!("{}/{}", self.public_base, stored_name))
    }
}

/// Reduce a client-supplied filename to a path-safe form.
fn sanitize_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.trim_matches(['.', '_']).is_empty() {
        "file".to_string()
    } else {
        safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("report v2.pdf"), "report_v2.pdf");
        // Slashes become underscores; the dots stay but can no longer
        // traverse without a separator.
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("mock-up_final.PNG"), "mock-up_final.PNG");
        assert_eq!(sanitize_file_name("..."), "file");
    }

    #[tokio::test]
    async fn test_disk_store_writes_and_returns_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DiskFileStore::new(dir.path(), "/uploads");

        let url = store
            .store(b"fake pdf bytes", "invoice.pdf")
            .await
            .expect("store should succeed");

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with("-invoice.pdf"));

        let stored_name = url.strip_prefix("/uploads/").unwrap();
        let on_disk = std::fs::read(dir.path().join(stored_name)).expect("file should exist");
        assert_eq!(on_disk, b"fake pdf bytes");
    }

    #[tokio::test]
    async fn test_same_name_twice_gets_distinct_urls() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DiskFileStore::new(dir.path(), "/uploads");

        let first = store.store(b"a", "logo.svg").await.expect("store");
        let second = store.store(b"b", "logo.svg").await.expect("store");
        assert_ne!(first, second);
    }
}
