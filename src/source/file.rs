//! File-based snapshot source.
//!
//! Reads a `/getMeasures` body saved to disk. Useful for demos and for
//! running the dashboard without a controller on the network.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{FetchError, MeasurementSource};
use crate::data::Snapshot;

/// A source that re-reads a JSON snapshot file on every fetch.
///
/// Editing the file while the dashboard runs is picked up on the next
/// poll, which makes it convenient for exercising the views by hand.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MeasurementSource for FileSource {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| FetchError::Network(format!("read error: {}", e)))?;
        Ok(Snapshot::from_json(&content)?)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FailureKind;
    use crate::test_support::sample_json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_source_new() {
        let source = FileSource::new("/tmp/measures.json");
        assert_eq!(source.path(), Path::new("/tmp/measures.json"));
        assert_eq!(source.description(), "file: /tmp/measures.json");
    }

    #[tokio::test]
    async fn test_file_source_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", sample_json()).unwrap();

        let source = FileSource::new(file.path());
        let snapshot = source.fetch().await.unwrap();
        assert_eq!(snapshot.water_temp, 26.0);

        // Every fetch re-reads the file
        let again = source.fetch().await.unwrap();
        assert_eq!(snapshot, again);
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileSource::new("/nonexistent/path/measures.json");

        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::NetworkFailure);
        assert!(err.to_string().contains("read error"));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let source = FileSource::new(file.path());
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ParseError);
    }
}
