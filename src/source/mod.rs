//! Snapshot sources.
//!
//! A [`MeasurementSource`] yields one freshly parsed [`Snapshot`] per call,
//! or a [`FetchError`]. Sources never retry; the scheduler decides when to
//! ask again.

mod error;
mod file;
mod http;

pub use error::{FailureKind, FetchError};
pub use file::FileSource;
pub use http::{MeasurementClient, MeasurementClientBuilder, MEASURES_PATH};

use std::fmt::Debug;

use async_trait::async_trait;

use crate::data::Snapshot;

/// Trait for fetching controller snapshots.
///
/// # Example
///
/// ```
/// use poolwatch::{FileSource, MeasurementSource};
///
/// # tokio_test::block_on(async {
/// let source = FileSource::new("measures.json");
/// if let Ok(snapshot) = source.fetch().await {
///     println!("water at {}°C", snapshot.water_temp);
/// }
/// # });
/// ```
#[async_trait]
pub trait MeasurementSource: Send + Sync + Debug {
    /// Fetch and parse the latest snapshot.
    async fn fetch(&self) -> Result<Snapshot, FetchError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header bar.
    fn description(&self) -> &str;
}
