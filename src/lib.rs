//! # poolwatch
//!
//! A terminal dashboard for a pool equipment controller.
//!
//! The controller serves its current measurements and equipment state as a
//! JSON object at `GET /getMeasures`. This crate polls that endpoint and
//! shows the readings as gauges plus a control/status table.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  ┌─────────┐   ┌───────────┐   PollEvent   ┌─────┐   ┌──────┐ │
//! │  │ source  │──▶│ scheduler │──────────────▶│ app │──▶│  ui  │ │
//! │  │ (fetch) │   │ (cadence) │◀── refresh ───│     │   │      │ │
//! │  └─────────┘   └───────────┘               └──┬──┘   └──────┘ │
//! │                                               ▼               │
//! │                                          ┌────────┐           │
//! │                                          │ render │           │
//! │                                          └────────┘           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: the [`MeasurementSource`] trait, the HTTP
//!   [`MeasurementClient`] and a file-backed [`FileSource`]
//! - **[`scheduler`]**: independent gauge and control poll loops
//! - **[`render`]**: maps a [`Snapshot`] onto gauge values and the control
//!   table; renderers own the display targets they write to
//! - **[`data`]**: the snapshot model and time formatting
//! - **[`ui`]**: terminal drawing with ratatui
//!
//! ## Usage
//!
//! ```bash
//! # Poll a controller every 5 seconds, refreshing controls every minute
//! poolwatch --endpoint http://192.168.1.50 --gauge-interval 5 --control-interval 60
//!
//! # Replay a saved snapshot
//! poolwatch --file measures.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use poolwatch::{Cadence, MeasurementClient, PollEvent, PollScheduler};
//!
//! # tokio_test::block_on(async {
//! let client = MeasurementClient::builder()
//!     .endpoint("http://192.168.1.50")
//!     .build()?;
//! let mut scheduler = PollScheduler::spawn(client, Cadence::default());
//!
//! while let Some(event) = scheduler.next().await {
//!     if let PollEvent::Finished { target, result } = event {
//!         println!("{}: {:?}", target.label(), result.map(|s| s.water_temp));
//!     }
//! }
//! # Ok::<_, poolwatch::FetchError>(())
//! # });
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod render;
pub mod scheduler;
pub mod source;
pub mod ui;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use app::App;
pub use config::Settings;
pub use data::{format_duration, EpochStyle, Snapshot, TimeFormatter, Zone};
pub use render::{
    ControlPanel, ControlTable, ControlTableRenderer, GaugeBoard, GaugeId, GaugeRenderer,
};
pub use scheduler::{Cadence, PollEvent, PollScheduler, Target};
pub use source::{FailureKind, FetchError, FileSource, MeasurementClient, MeasurementSource};
