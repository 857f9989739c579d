//! Data model and value transforms for controller snapshots.
//!
//! ## Submodules
//!
//! - [`snapshot`]: the [`Snapshot`] record parsed from `/getMeasures`
//! - [`time`]: duration (`HH:MM:SS`) and epoch timestamp formatting
//!
//! ## Data Flow
//!
//! ```text
//! /getMeasures body (JSON)
//!        │
//!        ▼
//! Snapshot::from_json()
//!        │
//!        ├──▶ GaugeRenderer (numeric values, filtration ratio)
//!        │
//!        └──▶ ControlTableRenderer (ON/OFF, HH:MM:SS, timestamps)
//! ```

pub mod snapshot;
pub mod time;

pub use snapshot::Snapshot;
pub use time::{format_duration, parse_seconds, EpochStyle, TimeError, TimeFormatter, Zone};
