//! Renderers: one-way mappings from a [`Snapshot`](crate::data::Snapshot) to display targets.
//!
//! Renderers own the targets they write to; the targets are built at
//! startup and handed in. Nothing is read back from a target, and no
//! snapshot outlives the render call that consumes it.

pub mod control;
pub mod gauge;

pub use control::{
    on_off, ControlPanel, ControlRow, ControlTable, ControlTableRenderer, TableContainer, HEADERS,
};
pub use gauge::{filtration_ratio, GaugeBoard, GaugeId, GaugeRenderer, GaugeSink, TextId};
