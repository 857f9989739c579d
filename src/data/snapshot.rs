//! The measurement snapshot returned by the controller's `/getMeasures` endpoint.
//!
//! Field names on the wire are the controller's short keys (`IATemp`,
//! `FPmpS`, ...) and must be preserved exactly. Every field listed here
//! except the firmware version is required: a body that lacks one fails to
//! parse, so a partially populated `Snapshot` cannot be constructed.

use serde::{Deserialize, Serialize};

/// All measured and controlled values at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    // Temperatures (°C)
    #[serde(rename = "IATemp")]
    pub air_in_temp: f64,
    #[serde(rename = "OATemp")]
    pub air_out_temp: f64,
    #[serde(rename = "WaTemp")]
    pub water_temp: f64,

    // Water chemistry
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Oxidation-reduction potential (mV).
    #[serde(rename = "Orp")]
    pub orp: f64,
    /// Filtration pressure.
    #[serde(rename = "PSI")]
    pub pressure: f64,

    // Tank fill levels (%)
    #[serde(rename = "pHFill")]
    pub ph_tank_fill: f64,
    #[serde(rename = "ChFill")]
    pub chlorine_tank_fill: f64,

    // Equipment states
    #[serde(rename = "Auto")]
    pub auto_mode: bool,
    #[serde(rename = "Winter")]
    pub winter_mode: bool,
    #[serde(rename = "FPmpS")]
    pub filtration_pump: bool,
    /// pH regulation switched on. Independent of [`Snapshot::ph_pump`].
    #[serde(rename = "pHROO")]
    pub ph_regulation: bool,
    /// pH- pump currently running.
    #[serde(rename = "pHPmpS")]
    pub ph_pump: bool,
    /// ORP regulation switched on. Independent of [`Snapshot::chlorine_pump`].
    #[serde(rename = "OrpROO")]
    pub orp_regulation: bool,
    /// Chlorine pump currently running.
    #[serde(rename = "OrpPmpS")]
    pub chlorine_pump: bool,

    // Regulation setpoints
    #[serde(rename = "pHWS")]
    pub ph_worked_setpoint: f64,
    #[serde(rename = "ChlWS")]
    pub chlorine_worked_setpoint: f64,

    // Durations (seconds)
    #[serde(rename = "DFUpt", deserialize_with = "lenient::integer")]
    pub filtration_uptime: i64,
    #[serde(rename = "DFTrgt", deserialize_with = "lenient::integer")]
    pub filtration_target: i64,
    #[serde(rename = "PDFUpt", deserialize_with = "lenient::integer")]
    pub prev_filtration_uptime: i64,
    #[serde(rename = "PDFTrgt", deserialize_with = "lenient::integer")]
    pub prev_filtration_target: i64,

    // Instants (seconds since the Unix epoch)
    #[serde(rename = "PFSta", deserialize_with = "lenient::integer")]
    pub filtration_start: i64,
    #[serde(rename = "PFEnd", deserialize_with = "lenient::integer")]
    pub filtration_end: i64,
    #[serde(rename = "RTime", deserialize_with = "lenient::integer")]
    pub reboot_time: i64,
    #[serde(rename = "RSTime", deserialize_with = "lenient::integer")]
    pub reset_time: i64,

    // Limits (minutes) and counters
    #[serde(rename = "pHUTL", deserialize_with = "lenient::integer")]
    pub ph_pump_uptime_limit: i64,
    #[serde(rename = "OrpUTL", deserialize_with = "lenient::integer")]
    pub chlorine_pump_uptime_limit: i64,
    #[serde(rename = "Reboot", deserialize_with = "lenient::integer")]
    pub reboot_count: i64,

    /// Firmware revision, reported by newer controller builds.
    #[serde(rename = "Vers", default, skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<u32>,
}

impl Snapshot {
    /// Parse a snapshot from a JSON body.
    pub fn from_json(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }
}

/// Deserializers that accept a JSON number or a numeric string.
mod lenient {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    use crate::data::time::parse_seconds;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrText::deserialize(deserializer)? {
            NumberOrText::Int(value) => Ok(value),
            NumberOrText::Float(value) if value.is_finite() => Ok(value.trunc() as i64),
            NumberOrText::Float(value) => {
                Err(de::Error::custom(format!("non-finite number {}", value)))
            }
            NumberOrText::Text(text) => parse_seconds(&text).map_err(de::Error::custom),
        }
    }
}
