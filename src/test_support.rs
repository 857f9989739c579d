//! Shared fixtures for unit tests.

use crate::data::Snapshot;

pub(crate) fn sample_json() -> &'static str {
    r#"{
        "IATemp": 21.5, "OATemp": 18.2, "WaTemp": 26.0,
        "pH": 7.2, "Orp": 650, "PSI": 0.8,
        "pHFill": 80, "ChFill": 60,
        "Auto": true, "Winter": false, "FPmpS": true,
        "pHROO": true, "pHPmpS": false, "OrpROO": true, "OrpPmpS": false,
        "pHWS": 20, "ChlWS": 30,
        "DFUpt": 1800, "DFTrgt": 3600,
        "PFSta": 1700000000, "PFEnd": 1700028800,
        "pHUTL": 30, "OrpUTL": 45,
        "PDFUpt": 28800, "PDFTrgt": 28800,
        "Reboot": 3, "RTime": 1699990000, "RSTime": 1699999200
    }"#
}

pub(crate) fn sample_value() -> serde_json::Value {
    serde_json::from_str(sample_json()).unwrap()
}

pub(crate) fn sample_snapshot() -> Snapshot {
    serde_json::from_str(sample_json()).unwrap()
}

/// A snapshot where every equipment flag is off.
pub(crate) fn all_off_snapshot() -> Snapshot {
    Snapshot {
        auto_mode: false,
        winter_mode: false,
        filtration_pump: false,
        ph_regulation: false,
        ph_pump: false,
        orp_regulation: false,
        chlorine_pump: false,
        ..sample_snapshot()
    }
}
