//! Control table rendering.
//!
//! Every render builds a brand new [`ControlTable`] and swaps it into the
//! container, discarding the previous one. No row survives a refresh.

use crate::data::{Snapshot, TimeFormatter};

/// Column headers of the control table.
pub const HEADERS: [&str; 2] = ["Control", "Status"];

/// One `label: value` line of the control table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRow {
    pub label: &'static str,
    pub value: String,
}

/// How a snapshot field is turned into display text.
#[derive(Clone, Copy)]
enum Field {
    /// Boolean state shown as ON/OFF.
    Flag(fn(&Snapshot) -> bool),
    /// Seconds shown as `HH:MM:SS`.
    Duration(fn(&Snapshot) -> i64),
    /// Seconds since the epoch shown as a timestamp.
    Epoch(fn(&Snapshot) -> i64),
    /// Raw number shown as-is.
    Number(fn(&Snapshot) -> f64),
    /// Raw integer shown as-is.
    Count(fn(&Snapshot) -> i64),
}

struct ControlSpec {
    label: &'static str,
    field: Field,
}

/// Rows of the control table, in display order.
const CONTROLS: [ControlSpec; 20] = [
    ControlSpec {
        label: "Auto Mode",
        field: Field::Flag(|s: &Snapshot| s.auto_mode),
    },
    ControlSpec {
        label: "Winter Mode",
        field: Field::Flag(|s: &Snapshot| s.winter_mode),
    },
    ControlSpec {
        label: "Filtration",
        field: Field::Flag(|s: &Snapshot| s.filtration_pump),
    },
    ControlSpec {
        label: "pH Regulation",
        field: Field::Flag(|s: &Snapshot| s.ph_regulation),
    },
    ControlSpec {
        label: "pH- Pump",
        field: Field::Flag(|s: &Snapshot| s.ph_pump),
    },
    ControlSpec {
        label: "Orp Regulation",
        field: Field::Flag(|s: &Snapshot| s.orp_regulation),
    },
    ControlSpec {
        label: "Chlorine Pump",
        field: Field::Flag(|s: &Snapshot| s.chlorine_pump),
    },
    ControlSpec {
        label: "pH PID",
        field: Field::Number(|s: &Snapshot| s.ph_worked_setpoint),
    },
    ControlSpec {
        label: "Orp PID",
        field: Field::Number(|s: &Snapshot| s.chlorine_worked_setpoint),
    },
    ControlSpec {
        label: "Filtration Uptime",
        field: Field::Duration(|s: &Snapshot| s.filtration_uptime),
    },
    ControlSpec {
        label: "Filtration Target",
        field: Field::Duration(|s: &Snapshot| s.filtration_target),
    },
    ControlSpec {
        label: "Filtration Start",
        field: Field::Epoch(|s: &Snapshot| s.filtration_start),
    },
    ControlSpec {
        label: "Filtration End",
        field: Field::Epoch(|s: &Snapshot| s.filtration_end),
    },
    ControlSpec {
        label: "pH Pump Limit (min)",
        field: Field::Count(|s: &Snapshot| s.ph_pump_uptime_limit),
    },
    ControlSpec {
        label: "Chlorine Pump Limit (min)",
        field: Field::Count(|s: &Snapshot| s.chlorine_pump_uptime_limit),
    },
    ControlSpec {
        label: "Previous Day Uptime",
        field: Field::Duration(|s: &Snapshot| s.prev_filtration_uptime),
    },
    ControlSpec {
        label: "Previous Day Target",
        field: Field::Duration(|s: &Snapshot| s.prev_filtration_target),
    },
    ControlSpec {
        label: "Reboot Count",
        field: Field::Count(|s: &Snapshot| s.reboot_count),
    },
    ControlSpec {
        label: "Last Reboot",
        field: Field::Epoch(|s: &Snapshot| s.reboot_time),
    },
    ControlSpec {
        label: "Last Daily Reset",
        field: Field::Epoch(|s: &Snapshot| s.reset_time),
    },
];

/// Labels of the control table, in display order.
pub fn labels() -> impl Iterator<Item = &'static str> {
    CONTROLS.iter().map(|c| c.label)
}

/// Display text for a boolean state.
pub fn on_off(state: bool) -> &'static str {
    if state {
        "ON"
    } else {
        "OFF"
    }
}

/// A fully built table: the header plus one row per control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlTable {
    pub headers: [&'static str; 2],
    pub rows: Vec<ControlRow>,
}

impl ControlTable {
    pub fn new(rows: Vec<ControlRow>) -> Self {
        Self { headers: HEADERS, rows }
    }

    /// Whether the table carries only its header row.
    pub fn is_header_only(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Container the rendered table is attached to.
pub trait TableContainer {
    /// Discard whatever table is attached and attach `table` instead.
    fn replace(&mut self, table: ControlTable);
}

/// Holds the table currently on screen.
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    table: Option<ControlTable>,
    rebuilds: u64,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attached table, if any render has happened.
    pub fn table(&self) -> Option<&ControlTable> {
        self.table.as_ref()
    }

    /// Number of times the table has been replaced.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

impl TableContainer for ControlPanel {
    fn replace(&mut self, table: ControlTable) {
        self.table = Some(table);
        self.rebuilds += 1;
    }
}

/// Maps a snapshot onto the control table.
#[derive(Debug)]
pub struct ControlTableRenderer<C: TableContainer> {
    target: C,
    formatter: TimeFormatter,
}

impl<C: TableContainer> ControlTableRenderer<C> {
    pub fn new(target: C, formatter: TimeFormatter) -> Self {
        Self { target, formatter }
    }

    /// Build the rows for a snapshot. No snapshot means no rows.
    pub fn rows(&self, snapshot: Option<&Snapshot>) -> Vec<ControlRow> {
        let Some(snapshot) = snapshot else {
            return Vec::new();
        };

        CONTROLS
            .iter()
            .map(|spec| ControlRow {
                label: spec.label,
                value: self.format_field(spec.field, snapshot),
            })
            .collect()
    }

    /// Rebuild the table and replace the one in the container.
    ///
    /// `None` renders the header row alone.
    pub fn render(&mut self, snapshot: Option<&Snapshot>) {
        let table = ControlTable::new(self.rows(snapshot));
        self.target.replace(table);
    }

    fn format_field(&self, field: Field, snapshot: &Snapshot) -> String {
        match field {
            Field::Flag(get) => on_off(get(snapshot)).to_string(),
            Field::Duration(get) => self.formatter.format_duration(get(snapshot)),
            Field::Epoch(get) => self.formatter.format_epoch(get(snapshot)),
            Field::Number(get) => get(snapshot).to_string(),
            Field::Count(get) => get(snapshot).to_string(),
        }
    }

    pub fn formatter(&self) -> TimeFormatter {
        self.formatter
    }

    /// Change how epoch fields are formatted on the next render.
    pub fn set_formatter(&mut self, formatter: TimeFormatter) {
        self.formatter = formatter;
    }

    /// The container this renderer writes to.
    pub fn target(&self) -> &C {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{EpochStyle, Zone};
    use crate::test_support::{all_off_snapshot, sample_snapshot};

    const FLAG_LABELS: [&str; 7] = [
        "Auto Mode",
        "Winter Mode",
        "Filtration",
        "pH Regulation",
        "pH- Pump",
        "Orp Regulation",
        "Chlorine Pump",
    ];

    fn renderer() -> ControlTableRenderer<ControlPanel> {
        ControlTableRenderer::new(
            ControlPanel::new(),
            TimeFormatter::new(Zone::Utc, EpochStyle::Iso),
        )
    }

    fn value_of<'a>(rows: &'a [ControlRow], label: &str) -> &'a str {
        &rows.iter().find(|r| r.label == label).unwrap().value
    }

    #[test]
    fn test_row_count_and_order() {
        let rows = renderer().rows(Some(&sample_snapshot()));

        assert_eq!(rows.len(), 20);
        let rendered: Vec<&str> = rows.iter().map(|r| r.label).collect();
        let expected: Vec<&str> = labels().collect();
        assert_eq!(rendered, expected);
        assert_eq!(rendered[0], "Auto Mode");
        assert_eq!(rendered[19], "Last Daily Reset");
    }

    #[test]
    fn test_field_transforms() {
        let rows = renderer().rows(Some(&sample_snapshot()));

        assert_eq!(value_of(&rows, "Auto Mode"), "ON");
        assert_eq!(value_of(&rows, "Winter Mode"), "OFF");
        assert_eq!(value_of(&rows, "pH PID"), "20");
        assert_eq!(value_of(&rows, "Filtration Uptime"), "00:30:00");
        assert_eq!(value_of(&rows, "Previous Day Target"), "08:00:00");
        assert_eq!(value_of(&rows, "Filtration Start"), "2023-11-14T22:13:20Z");
        assert_eq!(value_of(&rows, "Reboot Count"), "3");
        assert_eq!(value_of(&rows, "Chlorine Pump Limit (min)"), "45");
    }

    #[test]
    fn test_all_flags_off() {
        let rows = renderer().rows(Some(&all_off_snapshot()));

        for label in FLAG_LABELS {
            assert_eq!(value_of(&rows, label), "OFF", "{}", label);
        }
    }

    #[test]
    fn test_flipping_one_flag_changes_only_its_row() {
        let r = renderer();
        let before = r.rows(Some(&all_off_snapshot()));

        let flipped = Snapshot {
            ph_pump: true,
            ..all_off_snapshot()
        };
        let after = r.rows(Some(&flipped));

        assert_eq!(before.len(), after.len());
        for (old, new) in before.iter().zip(&after) {
            assert_eq!(old.label, new.label);
            if old.label == "pH- Pump" {
                assert_eq!(old.value, "OFF");
                assert_eq!(new.value, "ON");
            } else {
                assert_eq!(old.value, new.value, "{}", old.label);
            }
        }
    }

    #[test]
    fn test_no_snapshot_renders_header_only() {
        let mut r = renderer();
        r.render(None);

        let table = r.target().table().unwrap();
        assert!(table.is_header_only());
        assert_eq!(table.headers, ["Control", "Status"]);
    }

    #[test]
    fn test_render_replaces_table() {
        let mut r = renderer();
        r.render(Some(&sample_snapshot()));
        r.render(Some(&all_off_snapshot()));

        let panel = r.target();
        assert_eq!(panel.rebuilds(), 2);
        assert_eq!(value_of(&panel.table().unwrap().rows, "Auto Mode"), "OFF");
    }

    #[test]
    fn test_identical_snapshots_rebuild_identically() {
        let snapshot = sample_snapshot();
        let mut r = renderer();

        r.render(Some(&snapshot));
        let first = r.target().table().cloned();
        r.render(Some(&snapshot));

        assert_eq!(r.target().table().cloned(), first);
        assert_eq!(r.target().rebuilds(), 2);
    }

    #[test]
    fn test_time_of_day_style() {
        let mut r = renderer();
        r.set_formatter(TimeFormatter::new(Zone::Utc, EpochStyle::Time));

        let rows = r.rows(Some(&sample_snapshot()));
        assert_eq!(value_of(&rows, "Filtration Start"), "22:13:20");
    }
}
