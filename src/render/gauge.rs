//! Gauge rendering: pushes snapshot values into gauge widgets.

use std::collections::BTreeMap;

use crate::data::Snapshot;

/// A gauge widget on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GaugeId {
    AirInTemp,
    AirOutTemp,
    WaterTemp,
    Ph,
    Orp,
    Pressure,
    PhTankFill,
    ChlorineTankFill,
    /// Derived: today's filtration uptime as a percentage of the target.
    Filtration,
}

impl GaugeId {
    /// All gauges in display order.
    pub const ALL: [GaugeId; 9] = [
        GaugeId::AirInTemp,
        GaugeId::AirOutTemp,
        GaugeId::WaterTemp,
        GaugeId::Ph,
        GaugeId::Orp,
        GaugeId::Pressure,
        GaugeId::PhTankFill,
        GaugeId::ChlorineTankFill,
        GaugeId::Filtration,
    ];

    /// Element id of the widget on the controller's own web page.
    pub fn element(&self) -> &'static str {
        match self {
            GaugeId::AirInTemp => "gaugeTempAirIn",
            GaugeId::AirOutTemp => "gaugeTempAirOut",
            GaugeId::WaterTemp => "gaugeTempWater",
            GaugeId::Ph => "gaugePH",
            GaugeId::Orp => "gaugeORP",
            GaugeId::Pressure => "gaugePressure",
            GaugeId::PhTankFill => "gaugePhTankFill",
            GaugeId::ChlorineTankFill => "gaugeChlorineTankFill",
            GaugeId::Filtration => "gaugeFiltration",
        }
    }

    /// Returns the display title for this gauge.
    pub fn title(&self) -> &'static str {
        match self {
            GaugeId::AirInTemp => "Air In",
            GaugeId::AirOutTemp => "Air Out",
            GaugeId::WaterTemp => "Water",
            GaugeId::Ph => "pH",
            GaugeId::Orp => "ORP",
            GaugeId::Pressure => "Pressure",
            GaugeId::PhTankFill => "pH- Tank",
            GaugeId::ChlorineTankFill => "Chlorine Tank",
            GaugeId::Filtration => "Filtration",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            GaugeId::AirInTemp | GaugeId::AirOutTemp | GaugeId::WaterTemp => "°C",
            GaugeId::Ph => "",
            GaugeId::Orp => "mV",
            GaugeId::Pressure => "bar",
            GaugeId::PhTankFill | GaugeId::ChlorineTankFill | GaugeId::Filtration => "%",
        }
    }

    /// Scale of the gauge dial as `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        match self {
            GaugeId::AirInTemp | GaugeId::AirOutTemp => (-10.0, 50.0),
            GaugeId::WaterTemp => (0.0, 40.0),
            GaugeId::Ph => (6.0, 9.0),
            GaugeId::Orp => (0.0, 1000.0),
            GaugeId::Pressure => (0.0, 3.0),
            GaugeId::PhTankFill | GaugeId::ChlorineTankFill | GaugeId::Filtration => (0.0, 100.0),
        }
    }
}

/// A plain text temperature readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextId {
    AirInTemp,
    AirOutTemp,
    WaterTemp,
}

impl TextId {
    pub const ALL: [TextId; 3] = [TextId::AirInTemp, TextId::AirOutTemp, TextId::WaterTemp];

    /// Element id of the text node on the controller's own web page.
    pub fn element(&self) -> &'static str {
        match self {
            TextId::AirInTemp => "AirInTemp",
            TextId::AirOutTemp => "AirOutTemp",
            TextId::WaterTemp => "WaterTemp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TextId::AirInTemp => "Air in",
            TextId::AirOutTemp => "Air out",
            TextId::WaterTemp => "Water",
        }
    }
}

/// Write-only target for gauge updates.
pub trait GaugeSink {
    /// Set the value shown by a gauge.
    fn set_gauge(&mut self, id: GaugeId, value: f64);

    /// Set the text of a readout.
    fn set_text(&mut self, id: TextId, text: String);
}

/// Values currently shown by the gauge widgets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaugeBoard {
    values: BTreeMap<GaugeId, f64>,
    texts: BTreeMap<TextId, String>,
}

impl GaugeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value a gauge shows, if it has been set.
    pub fn value(&self, id: GaugeId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn text(&self, id: TextId) -> Option<&str> {
        self.texts.get(&id).map(String::as_str)
    }

    /// Whether no value has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl GaugeSink for GaugeBoard {
    fn set_gauge(&mut self, id: GaugeId, value: f64) {
        self.values.insert(id, value);
    }

    fn set_text(&mut self, id: TextId, text: String) {
        self.texts.insert(id, text);
    }
}

/// Today's filtration uptime as a percentage of the daily target.
///
/// A non-positive target yields `0.0`; negative uptime counts as zero.
pub fn filtration_ratio(uptime: i64, target: i64) -> f64 {
    if target <= 0 {
        return 0.0;
    }
    uptime.max(0) as f64 / target as f64 * 100.0
}

/// Maps a snapshot onto the gauge widgets.
///
/// The renderer owns its target. Updates are one-way: nothing is read back.
#[derive(Debug, Default)]
pub struct GaugeRenderer<S: GaugeSink> {
    target: S,
}

impl<S: GaugeSink> GaugeRenderer<S> {
    pub fn new(target: S) -> Self {
        Self { target }
    }

    /// Push every gauge value (eight direct readings and the filtration
    /// ratio) plus the three temperature readouts.
    pub fn render(&mut self, snapshot: &Snapshot) {
        let direct = [
            (GaugeId::AirInTemp, snapshot.air_in_temp),
            (GaugeId::AirOutTemp, snapshot.air_out_temp),
            (GaugeId::WaterTemp, snapshot.water_temp),
            (GaugeId::Ph, snapshot.ph),
            (GaugeId::Orp, snapshot.orp),
            (GaugeId::Pressure, snapshot.pressure),
            (GaugeId::PhTankFill, snapshot.ph_tank_fill),
            (GaugeId::ChlorineTankFill, snapshot.chlorine_tank_fill),
        ];
        for (id, value) in direct {
            self.target.set_gauge(id, value);
        }
        self.target.set_gauge(
            GaugeId::Filtration,
            filtration_ratio(snapshot.filtration_uptime, snapshot.filtration_target),
        );

        let readouts = [
            (TextId::AirInTemp, snapshot.air_in_temp),
            (TextId::AirOutTemp, snapshot.air_out_temp),
            (TextId::WaterTemp, snapshot.water_temp),
        ];
        for (id, celsius) in readouts {
            self.target.set_text(id, format!("{:.1} °C", celsius));
        }
    }

    /// The widget target this renderer writes to.
    pub fn target(&self) -> &S {
        &self.target
    }
}
