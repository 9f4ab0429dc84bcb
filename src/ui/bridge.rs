use std::fmt;

use crate::{
    app::state::ViewState,
    domain::weather::{DayOfWeek, ForecastDay, WeatherCategory},
};

/// The renderer only has room for this many forecast items.
pub const MAX_FORECAST_ENTRIES: usize = 5;

const LOCATION: &str = "Location";
// Slot names below are spelled the way the renderer's asset spells them.
const CURRENT_HOUR: &str = "CurrenyHour";
const CURRENT_BLOCK: &str = "CurrentWeather";
const FORECAST_LIST: &str = "Forcast";
const ENTRY_FIELDS: [&str; 5] = ["Weather", "DayOfWeek", "Degree", "FromDegree", "ToDegree"];

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Number(f32),
    Enum(&'static str),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Number(value) => write!(f, "{value:.1}"),
            Self::Enum(label) => f.write_str(label),
        }
    }
}

/// One forecast item as the renderer sees it. `range` is `(min, max)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryProjection {
    pub weather: WeatherCategory,
    pub day: DayOfWeek,
    pub degree: f32,
    pub range: Option<(f32, f32)>,
}

impl EntryProjection {
    /// Range fields are left out entirely when there is no range to show.
    fn fields(&self) -> Vec<(&'static str, PropertyValue)> {
        let mut fields = vec![
            (ENTRY_FIELDS[0], PropertyValue::Enum(self.weather.label())),
            (ENTRY_FIELDS[1], PropertyValue::Enum(self.day.abbreviation())),
            (ENTRY_FIELDS[2], PropertyValue::Number(self.degree)),
        ];
        if let Some((from, to)) = self.range {
            fields.push((ENTRY_FIELDS[3], PropertyValue::Number(from)));
            fields.push((ENTRY_FIELDS[4], PropertyValue::Number(to)));
        }
        fields
    }
}

/// Read-only, rebuilt on every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub location: String,
    pub current_hour: f32,
    pub current: EntryProjection,
    pub forecast: Vec<EntryProjection>,
}

impl Projection {
    /// Flattened `(path, value)` pairs in renderer order.
    #[must_use]
    pub fn properties(&self) -> Vec<(String, PropertyValue)> {
        let mut out = vec![
            (LOCATION.to_string(), PropertyValue::Text(self.location.clone())),
            (
                CURRENT_HOUR.to_string(),
                PropertyValue::Number(self.current_hour),
            ),
        ];
        out.extend(
            self.current
                .fields()
                .into_iter()
                .map(|(field, value)| (format!("{CURRENT_BLOCK}.{field}"), value)),
        );
        for (index, entry) in self.forecast.iter().enumerate() {
            out.extend(
                entry
                    .fields()
                    .into_iter()
                    .map(|(field, value)| (format!("{FORECAST_LIST}[{index}].{field}"), value)),
            );
        }
        out
    }
}

#[allow(clippy::cast_possible_truncation)]
fn narrow(value: f64) -> f32 {
    value as f32
}

fn day_range(day: &ForecastDay) -> (f32, f32) {
    (narrow(day.min_temp), narrow(day.max_temp))
}

/// Projects the view state. The current block's range comes from the first
/// forecast day and is absent until a forecast has loaded.
#[must_use]
pub fn project(view: &ViewState) -> Projection {
    Projection {
        location: view.location_label.clone(),
        current_hour: narrow(f64::from(view.current_hour)),
        current: EntryProjection {
            weather: view.current_category,
            day: view.current_day,
            degree: narrow(view.current_temperature),
            range: view.forecast.first().map(day_range),
        },
        forecast: view
            .forecast
            .iter()
            .take(MAX_FORECAST_ENTRIES)
            .map(|day| EntryProjection {
                weather: day.category,
                day: day.day,
                degree: narrow(day.temperature),
                range: Some(day_range(day)),
            })
            .collect(),
    }
}

/// Named-property seam of the animation renderer.
pub trait PropertySink {
    /// `false` when the renderer has no slot at `path`.
    fn set(&mut self, path: &str, value: &PropertyValue) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeReport {
    pub written: usize,
    pub skipped: usize,
}

/// Writes every property; missing slots are counted and skipped.
pub fn push(projection: &Projection, sink: &mut dyn PropertySink) -> BridgeReport {
    let mut report = BridgeReport::default();
    for (path, value) in projection.properties() {
        if sink.set(&path, &value) {
            report.written += 1;
        } else {
            tracing::debug!(path = %path, "renderer slot unavailable");
            report.skipped += 1;
        }
    }
    report
}

/// In-memory renderer model: a fixed set of slots, each holding the last
/// value written to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyTree {
    slots: Vec<(String, Option<PropertyValue>)>,
}

impl PropertyTree {
    /// Slot layout of the bundled animation with `list_len` forecast items.
    #[must_use]
    pub fn renderer_layout(list_len: usize) -> Self {
        let mut paths = vec![LOCATION.to_string(), CURRENT_HOUR.to_string()];
        paths.extend(
            ENTRY_FIELDS
                .iter()
                .map(|field| format!("{CURRENT_BLOCK}.{field}")),
        );
        for index in 0..list_len {
            paths.extend(
                ENTRY_FIELDS
                    .iter()
                    .map(|field| format!("{FORECAST_LIST}[{index}].{field}")),
            );
        }
        Self {
            slots: paths.into_iter().map(|path| (path, None)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&PropertyValue> {
        self.slots
            .iter()
            .find(|(slot, _)| slot == path)
            .and_then(|(_, value)| value.as_ref())
    }
}

impl PropertySink for PropertyTree {
    fn set(&mut self, path: &str, value: &PropertyValue) -> bool {
        match self.slots.iter_mut().find(|(slot, _)| slot == path) {
            Some((_, slot)) => {
                *slot = Some(value.clone());
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for PropertyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, value) in &self.slots {
            match value {
                Some(value) => writeln!(f, "{path} = {value}")?,
                None => writeln!(f, "{path} = -")?,
            }
        }
        Ok(())
    }
}
