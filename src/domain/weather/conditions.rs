/// Temperatures strictly above this on a clear day count as a heat wave.
pub const HEAT_WAVE_THRESHOLD_F: f64 = 86.0;

/// Fallback internal code for anything the provider reports that we do not map.
pub const CLEAR_SKY_CODE: i32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherCategory {
    #[default]
    Clear,
    Rain,
    Snow,
    HeatWave,
}

impl WeatherCategory {
    /// Enum value the animation expects for this category.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clear => "Clear Skies",
            Self::Rain => "Rainy",
            Self::Snow => "Snowy",
            Self::HeatWave => "Heat Wave",
        }
    }

    #[must_use]
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Clear => "sun.max.fill",
            Self::Rain => "cloud.rain.fill",
            Self::Snow => "snow",
            Self::HeatWave => "thermometer.sun.fill",
        }
    }

    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Clear => 0,
            Self::Rain => 1,
            Self::Snow => 2,
            Self::HeatWave => 3,
        }
    }
}

/// Maps an internal code to a category. Only clear sky (800) looks at the
/// temperature, which must be in Fahrenheit.
#[must_use]
pub fn classify(code: i32, temperature_f: f64) -> WeatherCategory {
    match code {
        200..=299 | 300..=599 | 701..=781 => WeatherCategory::Rain,
        600..=699 => WeatherCategory::Snow,
        800 if temperature_f > HEAT_WAVE_THRESHOLD_F => WeatherCategory::HeatWave,
        _ => WeatherCategory::Clear,
    }
}

/// Open-Meteo WMO code to internal code.
#[must_use]
pub fn translate_provider_code(provider_code: i32) -> i32 {
    match provider_code {
        1 | 2 => 801,
        3 => 804,
        45 | 48 => 741,
        51 | 53 | 55 => 300,
        61 | 63 | 65 => 500,
        71 | 73 | 75 | 77 => 600,
        80..=82 => 520,
        85 | 86 => 620,
        95 | 96 | 99 => 200,
        _ => CLEAR_SKY_CODE,
    }
}

#[must_use]
pub fn weather_main(code: i32) -> &'static str {
    match code {
        200..=299 => "Thunderstorm",
        300..=399 => "Drizzle",
        500..=599 => "Rain",
        600..=699 => "Snow",
        700..=799 => "Atmosphere",
        801..=804 => "Clouds",
        _ => "Clear",
    }
}

const WEATHER_DESCRIPTIONS: &[(i32, &str)] = &[
    (200, "thunderstorm with light rain"),
    (201, "thunderstorm with rain"),
    (300, "light drizzle"),
    (500, "light rain"),
    (600, "light snow"),
    (741, "fog"),
    (800, "clear sky"),
    (801, "few clouds"),
    (804, "overcast clouds"),
];

#[must_use]
pub fn weather_description(code: i32) -> &'static str {
    WEATHER_DESCRIPTIONS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
        .unwrap_or("clear sky")
}
