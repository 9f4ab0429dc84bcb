use chrono::{DateTime, Datelike, Local, TimeZone, Timelike, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayOfWeek {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// 0 = Sunday .. 6 = Saturday.
    #[must_use]
    pub fn from_index(index: u32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    #[must_use]
    pub fn index(self) -> u32 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    #[must_use]
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Sunday => "Sun",
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::Sunday,
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeOfDay {
    Midnight,
    EarlyMorning,
    Morning,
    #[default]
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Self::Midnight => 0,
            Self::EarlyMorning => 1,
            Self::Morning => 2,
            Self::Afternoon => 3,
            Self::Evening => 4,
            Self::Night => 5,
        }
    }
}

/// Weekday of a date, already expressed in the zone the caller cares about.
#[must_use]
pub fn day_of_week<D: Datelike>(date: &D) -> DayOfWeek {
    date.weekday().into()
}

#[must_use]
pub fn time_of_day(hour: u32) -> TimeOfDay {
    match hour {
        0..=3 => TimeOfDay::Midnight,
        4..=7 => TimeOfDay::EarlyMorning,
        8..=11 => TimeOfDay::Morning,
        12..=15 => TimeOfDay::Afternoon,
        16..=19 => TimeOfDay::Evening,
        20..=23 => TimeOfDay::Night,
        _ => TimeOfDay::Afternoon,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub hour: u32,
    pub time_of_day: TimeOfDay,
    pub day: DayOfWeek,
}

#[must_use]
pub fn read_clock<Tz: TimeZone>(now: &DateTime<Tz>) -> ClockReading {
    let hour = now.hour();
    ClockReading {
        hour,
        time_of_day: time_of_day(hour),
        day: day_of_week(now),
    }
}

#[must_use]
pub fn local_clock() -> ClockReading {
    read_clock(&Local::now())
}
