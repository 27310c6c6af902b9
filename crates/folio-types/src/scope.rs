use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumString;
use utoipa::ToSchema;

/// Time window the portfolio chart covers.
///
/// Variants are declared shortest first, so the derived ordering follows the
/// scope duration.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Scope {
    #[serde(rename = "1H")]
    #[strum(serialize = "1H")]
    OneHour,
    #[serde(rename = "1D")]
    #[strum(serialize = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    #[strum(serialize = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    #[strum(serialize = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    #[strum(serialize = "3M")]
    ThreeMonth,
    #[serde(rename = "6M")]
    #[strum(serialize = "6M")]
    SixMonth,
    #[default]
    #[serde(rename = "1Y")]
    #[strum(serialize = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    #[strum(serialize = "3Y")]
    ThreeYear,
    #[serde(rename = "5Y")]
    #[strum(serialize = "5Y")]
    FiveYear,
}

impl Scope {
    pub const ALL: [Self; 9] = [
        Self::OneHour,
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
        Self::ThreeMonth,
        Self::SixMonth,
        Self::OneYear,
        Self::ThreeYear,
        Self::FiveYear,
    ];

    /// Number of samples requested from upstream for one fetch.
    pub const SAMPLES: u32 = 40;

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneHour => "1H",
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::ThreeMonth => "3M",
            Self::SixMonth => "6M",
            Self::OneYear => "1Y",
            Self::ThreeYear => "3Y",
            Self::FiveYear => "5Y",
        }
    }

    /// Months count as 30 days and years as 365 days.
    pub const fn minutes(self) -> i64 {
        const DAY: i64 = 60 * 24;
        match self {
            Self::OneHour => 60,
            Self::OneDay => DAY,
            Self::OneWeek => DAY * 7,
            Self::OneMonth => DAY * 30,
            Self::ThreeMonth => DAY * 30 * 3,
            Self::SixMonth => DAY * 30 * 6,
            Self::OneYear => DAY * 365,
            Self::ThreeYear => DAY * 365 * 3,
            Self::FiveYear => DAY * 365 * 5,
        }
    }

    /// Interval literal understood by the upstream SQL endpoint.
    pub const fn interval(self) -> &'static str {
        match self {
            Self::OneHour => "1 hour",
            Self::OneDay => "1 day",
            Self::OneWeek => "1 week",
            Self::OneMonth => "1 month",
            Self::ThreeMonth => "3 month",
            Self::SixMonth => "6 month",
            Self::OneYear => "1 year",
            Self::ThreeYear => "3 year",
            Self::FiveYear => "5 year",
        }
    }

    pub const fn samples(self) -> u32 {
        Self::SAMPLES
    }

    pub const fn resolution(self) -> Resolution {
        Resolution::for_scope(self)
    }

    /// Only scopes of a month or longer are offered by the scope picker.
    pub const fn is_selectable(self) -> bool {
        self.minutes() >= Self::OneMonth.minutes()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width of a time bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, Hash, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Second,
    Minute,
    Hour,
    Month,
}

impl Resolution {
    pub const fn for_scope(scope: Scope) -> Self {
        let minutes = scope.minutes();
        if minutes <= Scope::OneDay.minutes() {
            Self::Second
        } else if minutes <= Scope::OneWeek.minutes() {
            Self::Minute
        } else if minutes <= Scope::OneYear.minutes() {
            Self::Hour
        } else {
            Self::Month
        }
    }

    /// Truncates `instant` to the start of its bucket, in UTC.
    ///
    /// Never rounds: 14:08:58 at hour resolution is 14:00:00.
    pub fn floor(self, instant: DateTime<Utc>) -> DateTime<Utc> {
        let naive = instant.naive_utc();
        let date = naive.date();
        let floored = match self {
            Self::Second => date.and_hms_opt(naive.hour(), naive.minute(), naive.second()),
            Self::Minute => date.and_hms_opt(naive.hour(), naive.minute(), 0),
            Self::Hour => date.and_hms_opt(naive.hour(), 0, 0),
            Self::Month => date
                .with_day(1)
                .and_then(|first_day| first_day.and_hms_opt(0, 0, 0)),
        };

        floored.map_or(instant, |naive| Utc.from_utc_datetime(&naive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_resolution_ladder() {
        assert_eq!(Scope::OneHour.resolution(), Resolution::Second);
        assert_eq!(Scope::OneDay.resolution(), Resolution::Second);
        assert_eq!(Scope::OneWeek.resolution(), Resolution::Minute);
        assert_eq!(Scope::OneMonth.resolution(), Resolution::Hour);
        assert_eq!(Scope::SixMonth.resolution(), Resolution::Hour);
        assert_eq!(Scope::OneYear.resolution(), Resolution::Hour);
        assert_eq!(Scope::ThreeYear.resolution(), Resolution::Month);
        assert_eq!(Scope::FiveYear.resolution(), Resolution::Month);
    }

    #[test]
    fn test_floor_second_drops_subseconds() {
        let instant = at("2023-05-17T14:08:58.734Z");
        assert_eq!(Resolution::Second.floor(instant), at("2023-05-17T14:08:58Z"));
    }

    #[test]
    fn test_floor_minute() {
        let instant = at("2023-05-17T14:08:58.734Z");
        assert_eq!(Resolution::Minute.floor(instant), at("2023-05-17T14:08:00Z"));
    }

    #[test]
    fn test_floor_hour_truncates_instead_of_rounding() {
        let instant = at("2023-05-17T14:58:59Z");
        assert_eq!(Resolution::Hour.floor(instant), at("2023-05-17T14:00:00Z"));
    }

    #[test]
    fn test_floor_month() {
        let instant = at("2023-05-31T23:59:59Z");
        assert_eq!(Resolution::Month.floor(instant), at("2023-05-01T00:00:00Z"));
    }

    #[test]
    fn test_floor_uses_utc_components() {
        // 01:30 at +02:00 is still the previous day in UTC.
        let instant = DateTime::parse_from_rfc3339("2023-06-01T01:30:00+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Resolution::Month.floor(instant), at("2023-05-01T00:00:00Z"));
        assert_eq!(Resolution::Hour.floor(instant), at("2023-05-31T23:00:00Z"));
    }

    #[test]
    fn test_floor_is_idempotent() {
        let instant = at("2024-02-29T12:34:56Z");
        for resolution in [
            Resolution::Second,
            Resolution::Minute,
            Resolution::Hour,
            Resolution::Month,
        ] {
            let once = resolution.floor(instant);
            assert_eq!(resolution.floor(once), once);
        }
    }

    #[test]
    fn test_scope_parsing_and_labels() {
        assert_eq!("1y".parse::<Scope>().unwrap(), Scope::OneYear);
        assert_eq!("3M".parse::<Scope>().unwrap(), Scope::ThreeMonth);
        assert!("2W".parse::<Scope>().is_err());
        for scope in Scope::ALL {
            assert_eq!(scope.to_string(), scope.as_str());
        }
        assert_eq!(
            serde_json::to_string(&Scope::FiveYear).unwrap(),
            "\"5Y\"".to_string()
        );
    }

    #[test]
    fn test_selectable_scopes_start_at_one_month() {
        let selectable: Vec<Scope> = Scope::ALL.into_iter().filter(|s| s.is_selectable()).collect();
        assert_eq!(selectable.first(), Some(&Scope::OneMonth));
        assert_eq!(selectable.len(), 6);
        assert!(Scope::ALL.windows(2).all(|w| w[0] < w[1]));
    }
}
