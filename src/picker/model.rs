use std::fmt;
use std::ops::RangeInclusive;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::picker::error::ConfigurationError;

pub const DEFAULT_DIAL_DIAMETER: f64 = 256.0;
pub const HOURS_ON_DIAL: u8 = 12;
pub const MINUTES_ON_DIAL: u8 = 60;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum ClockType {
    #[default]
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "24h")]
    Hour24,
}

impl ClockType {
    pub fn label(self) -> &'static str {
        match self {
            ClockType::Hour12 => "12h",
            ClockType::Hour24 => "24h",
        }
    }

    /// Hours a user can see on the face, in display numbering.
    pub fn hour_range(self) -> RangeInclusive<u8> {
        match self {
            ClockType::Hour12 => 1..=12,
            ClockType::Hour24 => 0..=23,
        }
    }

    pub fn accepts_hour(self, hour: u8) -> bool {
        self.hour_range().contains(&hour)
    }
}

impl fmt::Display for ClockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM", alias = "am")]
    Am,
    #[serde(rename = "PM", alias = "pm")]
    Pm,
}

impl Meridiem {
    pub fn label(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("AM") {
            Some(Meridiem::Am)
        } else if label.eq_ignore_ascii_case("PM") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectMode {
    #[default]
    Hour,
    Minute,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub clock_type: ClockType,
    pub increment_hours: u8,
    pub increment_minutes: u8,
    pub switch_to_minutes_after_select_hour: bool,
    pub prevent_default: bool,
    pub mobile: bool,
    pub dial_diameter: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            clock_type: ClockType::Hour12,
            increment_hours: 1,
            increment_minutes: 1,
            switch_to_minutes_after_select_hour: false,
            prevent_default: true,
            mobile: false,
            dial_diameter: DEFAULT_DIAL_DIAMETER,
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(1..HOURS_ON_DIAL).contains(&self.increment_hours) {
            return Err(ConfigurationError::InvalidIncrement {
                field: "increment_hours",
                value: self.increment_hours,
                max: HOURS_ON_DIAL - 1,
            });
        }
        if !(1..MINUTES_ON_DIAL).contains(&self.increment_minutes) {
            return Err(ConfigurationError::InvalidIncrement {
                field: "increment_minutes",
                value: self.increment_minutes,
                max: MINUTES_ON_DIAL - 1,
            });
        }
        if !self.dial_diameter.is_finite() || self.dial_diameter <= 0.0 {
            return Err(ConfigurationError::InvalidDialDiameter {
                value: self.dial_diameter,
            });
        }
        Ok(())
    }

    /// Whether the hour/minute labels accept typed input.
    pub fn editable(&self) -> bool {
        self.mobile || !self.prevent_default
    }
}

/// Initial hour/minute/meridiem a session opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Option<Meridiem>,
}

impl Seed {
    pub fn default_for(clock_type: ClockType) -> Self {
        Self {
            hour: 12,
            minute: 0,
            meridiem: match clock_type {
                ClockType::Hour12 => Some(Meridiem::Am),
                ClockType::Hour24 => None,
            },
        }
    }

    pub fn validate(self, clock_type: ClockType) -> Result<Self, ConfigurationError> {
        let text = format_time_text(self.hour, self.minute, self.meridiem);
        if !clock_type.accepts_hour(self.hour) {
            return Err(ConfigurationError::InvalidSeed {
                value: text,
                reason: format!("hour {} is outside the {clock_type} range", self.hour),
            });
        }
        if self.minute >= MINUTES_ON_DIAL {
            return Err(ConfigurationError::InvalidSeed {
                value: text,
                reason: format!("minute {} is outside 00-59", self.minute),
            });
        }
        match (clock_type, self.meridiem) {
            (ClockType::Hour12, None) => Ok(Self {
                meridiem: Some(Meridiem::Am),
                ..self
            }),
            (ClockType::Hour24, Some(_)) => Err(ConfigurationError::InvalidSeed {
                value: text,
                reason: "AM/PM is not used by a 24h clock".to_string(),
            }),
            _ => Ok(self),
        }
    }

    pub fn parse(input: &str, clock_type: ClockType) -> Result<Self, ConfigurationError> {
        let trimmed = input.trim();
        let seed = match clock_type {
            ClockType::Hour12 => {
                let time = NaiveTime::parse_from_str(trimmed, "%I:%M %p").map_err(|_| {
                    ConfigurationError::InvalidSeed {
                        value: input.to_string(),
                        reason: "expected HH:MM AM or HH:MM PM".to_string(),
                    }
                })?;
                let (is_pm, hour) = time.hour12();
                Seed {
                    hour: hour as u8,
                    minute: time.minute() as u8,
                    meridiem: Some(if is_pm { Meridiem::Pm } else { Meridiem::Am }),
                }
            }
            ClockType::Hour24 => {
                let time = NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| {
                    ConfigurationError::InvalidSeed {
                        value: input.to_string(),
                        reason: "expected HH:MM".to_string(),
                    }
                })?;
                Seed {
                    hour: time.hour() as u8,
                    minute: time.minute() as u8,
                    meridiem: None,
                }
            }
        };
        seed.validate(clock_type)
    }
}

/// A time that passed the accept gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcceptedTime {
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Option<Meridiem>,
}

impl AcceptedTime {
    pub fn text(&self) -> String {
        format_time_text(self.hour, self.minute, self.meridiem)
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(
            u32::from(to_hour24(self.hour, self.meridiem)),
            u32::from(self.minute),
            0,
        )
    }
}

pub fn format_two_digit(value: u8) -> String {
    format!("{value:02}")
}

/// Host input text: `"HH:MM"` on a 24h clock, `"HH:MM AM"` on a 12h clock.
pub fn format_time_text(hour: u8, minute: u8, meridiem: Option<Meridiem>) -> String {
    match meridiem {
        Some(meridiem) => format!("{hour:02}:{minute:02} {meridiem}"),
        None => format!("{hour:02}:{minute:02}"),
    }
}

/// Maps a display hour onto 0..=23.
pub fn to_hour24(hour: u8, meridiem: Option<Meridiem>) -> u8 {
    match meridiem {
        None => hour % 24,
        Some(Meridiem::Am) => hour % 12,
        Some(Meridiem::Pm) => hour % 12 + 12,
    }
}

/// Maps 0..=23 onto the 12h face numbering (1..=12).
pub fn to_hour12(hour24: u8) -> u8 {
    match hour24 % 12 {
        0 => 12,
        hour => hour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ClockConfig::default();
        config.validate().expect("default config");
        assert!(!config.editable());
    }

    #[test]
    fn editable_follows_mobile_and_prevent_default() {
        let mobile = ClockConfig {
            mobile: true,
            ..ClockConfig::default()
        };
        assert!(mobile.editable());

        let passive = ClockConfig {
            prevent_default: false,
            ..ClockConfig::default()
        };
        assert!(passive.editable());
    }

    #[test]
    fn rejects_zero_and_oversized_increments() {
        let zero = ClockConfig {
            increment_minutes: 0,
            ..ClockConfig::default()
        };
        let err = zero.validate().expect_err("zero increment");
        assert!(err.to_string().contains("increment_minutes"));

        let oversized = ClockConfig {
            increment_hours: 12,
            ..ClockConfig::default()
        };
        assert!(oversized.validate().is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: ClockConfig =
            serde_json::from_str(r#"{ "clock_type": "24h", "increment_minutes": 5 }"#)
                .expect("config json");
        assert_eq!(config.clock_type, ClockType::Hour24);
        assert_eq!(config.increment_minutes, 5);
        assert_eq!(config.increment_hours, 1);
        assert!(config.prevent_default);
        assert_eq!(config.dial_diameter, DEFAULT_DIAL_DIAMETER);
    }

    #[test]
    fn seed_parses_both_clock_types() {
        let seed = Seed::parse("09:05 PM", ClockType::Hour12).expect("12h seed");
        assert_eq!(seed.hour, 9);
        assert_eq!(seed.minute, 5);
        assert_eq!(seed.meridiem, Some(Meridiem::Pm));

        let seed = Seed::parse("00:45", ClockType::Hour24).expect("24h seed");
        assert_eq!(seed.hour, 0);
        assert_eq!(seed.meridiem, None);

        assert!(Seed::parse("13:00 PM", ClockType::Hour12).is_err());
        assert!(Seed::parse("noon", ClockType::Hour24).is_err());
    }

    #[test]
    fn seed_validation_fills_and_rejects_meridiem() {
        let seed = Seed {
            hour: 7,
            minute: 0,
            meridiem: None,
        };
        assert_eq!(
            seed.validate(ClockType::Hour12).expect("12h").meridiem,
            Some(Meridiem::Am)
        );

        let seed = Seed {
            hour: 7,
            minute: 0,
            meridiem: Some(Meridiem::Pm),
        };
        assert!(seed.validate(ClockType::Hour24).is_err());
        assert!(Seed::default_for(ClockType::Hour12).validate(ClockType::Hour12).is_ok());
    }

    #[test]
    fn hour_conversions_round_trip_through_the_face() {
        assert_eq!(to_hour24(12, Some(Meridiem::Am)), 0);
        assert_eq!(to_hour24(12, Some(Meridiem::Pm)), 12);
        assert_eq!(to_hour24(3, Some(Meridiem::Pm)), 15);
        assert_eq!(to_hour12(0), 12);
        assert_eq!(to_hour12(15), 3);
        assert_eq!(format_time_text(0, 5, None), "00:05");
        assert_eq!(format_time_text(9, 30, Some(Meridiem::Pm)), "09:30 PM");
    }

    #[test]
    fn accepted_time_maps_to_wall_clock() {
        let accepted = AcceptedTime {
            hour: 12,
            minute: 15,
            meridiem: Some(Meridiem::Am),
        };
        assert_eq!(accepted.text(), "12:15 AM");
        assert_eq!(
            accepted.to_naive_time(),
            NaiveTime::from_hms_opt(0, 15, 0)
        );
    }
}
