use std::fmt;

use thiserror::Error;

use crate::picker::model::ClockType;

/// Raised while building a picker session; the picker must not open.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("disabled hour '{value}' is not valid for a {clock_type} clock")]
    InvalidHour { value: String, clock_type: ClockType },
    #[error("disabled minute '{value}' is not valid, expected 00-59")]
    InvalidMinute { value: String },
    #[error("'{value}' carries an AM/PM suffix but the clock is 24h")]
    MeridiemNotAllowed { value: String },
    #[error("'{value}' needs an AM/PM suffix on a 12h clock")]
    MissingMeridiem { value: String },
    #[error("invalid disabled interval '{value}': {reason}")]
    InvalidInterval { value: String, reason: String },
    #[error("{field} must be between 1 and {max}, got {value}")]
    InvalidIncrement {
        field: &'static str,
        value: u8,
        max: u8,
    },
    #[error("dial diameter must be a positive number, got {value}")]
    InvalidDialDiameter { value: f64 },
    #[error("invalid seed time '{value}': {reason}")]
    InvalidSeed { value: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    Malformed(String),
    OutOfRange(String),
    Disabled(String),
}

impl FieldIssue {
    pub fn value(&self) -> &str {
        match self {
            FieldIssue::Malformed(value)
            | FieldIssue::OutOfRange(value)
            | FieldIssue::Disabled(value) => value,
        }
    }

    fn reason(&self) -> &'static str {
        match self {
            FieldIssue::Malformed(_) => "malformed",
            FieldIssue::OutOfRange(_) => "out of range",
            FieldIssue::Disabled(_) => "disabled",
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.value(), self.reason())
    }
}

/// Accept-time rejection. Either field, or both, may be flagged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    pub hour: Option<FieldIssue>,
    pub minute: Option<FieldIssue>,
}

impl ValidationError {
    pub fn invalid_hour(&self) -> bool {
        self.hour.is_some()
    }

    pub fn invalid_minute(&self) -> bool {
        self.minute.is_some()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.hour, &self.minute) {
            (Some(hour), Some(minute)) => write!(f, "invalid hour {hour}; invalid minute {minute}"),
            (Some(hour), None) => write!(f, "invalid hour {hour}"),
            (None, Some(minute)) => write!(f, "invalid minute {minute}"),
            (None, None) => write!(f, "invalid time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("picker session is closed")]
    Closed,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
