use std::collections::BTreeSet;

use chrono::{NaiveTime, Timelike};
use serde::Deserialize;

use crate::picker::error::{ConfigurationError, FieldIssue, ValidationError};
use crate::picker::model::{
    AcceptedTime, ClockType, MINUTES_ON_DIAL, Meridiem, to_hour12, to_hour24,
};

/// Option-level description of forbidden times, as a host supplies it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DisabledTimeOptions {
    #[serde(default)]
    pub hours: Vec<TimeToken>,
    #[serde(default)]
    pub minutes: Vec<TimeToken>,
    #[serde(default)]
    pub interval: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimeToken {
    Number(u32),
    Text(String),
}

impl TimeToken {
    fn text(&self) -> String {
        match self {
            TimeToken::Number(value) => value.to_string(),
            TimeToken::Text(text) => text.clone(),
        }
    }
}

impl From<&str> for TimeToken {
    fn from(value: &str) -> Self {
        TimeToken::Text(value.to_string())
    }
}

/// A disabled hour; `meridiem: None` covers both halves of the day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HourMark {
    pub hour: u8,
    pub meridiem: Option<Meridiem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisabledTimeSpec {
    Simple(SimpleDisabled),
    Interval(DisabledInterval),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimpleDisabled {
    hours: BTreeSet<HourMark>,
    minutes: BTreeSet<u8>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IntervalBound {
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Option<Meridiem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisabledInterval {
    start: IntervalBound,
    end: IntervalBound,
    range_hours: BTreeSet<u8>,
    start_minutes: BTreeSet<u8>,
    end_minutes: BTreeSet<u8>,
}

impl DisabledTimeSpec {
    /// Builds the rules once, failing on any value the clock type cannot show.
    ///
    /// An `interval` wins over `hours`/`minutes`. Empty options yield `None`.
    pub fn from_options(
        options: &DisabledTimeOptions,
        clock_type: ClockType,
    ) -> Result<Option<Self>, ConfigurationError> {
        if let Some(interval) = options.interval.as_deref() {
            return Ok(Some(DisabledTimeSpec::Interval(DisabledInterval::parse(
                interval, clock_type,
            )?)));
        }
        if options.hours.is_empty() && options.minutes.is_empty() {
            return Ok(None);
        }

        let mut simple = SimpleDisabled::default();
        for token in &options.hours {
            simple.hours.insert(parse_hour_token(&token.text(), clock_type)?);
        }
        for token in &options.minutes {
            simple.minutes.insert(parse_minute_token(&token.text())?);
        }
        Ok(Some(DisabledTimeSpec::Simple(simple)))
    }

    pub fn is_hour_disabled(&self, hour: u8, meridiem: Option<Meridiem>) -> bool {
        match self {
            DisabledTimeSpec::Simple(simple) => {
                simple.hours.contains(&HourMark {
                    hour,
                    meridiem: None,
                }) || meridiem.is_some_and(|meridiem| {
                    simple.hours.contains(&HourMark {
                        hour,
                        meridiem: Some(meridiem),
                    })
                })
            }
            DisabledTimeSpec::Interval(interval) => {
                interval.applies_to(meridiem) && interval.range_hours.contains(&hour)
            }
        }
    }

    pub fn is_minute_disabled(
        &self,
        minute: u8,
        selected_hour: u8,
        meridiem: Option<Meridiem>,
    ) -> bool {
        match self {
            DisabledTimeSpec::Simple(simple) => simple.minutes.contains(&minute),
            DisabledTimeSpec::Interval(interval) => {
                interval.masks_minute(minute, Some(selected_hour), meridiem)
            }
        }
    }

    pub fn is_time_disabled(&self, hour: u8, minute: u8, meridiem: Option<Meridiem>) -> bool {
        self.is_hour_disabled(hour, meridiem) || self.is_minute_disabled(minute, hour, meridiem)
    }

    /// Every face hour that cannot be picked in the given meridiem (or on a 24h face).
    pub fn disabled_hours(&self, clock_type: ClockType, meridiem: Option<Meridiem>) -> BTreeSet<u8> {
        clock_type
            .hour_range()
            .filter(|hour| self.is_hour_disabled(*hour, meridiem))
            .collect()
    }

    pub fn disabled_minutes(&self, selected_hour: u8, meridiem: Option<Meridiem>) -> BTreeSet<u8> {
        (0..MINUTES_ON_DIAL)
            .filter(|minute| self.is_minute_disabled(*minute, selected_hour, meridiem))
            .collect()
    }
}

impl SimpleDisabled {
    pub fn hours(&self) -> &BTreeSet<HourMark> {
        &self.hours
    }

    pub fn minutes(&self) -> &BTreeSet<u8> {
        &self.minutes
    }
}

impl DisabledInterval {
    pub fn new(
        start: IntervalBound,
        end: IntervalBound,
        clock_type: ClockType,
    ) -> Result<Self, ConfigurationError> {
        for bound in [start, end] {
            check_bound(bound, clock_type)?;
        }

        let start24 = to_hour24(start.hour, start.meridiem);
        let end24 = to_hour24(end.hour, end.meridiem);
        if start24 == end24 {
            if start.minute >= end.minute {
                return Err(ConfigurationError::InvalidInterval {
                    value: format!("{} - {}", bound_text(start), bound_text(end)),
                    reason: "end must come after start within the same hour".to_string(),
                });
            }
            // Both bounds in one hour: only the minutes between them go.
            return Ok(Self {
                start,
                end,
                range_hours: BTreeSet::new(),
                start_minutes: (start.minute..end.minute).collect(),
                end_minutes: BTreeSet::new(),
            });
        }

        let mut range_hours = BTreeSet::new();
        let mut hour = start24;
        while hour != end24 {
            range_hours.insert(match clock_type {
                ClockType::Hour12 => to_hour12(hour),
                ClockType::Hour24 => hour,
            });
            hour = (hour + 1) % 24;
        }

        Ok(Self {
            start,
            end,
            range_hours,
            start_minutes: (0..start.minute).collect(),
            // An interval ending on the hour leaves the end hour whole.
            end_minutes: match end.minute {
                0 => BTreeSet::new(),
                minute => (minute..MINUTES_ON_DIAL).collect(),
            },
        })
    }

    /// Parses `"HH:MM AM - HH:MM PM"` (12h) or `"HH:MM - HH:MM"` (24h).
    pub fn parse(input: &str, clock_type: ClockType) -> Result<Self, ConfigurationError> {
        let Some((first, second)) = input.split_once('-') else {
            return Err(ConfigurationError::InvalidInterval {
                value: input.to_string(),
                reason: "expected '<start> - <end>'".to_string(),
            });
        };
        let start = parse_bound(input, first.trim(), clock_type)?;
        let end = parse_bound(input, second.trim(), clock_type)?;
        Self::new(start, end, clock_type)
    }

    pub fn start(&self) -> IntervalBound {
        self.start
    }

    pub fn end(&self) -> IntervalBound {
        self.end
    }

    pub fn range_hours(&self) -> &BTreeSet<u8> {
        &self.range_hours
    }

    pub fn start_minutes(&self) -> &BTreeSet<u8> {
        &self.start_minutes
    }

    pub fn end_minutes(&self) -> &BTreeSet<u8> {
        &self.end_minutes
    }

    /// Bounds in one meridiem only bite in that meridiem; mixed bounds span AM→PM.
    fn applies_to(&self, meridiem: Option<Meridiem>) -> bool {
        match (self.start.meridiem, self.end.meridiem) {
            (Some(start), Some(end)) if start == end => meridiem == Some(start),
            _ => true,
        }
    }

    fn masks_minute(
        &self,
        minute: u8,
        selected_hour: Option<u8>,
        meridiem: Option<Meridiem>,
    ) -> bool {
        let Some(hour) = selected_hour else {
            return false;
        };
        if !self.applies_to(meridiem) {
            return false;
        }
        (hour == self.end.hour && self.end_minutes.contains(&minute))
            || (hour == self.start.hour && self.start_minutes.contains(&minute))
    }
}

/// Accept-time gate shared by the drag path and typed input.
pub fn validate_on_accept(
    hour_text: &str,
    minute_text: &str,
    clock_type: ClockType,
    meridiem: Option<Meridiem>,
    disabled: Option<&DisabledTimeSpec>,
) -> Result<AcceptedTime, ValidationError> {
    let hour = parse_field(hour_text, |value| clock_type.accepts_hour(value));
    let minute = parse_field(minute_text, |value| value < MINUTES_ON_DIAL);

    let mut hour_issue = hour.as_ref().err().cloned();
    let mut minute_issue = minute.as_ref().err().cloned();

    if let Some(spec) = disabled {
        if let Ok(value) = &hour
            && spec.is_hour_disabled(*value, meridiem)
        {
            hour_issue = Some(FieldIssue::Disabled(hour_text.trim().to_string()));
        }
        if let Ok(value) = &minute {
            let blocked = match spec {
                DisabledTimeSpec::Simple(simple) => simple.minutes.contains(value),
                DisabledTimeSpec::Interval(interval) => {
                    interval.masks_minute(*value, hour.as_ref().ok().copied(), meridiem)
                }
            };
            if blocked {
                minute_issue = Some(FieldIssue::Disabled(minute_text.trim().to_string()));
            }
        }
    }

    match (hour, minute, hour_issue, minute_issue) {
        (Ok(hour), Ok(minute), None, None) => Ok(AcceptedTime {
            hour,
            minute,
            meridiem: match clock_type {
                ClockType::Hour12 => Some(meridiem.unwrap_or(Meridiem::Am)),
                ClockType::Hour24 => None,
            },
        }),
        (_, _, hour, minute) => Err(ValidationError { hour, minute }),
    }
}

fn parse_field(text: &str, in_range: impl Fn(u8) -> bool) -> Result<u8, FieldIssue> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.len() > 2 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldIssue::Malformed(trimmed.to_string()));
    }
    let value: u8 = trimmed
        .parse()
        .map_err(|_| FieldIssue::Malformed(trimmed.to_string()))?;
    if !in_range(value) {
        return Err(FieldIssue::OutOfRange(trimmed.to_string()));
    }
    Ok(value)
}

fn parse_hour_token(text: &str, clock_type: ClockType) -> Result<HourMark, ConfigurationError> {
    let invalid = || ConfigurationError::InvalidHour {
        value: text.to_string(),
        clock_type,
    };
    let mut parts = text.split_whitespace();
    let number = parts.next().ok_or_else(invalid)?;
    let suffix = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let hour = parse_field(number, |value| clock_type.accepts_hour(value)).map_err(|_| invalid())?;

    let meridiem = match (suffix, clock_type) {
        (None, _) => None,
        (Some(_), ClockType::Hour24) => {
            return Err(ConfigurationError::MeridiemNotAllowed {
                value: text.to_string(),
            });
        }
        (Some(label), ClockType::Hour12) => Some(Meridiem::from_label(label).ok_or_else(invalid)?),
    };
    Ok(HourMark { hour, meridiem })
}

fn parse_minute_token(text: &str) -> Result<u8, ConfigurationError> {
    parse_field(text, |value| value < MINUTES_ON_DIAL).map_err(|_| {
        ConfigurationError::InvalidMinute {
            value: text.to_string(),
        }
    })
}

fn parse_bound(
    interval: &str,
    text: &str,
    clock_type: ClockType,
) -> Result<IntervalBound, ConfigurationError> {
    let as_12h = NaiveTime::parse_from_str(text, "%I:%M %p");
    let as_24h = NaiveTime::parse_from_str(text, "%H:%M");
    match (clock_type, as_12h, as_24h) {
        (ClockType::Hour12, Ok(time), _) => {
            let (is_pm, hour) = time.hour12();
            Ok(IntervalBound {
                hour: hour as u8,
                minute: time.minute() as u8,
                meridiem: Some(if is_pm { Meridiem::Pm } else { Meridiem::Am }),
            })
        }
        (ClockType::Hour12, Err(_), Ok(_)) => Err(ConfigurationError::MissingMeridiem {
            value: text.to_string(),
        }),
        (ClockType::Hour24, _, Ok(time)) => Ok(IntervalBound {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            meridiem: None,
        }),
        (ClockType::Hour24, Ok(_), Err(_)) => Err(ConfigurationError::MeridiemNotAllowed {
            value: text.to_string(),
        }),
        _ => Err(ConfigurationError::InvalidInterval {
            value: interval.to_string(),
            reason: format!("cannot read '{text}' as a {clock_type} time"),
        }),
    }
}

fn bound_text(bound: IntervalBound) -> String {
    match bound.meridiem {
        Some(meridiem) => format!("{:02}:{:02} {meridiem}", bound.hour, bound.minute),
        None => format!("{:02}:{:02}", bound.hour, bound.minute),
    }
}

fn check_bound(bound: IntervalBound, clock_type: ClockType) -> Result<(), ConfigurationError> {
    let text = bound_text(bound);
    if !clock_type.accepts_hour(bound.hour) {
        return Err(ConfigurationError::InvalidHour {
            value: text,
            clock_type,
        });
    }
    if bound.minute >= MINUTES_ON_DIAL {
        return Err(ConfigurationError::InvalidMinute { value: text });
    }
    match (clock_type, bound.meridiem) {
        (ClockType::Hour12, None) => Err(ConfigurationError::MissingMeridiem { value: text }),
        (ClockType::Hour24, Some(_)) => Err(ConfigurationError::MeridiemNotAllowed { value: text }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(text: &str, clock_type: ClockType) -> DisabledTimeSpec {
        DisabledTimeSpec::from_options(
            &DisabledTimeOptions {
                interval: Some(text.to_string()),
                ..DisabledTimeOptions::default()
            },
            clock_type,
        )
        .expect("valid interval")
        .expect("interval spec")
    }

    fn simple(hours: &[&str], minutes: &[&str], clock_type: ClockType) -> DisabledTimeSpec {
        DisabledTimeSpec::from_options(
            &DisabledTimeOptions {
                hours: hours.iter().map(|hour| TimeToken::from(*hour)).collect(),
                minutes: minutes.iter().map(|minute| TimeToken::from(*minute)).collect(),
                interval: None,
            },
            clock_type,
        )
        .expect("valid simple spec")
        .expect("simple spec")
    }

    #[test]
    fn empty_options_build_nothing() {
        let spec = DisabledTimeSpec::from_options(&DisabledTimeOptions::default(), ClockType::Hour24)
            .expect("empty options");
        assert!(spec.is_none());
    }

    #[test]
    fn boundary_minutes_are_masked_only_at_interval_edges() {
        let spec = interval("10:00 - 11:30", ClockType::Hour24);
        assert_eq!(
            spec.disabled_minutes(11, None),
            (30..60).collect::<BTreeSet<u8>>()
        );
        assert!(spec.disabled_minutes(10, None).is_empty());
        assert!(spec.disabled_minutes(12, None).is_empty());
        assert!(spec.is_hour_disabled(10, None));
        assert!(!spec.is_hour_disabled(11, None));
        assert!(!spec.is_hour_disabled(12, None));
    }

    #[test]
    fn interval_wraps_past_midnight() {
        let spec = interval("23:00 - 01:00", ClockType::Hour24);
        assert!(spec.is_hour_disabled(0, None));
        assert!(spec.is_hour_disabled(23, None));
        assert!(!spec.is_hour_disabled(12, None));
        assert_eq!(
            spec.disabled_hours(ClockType::Hour24, None),
            BTreeSet::from([0, 23])
        );
    }

    #[test]
    fn interval_ending_on_the_hour_leaves_that_hour_pickable() {
        let spec = interval("23:00 - 01:00", ClockType::Hour24);
        let DisabledTimeSpec::Interval(bounds) = &spec else {
            panic!("interval spec expected");
        };
        assert!(bounds.end_minutes().is_empty());
        assert!(spec.disabled_minutes(1, None).is_empty());
        assert!(!spec.is_time_disabled(1, 0, None));
        assert!(!spec.is_time_disabled(1, 45, None));
        assert!(validate_on_accept("01", "00", ClockType::Hour24, None, Some(&spec)).is_ok());
    }

    #[test]
    fn interval_inside_one_hour_masks_only_its_minutes() {
        let spec = interval("10:15 - 10:45", ClockType::Hour24);
        assert!(!spec.is_hour_disabled(10, None));
        assert!(spec.is_time_disabled(10, 20, None));
        assert!(spec.is_time_disabled(10, 15, None));
        assert!(!spec.is_time_disabled(10, 45, None));
        assert!(!spec.is_time_disabled(10, 5, None));
        assert!(!spec.is_time_disabled(10, 50, None));
        assert_eq!(
            spec.disabled_minutes(10, None),
            (15..45).collect::<BTreeSet<u8>>()
        );
        assert!(spec.disabled_minutes(11, None).is_empty());

        let err = DisabledInterval::parse("10:45 - 10:15", ClockType::Hour24)
            .expect_err("end before start in one hour");
        assert!(matches!(err, ConfigurationError::InvalidInterval { .. }));
    }

    #[test]
    fn same_meridiem_interval_only_applies_in_that_meridiem() {
        let spec = interval("01:00 PM - 03:15 PM", ClockType::Hour12);
        assert_eq!(
            spec.disabled_hours(ClockType::Hour12, Some(Meridiem::Pm)),
            BTreeSet::from([1, 2])
        );
        assert!(
            spec.disabled_hours(ClockType::Hour12, Some(Meridiem::Am))
                .is_empty()
        );
        assert!(spec.is_minute_disabled(20, 3, Some(Meridiem::Pm)));
        assert!(!spec.is_minute_disabled(20, 3, Some(Meridiem::Am)));
    }

    #[test]
    fn mixed_meridiem_interval_spans_both_halves() {
        let spec = interval("10:00 AM - 02:00 PM", ClockType::Hour12);
        let expected = BTreeSet::from([10, 11, 12, 1]);
        assert_eq!(
            spec.disabled_hours(ClockType::Hour12, Some(Meridiem::Am)),
            expected
        );
        assert_eq!(
            spec.disabled_hours(ClockType::Hour12, Some(Meridiem::Pm)),
            expected
        );
    }

    #[test]
    fn simple_hours_can_be_scoped_to_a_meridiem() {
        let spec = simple(&["3 PM", "05"], &["15", "7"], ClockType::Hour12);
        assert!(spec.is_hour_disabled(3, Some(Meridiem::Pm)));
        assert!(!spec.is_hour_disabled(3, Some(Meridiem::Am)));
        assert!(spec.is_hour_disabled(5, Some(Meridiem::Am)));
        assert!(spec.is_hour_disabled(5, Some(Meridiem::Pm)));
        assert!(spec.is_minute_disabled(7, 1, Some(Meridiem::Am)));
        assert!(spec.is_minute_disabled(15, 9, Some(Meridiem::Pm)));
        assert!(!spec.is_minute_disabled(16, 9, Some(Meridiem::Pm)));
    }

    #[test]
    fn interval_takes_precedence_over_lists() {
        let spec = DisabledTimeSpec::from_options(
            &DisabledTimeOptions {
                hours: vec![TimeToken::Number(5)],
                minutes: vec![TimeToken::Number(10)],
                interval: Some("20:00 - 21:00".to_string()),
            },
            ClockType::Hour24,
        )
        .expect("valid")
        .expect("spec");
        assert!(matches!(spec, DisabledTimeSpec::Interval(_)));
        assert!(!spec.is_hour_disabled(5, None));
        assert!(spec.is_hour_disabled(20, None));
    }

    #[test]
    fn malformed_values_fail_at_construction() {
        let build = |options: DisabledTimeOptions, clock_type| {
            DisabledTimeSpec::from_options(&options, clock_type).expect_err("should fail")
        };

        let err = build(
            DisabledTimeOptions {
                hours: vec![TimeToken::from("25")],
                ..DisabledTimeOptions::default()
            },
            ClockType::Hour24,
        );
        assert!(matches!(err, ConfigurationError::InvalidHour { .. }));

        let err = build(
            DisabledTimeOptions {
                hours: vec![TimeToken::Number(0)],
                ..DisabledTimeOptions::default()
            },
            ClockType::Hour12,
        );
        assert!(matches!(err, ConfigurationError::InvalidHour { .. }));

        let err = build(
            DisabledTimeOptions {
                minutes: vec![TimeToken::from("60")],
                ..DisabledTimeOptions::default()
            },
            ClockType::Hour12,
        );
        assert!(matches!(err, ConfigurationError::InvalidMinute { .. }));

        let err = build(
            DisabledTimeOptions {
                hours: vec![TimeToken::from("3 PM")],
                ..DisabledTimeOptions::default()
            },
            ClockType::Hour24,
        );
        assert!(matches!(err, ConfigurationError::MeridiemNotAllowed { .. }));

        let err = build(
            DisabledTimeOptions {
                interval: Some("10:00 - 11:00".to_string()),
                ..DisabledTimeOptions::default()
            },
            ClockType::Hour12,
        );
        assert!(matches!(err, ConfigurationError::MissingMeridiem { .. }));

        let err = build(
            DisabledTimeOptions {
                interval: Some("10:00".to_string()),
                ..DisabledTimeOptions::default()
            },
            ClockType::Hour24,
        );
        assert!(err.to_string().contains("invalid disabled interval"));

        let err = build(
            DisabledTimeOptions {
                hours: vec![TimeToken::from("ten")],
                ..DisabledTimeOptions::default()
            },
            ClockType::Hour24,
        );
        assert!(err.to_string().contains("'ten'"));
    }

    #[test]
    fn accept_flags_each_bad_field() {
        let err = validate_on_accept("1x", "75", ClockType::Hour24, None, None)
            .expect_err("both fields bad");
        assert_eq!(err.hour, Some(FieldIssue::Malformed("1x".to_string())));
        assert_eq!(err.minute, Some(FieldIssue::OutOfRange("75".to_string())));

        let err = validate_on_accept("00", "10", ClockType::Hour12, Some(Meridiem::Am), None)
            .expect_err("no zero hour on 12h");
        assert!(err.invalid_hour());
        assert!(!err.invalid_minute());

        let accepted = validate_on_accept("7", "05", ClockType::Hour12, Some(Meridiem::Pm), None)
            .expect("valid");
        assert_eq!(accepted.text(), "07:05 PM");
    }

    #[test]
    fn accept_rejects_disabled_values() {
        let spec = interval("10:00 - 11:30", ClockType::Hour24);
        let err = validate_on_accept("10", "00", ClockType::Hour24, None, Some(&spec))
            .expect_err("hour in interval");
        assert_eq!(err.hour, Some(FieldIssue::Disabled("10".to_string())));

        let err = validate_on_accept("11", "45", ClockType::Hour24, None, Some(&spec))
            .expect_err("minute masked at end hour");
        assert!(err.hour.is_none());
        assert_eq!(err.minute, Some(FieldIssue::Disabled("45".to_string())));

        assert!(validate_on_accept("11", "15", ClockType::Hour24, None, Some(&spec)).is_ok());
    }

    #[test]
    fn drag_and_accept_verdicts_agree() {
        let specs = [
            (interval("10:00 - 11:30", ClockType::Hour24), ClockType::Hour24),
            (interval("23:20 - 01:40", ClockType::Hour24), ClockType::Hour24),
            (interval("11:45 AM - 01:10 PM", ClockType::Hour12), ClockType::Hour12),
            (interval("02:30 PM - 04:00 PM", ClockType::Hour12), ClockType::Hour12),
            (interval("23:00 - 01:00", ClockType::Hour24), ClockType::Hour24),
            (interval("10:15 - 10:45", ClockType::Hour24), ClockType::Hour24),
            (interval("03:05 PM - 03:50 PM", ClockType::Hour12), ClockType::Hour12),
            (simple(&["3 PM", "9"], &["00", "30"], ClockType::Hour12), ClockType::Hour12),
        ];
        for (spec, clock_type) in &specs {
            let meridiems: &[Option<Meridiem>] = match clock_type {
                ClockType::Hour12 => &[Some(Meridiem::Am), Some(Meridiem::Pm)],
                ClockType::Hour24 => &[None],
            };
            for meridiem in meridiems {
                for hour in clock_type.hour_range() {
                    for minute in 0..60 {
                        let drag_rejects = spec.is_time_disabled(hour, minute, *meridiem);
                        let accept = validate_on_accept(
                            &format!("{hour:02}"),
                            &format!("{minute:02}"),
                            *clock_type,
                            *meridiem,
                            Some(spec),
                        );
                        assert_eq!(
                            drag_rejects,
                            accept.is_err(),
                            "{hour:02}:{minute:02} {meridiem:?}"
                        );
                    }
                }
            }
        }
    }
}
