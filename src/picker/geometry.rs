//! Pointer position ⇄ dial angle ⇄ hour/minute conversions.
//!
//! Angles are in degrees, 0° at 12 o'clock, increasing clockwise (screen y grows
//! downwards). Nothing here touches session state.

pub const HOUR_UNIT_DEGREES: f64 = 30.0;
pub const MINUTE_UNIT_DEGREES: f64 = 6.0;
pub const FULL_TURN_DEGREES: f64 = 360.0;

// Closer than this to the centre, atan2 no longer says anything useful.
const CENTER_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DialPoint {
    pub x: f64,
    pub y: f64,
}

impl DialPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which ring of the 24h face a hour pick came from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HourRing {
    Inner,
    Outer,
}

/// Angle of `pointer` around `center`, in `[-180, 180)`.
///
/// Returns `None` when the pointer sits on the centre or either point is not finite.
pub fn angle_from_pointer(pointer: DialPoint, center: DialPoint) -> Option<f64> {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    if !dx.is_finite() || !dy.is_finite() || pointer.distance_to(center) < CENTER_EPSILON {
        return None;
    }
    let mut angle = dy.atan2(dx).to_degrees() + 90.0;
    if angle >= 180.0 {
        angle -= FULL_TURN_DEGREES;
    }
    Some(angle)
}

pub fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(FULL_TURN_DEGREES)
}

/// Rounds `raw` to the nearest multiple of `increment` units of `unit_degrees` each.
pub fn snap_angle_to_increment(raw: f64, increment: u8, unit_degrees: f64) -> f64 {
    let step = f64::from(increment.max(1)) * unit_degrees;
    (raw / step).round() * step
}

/// Folds a snapped angle back onto the dial.
///
/// Negative angles gain a full turn and exactly 360° becomes 0°. Anything still above
/// 360° is not a position on the face and yields `None`.
pub fn settle_snapped_angle(snapped: f64) -> Option<f64> {
    let mut angle = snapped;
    if angle < 0.0 {
        angle += FULL_TURN_DEGREES;
    }
    if (angle - FULL_TURN_DEGREES).abs() < 1e-9 {
        angle = 0.0;
    }
    if !(0.0..=FULL_TURN_DEGREES).contains(&angle) {
        return None;
    }
    Some(angle)
}

/// Full pointer → settled angle pipeline for one unit (hours or minutes).
pub fn pointer_to_snapped_angle(
    pointer: DialPoint,
    center: DialPoint,
    increment: u8,
    unit_degrees: f64,
) -> Option<f64> {
    let raw = angle_from_pointer(pointer, center)?;
    settle_snapped_angle(snap_angle_to_increment(
        normalize_degrees(raw),
        increment,
        unit_degrees,
    ))
}

pub fn angle_to_hour12(angle: f64) -> u8 {
    let hour = (normalize_degrees(angle) / HOUR_UNIT_DEGREES).round() as u32 % 12;
    if hour == 0 { 12 } else { hour as u8 }
}

/// Inner ring reads 1..=12; outer ring reads 13..=23, with the 12 o'clock slot as 0.
pub fn angle_to_hour24(angle: f64, ring: HourRing) -> u8 {
    match ring {
        HourRing::Inner => angle_to_hour12(angle),
        HourRing::Outer => {
            let slot = (normalize_degrees(angle) / HOUR_UNIT_DEGREES).round() as u32 % 12;
            if slot == 0 { 0 } else { slot as u8 + 12 }
        }
    }
}

pub fn angle_to_minute(angle: f64) -> u8 {
    ((normalize_degrees(angle) / MINUTE_UNIT_DEGREES).round() as u32 % 60) as u8
}

/// Hand rotation for a display hour on either face.
pub fn hour_to_degrees(hour: u8) -> f64 {
    let value = f64::from(hour);
    let degrees = if hour > 12 {
        value * HOUR_UNIT_DEGREES - FULL_TURN_DEGREES
    } else {
        value * HOUR_UNIT_DEGREES
    };
    if degrees >= FULL_TURN_DEGREES {
        0.0
    } else {
        degrees
    }
}

pub fn minute_to_degrees(minute: u8) -> f64 {
    normalize_degrees(f64::from(minute) * MINUTE_UNIT_DEGREES)
}

pub fn ring_for_hour(hour: u8) -> HourRing {
    if hour > 12 || hour == 0 {
        HourRing::Outer
    } else {
        HourRing::Inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> DialPoint {
        DialPoint::new(128.0, 128.0)
    }

    fn at_angle(angle: f64, radius: f64) -> DialPoint {
        let radians = (angle - 90.0).to_radians();
        DialPoint::new(
            128.0 + radius * radians.cos(),
            128.0 + radius * radians.sin(),
        )
    }

    #[test]
    fn pointer_angles_start_at_twelve_and_run_clockwise() {
        let top = angle_from_pointer(DialPoint::new(128.0, 28.0), center()).expect("top");
        assert!(top.abs() < 1e-9);
        let right = angle_from_pointer(DialPoint::new(228.0, 128.0), center()).expect("right");
        assert!((right - 90.0).abs() < 1e-9);
        let left = angle_from_pointer(DialPoint::new(28.0, 128.0), center()).expect("left");
        assert!((left + 90.0).abs() < 1e-9);
        let bottom = angle_from_pointer(DialPoint::new(128.0, 228.0), center()).expect("bottom");
        assert!((bottom + 180.0).abs() < 1e-9);
    }

    #[test]
    fn pointer_on_center_is_degenerate() {
        assert_eq!(angle_from_pointer(center(), center()), None);
        assert_eq!(
            angle_from_pointer(DialPoint::new(f64::NAN, 10.0), center()),
            None
        );
    }

    #[test]
    fn hour12_stays_on_face_for_every_turn() {
        for tenth in 0..3600 {
            let angle = f64::from(tenth) / 10.0;
            let hour = angle_to_hour12(angle);
            assert!((1..=12).contains(&hour), "angle {angle} gave {hour}");
            for turns in [-2.0, -1.0, 1.0, 3.0] {
                assert_eq!(angle_to_hour12(angle + 360.0 * turns), hour);
            }
        }
        assert_eq!(angle_to_hour12(0.0), 12);
        assert_eq!(angle_to_hour12(-30.0), 11);
    }

    #[test]
    fn snapping_is_idempotent() {
        for increment in [1_u8, 2, 5, 10, 15] {
            for unit in [HOUR_UNIT_DEGREES, MINUTE_UNIT_DEGREES] {
                for raw in (-360..=360).map(|deg| f64::from(deg) + 0.37) {
                    let once = snap_angle_to_increment(raw, increment, unit);
                    let twice = snap_angle_to_increment(once, increment, unit);
                    assert_eq!(once, twice, "raw {raw} increment {increment} unit {unit}");
                }
            }
        }
    }

    #[test]
    fn five_minute_increment_only_reaches_multiples_of_five() {
        for raw in 0..360 {
            let snapped = settle_snapped_angle(snap_angle_to_increment(
                f64::from(raw),
                5,
                MINUTE_UNIT_DEGREES,
            ))
            .expect("on dial");
            assert_eq!(angle_to_minute(snapped) % 5, 0);
        }
    }

    #[test]
    fn full_turn_collapses_and_overshoot_is_invalid() {
        assert_eq!(settle_snapped_angle(360.0), Some(0.0));
        assert_eq!(settle_snapped_angle(-30.0), Some(330.0));
        assert_eq!(settle_snapped_angle(378.0), None);
        // 7-minute steps overshoot the dial just before 12 o'clock.
        let snapped = snap_angle_to_increment(359.0, 7, MINUTE_UNIT_DEGREES);
        assert_eq!(settle_snapped_angle(snapped), None);
    }

    #[test]
    fn outer_ring_top_reads_double_zero_hour() {
        assert_eq!(angle_to_hour24(0.0, HourRing::Outer), 0);
        assert_eq!(format!("{:02}", angle_to_hour24(0.0, HourRing::Outer)), "00");
        assert_eq!(angle_to_hour24(90.0, HourRing::Outer), 15);
        assert_eq!(angle_to_hour24(330.0, HourRing::Outer), 23);
        assert_eq!(angle_to_hour24(0.0, HourRing::Inner), 12);
        assert_eq!(angle_to_hour24(90.0, HourRing::Inner), 3);
    }

    #[test]
    fn quarter_turn_on_minute_ring_is_fifteen() {
        let angle = pointer_to_snapped_angle(at_angle(90.0, 90.0), center(), 5, MINUTE_UNIT_DEGREES)
            .expect("valid angle");
        assert_eq!(angle_to_minute(angle), 15);
        let angle = pointer_to_snapped_angle(at_angle(93.0, 90.0), center(), 5, MINUTE_UNIT_DEGREES)
            .expect("valid angle");
        assert_eq!(angle_to_minute(angle), 15);
    }

    #[test]
    fn hour_and_minute_degrees_round_trip() {
        for hour in 0..24 {
            let ring = ring_for_hour(hour);
            let face_hour = angle_to_hour24(hour_to_degrees(hour), ring);
            assert_eq!(face_hour, hour);
        }
        for minute in 0..60 {
            assert_eq!(angle_to_minute(minute_to_degrees(minute)), minute);
        }
        assert_eq!(hour_to_degrees(12), 0.0);
        assert_eq!(hour_to_degrees(0), 0.0);
        assert_eq!(hour_to_degrees(15), 90.0);
    }
}
