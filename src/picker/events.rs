use serde::{Deserialize, Serialize};

use crate::picker::geometry::DialPoint;
use crate::picker::model::{Meridiem, SelectMode};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerDevice {
    #[default]
    Mouse,
    Touch,
}

/// Region of the picker a pointer landed on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialTarget {
    #[default]
    ClockFace,
    CircleHand,
    ClockHand,
    HourTick,
    MinuteTick,
    ValueTip,
    #[serde(rename = "value_tip_24h")]
    ValueTip24h,
    TipsWrapper,
    #[serde(rename = "tips_wrapper_24h")]
    TipsWrapper24h,
    HourLabel,
    MinuteLabel,
    Outside,
}

impl DialTarget {
    pub fn is_drag_surface(self) -> bool {
        !matches!(
            self,
            DialTarget::HourLabel | DialTarget::MinuteLabel | DialTarget::Outside
        )
    }

    /// Releasing over one of these ends an hour pick.
    pub fn is_hour_release_target(self) -> bool {
        matches!(
            self,
            DialTarget::ValueTip | DialTarget::ValueTip24h | DialTarget::TipsWrapper
        )
    }

    pub fn is_outer_ring(self) -> bool {
        matches!(self, DialTarget::ValueTip24h | DialTarget::TipsWrapper24h)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct HitTarget {
    pub kind: DialTarget,
    #[serde(default)]
    pub disabled: bool,
}

impl HitTarget {
    pub fn new(kind: DialTarget) -> Self {
        Self {
            kind,
            disabled: false,
        }
    }

    pub fn disabled(kind: DialTarget) -> Self {
        Self {
            kind,
            disabled: true,
        }
    }

    pub fn starts_drag(self) -> bool {
        self.kind.is_drag_surface() && !self.disabled
    }
}

/// `client` is in screen space (used for hit testing), `local` relative to the dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub client: DialPoint,
    pub local: DialPoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub device: PointerDevice,
    pub position: DialPoint,
    pub target: HitTarget,
    pub touches: Vec<TouchPoint>,
}

impl PointerEvent {
    pub fn mouse(phase: PointerPhase, position: DialPoint, target: HitTarget) -> Self {
        Self {
            phase,
            device: PointerDevice::Mouse,
            position,
            target,
            touches: Vec::new(),
        }
    }

    pub fn touch(phase: PointerPhase, touches: Vec<TouchPoint>, target: HitTarget) -> Self {
        let position = touches.first().map(|touch| touch.local).unwrap_or_default();
        Self {
            phase,
            device: PointerDevice::Touch,
            position,
            target,
            touches,
        }
    }

    /// Dial-local coordinates of the pointer that drives the hand.
    pub fn pointer_position(&self) -> DialPoint {
        self.touches
            .first()
            .map(|touch| touch.local)
            .unwrap_or(self.position)
    }

    pub fn source_label(&self) -> &'static str {
        match (self.device, self.phase) {
            (PointerDevice::Mouse, PointerPhase::Down) => "mousedown",
            (PointerDevice::Mouse, PointerPhase::Move) => "mousemove",
            (PointerDevice::Mouse, PointerPhase::Up) => "mouseup",
            (PointerDevice::Touch, PointerPhase::Down) => "touchstart",
            (PointerDevice::Touch, PointerPhase::Move) => "touchmove",
            (PointerDevice::Touch, PointerPhase::Up) => "touchend",
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Show,
    Update,
    SelectHourMode,
    SelectMinuteMode,
    SelectAmTypeMode,
    SelectPmTypeMode,
    Accept,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub hour: String,
    pub minute: String,
    pub meridiem: Option<Meridiem>,
    pub hand_degrees: f64,
    pub hour_degrees: Option<f64>,
    pub minute_degrees: Option<f64>,
    pub event_source: Option<String>,
}

/// Everything the host needs to redraw the dial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialFrame {
    pub hour: String,
    pub minute: String,
    pub mode: SelectMode,
    pub hand_degrees: f64,
    pub active_tick: u8,
    pub outer_ring_visible: bool,
    pub outer_ring_hand: bool,
    pub disabled_ticks: Vec<u8>,
    pub invalid_hour: bool,
    pub invalid_minute: bool,
}

/// Rendering, event emission and hit testing live outside the engine.
pub trait PickerHost {
    fn render(&mut self, frame: &DialFrame);

    fn notify(&mut self, notification: &Notification);

    fn element_at(&self, _client: DialPoint) -> Option<HitTarget> {
        None
    }
}

/// Host that keeps everything it is handed; backs the CLI replayer and tests.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub frames: Vec<DialFrame>,
    pub notifications: Vec<Notification>,
    hit_regions: Vec<(DialPoint, HitTarget)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers what a screen-space hit test at `client` should report.
    pub fn map_hit(&mut self, client: DialPoint, target: HitTarget) {
        self.hit_regions.retain(|(point, _)| point.distance_to(client) >= 0.5);
        self.hit_regions.push((client, target));
    }

    pub fn last_frame(&self) -> Option<&DialFrame> {
        self.frames.last()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.notifications
            .iter()
            .map(|notification| notification.kind)
            .collect()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

impl PickerHost for RecordingHost {
    fn render(&mut self, frame: &DialFrame) {
        self.frames.push(frame.clone());
    }

    fn notify(&mut self, notification: &Notification) {
        self.notifications.push(notification.clone());
    }

    fn element_at(&self, client: DialPoint) -> Option<HitTarget> {
        self.hit_regions
            .iter()
            .find(|(point, _)| point.distance_to(client) < 0.5)
            .map(|(_, target)| *target)
    }
}
