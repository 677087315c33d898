use log::{debug, info, warn};

use crate::picker::disabled::{DisabledTimeOptions, DisabledTimeSpec, validate_on_accept};
use crate::picker::error::{CommitError, ConfigurationError, ValidationError};
use crate::picker::events::{
    DialFrame, HitTarget, Notification, NotificationKind, PickerHost, PointerEvent, PointerPhase,
};
use crate::picker::geometry::{
    DialPoint, HOUR_UNIT_DEGREES, HourRing, MINUTE_UNIT_DEGREES, angle_to_hour12,
    angle_to_hour24, angle_to_minute, hour_to_degrees, minute_to_degrees,
    pointer_to_snapped_angle, ring_for_hour,
};
use crate::picker::model::{
    AcceptedTime, ClockConfig, ClockType, Meridiem, Seed, SelectMode, format_time_text,
    format_two_digit,
};

/// The authoritative hour/minute/meridiem of one picker plus its hand positions.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSelectionState {
    pub mode: SelectMode,
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Option<Meridiem>,
    /// `None` until the hour hand has been placed by a drag or a text edit.
    pub hour_degrees: Option<f64>,
    pub minute_degrees: Option<f64>,
    pub dragging: bool,
}

impl TimeSelectionState {
    fn from_seed(seed: Seed) -> Self {
        Self {
            mode: SelectMode::Hour,
            hour: seed.hour,
            minute: seed.minute,
            meridiem: seed.meridiem,
            hour_degrees: None,
            minute_degrees: None,
            dragging: false,
        }
    }

    pub fn hour_text(&self) -> String {
        format_two_digit(self.hour)
    }

    pub fn minute_text(&self) -> String {
        format_two_digit(self.minute)
    }

    pub fn hour_hand_degrees(&self) -> f64 {
        self.hour_degrees
            .unwrap_or_else(|| hour_to_degrees(self.hour))
    }

    pub fn minute_hand_degrees(&self) -> f64 {
        self.minute_degrees
            .unwrap_or_else(|| minute_to_degrees(self.minute))
    }

    pub fn hand_degrees(&self) -> f64 {
        match self.mode {
            SelectMode::Hour => self.hour_hand_degrees(),
            SelectMode::Minute => self.minute_hand_degrees(),
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct InvalidMarkers {
    pub hour: bool,
    pub minute: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TextDraft {
    hour: Option<String>,
    minute: Option<String>,
}

impl TextDraft {
    fn is_pending(&self) -> bool {
        self.hour.is_some() || self.minute.is_some()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PointerOutcome {
    /// Session closed, in mobile view, idle, or the press missed the dial.
    Ignored,
    Updated,
    /// The candidate value is disabled; nothing changed.
    Rejected,
    /// The pointer sat on the centre or the snapped angle left the dial.
    Degenerate,
    Released { switched_to_minutes: bool },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PointerResponse {
    pub outcome: PointerOutcome,
    pub prevent_default: bool,
}

pub struct PickerSession<H: PickerHost> {
    config: ClockConfig,
    disabled: Option<DisabledTimeSpec>,
    state: TimeSelectionState,
    open: bool,
    mobile_view: bool,
    outer_ring_visible: bool,
    outer_ring_hand: bool,
    invalid: InvalidMarkers,
    draft: TextDraft,
    committed: Option<AcceptedTime>,
    host: H,
}

impl<H: PickerHost> PickerSession<H> {
    /// Validates everything up front; a session that fails here never opens.
    pub fn initialize(
        config: ClockConfig,
        disabled: &DisabledTimeOptions,
        seed: Seed,
        host: H,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let disabled = DisabledTimeSpec::from_options(disabled, config.clock_type)?;
        let seed = seed.validate(config.clock_type)?;

        let mut session = Self {
            mobile_view: config.mobile,
            config,
            disabled,
            state: TimeSelectionState::from_seed(seed),
            open: false,
            outer_ring_visible: false,
            outer_ring_hand: false,
            invalid: InvalidMarkers::default(),
            draft: TextDraft::default(),
            committed: None,
            host,
        };
        session.open_with(seed);
        Ok(session)
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn disabled(&self) -> Option<&DisabledTimeSpec> {
        self.disabled.as_ref()
    }

    pub fn state(&self) -> &TimeSelectionState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    pub fn is_mobile_view(&self) -> bool {
        self.mobile_view
    }

    pub fn outer_ring_visible(&self) -> bool {
        self.outer_ring_visible
    }

    pub fn outer_ring_hand(&self) -> bool {
        self.outer_ring_hand
    }

    pub fn invalid_markers(&self) -> InvalidMarkers {
        self.invalid
    }

    /// Last value that passed the accept gate.
    pub fn committed(&self) -> Option<AcceptedTime> {
        self.committed
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn dial_center(&self) -> DialPoint {
        let radius = self.config.dial_diameter / 2.0;
        DialPoint::new(radius, radius)
    }

    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> PointerResponse {
        let outcome = self.pointer_outcome(event);
        PointerResponse {
            outcome,
            prevent_default: self.config.prevent_default && outcome != PointerOutcome::Ignored,
        }
    }

    fn pointer_outcome(&mut self, event: &PointerEvent) -> PointerOutcome {
        if !self.open {
            debug!("{} after close ignored", event.source_label());
            return PointerOutcome::Ignored;
        }
        if self.mobile_view {
            return PointerOutcome::Ignored;
        }

        let target = self.effective_target(event);
        match event.phase {
            PointerPhase::Up => return self.release(event, target),
            PointerPhase::Down => {
                self.state.dragging = target.starts_drag();
                if !self.state.dragging {
                    debug!("{} on {:?} does not start a drag", event.source_label(), target);
                    return PointerOutcome::Ignored;
                }
            }
            PointerPhase::Move => {
                if !self.state.dragging {
                    return PointerOutcome::Ignored;
                }
            }
        }

        match self.state.mode {
            SelectMode::Hour => self.drag_hour(event, target),
            SelectMode::Minute => self.drag_minute(event),
        }
    }

    // Touch targets can lag behind a fast finger; ask the host what is under the first touch.
    fn effective_target(&self, event: &PointerEvent) -> HitTarget {
        event
            .touches
            .first()
            .and_then(|touch| self.host.element_at(touch.client))
            .unwrap_or(event.target)
    }

    fn release(&mut self, event: &PointerEvent, target: HitTarget) -> PointerOutcome {
        if !self.state.dragging {
            return PointerOutcome::Ignored;
        }
        self.state.dragging = false;

        let switch = self.config.switch_to_minutes_after_select_hour
            && self.state.mode == SelectMode::Hour
            && target.kind.is_hour_release_target();
        if switch {
            self.enter_minute_mode(Some(event.source_label()));
        }
        PointerOutcome::Released {
            switched_to_minutes: switch,
        }
    }

    fn drag_hour(&mut self, event: &PointerEvent, target: HitTarget) -> PointerOutcome {
        if target.disabled {
            debug!("hour drag over a disabled tick dropped");
            return PointerOutcome::Rejected;
        }
        let ring = match self.config.clock_type {
            ClockType::Hour24 if target.kind.is_outer_ring() => HourRing::Outer,
            _ => HourRing::Inner,
        };
        let Some(angle) = pointer_to_snapped_angle(
            event.pointer_position(),
            self.dial_center(),
            self.config.increment_hours,
            HOUR_UNIT_DEGREES,
        ) else {
            debug!("degenerate hour angle at {:?}", event.pointer_position());
            return PointerOutcome::Degenerate;
        };

        let hour = match self.config.clock_type {
            ClockType::Hour12 => angle_to_hour12(angle),
            ClockType::Hour24 => angle_to_hour24(angle, ring),
        };
        if self.blocks(hour, self.state.minute) {
            debug!(
                "hour {} dropped: disabled with minute {}",
                format_two_digit(hour),
                self.state.minute_text()
            );
            return PointerOutcome::Rejected;
        }

        self.state.hour = hour;
        self.state.hour_degrees = Some(angle);
        self.draft.hour = None;
        self.invalid.hour = false;
        self.outer_ring_hand = ring == HourRing::Outer;
        self.refresh(NotificationKind::Update, Some(event.source_label()));
        PointerOutcome::Updated
    }

    fn drag_minute(&mut self, event: &PointerEvent) -> PointerOutcome {
        let Some(angle) = pointer_to_snapped_angle(
            event.pointer_position(),
            self.dial_center(),
            self.config.increment_minutes,
            MINUTE_UNIT_DEGREES,
        ) else {
            debug!("degenerate minute angle at {:?}", event.pointer_position());
            return PointerOutcome::Degenerate;
        };

        let minute = angle_to_minute(angle);
        if self.blocks(self.state.hour, minute) {
            debug!(
                "minute {} dropped: disabled at hour {}",
                format_two_digit(minute),
                self.state.hour_text()
            );
            return PointerOutcome::Rejected;
        }

        self.state.minute = minute;
        self.state.minute_degrees = Some(angle);
        self.draft.minute = None;
        self.invalid.minute = false;
        self.refresh(NotificationKind::Update, Some(event.source_label()));
        PointerOutcome::Updated
    }

    fn blocks(&self, hour: u8, minute: u8) -> bool {
        self.disabled
            .as_ref()
            .is_some_and(|spec| spec.is_time_disabled(hour, minute, self.state.meridiem))
    }

    /// Click on the hour label. Returns `false` when the session is closed.
    pub fn select_hour_mode(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.enter_hour_mode();
        true
    }

    pub fn select_minute_mode(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.enter_minute_mode(None);
        true
    }

    fn enter_hour_mode(&mut self) {
        self.state.mode = SelectMode::Hour;
        if self.config.clock_type == ClockType::Hour24 {
            self.outer_ring_visible = !self.mobile_view;
            self.outer_ring_hand = ring_for_hour(self.state.hour) == HourRing::Outer;
        }
        self.refresh(NotificationKind::SelectHourMode, None);
    }

    fn enter_minute_mode(&mut self, source: Option<&str>) {
        self.state.mode = SelectMode::Minute;
        self.outer_ring_visible = false;
        self.outer_ring_hand = false;
        self.refresh(NotificationKind::SelectMinuteMode, source);
    }

    /// AM/PM buttons; a 24h clock has none, so this is a no-op there.
    pub fn select_meridiem(&mut self, meridiem: Meridiem) -> bool {
        if !self.open || self.config.clock_type == ClockType::Hour24 {
            return false;
        }
        self.state.meridiem = Some(meridiem);
        let kind = match meridiem {
            Meridiem::Am => NotificationKind::SelectAmTypeMode,
            Meridiem::Pm => NotificationKind::SelectPmTypeMode,
        };
        self.refresh(kind, None);
        true
    }

    pub fn is_editable(&self) -> bool {
        self.open && (self.mobile_view || self.config.editable())
    }

    /// Stores typed hour text; nothing is validated until `finish_edit` or commit.
    pub fn edit_hour(&mut self, text: &str) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.draft.hour = Some(text.to_string());
        true
    }

    pub fn edit_minute(&mut self, text: &str) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.draft.minute = Some(text.to_string());
        true
    }

    /// Applies pending drafts and moves the hand to match them.
    pub fn finish_edit(&mut self) -> Result<AcceptedTime, CommitError> {
        if !self.open {
            return Err(CommitError::Closed);
        }
        let accepted = self.validate_pending().inspect_err(|err| self.mark_invalid(err))?;
        self.apply_accepted(accepted);
        self.refresh(NotificationKind::Update, None);
        Ok(accepted)
    }

    /// Toggles between the dial and the keyboard (mobile) view.
    pub fn switch_view(&mut self) -> Result<(), CommitError> {
        if !self.open {
            return Err(CommitError::Closed);
        }
        if self.mobile_view {
            if self.draft.is_pending() {
                let accepted = self
                    .validate_pending()
                    .inspect_err(|err| self.mark_invalid(err))?;
                self.apply_accepted(accepted);
            }
            self.mobile_view = false;
            self.outer_ring_visible = self.config.clock_type == ClockType::Hour24
                && self.state.mode == SelectMode::Hour;
        } else {
            self.mobile_view = true;
            self.state.dragging = false;
            self.outer_ring_visible = false;
        }
        self.render();
        Ok(())
    }

    /// Accept button. On success the host value is committed and the session closes;
    /// on failure the offending fields are marked and the session stays open.
    pub fn commit_if_valid(&mut self) -> Result<AcceptedTime, CommitError> {
        if !self.open {
            return Err(CommitError::Closed);
        }
        let accepted = match self.validate_pending() {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!("accept rejected: {err}");
                self.mark_invalid(&err);
                return Err(err.into());
            }
        };

        self.apply_accepted(accepted);
        self.committed = Some(accepted);
        self.notify(NotificationKind::Accept, None);
        self.close();
        info!("accepted {}", accepted.text());
        Ok(accepted)
    }

    pub fn cancel(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.notify(NotificationKind::Cancel, None);
        self.close();
        info!(
            "cancelled at {}:{}",
            self.state.hour_text(),
            self.state.minute_text()
        );
        true
    }

    /// Reopens the picker on a new seed; a bad seed leaves the session untouched.
    pub fn reset(&mut self, seed: Seed) -> Result<(), ConfigurationError> {
        let seed = seed.validate(self.config.clock_type)?;
        self.open_with(seed);
        info!(
            "reset to {}",
            format_time_text(seed.hour, seed.minute, seed.meridiem)
        );
        Ok(())
    }

    /// Stops the session for good: drags end and later events are no-ops.
    pub fn teardown(&mut self) {
        if self.open {
            debug!("picker torn down");
        }
        self.close();
    }

    /// Ends an in-progress gesture without releasing over a target.
    pub fn end_drag(&mut self) {
        self.state.dragging = false;
    }

    fn open_with(&mut self, seed: Seed) {
        self.state = TimeSelectionState::from_seed(seed);
        self.open = true;
        self.mobile_view = self.config.mobile;
        self.draft = TextDraft::default();
        self.invalid = InvalidMarkers::default();
        let is_24h = self.config.clock_type == ClockType::Hour24;
        self.outer_ring_visible = is_24h && !self.mobile_view;
        self.outer_ring_hand = is_24h && ring_for_hour(seed.hour) == HourRing::Outer;
        self.refresh(NotificationKind::Show, None);
    }

    fn close(&mut self) {
        self.open = false;
        self.state.dragging = false;
    }

    fn validate_pending(&self) -> Result<AcceptedTime, ValidationError> {
        let hour_text = self
            .draft
            .hour
            .clone()
            .unwrap_or_else(|| self.state.hour_text());
        let minute_text = self
            .draft
            .minute
            .clone()
            .unwrap_or_else(|| self.state.minute_text());
        validate_on_accept(
            &hour_text,
            &minute_text,
            self.config.clock_type,
            self.state.meridiem,
            self.disabled.as_ref(),
        )
    }

    fn apply_accepted(&mut self, accepted: AcceptedTime) {
        self.state.hour = accepted.hour;
        self.state.minute = accepted.minute;
        self.state.hour_degrees = Some(hour_to_degrees(accepted.hour));
        self.state.minute_degrees = Some(minute_to_degrees(accepted.minute));
        self.outer_ring_hand = self.config.clock_type == ClockType::Hour24
            && self.state.mode == SelectMode::Hour
            && ring_for_hour(accepted.hour) == HourRing::Outer;
        self.draft = TextDraft::default();
        self.invalid = InvalidMarkers::default();
    }

    fn mark_invalid(&mut self, err: &ValidationError) {
        self.invalid = InvalidMarkers {
            hour: err.invalid_hour(),
            minute: err.invalid_minute(),
        };
        self.render();
    }

    fn refresh(&mut self, kind: NotificationKind, source: Option<&str>) {
        self.render();
        self.notify(kind, source);
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.host.render(&frame);
    }

    fn notify(&mut self, kind: NotificationKind, source: Option<&str>) {
        let notification = Notification {
            kind,
            hour: self.state.hour_text(),
            minute: self.state.minute_text(),
            meridiem: self.state.meridiem,
            hand_degrees: self.state.hand_degrees(),
            hour_degrees: self.state.hour_degrees,
            minute_degrees: self.state.minute_degrees,
            event_source: source.map(str::to_string),
        };
        self.host.notify(&notification);
    }

    pub fn frame(&self) -> DialFrame {
        let meridiem = self.state.meridiem;
        let (active_tick, disabled_ticks): (u8, Vec<u8>) = match self.state.mode {
            SelectMode::Hour => (
                self.state.hour,
                self.disabled
                    .as_ref()
                    .map(|spec| {
                        spec.disabled_hours(self.config.clock_type, meridiem)
                            .into_iter()
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            SelectMode::Minute => (
                self.state.minute,
                self.disabled
                    .as_ref()
                    .map(|spec| {
                        spec.disabled_minutes(self.state.hour, meridiem)
                            .into_iter()
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
        };
        DialFrame {
            hour: self
                .draft
                .hour
                .clone()
                .unwrap_or_else(|| self.state.hour_text()),
            minute: self
                .draft
                .minute
                .clone()
                .unwrap_or_else(|| self.state.minute_text()),
            mode: self.state.mode,
            hand_degrees: self.state.hand_degrees(),
            active_tick,
            outer_ring_visible: self.outer_ring_visible,
            outer_ring_hand: self.outer_ring_hand,
            disabled_ticks,
            invalid_hour: self.invalid.hour,
            invalid_minute: self.invalid.minute,
        }
    }
}
