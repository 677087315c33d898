use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::picker::disabled::DisabledTimeOptions;
use crate::picker::error::{CommitError, ConfigurationError};
use crate::picker::events::{
    DialTarget, HitTarget, PointerDevice, PointerEvent, PointerPhase, RecordingHost, TouchPoint,
};
use crate::picker::geometry::DialPoint;
use crate::picker::model::{AcceptedTime, ClockConfig, ClockType, Meridiem, Seed};
use crate::picker::registry::{PickerRegistry, SessionId};
use crate::picker::session::PickerSession;

// Angle-only pointer steps land at this fraction of the dial radius.
const DEFAULT_POINTER_RADIUS: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct SessionScript {
    pub version: u32,
    pub config: ClockConfig,
    pub disabled_time: DisabledTimeOptions,
    pub seed: Option<SeedInput>,
    pub steps: Vec<ScriptStep>,
}

impl SessionScript {
    pub fn seed(&self) -> Result<Seed, ConfigurationError> {
        match &self.seed {
            Some(seed) => seed.resolve(self.config.clock_type),
            None => Ok(Seed::default_for(self.config.clock_type)),
        }
    }
}

/// `"09:30 PM"` / `"21:30"`, or the parts spelled out.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SeedInput {
    Text(String),
    Parts {
        hour: u8,
        minute: u8,
        #[serde(default)]
        meridiem: Option<Meridiem>,
    },
}

impl SeedInput {
    pub fn resolve(&self, clock_type: ClockType) -> Result<Seed, ConfigurationError> {
        match self {
            SeedInput::Text(text) => Seed::parse(text, clock_type),
            SeedInput::Parts {
                hour,
                minute,
                meridiem,
            } => Seed {
                hour: *hour,
                minute: *minute,
                meridiem: *meridiem,
            }
            .validate(clock_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Pointer(PointerStep),
    SelectHourMode,
    SelectMinuteMode,
    SelectMeridiem { meridiem: Meridiem },
    EditHour { text: String },
    EditMinute { text: String },
    FinishEdit,
    SwitchView,
    Accept,
    Cancel,
    Reset { seed: SeedInput },
}

impl ScriptStep {
    pub fn action(&self) -> &'static str {
        match self {
            ScriptStep::Pointer(_) => "pointer",
            ScriptStep::SelectHourMode => "select_hour_mode",
            ScriptStep::SelectMinuteMode => "select_minute_mode",
            ScriptStep::SelectMeridiem { .. } => "select_meridiem",
            ScriptStep::EditHour { .. } => "edit_hour",
            ScriptStep::EditMinute { .. } => "edit_minute",
            ScriptStep::FinishEdit => "finish_edit",
            ScriptStep::SwitchView => "switch_view",
            ScriptStep::Accept => "accept",
            ScriptStep::Cancel => "cancel",
            ScriptStep::Reset { .. } => "reset",
        }
    }
}

/// A pointer at `x`/`y` in dial coordinates, or at `angle` degrees (clockwise from 12).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointerStep {
    pub phase: PointerPhase,
    #[serde(default)]
    pub device: PointerDevice,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub target: DialTarget,
    #[serde(default)]
    pub disabled: bool,
    /// What a hit test under the touch reports, when it differs from `target`.
    #[serde(default)]
    pub touch_target: Option<DialTarget>,
}

impl PointerStep {
    pub fn position(&self, dial_diameter: f64) -> Option<DialPoint> {
        if let (Some(x), Some(y)) = (self.x, self.y) {
            return Some(DialPoint::new(x, y));
        }
        let angle = self.angle?;
        let center = dial_diameter / 2.0;
        let radius = self.radius.unwrap_or(center * DEFAULT_POINTER_RADIUS);
        let radians = (angle - 90.0).to_radians();
        Some(DialPoint::new(
            center + radius * radians.cos(),
            center + radius * radians.sin(),
        ))
    }

    fn event(&self, position: DialPoint) -> PointerEvent {
        let target = HitTarget {
            kind: self.target,
            disabled: self.disabled,
        };
        match (self.device, self.phase) {
            (PointerDevice::Mouse, phase) => PointerEvent::mouse(phase, position, target),
            (PointerDevice::Touch, PointerPhase::Up) => PointerEvent {
                phase: PointerPhase::Up,
                device: PointerDevice::Touch,
                position,
                target,
                touches: Vec::new(),
            },
            (PointerDevice::Touch, phase) => PointerEvent::touch(
                phase,
                vec![TouchPoint {
                    client: position,
                    local: position,
                }],
                target,
            ),
        }
    }
}

pub fn load_session_script(path: &Path) -> Result<SessionScript> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("unable to read session script {}", path.display()))?;
    parse_session_script_text(&content)
}

pub fn parse_session_script_text(content: &str) -> Result<SessionScript> {
    let raw = serde_json::from_str::<SessionScriptFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported session script version {}; expected version 1",
            raw.version
        );
    }

    for (index, step) in raw.steps.iter().enumerate() {
        if let ScriptStep::Pointer(pointer) = step
            && pointer.position(raw.config.dial_diameter).is_none()
        {
            bail!("step {} must give either x and y or an angle", index + 1);
        }
    }

    Ok(SessionScript {
        version: raw.version,
        config: raw.config,
        disabled_time: raw.disabled_time,
        seed: raw.seed,
        steps: raw.steps,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub steps: usize,
    pub notifications: usize,
    pub rejections: usize,
    pub accepted: Option<AcceptedTime>,
}

#[derive(Serialize)]
struct RejectionLine<'a> {
    kind: &'static str,
    step: usize,
    action: &'a str,
    error: String,
}

/// Runs the script against a fresh picker, writing every notification and every
/// refused step to `out` as one JSON object per line.
pub fn replay(script: &SessionScript, out: &mut impl Write) -> Result<ReplaySummary> {
    let seed = script.seed().context("invalid seed")?;
    let mut registry = PickerRegistry::new();
    let id = registry
        .open(
            script.config.clone(),
            &script.disabled_time,
            seed,
            RecordingHost::new(),
        )
        .context("failed to open picker session")?;

    let mut summary = ReplaySummary::default();
    summary.notifications += flush_notifications(&mut registry, id, out)?;

    for (index, step) in script.steps.iter().enumerate() {
        let rejection = apply_step(&mut registry, id, step, script.config.clock_type)
            .with_context(|| format!("step {} ({})", index + 1, step.action()))?;
        summary.steps += 1;
        summary.notifications += flush_notifications(&mut registry, id, out)?;

        if let Some(error) = rejection {
            summary.rejections += 1;
            let line = RejectionLine {
                kind: "rejected",
                step: index + 1,
                action: step.action(),
                error,
            };
            writeln!(out, "{}", serde_json::to_string(&line)?)?;
        }
    }

    summary.accepted = registry.get(id).and_then(|session| session.committed());
    Ok(summary)
}

// Ok(Some(reason)) means the picker refused the step; the replay carries on.
fn apply_step(
    registry: &mut PickerRegistry<RecordingHost>,
    id: SessionId,
    step: &ScriptStep,
    clock_type: ClockType,
) -> Result<Option<String>> {
    let closed = || Some(CommitError::Closed.to_string());
    let rejection = match step {
        ScriptStep::Pointer(pointer) => apply_pointer(registry, id, pointer)?,
        ScriptStep::SelectHourMode => (!picker(registry, id)?.select_hour_mode())
            .then(closed)
            .flatten(),
        ScriptStep::SelectMinuteMode => (!picker(registry, id)?.select_minute_mode())
            .then(closed)
            .flatten(),
        ScriptStep::SelectMeridiem { meridiem } => {
            let session = picker(registry, id)?;
            if !session.is_open() {
                closed()
            } else if !session.select_meridiem(*meridiem) {
                Some("a 24h clock has no AM/PM".to_string())
            } else {
                None
            }
        }
        ScriptStep::EditHour { text } => (!picker(registry, id)?.edit_hour(text))
            .then(|| "hour is not editable".to_string()),
        ScriptStep::EditMinute { text } => (!picker(registry, id)?.edit_minute(text))
            .then(|| "minute is not editable".to_string()),
        ScriptStep::FinishEdit => picker(registry, id)?
            .finish_edit()
            .err()
            .map(|err| err.to_string()),
        ScriptStep::SwitchView => picker(registry, id)?
            .switch_view()
            .err()
            .map(|err| err.to_string()),
        ScriptStep::Accept => picker(registry, id)?
            .commit_if_valid()
            .err()
            .map(|err| err.to_string()),
        ScriptStep::Cancel => (!picker(registry, id)?.cancel()).then(closed).flatten(),
        ScriptStep::Reset { seed } => {
            let seed = seed.resolve(clock_type).context("invalid reset seed")?;
            picker(registry, id)?.reset(seed)?;
            None
        }
    };
    Ok(rejection)
}

fn picker(
    registry: &mut PickerRegistry<RecordingHost>,
    id: SessionId,
) -> Result<&mut PickerSession<RecordingHost>> {
    registry.get_mut(id).context("picker session is gone")
}

fn apply_pointer(
    registry: &mut PickerRegistry<RecordingHost>,
    id: SessionId,
    step: &PointerStep,
) -> Result<Option<String>> {
    let session = registry.get_mut(id).context("picker session is gone")?;
    let position = step
        .position(session.config().dial_diameter)
        .context("pointer step has no position")?;
    if let Some(kind) = step.touch_target {
        session.host_mut().map_hit(
            position,
            HitTarget {
                kind,
                disabled: step.disabled,
            },
        );
    }

    // Pointer events are never refused loudly; a dropped drag simply emits nothing.
    registry.dispatch(Some(id), &step.event(position));
    Ok(None)
}

fn flush_notifications(
    registry: &mut PickerRegistry<RecordingHost>,
    id: SessionId,
    out: &mut impl Write,
) -> Result<usize> {
    let Some(session) = registry.get_mut(id) else {
        return Ok(0);
    };
    let notifications = session.host_mut().drain_notifications();
    for notification in &notifications {
        writeln!(out, "{}", serde_json::to_string(notification)?)?;
    }
    Ok(notifications.len())
}

#[derive(Debug, Deserialize)]
struct SessionScriptFile {
    version: u32,
    #[serde(default)]
    config: ClockConfig,
    #[serde(default)]
    disabled_time: DisabledTimeOptions,
    #[serde(default)]
    seed: Option<SeedInput>,
    #[serde(default)]
    steps: Vec<ScriptStep>,
}
