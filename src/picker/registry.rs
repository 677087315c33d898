use std::collections::HashMap;
use std::fmt;

use log::debug;
use serde::Serialize;

use crate::picker::disabled::DisabledTimeOptions;
use crate::picker::error::ConfigurationError;
use crate::picker::events::{PickerHost, PointerEvent, PointerPhase};
use crate::picker::model::{ClockConfig, Seed};
use crate::picker::session::{PickerSession, PointerResponse};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "picker-{}", self.0)
    }
}

/// Every open picker on a page, plus the one (if any) currently being dragged.
///
/// Move and release events are routed to the dragging session regardless of which dial
/// they land on; presses go to the dial that was hit.
pub struct PickerRegistry<H: PickerHost> {
    sessions: HashMap<SessionId, PickerSession<H>>,
    active_session: Option<SessionId>,
    next_id: u64,
}

impl<H: PickerHost> Default for PickerRegistry<H> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
            active_session: None,
            next_id: 1,
        }
    }
}

impl<H: PickerHost> PickerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(
        &mut self,
        config: ClockConfig,
        disabled: &DisabledTimeOptions,
        seed: Seed,
        host: H,
    ) -> Result<SessionId, ConfigurationError> {
        let session = PickerSession::initialize(config, disabled, seed, host)?;
        Ok(self.insert(session))
    }

    pub fn insert(&mut self, session: PickerSession<H>) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, session);
        debug!("registered {id}");
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&PickerSession<H>> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut PickerSession<H>> {
        self.sessions.get_mut(&id)
    }

    pub fn active_session(&self) -> Option<SessionId> {
        self.active_session
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Routes one pointer event. `dial` is the picker whose dial the event landed on.
    ///
    /// Returns `None` when no registered session should see the event.
    pub fn dispatch(
        &mut self,
        dial: Option<SessionId>,
        event: &PointerEvent,
    ) -> Option<(SessionId, PointerResponse)> {
        let id = match event.phase {
            PointerPhase::Down => {
                let id = dial?;
                if let Some(previous) = self.active_session
                    && previous != id
                    && let Some(session) = self.sessions.get_mut(&previous)
                {
                    session.end_drag();
                }
                id
            }
            PointerPhase::Move | PointerPhase::Up => self.active_session.or(dial)?,
        };

        let Some(session) = self.sessions.get_mut(&id) else {
            if self.active_session == Some(id) {
                self.active_session = None;
            }
            debug!("{} for unknown {id} dropped", event.source_label());
            return None;
        };
        let response = session.handle_pointer_event(event);

        if session.is_dragging() {
            self.active_session = Some(id);
        } else if self.active_session == Some(id) || event.phase == PointerPhase::Down {
            self.active_session = None;
        }
        Some((id, response))
    }

    /// Tears the session down and forgets it.
    pub fn close(&mut self, id: SessionId) -> Option<PickerSession<H>> {
        let mut session = self.sessions.remove(&id)?;
        session.teardown();
        if self.active_session == Some(id) {
            self.active_session = None;
        }
        debug!("closed {id}");
        Some(session)
    }
}
