//! Clock-face time picker engine: dial geometry, disabled-time rules and the pointer
//! interaction state machine, with rendering and event delivery left to a [`PickerHost`].

pub mod picker;
pub mod script;

pub use picker::disabled::{DisabledTimeOptions, DisabledTimeSpec, validate_on_accept};
pub use picker::error::{CommitError, ConfigurationError, FieldIssue, ValidationError};
pub use picker::events::{
    DialFrame, DialTarget, HitTarget, Notification, NotificationKind, PickerHost, PointerEvent,
    PointerPhase, RecordingHost,
};
pub use picker::model::{AcceptedTime, ClockConfig, ClockType, Meridiem, Seed, SelectMode};
pub use picker::registry::{PickerRegistry, SessionId};
pub use picker::session::{PickerSession, PointerOutcome, PointerResponse};
