use std::time::Duration;

/// Failure reported by a frame source or input emitter.
///
/// Always fatal to the navigation in progress; transient unavailability is
/// expressed as `Ok(None)` by the frame source instead.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("Target process is gone: {0}")]
    ProcessGone(String),

    #[error("Device disconnected: {0}")]
    Disconnected(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum NavError {
    #[error(transparent)]
    Device(#[from] DeviceError),

    #[error("Gave up on '{target}' after {attempts} attempts ({elapsed:?})")]
    Exhausted {
        target: String,
        attempts: u32,
        elapsed: Duration,
    },

    #[error("League '{0}' is not in the roster")]
    UnknownLeague(String),

    #[error("Screen froze: '{team}' looks exactly like the previous team")]
    Frozen { team: String },

    #[error("Team handler failed: {0}")]
    Handler(String),
}
