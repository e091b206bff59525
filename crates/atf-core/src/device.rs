use atf_types::{Direction, Frame};

use crate::error::DeviceError;

/// Source of captured frames (screen capture, stream, replay)
#[async_trait::async_trait]
pub trait FrameSource: Send + Sync {
    /// `Ok(None)` when no frame is available right now; `Err` is fatal
    async fn get_frame(&self) -> Result<Option<Frame>, DeviceError>;
}

/// OCR over a named region of a frame
#[async_trait::async_trait]
pub trait TextExtractor: Send + Sync {
    /// Empty string for a degenerate or unknown region
    async fn extract_text(&self, frame: &Frame, region: &str) -> String;
}

/// Controller input. Each call is fire-and-settle: press, hold, release and
/// settle are all handled before it returns.
#[async_trait::async_trait]
pub trait InputEmitter: Send + Sync {
    async fn press_direction(&self, direction: Direction) -> Result<(), DeviceError>;

    async fn press_confirm(&self) -> Result<(), DeviceError>;

    async fn press_back(&self) -> Result<(), DeviceError>;
}

/// Liveness of the game process
#[async_trait::async_trait]
pub trait ProcessMonitor: Send + Sync {
    async fn is_running(&self) -> bool;
}
