use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single sampled video frame.
///
/// `seq` is assigned by the frame source and grows by one per produced frame.
/// Synthetic frames (replays, tests) may carry an empty pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub seq: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Arc<[u8]>,
}

impl Frame {
    pub fn new(seq: u64, width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            seq,
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// Frame with dimensions but no pixel data
    pub fn synthetic(seq: u64, width: u32, height: u32) -> Self {
        Self::new(seq, width, height, Vec::new())
    }
}

/// Pixel rectangle read by OCR, written as `[x1, y1, x2, y2]` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct OcrRegion {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl OcrRegion {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Intersect with a `width` x `height` frame
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        Self {
            x1: self.x1.min(width),
            y1: self.y1.min(height),
            x2: self.x2.min(width),
            y2: self.y2.min(height),
        }
    }
}

impl From<[u32; 4]> for OcrRegion {
    fn from([x1, y1, x2, y2]: [u32; 4]) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

impl From<OcrRegion> for [u32; 4] {
    fn from(r: OcrRegion) -> Self {
        [r.x1, r.y1, r.x2, r.y2]
    }
}

/// Vertical menu movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    #[default]
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// Everything the navigator can ask the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Move(Direction),
    Confirm,
    Back,
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuAction::Move(direction) => write!(f, "{direction}"),
            MenuAction::Confirm => write!(f, "CONFIRM"),
            MenuAction::Back => write!(f, "BACK"),
        }
    }
}
