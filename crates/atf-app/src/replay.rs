//! Frame and text collaborators backed by a recorded OCR transcript.
//!
//! A transcript holds one sample per line. `#` starts a comment, a lone `~`
//! marks a tick where no frame was available, a lone `!` marks the game
//! process exiting and every other line is the text the OCR engine read for
//! that frame.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Context;
use atf_core::{DeviceError, FrameSource, ProcessMonitor, TextExtractor};
use atf_types::{Frame, OcrRegion};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sample {
    Unavailable,
    Exited,
    Text(String),
}

#[derive(Debug, Default)]
pub struct Transcript {
    samples: Vec<Sample>,
    cursor: AtomicUsize,
}

impl Transcript {
    pub fn parse(text: &str) -> Self {
        let samples = text
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(|line| match line.trim() {
                "~" => Sample::Unavailable,
                "!" => Sample::Exited,
                _ => Sample::Text(line.to_string()),
            })
            .collect();

        Self {
            samples,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Advance to the next sample, `None` once the recording ran out
    fn advance(&self) -> Option<(usize, &Sample)> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.samples.get(index).map(|s| (index, s))
    }

    /// The game exited at or before the next sample
    fn exited(&self) -> bool {
        let next = self.cursor.load(Ordering::SeqCst);
        self.samples
            .iter()
            .take(next + 1)
            .any(|s| *s == Sample::Exited)
    }

    fn text_at(&self, index: usize) -> &str {
        match self.samples.get(index) {
            Some(Sample::Text(text)) => text,
            _ => "",
        }
    }
}

pub struct TranscriptFrames {
    transcript: Arc<Transcript>,
    width: u32,
    height: u32,
}

impl TranscriptFrames {
    pub fn new(transcript: Arc<Transcript>, width: u32, height: u32) -> Self {
        Self {
            transcript,
            width,
            height,
        }
    }
}

#[async_trait::async_trait]
impl FrameSource for TranscriptFrames {
    async fn get_frame(&self) -> Result<Option<Frame>, DeviceError> {
        match self.transcript.advance() {
            Some((_, Sample::Unavailable)) => Ok(None),
            Some((_, Sample::Exited)) => Err(DeviceError::ProcessGone(
                "game exited during the recording".to_string(),
            )),
            Some((index, Sample::Text(_))) => {
                Ok(Some(Frame::synthetic(index as u64, self.width, self.height)))
            }
            None => Err(DeviceError::Disconnected(
                "transcript ended before the menu was done".to_string(),
            )),
        }
    }
}

/// Game liveness as recorded by `!` markers in the transcript
pub struct TranscriptMonitor {
    transcript: Arc<Transcript>,
}

impl TranscriptMonitor {
    pub fn new(transcript: Arc<Transcript>) -> Self {
        Self { transcript }
    }
}

#[async_trait::async_trait]
impl ProcessMonitor for TranscriptMonitor {
    async fn is_running(&self) -> bool {
        !self.transcript.exited()
    }
}

pub struct TranscriptText {
    transcript: Arc<Transcript>,
    regions: HashMap<String, OcrRegion>,
}

impl TranscriptText {
    pub fn new(transcript: Arc<Transcript>, regions: HashMap<String, OcrRegion>) -> Self {
        Self {
            transcript,
            regions,
        }
    }
}

#[async_trait::async_trait]
impl TextExtractor for TranscriptText {
    async fn extract_text(&self, frame: &Frame, region: &str) -> String {
        let Some(bounds) = self.regions.get(region) else {
            tracing::warn!("OCR region '{}' is not configured", region);
            return String::new();
        };

        let bounds = bounds.clamp_to(frame.width, frame.height);
        if bounds.is_degenerate() {
            tracing::warn!("OCR region '{}' is empty after clamping: {:?}", region, bounds);
            return String::new();
        }

        self.transcript.text_at(frame.seq as usize).to_string()
    }
}
