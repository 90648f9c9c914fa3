//! # Voice Commands
//!
//! Speech transcripts select products. The recognizer itself is a
//! collaborator behind [`SpeechRecognizer`]; this module only matches the
//! transcript against the catalog and toggles the selection through the
//! bill actor.

mod controller;
mod matcher;

pub use controller::{VoiceController, VoiceOutcome};
pub use matcher::match_transcript;

use crate::error::ErrorKind;
use crate::model::Language;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VoiceError {
    #[error("Speech recognition is not supported on this device")]
    Unsupported,

    #[error("Speech recognition failed: {0}")]
    Recognition(String),
}

impl VoiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VoiceError::Unsupported => ErrorKind::Unsupported,
            VoiceError::Recognition(_) => ErrorKind::Collaborator,
        }
    }
}

/// Platform speech-to-text.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn is_supported(&self) -> bool;

    /// Listens for one utterance in `language`. `Ok(None)` when nothing was
    /// heard before the recognizer gave up.
    async fn recognize(&self, language: Language) -> Result<Option<String>, VoiceError>;
}

/// Recognizer for platforms without speech support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

#[async_trait]
impl SpeechRecognizer for NoSpeech {
    fn is_supported(&self) -> bool {
        false
    }

    async fn recognize(&self, _language: Language) -> Result<Option<String>, VoiceError> {
        Err(VoiceError::Unsupported)
    }
}
