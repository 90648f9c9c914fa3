//! Listening sessions.

use super::{match_transcript, SpeechRecognizer, VoiceError};
use crate::bill_actor::BillId;
use crate::clients::BillClient;
use crate::model::{Language, Product};
use crate::view::Notices;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How a listening session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceOutcome {
    Toggled { product_id: String, selected: bool },
    NotFound(String),
    NoSpeech,
    Failed(String),
}

/// Drives one bill's voice selection.
///
/// At most one session runs at a time; starting a session cancels the
/// previous one, and each session yields at most one result.
pub struct VoiceController {
    recognizer: Arc<dyn SpeechRecognizer>,
    bills: BillClient,
    bill_id: BillId,
    notices: Notices,
    session: Option<JoinHandle<VoiceOutcome>>,
    warned_unsupported: bool,
}

impl VoiceController {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        bills: BillClient,
        bill_id: BillId,
        notices: Notices,
    ) -> Self {
        Self {
            recognizer,
            bills,
            bill_id,
            notices,
            session: None,
            warned_unsupported: false,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.session
            .as_ref()
            .map(|session| !session.is_finished())
            .unwrap_or(false)
    }

    /// `true` starts a session over `catalog`, `false` stops the current one.
    /// Returns whether a session is running afterwards.
    pub fn set_listening(&mut self, listening: bool, language: Language, catalog: Vec<Product>) -> bool {
        self.cancel();
        if !listening {
            return false;
        }
        if !self.recognizer.is_supported() {
            if !self.warned_unsupported {
                self.warned_unsupported = true;
                let e = VoiceError::Unsupported;
                warn!("Speech recognition unavailable");
                self.notices.failure(e.kind(), e.to_string());
            }
            return false;
        }

        debug!(bill_id = %self.bill_id, locale = language.speech_locale(), "Listening");
        self.session = Some(tokio::spawn(listen(
            self.recognizer.clone(),
            self.bills.clone(),
            self.bill_id,
            self.notices.clone(),
            language,
            catalog,
        )));
        true
    }

    /// Waits for the running session's outcome. `None` when there is no
    /// session or it was cancelled.
    pub async fn finish(&mut self) -> Option<VoiceOutcome> {
        let session = self.session.take()?;
        session.await.ok()
    }

    fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            if !session.is_finished() {
                debug!(bill_id = %self.bill_id, "Cancelling voice session");
            }
            session.abort();
        }
    }
}

impl Drop for VoiceController {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn listen(
    recognizer: Arc<dyn SpeechRecognizer>,
    bills: BillClient,
    bill_id: BillId,
    notices: Notices,
    language: Language,
    catalog: Vec<Product>,
) -> VoiceOutcome {
    let transcript = match recognizer.recognize(language).await {
        Ok(Some(transcript)) => transcript,
        Ok(None) => return VoiceOutcome::NoSpeech,
        Err(e) => {
            warn!(error = %e, "Recognition failed");
            notices.failure(e.kind(), e.to_string());
            return VoiceOutcome::Failed(e.to_string());
        }
    };

    let Some(product) = match_transcript(&catalog, &transcript, language).cloned() else {
        info!(%transcript, "No product matches transcript");
        notices.warning(format!("Product \"{}\" not found", transcript.trim()));
        return VoiceOutcome::NotFound(transcript);
    };

    let name = product
        .display_name(language)
        .unwrap_or(&product.name)
        .to_string();
    let product_id = product.id.clone();
    match bills.toggle_selection(bill_id, product).await {
        Ok(selected) => {
            if selected {
                notices.success(format!("{} selected", name));
            } else {
                notices.info(format!("{} removed from selection", name));
            }
            VoiceOutcome::Toggled {
                product_id,
                selected,
            }
        }
        Err(e) => {
            notices.failure(e.kind(), e.to_string());
            VoiceOutcome::Failed(e.to_string())
        }
    }
}
