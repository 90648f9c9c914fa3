//! User-facing notices (toasts).
//!
//! Every component reports to the user through a cloneable [`Notices`] handle.
//! The view owns the receiving end; when it is gone, notices are dropped.

use crate::error::ErrorKind;
use tokio::sync::mpsc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl From<ErrorKind> for NoticeLevel {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Validation | ErrorKind::Unsupported => NoticeLevel::Warning,
            ErrorKind::Collaborator => NoticeLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Notices {
    sender: mpsc::UnboundedSender<Notice>,
}

impl Notices {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// A handle whose notices go nowhere.
    pub fn discard() -> Self {
        Self::channel().0
    }

    pub fn push(&self, level: NoticeLevel, message: impl Into<String>) {
        let notice = Notice {
            level,
            message: message.into(),
        };
        debug!(level = ?notice.level, message = %notice.message, "Notice");
        let _ = self.sender.send(notice);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message);
    }

    /// Reports a classified failure at the level its kind calls for.
    pub fn failure(&self, kind: ErrorKind, message: impl Into<String>) {
        self.push(kind.into(), message);
    }
}

/// Drains whatever is queued right now, without waiting.
pub fn drain(receiver: &mut mpsc::UnboundedReceiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = receiver.try_recv() {
        notices.push(notice);
    }
    notices
}
