//! Free-text boards: farmer disputes and product feedback.

use crate::error::ErrorKind;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteError {
    #[error("Please enter some text before submitting")]
    Blank,
}

impl NoteError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

fn non_blank(text: &str) -> Result<String, NoteError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(NoteError::Blank)
    } else {
        Ok(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dispute {
    pub text: String,
    pub raised_at: DateTime<Utc>,
}

/// Disputes raised by a farmer, oldest first.
#[derive(Debug, Clone, Default)]
pub struct DisputeBoard {
    disputes: Vec<Dispute>,
}

impl DisputeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, text: &str) -> Result<&Dispute, NoteError> {
        let text = non_blank(text)?;
        self.disputes.push(Dispute {
            text,
            raised_at: Utc::now(),
        });
        Ok(&self.disputes[self.disputes.len() - 1])
    }

    pub fn disputes(&self) -> &[Dispute] {
        &self.disputes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub author: String,
    pub comment: String,
    /// 1 to 5 stars.
    pub rating: u8,
}

/// Customer feedback shown on a product details page.
#[derive(Debug, Clone)]
pub struct FeedbackBoard {
    product_id: String,
    entries: Vec<Feedback>,
}

impl FeedbackBoard {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            entries: Vec::new(),
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn add(&mut self, author: &str, comment: &str, rating: u8) -> Result<&Feedback, NoteError> {
        let comment = non_blank(comment)?;
        self.entries.push(Feedback {
            author: author.trim().to_string(),
            comment,
            rating: rating.clamp(1, 5),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn entries(&self) -> &[Feedback] {
        &self.entries
    }

    /// Mean star rating, if there is any feedback.
    pub fn average_rating(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let sum: u32 = self.entries.iter().map(|f| u32::from(f.rating)).sum();
        Some(f64::from(sum) / self.entries.len() as f64)
    }
}
