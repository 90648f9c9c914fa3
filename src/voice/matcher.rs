use crate::model::{Language, Product};

/// First product whose name in `language` contains the transcript,
/// case-insensitively. Products without a name in that language are skipped.
pub fn match_transcript<'a>(
    catalog: &'a [Product],
    transcript: &str,
    language: Language,
) -> Option<&'a Product> {
    let needle = transcript.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    catalog.iter().find(|p| p.name_contains(language, &needle))
}
