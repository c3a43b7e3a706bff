//! Prompt history types.
//!
//! A `HistoryRecord` is the persisted form of one workspace session: the
//! originating idea plus the prompt elements. Its `id` never changes once
//! assigned and `created_at` is written exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::prompt::{PromptElements, PromptField};

/// Maximum number of characters shown in a history preview line.
const PREVIEW_MAX_CHARS: usize = 100;

/// A saved prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Last write time; drives most-recent-first ordering.
    pub updated_at: DateTime<Utc>,
    pub idea: String,
    pub prompt: PromptElements,
}

impl HistoryRecord {
    /// One-line summary: non-empty fields joined with " / ", truncated.
    pub fn preview(&self) -> String {
        let preview = PromptField::ALL
            .iter()
            .map(|f| self.prompt.field(*f))
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(" / ");

        if preview.chars().count() > PREVIEW_MAX_CHARS {
            let truncated: String = preview.chars().take(PREVIEW_MAX_CHARS).collect();
            format!("{truncated}...")
        } else {
            preview
        }
    }
}

/// Input to a history save.
///
/// A missing or unknown `id` creates a new record; a known `id` updates it
/// in place and promotes it to most recent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub idea: String,
    pub prompt: PromptElements,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(prompt: PromptElements) -> HistoryRecord {
        let now = Utc::now();
        HistoryRecord {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            idea: "idea".to_string(),
            prompt,
        }
    }

    #[test]
    fn test_preview_skips_empty_fields() {
        let r = record(PromptElements {
            role: "illustrator".into(),
            purpose: String::new(),
            constraints: "no text".into(),
            details: String::new(),
        });
        assert_eq!(r.preview(), "illustrator / no text");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let r = record(PromptElements {
            details: "x".repeat(150),
            ..Default::default()
        });
        let preview = r.preview();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 3);
    }

    #[test]
    fn test_save_request_without_id_serializes_compactly() {
        let req = SaveRequest {
            id: None,
            idea: "city".into(),
            prompt: PromptElements::default(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("\"id\""));
    }
}
