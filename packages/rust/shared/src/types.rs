//! Core domain types for daybrief briefings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Briefing
// ---------------------------------------------------------------------------

/// One fetched briefing document.
///
/// Immutable once fetched; a refresh replaces it wholesale. The `summary`
/// field holds the markdown-subset text that the renderer splits into
/// sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Briefing {
    /// Markdown-subset summary text.
    pub summary: String,
    /// When the upstream process generated this document.
    pub generated_at: DateTime<Utc>,
    /// Linked source records, if the generator included any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceLink>,
}

// ---------------------------------------------------------------------------
// SourceLink
// ---------------------------------------------------------------------------

/// A linked item the briefing was built from. Read-only, rendered, never
/// mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceLink {
    /// Display title.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Popularity score (upvotes, points, ...).
    #[serde(default)]
    pub score: i64,
    /// Comment count.
    #[serde(default)]
    pub comments: i64,
    /// Origin tag identifying which external source this came from.
    /// Used only for styling and filtering.
    #[serde(default)]
    pub source: String,
}

// ---------------------------------------------------------------------------
// ActionId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper for action-item identifiers (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(pub Uuid);

impl ActionId {
    /// Generate a new time-sortable action identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ActionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// ActionItem
// ---------------------------------------------------------------------------

/// A user-created to-do item, persisted locally and independent of the
/// briefing document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// Unique identifier.
    pub id: ActionId,
    /// What the user typed.
    pub text: String,
    /// Whether the item has been checked off.
    pub completed: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_id_roundtrip() {
        let id = ActionId::new();
        let s = id.to_string();
        let parsed: ActionId = s.parse().expect("parse ActionId");
        assert_eq!(id, parsed);
    }

    #[test]
    fn briefing_serialization() {
        let briefing = Briefing {
            summary: "### KEY DEVELOPMENTS\nSomething happened".into(),
            generated_at: Utc::now(),
            sources: vec![SourceLink {
                title: "A story".into(),
                url: "https://news.example.com/story".into(),
                score: 412,
                comments: 87,
                source: "hackernews".into(),
            }],
        };

        let json = serde_json::to_string_pretty(&briefing).expect("serialize");
        let parsed: Briefing = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.sources.len(), 1);
        assert_eq!(parsed.sources[0].source, "hackernews");
    }

    #[test]
    fn source_defaults_fill_missing_fields() {
        let json = r#"{"title": "Bare", "url": "https://example.com"}"#;
        let link: SourceLink = serde_json::from_str(json).expect("deserialize");
        assert_eq!(link.score, 0);
        assert_eq!(link.comments, 0);
        assert!(link.source.is_empty());
    }

    #[test]
    fn briefing_fixture_validates() {
        let fixture = std::fs::read_to_string(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("../../../fixtures/json/briefing.fixture.json"),
        )
        .expect("read fixture");
        let parsed: Briefing = serde_json::from_str(&fixture).expect("deserialize fixture");
        assert!(parsed.summary.contains("KEY DEVELOPMENTS"));
        assert_eq!(parsed.sources.len(), 4);
    }
}
