//! Dashboard view model: classified sections with formatted blocks.
//!
//! Built fresh from the briefing document on every render; nothing here is
//! persisted or mutated in place.

use chrono::{DateTime, Utc};

use daybrief_briefing::{Category, DisplayBlock, format_body, split_sections};
use daybrief_shared::{Briefing, SourceLink};

/// The fully rendered briefing, ready for a frontend to draw.
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// When the upstream process generated the document.
    pub generated_at: DateTime<Utc>,
    /// Classified sections in document order.
    pub sections: Vec<SectionView>,
    /// Source records, unchanged from the document.
    pub sources: Vec<SourceLink>,
}

/// One classified section with its body resolved into display blocks.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub title: String,
    pub category: Category,
    pub blocks: Vec<DisplayBlock>,
}

/// Build the dashboard view model from a briefing document.
///
/// Pure: the same document always yields the same dashboard. An empty or
/// unrecognized summary yields an empty section list, never an error.
pub fn build_dashboard(briefing: &Briefing) -> Dashboard {
    let sections = split_sections(&briefing.summary)
        .into_iter()
        .map(|section| SectionView {
            blocks: format_body(&section.body),
            title: section.title,
            category: section.category,
        })
        .collect();

    Dashboard {
        generated_at: briefing.generated_at,
        sections,
        sources: briefing.sources.clone(),
    }
}

/// Distinct origin tags across the source list, in first-seen order.
pub fn source_tags(sources: &[SourceLink]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for link in sources {
        if !link.source.is_empty() && !tags.iter().any(|t| t == &link.source) {
            tags.push(link.source.clone());
        }
    }
    tags
}

/// Filter sources by origin tag. `None` keeps everything.
pub fn filter_sources<'a>(sources: &'a [SourceLink], tag: Option<&str>) -> Vec<&'a SourceLink> {
    sources
        .iter()
        .filter(|link| tag.is_none_or(|t| link.source == t))
        .collect()
}
