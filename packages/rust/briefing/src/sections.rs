//! Section classifier: splits briefing markdown into categorized sections.
//!
//! Headings at any of three levels (`##`, `###`, `####`) delimit sections.
//! A heading is matched case-insensitively against a fixed needle table;
//! headings that match nothing, and sections whose body is empty after
//! trimming, are dropped without error.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Fixed set of categories a briefing heading can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    KeyDevelopments,
    Markets,
    Technology,
    World,
    ActionItems,
    Watchlist,
}

impl Category {
    /// Icon glyph shown next to the section title.
    pub fn icon(self) -> &'static str {
        match self {
            Self::KeyDevelopments => "◆",
            Self::Markets => "▲",
            Self::Technology => "⚙",
            Self::World => "◉",
            Self::ActionItems => "✓",
            Self::Watchlist => "◷",
        }
    }

    /// Style tone; renderers map tones to their own colors.
    pub fn tone(self) -> Tone {
        match self {
            Self::KeyDevelopments => Tone::Accent,
            Self::Markets => Tone::Positive,
            Self::Technology => Tone::Info,
            Self::World => Tone::Neutral,
            Self::ActionItems => Tone::Task,
            Self::Watchlist => Tone::Muted,
        }
    }
}

/// Style hint attached to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Positive,
    Info,
    Neutral,
    Task,
    Muted,
}

/// Category lookup table. Matching walks this slice in order and takes the
/// first needle contained in the lowercased heading, so declaration order is
/// the tie-break when a heading could match more than one entry.
const CATEGORY_TABLE: &[(&str, Category)] = &[
    ("key development", Category::KeyDevelopments),
    ("headline", Category::KeyDevelopments),
    ("market", Category::Markets),
    ("finance", Category::Markets),
    ("tech", Category::Technology),
    ("world", Category::World),
    ("global", Category::World),
    ("action", Category::ActionItems),
    ("todo", Category::ActionItems),
    ("watch", Category::Watchlist),
    ("ahead", Category::Watchlist),
];

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// A classified briefing section. Derived transiently from the summary text
/// on every render; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text with decorative markers stripped.
    pub title: String,
    /// Category the heading classified into.
    pub category: Category,
    /// Body text between this heading and the next.
    pub body: String,
}

/// Matches `## Title` through `#### Title`.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{2,4})\s+(.+)$").expect("heading regex"));

/// Split briefing markdown into classified sections.
///
/// Text before the first heading is not part of any section and is dropped.
/// Returns an empty list when nothing matches; the caller handles that case.
pub fn split_sections(summary: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut open: Option<(String, Category)> = None;
    let mut body = String::new();

    for line in summary.lines() {
        if let Some(caps) = HEADING_RE.captures(line.trim()) {
            finish_section(&mut sections, open.take(), &body);
            body.clear();

            // Strip bold markers before matching; headings like
            // `### **MARKETS**` classify the same as `### MARKETS`.
            let title = caps[2].replace("**", "").trim().to_string();
            open = classify(&title).map(|category| (title, category));
        } else if open.is_some() {
            body.push_str(line);
            body.push('\n');
        }
    }
    finish_section(&mut sections, open.take(), &body);

    sections
}

/// Classify a heading against the category table, first declared entry wins.
fn classify(heading: &str) -> Option<Category> {
    let lowered = heading.to_lowercase();
    CATEGORY_TABLE
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, category)| *category)
}

/// Close the open section, dropping it when the body trims to nothing.
fn finish_section(sections: &mut Vec<Section>, open: Option<(String, Category)>, body: &str) {
    if let Some((title, category)) = open {
        let body = body.trim();
        if !body.is_empty() {
            sections.push(Section {
                title,
                category,
                body: body.to_string(),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_section_with_body() {
        let sections = split_sections("### KEY DEVELOPMENTS\nSomething happened");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "KEY DEVELOPMENTS");
        assert_eq!(sections[0].category, Category::KeyDevelopments);
        assert_eq!(sections[0].body, "Something happened");
    }

    #[test]
    fn unrecognized_headings_yield_empty_list() {
        let sections = split_sections("### WEATHER\nSunny, 22C\n\n## SPORTS\nHome team won");
        assert!(sections.is_empty());
    }

    #[test]
    fn first_table_entry_wins_tiebreak() {
        // "MARKET WATCH" contains both "market" and "watch"; the `market`
        // entry is declared first.
        let sections = split_sections("## MARKET WATCH\nFutures are flat");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, Category::Markets);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let sections = split_sections("## Tech Roundup\nChips are fast now");
        assert_eq!(sections[0].category, Category::Technology);
    }

    #[test]
    fn bold_markers_stripped_before_matching() {
        let sections = split_sections("### **MARKETS**\nStocks rose");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "MARKETS");
        assert_eq!(sections[0].category, Category::Markets);
    }

    #[test]
    fn all_three_heading_levels_accepted() {
        let md = "## MARKETS\nup\n### TECH\nnew\n#### WORLD\ncalm";
        let sections = split_sections(md);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].category, Category::Markets);
        assert_eq!(sections[1].category, Category::Technology);
        assert_eq!(sections[2].category, Category::World);
    }

    #[test]
    fn h1_and_h5_are_not_section_delimiters() {
        let md = "# MARKETS\nignored\n##### TECH\nalso body text";
        let sections = split_sections(md);
        // Neither line opens a section, so everything is preamble.
        assert!(sections.is_empty());
    }

    #[test]
    fn empty_body_section_dropped() {
        let md = "## MARKETS\n\n\n## TECH\nSomething shipped";
        let sections = split_sections(md);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].category, Category::Technology);
    }

    #[test]
    fn preamble_before_first_heading_dropped() {
        let md = "Good morning!\n\n## MARKETS\nStocks rose";
        let sections = split_sections(md);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "Stocks rose");
    }

    #[test]
    fn unmatched_heading_drops_its_body_too() {
        let md = "## SPORTS\nHome team won\n## MARKETS\nStocks rose";
        let sections = split_sections(md);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "Stocks rose");
    }

    #[test]
    fn ordering_follows_input() {
        let md = "## WATCHLIST\nFed meets\n## MARKETS\nStocks rose";
        let sections = split_sections(md);
        assert_eq!(sections[0].category, Category::Watchlist);
        assert_eq!(sections[1].category, Category::Markets);
    }

    #[test]
    fn classification_is_deterministic() {
        let md = "### KEY DEVELOPMENTS\n- A thing\n\n## MARKET WATCH\n- Another";
        assert_eq!(split_sections(md), split_sections(md));
    }

    #[test]
    fn empty_input_degrades_to_empty_list() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("no headings at all").is_empty());
    }
}
