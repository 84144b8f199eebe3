//! Inline formatter: converts section body lines into display blocks.
//!
//! Each non-empty line becomes one block. Lines opening with a bullet glyph
//! or an ordinal marker become bullet blocks (marker stripped); everything
//! else is a paragraph. Within a line, `**bold**` runs become strong spans
//! and standalone numeric tokens become numeric spans.

use std::sync::LazyLock;

use regex::Regex;

// ---------------------------------------------------------------------------
// Display blocks
// ---------------------------------------------------------------------------

/// One resolved inline span. Renderers map variants to their styling layer
/// directly; no further escaping happens downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// Strong emphasis (`**…**` in the source).
    Strong(String),
    /// A highlighted numeric token (`42%`, `$3.5B`, `120+`, `10k↑`).
    Number(String),
}

impl Inline {
    /// The span's text content, regardless of kind.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Strong(s) | Self::Number(s) => s,
        }
    }
}

/// Whether a block renders as a flowing paragraph or a bulleted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Bullet,
}

/// One rendered line unit with inline spans already resolved. Transient,
/// recomputed per render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBlock {
    pub kind: BlockKind,
    pub spans: Vec<Inline>,
}

impl DisplayBlock {
    /// Concatenated text of all spans with markup dropped.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Inline::text).collect()
    }
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Matches a leading ordinal-list marker: `1. ` or `12) `.
static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}[.)]\s+").expect("ordinal regex"));

/// Candidate numeric token: optional `$` prefix, digits with comma groups and
/// an optional decimal part, optional magnitude suffix, optional `%`/`+`,
/// optional directional arrow.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\d+(?:,\d{3})*(?:\.\d+)?(?:[kMB])?[%+]?[↑↓]?").expect("number regex")
});

/// Convert a section body into display blocks, one per non-empty line.
pub fn format_body(body: &str) -> Vec<DisplayBlock> {
    body.lines().filter_map(format_line).collect()
}

/// Format a single line; blank lines produce no block.
fn format_line(line: &str) -> Option<DisplayBlock> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (kind, rest) = strip_marker(trimmed);
    Some(DisplayBlock {
        kind,
        spans: parse_inline(rest),
    })
}

/// Strip a leading bullet glyph or ordinal-list marker.
fn strip_marker(line: &str) -> (BlockKind, &str) {
    for glyph in ["- ", "* ", "• "] {
        if let Some(rest) = line.strip_prefix(glyph) {
            return (BlockKind::Bullet, rest.trim_start());
        }
    }
    if let Some(m) = ORDINAL_RE.find(line) {
        return (BlockKind::Bullet, &line[m.end()..]);
    }
    (BlockKind::Paragraph, line)
}

/// Split `**bold**` runs into strong spans, then highlight numeric tokens in
/// the plain runs. An unmatched `**` passes through as literal text.
fn parse_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        let Some(close_rel) = rest[open + 2..].find("**") else {
            break;
        };
        let close = open + 2 + close_rel;
        push_plain(&mut spans, &rest[..open]);
        spans.push(Inline::Strong(rest[open + 2..close].to_string()));
        rest = &rest[close + 2..];
    }
    push_plain(&mut spans, rest);

    spans
}

/// Append a plain run, splitting out highlighted numeric tokens.
///
/// Only plain runs are scanned, so text already marked as emphasis is never
/// re-marked, and the stripped list/ordinal markers never reach this point.
fn push_plain(spans: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }

    let mut last = 0;
    for m in NUMBER_RE.find_iter(text) {
        if !standalone(text, m.start(), m.end()) {
            continue;
        }
        if m.start() > last {
            spans.push(Inline::Text(text[last..m.start()].to_string()));
        }
        spans.push(Inline::Number(m.as_str().to_string()));
        last = m.end();
    }
    if last < text.len() {
        spans.push(Inline::Text(text[last..].to_string()));
    }
}

/// A token counts as standalone when its neighbours are not alphanumeric;
/// digits embedded in words (`FY2024`, `v2`) stay plain.
fn standalone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn block(line: &str) -> DisplayBlock {
        format_line(line).expect("non-empty line")
    }

    #[test]
    fn bullet_with_emphasis_and_number() {
        let b = block("- **Revenue** grew 42%");
        assert_eq!(b.kind, BlockKind::Bullet);
        assert_eq!(
            b.spans,
            vec![
                Inline::Strong("Revenue".into()),
                Inline::Text(" grew ".into()),
                Inline::Number("42%".into()),
            ]
        );
        // Leading glyph is gone from the rendered text.
        assert_eq!(b.plain_text(), "Revenue grew 42%");
    }

    #[test]
    fn ordinal_marker_stripped_without_highlight() {
        let b = block("1. Ship the report");
        assert_eq!(b.kind, BlockKind::Bullet);
        assert_eq!(b.spans, vec![Inline::Text("Ship the report".into())]);
    }

    #[test]
    fn ordinal_paren_variant() {
        let b = block("12) Review the deck");
        assert_eq!(b.kind, BlockKind::Bullet);
        assert_eq!(b.plain_text(), "Review the deck");
    }

    #[test]
    fn plain_line_is_paragraph() {
        let b = block("Something happened overnight");
        assert_eq!(b.kind, BlockKind::Paragraph);
        assert_eq!(b.spans.len(), 1);
    }

    #[test]
    fn asterisk_and_unicode_bullets() {
        assert_eq!(block("* item").kind, BlockKind::Bullet);
        assert_eq!(block("• item").kind, BlockKind::Bullet);
        assert_eq!(block("• item").plain_text(), "item");
    }

    #[test]
    fn blank_lines_skipped() {
        let blocks = format_body("first\n\n   \nsecond");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "first");
        assert_eq!(blocks[1].plain_text(), "second");
    }

    #[test]
    fn unmatched_bold_passes_through() {
        let b = block("a **dangling marker");
        assert_eq!(b.plain_text(), "a **dangling marker");
        assert!(b.spans.iter().all(|s| !matches!(s, Inline::Strong(_))));
    }

    #[test]
    fn number_suffix_variants() {
        for (input, token) in [
            ("revenue hit $35B", "$35B"),
            ("about 1,200 replies", "1,200"),
            ("up 3.5% today", "3.5%"),
            ("waitlist passed 10k↑", "10k↑"),
            ("at least 120+ vendors", "120+"),
        ] {
            let b = block(input);
            assert!(
                b.spans.contains(&Inline::Number(token.into())),
                "expected {token} highlighted in {input:?}: {:?}",
                b.spans
            );
        }
    }

    #[test]
    fn word_embedded_digits_stay_plain() {
        for input in ["FY2024 results", "the v2 rollout", "model GPT4o shipped"] {
            let b = block(input);
            assert!(
                b.spans.iter().all(|s| !matches!(s, Inline::Number(_))),
                "no highlight expected in {input:?}: {:?}",
                b.spans
            );
        }
    }

    #[test]
    fn numbers_inside_emphasis_not_remarked() {
        let b = block("**up 42%** overall");
        assert_eq!(b.spans[0], Inline::Strong("up 42%".into()));
    }

    #[test]
    fn formatting_is_deterministic() {
        let body = "- **Revenue** grew 42%\n1. Ship the report\nPlain closing line";
        assert_eq!(format_body(body), format_body(body));
    }

    #[test]
    fn empty_body_yields_no_blocks() {
        assert!(format_body("").is_empty());
        assert!(format_body("\n\n").is_empty());
    }
}
