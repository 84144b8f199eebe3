//! Reusable TUI widgets and style mapping.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use daybrief_briefing::{Inline, Tone};

/// Bottom status bar.
pub(crate) fn status_bar(msg: &str) -> Paragraph<'_> {
    Paragraph::new(format!(" {msg}")).style(Style::default().bg(Color::DarkGray).fg(Color::White))
}

/// Map a section tone to a terminal color.
pub(crate) fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Accent => Color::Cyan,
        Tone::Positive => Color::Green,
        Tone::Info => Color::Blue,
        Tone::Neutral => Color::White,
        Tone::Task => Color::Yellow,
        Tone::Muted => Color::DarkGray,
    }
}

/// Convert resolved inline spans into styled ratatui spans.
///
/// Strong spans render bold; numeric spans take the section's tone color.
pub(crate) fn inline_spans(spans: &[Inline], number_color: Color) -> Vec<Span<'static>> {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text(s) => Span::raw(s.clone()),
            Inline::Strong(s) => {
                Span::styled(s.clone(), Style::default().add_modifier(Modifier::BOLD))
            }
            Inline::Number(s) => Span::styled(
                s.clone(),
                Style::default()
                    .fg(number_color)
                    .add_modifier(Modifier::BOLD),
            ),
        })
        .collect()
}
