//! "Briefing" screen — classified sections as collapsible cards.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use daybrief_briefing::BlockKind;
use daybrief_core::dashboard::{Dashboard, build_dashboard};
use daybrief_fetch::cache;

use crate::widgets::{inline_spans, tone_color};

pub(crate) struct BriefingScreen {
    dashboard: Option<Dashboard>,
    /// Per-section collapsed flags, parallel to `dashboard.sections`.
    collapsed: Vec<bool>,
    collapse_default: bool,
    selected: usize,
    status: String,
}

impl BriefingScreen {
    pub(crate) fn new(dashboard: Option<Dashboard>, collapse_default: bool) -> Self {
        let collapsed = match &dashboard {
            Some(dash) => vec![collapse_default; dash.sections.len()],
            None => Vec::new(),
        };

        let status = match &dashboard {
            Some(dash) => format!(
                "Generated {} — Space collapses, r reloads.",
                dash.generated_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => "No briefing cached. Run `daybrief fetch`, then press r.".to_string(),
        };

        Self {
            dashboard,
            collapsed,
            collapse_default,
            selected: 0,
            status,
        }
    }

    fn section_count(&self) -> usize {
        self.dashboard
            .as_ref()
            .map_or(0, |dash| dash.sections.len())
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // Cards
                Constraint::Length(1), // Status
            ])
            .split(area);

        let Some(dash) = self.dashboard.as_ref().filter(|d| !d.sections.is_empty()) else {
            let empty = Paragraph::new(
                "No briefing to show.\n\nFetch one with `daybrief fetch`, \
                 then press 'r' to reload.",
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Briefing "));
            f.render_widget(empty, chunks[0]);
            self.draw_status(f, chunks[1]);
            return;
        };

        // Build the card lines, remembering where each section header lands
        // so scrolling can follow the selection.
        let mut lines: Vec<Line> = Vec::new();
        let mut header_lines: Vec<usize> = Vec::new();

        for (i, section) in dash.sections.iter().enumerate() {
            let color = tone_color(section.category.tone());
            let marker = if self.collapsed[i] { "▸" } else { "▾" };

            let mut header_style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            if i == self.selected {
                header_style = header_style.add_modifier(Modifier::REVERSED);
            }

            header_lines.push(lines.len());
            lines.push(Line::from(Span::styled(
                format!("{marker} {} {}", section.category.icon(), section.title),
                header_style,
            )));

            if !self.collapsed[i] {
                for block in &section.blocks {
                    let mut spans = vec![Span::raw(match block.kind {
                        BlockKind::Bullet => "   • ",
                        BlockKind::Paragraph => "   ",
                    })];
                    spans.extend(inline_spans(&block.spans, color));
                    lines.push(Line::from(spans));
                }
            }
            lines.push(Line::from(""));
        }

        // Keep the selected header inside the viewport.
        let visible = chunks[0].height.saturating_sub(2) as usize;
        let selected_line = header_lines[self.selected];
        let scroll = selected_line.saturating_sub(visible.saturating_sub(2)) as u16;

        let cards = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Briefing ({} sections) ", dash.sections.len())),
            )
            .scroll((scroll, 0));
        f.render_widget(cards, chunks[0]);

        self.draw_status(f, chunks[1]);
    }

    fn draw_status(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, area);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.section_count() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(flag) = self.collapsed.get_mut(self.selected) {
                    *flag = !*flag;
                }
            }
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    /// Re-read the cached briefing from disk.
    fn reload(&mut self) {
        match cache::load_cached() {
            Ok(Some(briefing)) => {
                let dash = build_dashboard(&briefing);
                self.collapsed = vec![self.collapse_default; dash.sections.len()];
                self.selected = 0;
                self.status = format!(
                    "Reloaded — generated {}.",
                    dash.generated_at.format("%Y-%m-%d %H:%M UTC")
                );
                self.dashboard = Some(dash);
            }
            Ok(None) => {
                self.status = "No briefing cached. Run `daybrief fetch` first.".to_string();
            }
            Err(e) => {
                self.status = format!("Reload failed: {e}");
            }
        }
    }
}
