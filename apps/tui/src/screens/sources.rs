//! "Sources" screen — the briefing's linked items, filterable by origin tag.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use daybrief_core::dashboard::{filter_sources, source_tags};
use daybrief_fetch::cache;
use daybrief_shared::SourceLink;

pub(crate) struct SourcesScreen {
    sources: Vec<SourceLink>,
    tags: Vec<String>,
    /// Index into `tags`; `None` shows everything.
    filter: Option<usize>,
    selected: usize,
    max_sources: usize,
    status: String,
}

impl SourcesScreen {
    pub(crate) fn new(sources: Vec<SourceLink>, max_sources: usize) -> Self {
        let tags = source_tags(&sources);
        Self {
            sources,
            tags,
            filter: None,
            selected: 0,
            max_sources,
            status: "f cycles the origin filter, r reloads.".to_string(),
        }
    }

    fn filter_tag(&self) -> Option<&str> {
        self.filter.map(|i| self.tags[i].as_str())
    }

    fn visible(&self) -> Vec<&SourceLink> {
        let mut items = filter_sources(&self.sources, self.filter_tag());
        items.truncate(self.max_sources);
        items
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // List
                Constraint::Length(1), // Status
            ])
            .split(area);

        let title = match self.filter_tag() {
            Some(tag) => format!(" Sources — {tag} "),
            None => " Sources — all ".to_string(),
        };

        let visible = self.visible();
        if visible.is_empty() {
            let empty = Paragraph::new("No source links in this briefing.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = visible
                .iter()
                .enumerate()
                .map(|(i, link)| {
                    let style = if i == self.selected {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let prefix = if i == self.selected { "▸ " } else { "  " };
                    ListItem::new(vec![
                        Line::from(format!("{prefix}[{}] {}", link.source, link.title))
                            .style(style),
                        Line::from(format!(
                            "      {} points · {} comments · {}",
                            link.score, link.comments, link.url
                        ))
                        .style(Style::default().fg(Color::DarkGray)),
                    ])
                })
                .collect();

            let list = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{title}({}) ", visible.len())),
            );
            f.render_widget(list, chunks[0]);
        }

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[1]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.visible().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('f') => self.cycle_filter(),
            KeyCode::Char('r') => self.reload(),
            _ => {}
        }
    }

    /// Advance the origin-tag filter: all → tag 0 → tag 1 → … → all.
    fn cycle_filter(&mut self) {
        self.filter = match self.filter {
            None if self.tags.is_empty() => None,
            None => Some(0),
            Some(i) if i + 1 < self.tags.len() => Some(i + 1),
            Some(_) => None,
        };
        self.selected = 0;
        self.status = match self.filter_tag() {
            Some(tag) => format!("Showing sources tagged '{tag}'."),
            None => "Showing all sources.".to_string(),
        };
    }

    /// Re-read the cached briefing's source list from disk.
    fn reload(&mut self) {
        match cache::load_cached() {
            Ok(Some(briefing)) => {
                self.sources = briefing.sources;
                self.tags = source_tags(&self.sources);
                self.filter = None;
                self.selected = 0;
                self.status = format!("Reloaded {} source(s).", self.sources.len());
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
