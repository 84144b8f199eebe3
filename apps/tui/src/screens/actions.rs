//! "Actions" screen — the persisted to-do list.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use daybrief_shared::ActionItem;

use crate::store::SyncStore;

pub(crate) struct ActionsScreen {
    items: Vec<ActionItem>,
    selected: usize,
    editing: bool,
    input: String,
    status: String,
}

impl ActionsScreen {
    pub(crate) fn new(store: &SyncStore) -> Self {
        let (items, status) = match store.list_actions() {
            Ok(items) => (items, "a adds, Space toggles, d deletes, c clears done.".to_string()),
            Err(e) => (Vec::new(), format!("Storage error: {e}")),
        };

        Self {
            items,
            selected: 0,
            editing: false,
            input: String::new(),
            status,
        }
    }

    pub(crate) fn is_editing(&self) -> bool {
        self.editing
    }

    pub(crate) fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Min(1),    // List
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status
            ])
            .split(area);

        if self.items.is_empty() {
            let empty = Paragraph::new("No action items yet.\n\nPress 'a' to add one.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Action items "));
            f.render_widget(empty, chunks[0]);
        } else {
            let items: Vec<ListItem> = self
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let mut style = if i == self.selected && !self.editing {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    if item.completed {
                        style = style
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT);
                    }
                    let prefix = if i == self.selected && !self.editing {
                        "▸ "
                    } else {
                        "  "
                    };
                    let mark = if item.completed { "[x]" } else { "[ ]" };
                    ListItem::new(format!("{prefix}{mark} {}", item.text)).style(style)
                })
                .collect();

            let done = self.items.iter().filter(|i| i.completed).count();
            let list = List::new(items).block(Block::default().borders(Borders::ALL).title(
                format!(" Action items ({done}/{} done) ", self.items.len()),
            ));
            f.render_widget(list, chunks[0]);
        }

        // Input row
        let (input_title, input_style) = if self.editing {
            (
                " New item — Enter to add, Esc to cancel ",
                Style::default().fg(Color::Yellow),
            )
        } else {
            (" Press 'a' to add an item ", Style::default().fg(Color::DarkGray))
        };
        let input = Paragraph::new(self.input.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(input_title)
                .border_style(input_style),
        );
        f.render_widget(input, chunks[1]);

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[2]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers, store: &SyncStore) {
        if self.editing {
            match code {
                KeyCode::Esc => {
                    self.editing = false;
                    self.input.clear();
                }
                KeyCode::Enter => self.commit_input(store),
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('a') => {
                self.editing = true;
                self.input.clear();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(store),
            KeyCode::Char('d') => self.delete_selected(store),
            KeyCode::Char('c') => self.clear_completed(store),
            _ => {}
        }
    }

    fn commit_input(&mut self, store: &SyncStore) {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            self.editing = false;
            self.input.clear();
            return;
        }

        match store.insert_action(&text) {
            Ok(_) => {
                self.status = format!("Added: {text}");
                self.reload(store);
            }
            Err(e) => self.status = format!("Storage error: {e}"),
        }
        self.editing = false;
        self.input.clear();
    }

    fn toggle_selected(&mut self, store: &SyncStore) {
        let Some(item) = self.items.get(self.selected) else {
            return;
        };
        match store.set_action_completed(&item.id, !item.completed) {
            Ok(()) => self.reload(store),
            Err(e) => self.status = format!("Storage error: {e}"),
        }
    }

    fn delete_selected(&mut self, store: &SyncStore) {
        let Some(item) = self.items.get(self.selected) else {
            return;
        };
        match store.delete_action(&item.id) {
            Ok(()) => {
                self.status = format!("Removed: {}", item.text);
                self.reload(store);
            }
            Err(e) => self.status = format!("Storage error: {e}"),
        }
    }

    fn clear_completed(&mut self, store: &SyncStore) {
        match store.clear_completed() {
            Ok(removed) => {
                self.status = format!("Removed {removed} completed item(s).");
                self.reload(store);
            }
            Err(e) => self.status = format!("Storage error: {e}"),
        }
    }

    fn reload(&mut self, store: &SyncStore) {
        match store.list_actions() {
            Ok(items) => {
                self.items = items;
                if self.selected >= self.items.len() {
                    self.selected = self.items.len().saturating_sub(1);
                }
            }
            Err(e) => self.status = format!("Storage error: {e}"),
        }
    }
}
