//! "Notes" screen — freeform text persisted across sessions.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::store::SyncStore;

pub(crate) struct NotesScreen {
    content: String,
    editing: bool,
    dirty: bool,
    status: String,
}

impl NotesScreen {
    pub(crate) fn new(store: &SyncStore) -> Self {
        let (content, status) = match store.get_notes() {
            Ok(content) => (
                content.unwrap_or_default(),
                "Press 'e' to edit.".to_string(),
            ),
            Err(e) => (String::new(), format!("Storage error: {e}")),
        };

        Self {
            content,
            editing: false,
            dirty: false,
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
                Constraint::Min(1),    // Editor
                Constraint::Length(1), // Status
            ])
            .split(area);

        let title = match (self.editing, self.dirty) {
            (true, _) => " Notes — editing (Ctrl-S saves, Esc stops) ",
            (false, true) => " Notes * (unsaved) ",
            (false, false) => " Notes ",
        };
        let border_style = if self.editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let body: &str = if self.content.is_empty() && !self.editing {
            "Nothing here yet. Press 'e' and start typing."
        } else {
            &self.content
        };

        let editor = Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            );
        f.render_widget(editor, chunks[0]);

        let status = Paragraph::new(self.status.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[1]);
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, store: &SyncStore) {
        if self.editing {
            match code {
                KeyCode::Char('s') if modifiers.contains(KeyModifiers::CONTROL) => {
                    self.save(store);
                }
                KeyCode::Esc => {
                    self.editing = false;
                    self.status = if self.dirty {
                        "Stopped editing — unsaved changes (press 'e' then Ctrl-S).".to_string()
                    } else {
                        "Press 'e' to edit.".to_string()
                    };
                }
                KeyCode::Enter => {
                    self.content.push('\n');
                    self.dirty = true;
                }
                KeyCode::Backspace => {
                    self.content.pop();
                    self.dirty = true;
                }
                KeyCode::Char(c) => {
                    self.content.push(c);
                    self.dirty = true;
                }
                _ => {}
            }
            return;
        }

        if let KeyCode::Char('e') = code {
            self.editing = true;
            self.status = "Editing — Ctrl-S saves, Esc stops.".to_string();
        }
    }

    fn save(&mut self, store: &SyncStore) {
        match store.set_notes(&self.content) {
            Ok(()) => {
                self.dirty = false;
                self.status = "Notes saved.".to_string();
            }
            Err(e) => self.status = format!("Storage error: {e}"),
        }
    }
}
