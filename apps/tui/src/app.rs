//! Core TUI application state and event loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use daybrief_core::dashboard::build_dashboard;
use daybrief_fetch::cache;
use daybrief_shared::{db_path, load_config};

use crate::screens::ScreenId;
use crate::screens::actions::ActionsScreen;
use crate::screens::briefing::BriefingScreen;
use crate::screens::notes::NotesScreen;
use crate::screens::sources::SourcesScreen;
use crate::store::SyncStore;
use crate::widgets::status_bar;

/// Application state.
pub(crate) struct App {
    /// Currently active screen tab.
    active_tab: usize,
    /// Tab order.
    tabs: Vec<ScreenId>,
    /// Whether the app should quit.
    should_quit: bool,
    /// Status message shown in the bottom bar.
    status: String,
    /// Whether the help overlay is visible.
    show_help: bool,
    briefing: BriefingScreen,
    sources: SourcesScreen,
    actions: ActionsScreen,
    notes: NotesScreen,
    store: SyncStore,
}

impl App {
    fn new() -> Result<Self> {
        let config = load_config()?;
        let store = SyncStore::open(&db_path()?)?;

        // Cache problems are non-fatal; the briefing screen shows a placeholder.
        let cached = cache::load_cached().unwrap_or(None);
        let dashboard = cached.as_ref().map(build_dashboard);
        let source_links = cached.map(|b| b.sources).unwrap_or_default();

        Ok(Self {
            active_tab: 0,
            tabs: vec![
                ScreenId::Briefing,
                ScreenId::Sources,
                ScreenId::Actions,
                ScreenId::Notes,
            ],
            should_quit: false,
            status: "Ready — press ? for help".to_string(),
            show_help: false,
            briefing: BriefingScreen::new(dashboard, config.ui.collapsed_by_default),
            sources: SourcesScreen::new(source_links, config.ui.max_sources),
            actions: ActionsScreen::new(&store),
            notes: NotesScreen::new(&store),
            store,
        })
    }

    /// Whether the current screen has an active text input.
    fn is_editing(&self) -> bool {
        match self.tabs[self.active_tab] {
            ScreenId::Actions => self.actions.is_editing(),
            ScreenId::Notes => self.notes.is_editing(),
            _ => false,
        }
    }
}

/// Entry point — sets up terminal, runs event loop, restores terminal.
pub(crate) fn run() -> Result<()> {
    // Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    let mut app = App::new()?;

    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Poll for events with 100ms timeout for responsive UI
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key.code, key.modifiers);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    // Global keybindings (always active)
    match code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if !app.is_editing() => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') if !app.is_editing() => {
            app.show_help = !app.show_help;
            return;
        }
        KeyCode::Esc if app.show_help => {
            app.show_help = false;
            return;
        }
        // Tab navigation with number keys
        KeyCode::Char(c @ '1'..='4') if !app.is_editing() => {
            let idx = (c as usize) - ('1' as usize);
            if idx < app.tabs.len() {
                app.active_tab = idx;
                app.status = format!("{}", app.tabs[idx]);
            }
            return;
        }
        KeyCode::Tab if !app.is_editing() => {
            app.active_tab = (app.active_tab + 1) % app.tabs.len();
            app.status = format!("{}", app.tabs[app.active_tab]);
            return;
        }
        KeyCode::BackTab if !app.is_editing() => {
            app.active_tab = if app.active_tab == 0 {
                app.tabs.len() - 1
            } else {
                app.active_tab - 1
            };
            app.status = format!("{}", app.tabs[app.active_tab]);
            return;
        }
        _ => {}
    }

    // If help is showing, consume any key to dismiss
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Delegate to current screen
    match app.tabs[app.active_tab] {
        ScreenId::Briefing => app.briefing.handle_key(code, modifiers),
        ScreenId::Sources => app.sources.handle_key(code, modifiers),
        ScreenId::Actions => app.actions.handle_key(code, modifiers, &app.store),
        ScreenId::Notes => app.notes.handle_key(code, modifiers, &app.store),
    }
}

fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    // Tab bar
    let tab_titles: Vec<Line> = app.tabs.iter().map(|s| Line::from(format!("{s}"))).collect();

    let tabs = Tabs::new(tab_titles)
        .block(Block::default().borders(Borders::ALL).title(" daybrief "))
        .select(app.active_tab)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, chunks[0]);

    // Content area — delegate to screen
    match app.tabs[app.active_tab] {
        ScreenId::Briefing => app.briefing.draw(f, chunks[1]),
        ScreenId::Sources => app.sources.draw(f, chunks[1]),
        ScreenId::Actions => app.actions.draw(f, chunks[1]),
        ScreenId::Notes => app.notes.draw(f, chunks[1]),
    }

    // Status bar
    let bar = status_bar(&app.status);
    f.render_widget(bar, chunks[2]);

    // Help overlay
    if app.show_help {
        draw_help_overlay(f);
    }
}

fn draw_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());

    let help_text = vec![
        Line::from("Keybindings").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::from("  1-4          Switch to screen"),
        Line::from("  Tab/S-Tab    Next/previous screen"),
        Line::from("  ?            Toggle this help"),
        Line::from("  q / Ctrl-C   Quit"),
        Line::from(""),
        Line::from("Screen-specific:").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("  ↑/↓ or j/k   Navigate"),
        Line::from("  Space/Enter  Collapse card / toggle item"),
        Line::from("  r            Reload from cache"),
        Line::from("  f            Cycle source filter"),
        Line::from("  a / d / c    Add / delete / clear done items"),
        Line::from("  e / Ctrl-S   Edit / save notes"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help — press any key to close ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::White).bg(Color::DarkGray));

    // Clear background
    f.render_widget(ratatui::widgets::Clear, area);
    f.render_widget(help, area);
}

/// Create a centered rectangle with percentage width and height.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
