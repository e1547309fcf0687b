/// **Input**: Option list plus keyboard events for navigation/confirmation.
/// **Output**: Chosen option on confirm and popup list rendering via ratatui.
/// **Position**: Reusable TUI component for single-choice selection.
/// **Update**: Revisit when selection behavior or styling changes.
use std::fmt::Display;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

const PAGE_SIZE: usize = 10;

/// Result of feeding one key to the selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectAction<T> {
    Pending,
    Chosen(T),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct SingleSelect<T> {
    title: String,
    options: Vec<T>,
    cursor: usize,
    query: String,
}

impl<T> SingleSelect<T>
where
    T: Clone + Display,
{
    pub fn new(title: impl Into<String>, options: Vec<T>) -> Self {
        Self {
            title: title.into(),
            options,
            cursor: 0,
            query: String::new(),
        }
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.options.len() {
            self.cursor = index;
        }
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SelectAction<T> {
        if let KeyCode::Char(c) = key.code {
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return SelectAction::Pending;
            }
            if c.is_alphanumeric() || c == ' ' {
                self.search(c);
                return SelectAction::Pending;
            }
        }
        self.query.clear();
        match key.code {
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE_SIZE as isize)),
            KeyCode::PageDown => self.move_by(PAGE_SIZE as isize),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.options.len().saturating_sub(1),
            KeyCode::Enter => return self.confirm(),
            KeyCode::Esc => return SelectAction::Cancelled,
            _ => {}
        }
        SelectAction::Pending
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items = if self.options.is_empty() {
            vec![ListItem::new(Line::from("No options"))]
        } else {
            self.options
                .iter()
                .map(|option| ListItem::new(Line::from(option.to_string())))
                .collect()
        };

        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        if !self.options.is_empty() {
            state.select(Some(self.cursor));
        }

        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn move_by(&mut self, delta: isize) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Type-ahead: extend the query and jump to the first label starting with it
    fn search(&mut self, c: char) {
        self.query.extend(c.to_lowercase());
        if let Some(index) = self.find_prefix(&self.query) {
            self.cursor = index;
            return;
        }
        self.query = c.to_lowercase().collect();
        match self.find_prefix(&self.query) {
            Some(index) => self.cursor = index,
            None => self.query.clear(),
        }
    }

    fn find_prefix(&self, prefix: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.to_string().to_lowercase().starts_with(prefix))
    }

    fn confirm(&self) -> SelectAction<T> {
        match self.options.get(self.cursor) {
            Some(option) => SelectAction::Chosen(option.clone()),
            None => SelectAction::Pending,
        }
    }
}
