/*
[INPUT]:  TUI app state
[OUTPUT]: Frame rendering for the home and profile screens
[POS]:    TUI UI module root
[UPDATE]: When adding screens or shared styles
*/

mod home;
mod profile;

pub mod single_select;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::controller::Route;
use crate::tui::app::App;

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn draw(frame: &mut ratatui::Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(frame.area());

    let hints = match app.screen {
        Route::Home => home::draw_home(frame, layout[0], app),
        Route::Profile => profile::draw_profile(frame, layout[0], app),
    };
    draw_footer(frame, layout[1], &hints, &app.status_message);
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, hints: &str, status: &str) {
    let footer = Paragraph::new(format!("{hints}  |  Status: {status}")).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Hotkeys"),
    );
    frame.render_widget(footer, area);
}

/// Centered rectangle taking the given share of `area`
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
