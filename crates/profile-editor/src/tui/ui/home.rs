/*
[INPUT]:  Signed-in user from the app state
[OUTPUT]: Home screen rendering and its hotkey hints
[POS]:    TUI UI home screen
[UPDATE]: When changing the home screen layout
*/

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{border_style, header_style};
use crate::tui::app::App;

pub(super) fn draw_home(frame: &mut ratatui::Frame, area: Rect, app: &App) -> String {
    let signed_in = match app.signed_in_user() {
        Some(user) => Line::from(vec![
            Span::raw("Signed in as "),
            Span::styled(user.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" <{}>", user.email)),
        ]),
        None => Line::from("Not signed in"),
    };

    let lines = vec![
        Line::from(Span::styled(" Profile Editor ", header_style())),
        Line::from(""),
        signed_in,
    ];
    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title("Home"),
    );
    frame.render_widget(body, area);

    "[p] Profile  [q] Quit".to_string()
}
