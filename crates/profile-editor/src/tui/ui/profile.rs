/*
[INPUT]:  Profile controller state, focus, text inputs, country selector
[OUTPUT]: Profile screen rendering and its hotkey hints
[POS]:    TUI UI profile view/edit screen
[UPDATE]: When changing profile fields or edit-mode presentation
*/

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tui_input::Input;

use super::{border_style, centered_rect, header_style};
use crate::controller::EditMode;
use crate::schema::FieldName;
use crate::tui::app::App;

const LABEL_WIDTH: usize = 16;

pub(super) fn draw_profile(frame: &mut ratatui::Frame, area: Rect, app: &App) -> String {
    let controller = &app.controller;
    let alert_height = if controller.alert().is_some() { 3 } else { 0 };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(alert_height), Constraint::Min(6)])
        .split(area);

    if let Some(alert) = controller.alert() {
        let dismiss = if controller.is_editing() { "Ctrl-D" } else { "d" };
        let widget = Paragraph::new(Line::from(vec![
            Span::styled(alert.to_string(), Style::default().fg(Color::Red)),
            Span::styled(format!("  [{dismiss}] dismiss"), Style::default().fg(Color::DarkGray)),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Update profile failed!"),
        );
        frame.render_widget(widget, layout[0]);
    }

    let title = match controller.mode() {
        EditMode::Viewing => "Profile",
        EditMode::Editing { submitting: false } => "Edit Profile",
        EditMode::Editing { submitting: true } => "Edit Profile (saving...)",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(title);
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = Vec::new();
    let mut cursor = None;
    for field in FieldName::ALL {
        let focused = controller.is_editing() && app.selector.is_none() && app.focus == field;
        let (value, input) = field_value(app, field);
        if focused {
            if let Some(input) = input {
                let row = lines.len() as u16;
                let column = (LABEL_WIDTH + 2 + input.visual_cursor()) as u16;
                cursor = Some(Position::new(inner.x + column, inner.y + row));
            }
        }
        lines.push(field_line(field, value, focused, controller.is_editing()));
        if let Some(error) = controller.visible_error(field) {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(LABEL_WIDTH + 2)),
                Span::styled(error.message(), Style::default().fg(Color::Red)),
            ]));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }

    if let Some(select) = &app.selector {
        select.render(frame, centered_rect(60, 70, area));
        return "[Type] Search  [Up/Down] Move  [Enter] Choose  [Esc] Close".to_string();
    }

    match controller.mode() {
        EditMode::Viewing => "[e] Edit  [b] Back  [q] Quit".to_string(),
        EditMode::Editing { submitting: true } => "Saving...".to_string(),
        EditMode::Editing { submitting: false } => {
            let save = if controller.can_save() {
                "[Ctrl-S] Save"
            } else {
                "[Ctrl-S] Save (disabled)"
            };
            format!("[Tab] Next  {save}  [Enter] Country menu  [Esc] Cancel")
        }
    }
}

fn field_value(app: &App, field: FieldName) -> (String, Option<&Input>) {
    let controller = &app.controller;
    let values = controller.values();
    match field {
        FieldName::Name if controller.is_editing() => {
            (app.name_input.value().to_string(), Some(&app.name_input))
        }
        FieldName::WalletAddr if controller.is_editing() => {
            (app.wallet_input.value().to_string(), Some(&app.wallet_input))
        }
        FieldName::Country => {
            let value = match controller.country_name() {
                Some(name) => format!("{name} ({})", values.country),
                None if values.country.is_empty() && controller.is_editing() => {
                    "(not set)".to_string()
                }
                None if values.country.is_empty() => String::new(),
                None => format!("{} (unknown)", values.country),
            };
            (value, None)
        }
        _ => (values.get(field).to_string(), None),
    }
}

fn field_line(field: FieldName, value: String, focused: bool, editing: bool) -> Line<'static> {
    let label = match field {
        FieldName::Name => "Full name",
        FieldName::Email => "Email",
        FieldName::Country => "Country",
        FieldName::WalletAddr => "Wallet address",
    };
    let placeholder = value.is_empty() && !editing;
    let value = if placeholder { label.to_string() } else { value };
    let value_style = if focused {
        header_style()
    } else if placeholder || (editing && field == FieldName::Email) {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(
            format!("{label:<LABEL_WIDTH$}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(if focused { "> " } else { "  " }),
        Span::styled(value, value_style),
    ])
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use profile_adapter::{ProfileError, ProfileRecord, SessionStore};

    use crate::controller::ProfileController;
    use crate::country::CountryDirectory;
    use crate::tui::app::App;
    use crate::tui::ui::test_support::{contains, render_rows};

    fn signed_in_app(country: &str) -> App {
        let session = SessionStore::new();
        session.set_token("tok".to_string(), 3600);
        session.set_user(ProfileRecord {
            id: "7".to_string(),
            email: "a@x.com".to_string(),
            name: "Alice".to_string(),
            wallet_addr: format!("0x{}", "1".repeat(40)),
            country: country.to_string(),
        });
        let session = Arc::new(session);
        let mut app = App::new(ProfileController::new(
            session.clone(),
            session,
            Arc::new(CountryDirectory::builtin()),
        ));
        press(&mut app, KeyCode::Char('p'));
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn viewing_shows_record_and_country_name() {
        let app = signed_in_app("FR");
        let rows = render_rows(&app, 80, 16);

        assert!(contains(&rows, "Alice"));
        assert!(contains(&rows, "a@x.com"));
        assert!(contains(&rows, "France (FR)"));
        assert!(contains(&rows, "[e] Edit  [b] Back  [q] Quit"));
    }

    #[test]
    fn unknown_country_code_has_no_name() {
        let app = signed_in_app("ZZ");
        let rows = render_rows(&app, 80, 16);
        assert!(contains(&rows, "ZZ (unknown)"));
    }

    #[test]
    fn touched_field_error_is_rendered() {
        let mut app = signed_in_app("FR");
        press(&mut app, KeyCode::Char('e'));
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));

        let rows = render_rows(&app, 80, 16);
        assert!(contains(&rows, "Edit Profile"));
        assert!(contains(&rows, "Full name is required"));
        assert!(contains(&rows, "[Ctrl-S] Save (disabled)"));
    }

    #[test]
    fn alert_is_rendered_until_dismissed() {
        let mut app = signed_in_app("FR");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('x'));
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        app.finish_submit(Err(ProfileError::Api {
            code: 500,
            message: "network down".to_string(),
        }));

        let rows = render_rows(&app, 80, 18);
        assert!(contains(&rows, "network down"));

        app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        let rows = render_rows(&app, 80, 18);
        assert!(!contains(&rows, "network down"));
    }

    #[test]
    fn selector_lists_clear_option_first() {
        let mut app = signed_in_app("FR");
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);

        let rows = render_rows(&app, 100, 30);
        assert!(contains(&rows, "▶ France (FR)"));
        assert!(contains(&rows, "[Enter] Choose"));

        press(&mut app, KeyCode::Home);
        let rows = render_rows(&app, 100, 30);
        assert!(contains(&rows, "▶ (clear selection)"));
    }
}
