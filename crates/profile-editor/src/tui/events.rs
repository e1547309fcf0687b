/*
[INPUT]:  Crossterm key events and the current input context
[OUTPUT]: Commands understood by the TUI app
[POS]:    TUI key mapping
[UPDATE]: When changing keybindings
*/

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::InputRequest;

/// Where keystrokes are currently routed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyContext {
    Home,
    Viewing,
    Editing,
    /// Editing with the country field focused
    EditingCountry,
    Selector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Command {
    Quit,
    OpenProfile,
    Back,
    ToggleEdit,
    Save,
    DismissAlert,
    NextField,
    PrevField,
    OpenSelector,
    /// Pass the key to the open country selector
    Selector(KeyEvent),
    Edit(InputRequest),
    Ignore,
}

pub(super) fn map_key(context: KeyContext, key: KeyEvent) -> Command {
    if key.kind == KeyEventKind::Release {
        return Command::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }

    match context {
        KeyContext::Home => match key.code {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Char('p') | KeyCode::Enter => Command::OpenProfile,
            _ => Command::Ignore,
        },
        KeyContext::Viewing => match key.code {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Char('e') => Command::ToggleEdit,
            KeyCode::Char('b') | KeyCode::Esc => Command::Back,
            KeyCode::Char('d') => Command::DismissAlert,
            _ => Command::Ignore,
        },
        KeyContext::Selector => Command::Selector(key),
        KeyContext::Editing | KeyContext::EditingCountry => map_editing_key(context, key, ctrl),
    }
}

fn map_editing_key(context: KeyContext, key: KeyEvent, ctrl: bool) -> Command {
    if ctrl {
        return match key.code {
            KeyCode::Char('s') => Command::Save,
            KeyCode::Char('d') => Command::DismissAlert,
            KeyCode::Char('w') => Command::Edit(InputRequest::DeletePrevWord),
            KeyCode::Char('u') => Command::Edit(InputRequest::DeleteLine),
            _ => Command::Ignore,
        };
    }

    match key.code {
        KeyCode::Esc => Command::ToggleEdit,
        KeyCode::Tab | KeyCode::Down => Command::NextField,
        KeyCode::BackTab | KeyCode::Up => Command::PrevField,
        KeyCode::Enter if context == KeyContext::EditingCountry => Command::OpenSelector,
        KeyCode::Enter => Command::NextField,
        _ if context == KeyContext::EditingCountry => Command::Ignore,
        KeyCode::Char(c) => Command::Edit(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Command::Edit(InputRequest::DeletePrevChar),
        KeyCode::Delete => Command::Edit(InputRequest::DeleteNextChar),
        KeyCode::Left => Command::Edit(InputRequest::GoToPrevChar),
        KeyCode::Right => Command::Edit(InputRequest::GoToNextChar),
        KeyCode::Home => Command::Edit(InputRequest::GoToStart),
        KeyCode::End => Command::Edit(InputRequest::GoToEnd),
        _ => Command::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[rstest]
    #[case(KeyContext::Home, key(KeyCode::Char('p')), Command::OpenProfile)]
    #[case(KeyContext::Home, key(KeyCode::Char('q')), Command::Quit)]
    #[case(KeyContext::Viewing, key(KeyCode::Char('e')), Command::ToggleEdit)]
    #[case(KeyContext::Viewing, key(KeyCode::Esc), Command::Back)]
    #[case(KeyContext::Viewing, key(KeyCode::Char('b')), Command::Back)]
    #[case(KeyContext::Editing, key(KeyCode::Esc), Command::ToggleEdit)]
    #[case(KeyContext::Editing, ctrl('s'), Command::Save)]
    #[case(KeyContext::Editing, ctrl('d'), Command::DismissAlert)]
    #[case(KeyContext::Editing, key(KeyCode::BackTab), Command::PrevField)]
    #[case(KeyContext::Editing, key(KeyCode::Char('q')), Command::Edit(InputRequest::InsertChar('q')))]
    #[case(KeyContext::EditingCountry, key(KeyCode::Enter), Command::OpenSelector)]
    #[case(KeyContext::EditingCountry, key(KeyCode::Char('x')), Command::Ignore)]
    #[case(KeyContext::Editing, ctrl('c'), Command::Quit)]
    fn maps_keys(#[case] context: KeyContext, #[case] event: KeyEvent, #[case] expected: Command) {
        assert_eq!(map_key(context, event), expected);
    }

    #[test]
    fn selector_receives_raw_keys() {
        let event = key(KeyCode::Char('f'));
        assert_eq!(map_key(KeyContext::Selector, event), Command::Selector(event));
    }

    #[test]
    fn release_events_ignored() {
        let mut event = key(KeyCode::Char('q'));
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key(KeyContext::Home, event), Command::Ignore);
    }
}
