/*
[INPUT]:  Profile controller, user update service, terminal key events
[OUTPUT]: Ratatui-based TUI for viewing and editing the profile
[POS]:    TUI module for the profile-editor binary
[UPDATE]: When changing TUI layout, keybindings, or the update flow
*/

mod app;
mod events;
mod terminal;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use profile_adapter::{ProfileRecord, UserService};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::controller::{ProfileController, SubmitRequest};
use app::{App, AppAction};
use terminal::TerminalGuard;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

enum UiEvent {
    Input(CrosstermEvent),
    UpdateFinished(profile_adapter::Result<Option<ProfileRecord>>),
}

/// Run the TUI until the user quits
pub async fn run_tui(controller: ProfileController, service: Arc<dyn UserService>) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();
    let input_tx = event_tx.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = input_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = App::new(controller);
    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;
    info!("tui started");

    while !should_quit {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        tokio::select! {
            _ = tick.tick() => {}
            maybe_event = event_rx.recv() => {
                match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) => match app.handle_key(key) {
                        AppAction::Quit => should_quit = true,
                        AppAction::Submit(request) => {
                            spawn_update(service.clone(), request, event_tx.clone());
                        }
                        AppAction::None => {}
                    },
                    Some(UiEvent::Input(_)) => {}
                    Some(UiEvent::UpdateFinished(result)) => {
                        let outcome = app.finish_submit(result);
                        debug!(?outcome, "profile update finished");
                    }
                    None => should_quit = true,
                }
            }
        }
    }

    input_shutdown.cancel();
    info!("tui stopped");
    Ok(())
}

/// Run the update call off the input loop and report back through the channel
fn spawn_update(
    service: Arc<dyn UserService>,
    request: SubmitRequest,
    events: mpsc::UnboundedSender<UiEvent>,
) {
    tokio::spawn(async move {
        let result = service
            .update(&request.user_id, &request.token, request.update)
            .await;
        let _ = events.send(UiEvent::UpdateFinished(result));
    });
}
