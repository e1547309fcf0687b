/*
[INPUT]:  Key commands, update results, profile controller
[OUTPUT]: Screen, focus, text inputs and selector state for rendering
[POS]:    TUI app state
[UPDATE]: When adding screens or changing how commands reach the controller
*/

use std::fmt;

use crossterm::event::KeyEvent;
use profile_adapter::ProfileRecord;
use tracing::debug;
use tui_input::{Input, InputRequest};

use super::events::{Command, KeyContext, map_key};
use super::ui::single_select::{SelectAction, SingleSelect};
use crate::controller::{MountOutcome, ProfileController, Route, SubmitOutcome, SubmitRequest};
use crate::country::Country;
use crate::schema::FieldName;

/// Fields reachable with Tab while editing; email is read-only
pub(crate) const EDITABLE_FIELDS: [FieldName; 3] =
    [FieldName::Name, FieldName::Country, FieldName::WalletAddr];

/// Entry of the country selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CountryOption {
    Clear,
    Pick(Country),
}

impl fmt::Display for CountryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryOption::Clear => f.write_str("(clear selection)"),
            CountryOption::Pick(country) => write!(f, "{} ({})", country.name, country.code),
        }
    }
}

/// What the run loop has to do after a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AppAction {
    None,
    Quit,
    Submit(SubmitRequest),
}

pub(crate) struct App {
    pub(crate) controller: ProfileController,
    pub(crate) screen: Route,
    pub(crate) focus: FieldName,
    pub(crate) name_input: Input,
    pub(crate) wallet_input: Input,
    pub(crate) selector: Option<SingleSelect<CountryOption>>,
    pub(crate) status_message: String,
}

impl App {
    pub(crate) fn new(controller: ProfileController) -> Self {
        Self {
            controller,
            screen: Route::Home,
            focus: EDITABLE_FIELDS[0],
            name_input: Input::default(),
            wallet_input: Input::default(),
            selector: None,
            status_message: "Ready".to_string(),
        }
    }

    /// Signed-in user shown on the home screen
    pub(crate) fn signed_in_user(&self) -> Option<ProfileRecord> {
        self.controller.session_user()
    }

    pub(super) fn key_context(&self) -> KeyContext {
        match self.screen {
            Route::Home => KeyContext::Home,
            Route::Profile if self.selector.is_some() => KeyContext::Selector,
            Route::Profile if !self.controller.is_editing() => KeyContext::Viewing,
            Route::Profile if self.focus == FieldName::Country => KeyContext::EditingCountry,
            Route::Profile => KeyContext::Editing,
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        let command = map_key(self.key_context(), key);
        self.apply(command)
    }

    fn apply(&mut self, command: Command) -> AppAction {
        match command {
            Command::Quit => return AppAction::Quit,
            Command::OpenProfile => self.open_profile(),
            Command::Back => {
                self.screen = self.controller.back();
                self.status_message = "Ready".to_string();
            }
            Command::ToggleEdit => {
                self.controller.toggle_edit();
                self.focus = EDITABLE_FIELDS[0];
                self.sync_inputs();
            }
            Command::Save => return self.save(),
            Command::DismissAlert => self.controller.dismiss_alert(),
            Command::NextField => self.move_focus(1),
            Command::PrevField => self.move_focus(EDITABLE_FIELDS.len() - 1),
            Command::OpenSelector => self.open_selector(),
            Command::Selector(key) => self.handle_selector_key(key),
            Command::Edit(request) => self.edit_focused(request),
            Command::Ignore => {}
        }
        AppAction::None
    }

    /// Apply the update call's result delivered by the run loop
    pub(crate) fn finish_submit(
        &mut self,
        result: profile_adapter::Result<Option<ProfileRecord>>,
    ) -> SubmitOutcome {
        let outcome = self.controller.complete_submit(result);
        self.status_message = match &outcome {
            SubmitOutcome::Saved(_) => "Profile saved".to_string(),
            SubmitOutcome::NoResult | SubmitOutcome::Failed(_) => "Save failed".to_string(),
            SubmitOutcome::MissingToken | SubmitOutcome::Blocked => self.status_message.clone(),
        };
        self.sync_inputs();
        outcome
    }

    fn open_profile(&mut self) {
        match self.controller.mount() {
            MountOutcome::Render => {
                self.screen = Route::Profile;
                self.focus = EDITABLE_FIELDS[0];
                self.sync_inputs();
                self.status_message = "Ready".to_string();
            }
            MountOutcome::Redirect(route) => {
                self.screen = route;
                self.status_message = "Sign in required".to_string();
            }
        }
    }

    fn save(&mut self) -> AppAction {
        self.controller.touch_field(self.focus);
        match self.controller.begin_submit() {
            Ok(request) => {
                self.status_message = "Saving...".to_string();
                AppAction::Submit(request)
            }
            Err(outcome) => {
                debug!(?outcome, "save not started");
                AppAction::None
            }
        }
    }

    fn move_focus(&mut self, step: usize) {
        self.controller.touch_field(self.focus);
        let current = EDITABLE_FIELDS
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0);
        self.focus = EDITABLE_FIELDS[(current + step) % EDITABLE_FIELDS.len()];
    }

    fn open_selector(&mut self) {
        self.controller.open_country_menu();
        let directory = self.controller.directory();
        let options: Vec<CountryOption> = std::iter::once(CountryOption::Clear)
            .chain(directory.entries().iter().cloned().map(CountryOption::Pick))
            .collect();
        let mut select = SingleSelect::new("Country", options);
        if let Some(index) = directory.position(&self.controller.values().country) {
            select.set_cursor(index + 1);
        }
        self.selector = Some(select);
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        let Some(select) = self.selector.as_mut() else {
            return;
        };
        match select.handle_key(key) {
            SelectAction::Pending => {}
            SelectAction::Cancelled => self.selector = None,
            SelectAction::Chosen(CountryOption::Clear) => {
                self.controller.clear_country();
                self.selector = None;
            }
            SelectAction::Chosen(CountryOption::Pick(country)) => {
                self.controller.select_country(&country.code);
                self.selector = None;
            }
        }
    }

    fn edit_focused(&mut self, request: InputRequest) {
        let input = match self.focus {
            FieldName::Name => &mut self.name_input,
            FieldName::WalletAddr => &mut self.wallet_input,
            FieldName::Email | FieldName::Country => return,
        };
        let changed = input.handle(request).is_some_and(|change| change.value);
        if changed {
            let value = input.value().to_string();
            self.controller.change_field(self.focus, value);
        }
    }

    /// Refresh the text inputs from the controller's form values
    fn sync_inputs(&mut self) {
        let values = self.controller.values();
        self.name_input = Input::new(values.name.clone());
        self.wallet_input = Input::new(values.wallet_addr.clone());
    }
}
