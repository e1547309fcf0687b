/*
[INPUT]:  Session snapshots, country directory, user actions, update results
[OUTPUT]: View/edit mode, form state, alert text, SET_USER dispatches
[POS]:    Controller layer - profile view/edit state machine
[UPDATE]: When changing edit transitions or submit handling
*/

use std::sync::Arc;

use profile_adapter::{
    Dispatch, ProfileRecord, ProfileUpdate, SessionAction, SessionProvider, UserService,
};
use tracing::{debug, info, warn};

use crate::country::CountryDirectory;
use crate::form::{self, FormEvent, FormState, ProfileValues};
use crate::schema::{ErrorKey, FieldName};

/// Alert shown when the service answers without a record
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update profile";

/// Screens the controller can send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Viewing,
    Editing { submitting: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountOutcome {
    Render,
    Redirect(Route),
}

/// Everything the update call needs, captured when the submit starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub user_id: String,
    pub token: String,
    pub update: ProfileUpdate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Service returned the stored record; mode is back to viewing
    Saved(ProfileRecord),
    /// Service answered without a record; mode is back to viewing
    NoResult,
    /// Service call failed; still editing
    Failed(String),
    /// No auth token; nothing was sent
    MissingToken,
    /// Save guard not satisfied; nothing changed
    Blocked,
}

pub struct ProfileController {
    session: Arc<dyn SessionProvider>,
    dispatcher: Arc<dyn Dispatch>,
    directory: Arc<CountryDirectory>,
    record: Option<ProfileRecord>,
    form: FormState,
    mode: EditMode,
    alert: Option<String>,
}

impl ProfileController {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        dispatcher: Arc<dyn Dispatch>,
        directory: Arc<CountryDirectory>,
    ) -> Self {
        Self {
            session,
            dispatcher,
            directory,
            record: None,
            form: FormState::new(ProfileValues::default()),
            mode: EditMode::Viewing,
            alert: None,
        }
    }

    /// Read the session and seed the form; unauthenticated users go home
    pub fn mount(&mut self) -> MountOutcome {
        let snapshot = self.session.snapshot();
        let user = match snapshot.user {
            Some(user) if snapshot.is_authed => user,
            _ => {
                info!("profile requested without an authenticated session");
                return MountOutcome::Redirect(Route::Home);
            }
        };

        debug!(user_id = %user.id, "profile mounted");
        self.form = FormState::new(ProfileValues::from(&user));
        self.record = Some(user);
        self.mode = EditMode::Viewing;
        self.alert = None;
        MountOutcome::Render
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing { .. })
    }

    pub fn is_submitting(&self) -> bool {
        self.mode == EditMode::Editing { submitting: true }
    }

    /// Current session user, when authenticated
    pub fn session_user(&self) -> Option<ProfileRecord> {
        let snapshot = self.session.snapshot();
        snapshot.user.filter(|_| snapshot.is_authed)
    }

    pub fn record(&self) -> Option<&ProfileRecord> {
        self.record.as_ref()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn values(&self) -> &ProfileValues {
        self.form.values()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn directory(&self) -> &CountryDirectory {
        &self.directory
    }

    /// Display name of the selected country, derived on every read
    pub fn country_name(&self) -> Option<&str> {
        self.directory.display_name(&self.form.values().country)
    }

    pub fn visible_error(&self, field: FieldName) -> Option<ErrorKey> {
        if self.is_editing() {
            self.form.visible_error(field)
        } else {
            None
        }
    }

    /// Save is enabled only while editing a valid, changed form
    pub fn can_save(&self) -> bool {
        self.mode == EditMode::Editing { submitting: false }
            && self.form.is_valid()
            && self.form.is_dirty()
    }

    /// Edit button: enter editing, or leave it discarding unsaved changes
    pub fn toggle_edit(&mut self) {
        match self.mode {
            EditMode::Viewing => {
                let Some(seed) = self.record.as_ref().map(ProfileValues::from) else {
                    debug!("edit ignored before mount");
                    return;
                };
                self.apply(FormEvent::Reseed(seed));
                self.mode = EditMode::Editing { submitting: false };
                info!("profile edit started");
            }
            EditMode::Editing { submitting: false } => {
                let seed = self.form.initial().clone();
                self.apply(FormEvent::Reseed(seed));
                self.mode = EditMode::Viewing;
                info!("profile edit cancelled");
            }
            EditMode::Editing { submitting: true } => {
                debug!("edit toggle ignored while submitting");
            }
        }
    }

    /// Keystroke in a text field; email stays read-only
    pub fn change_field(&mut self, field: FieldName, value: impl Into<String>) {
        if !self.accepts_input() || field == FieldName::Email {
            return;
        }
        self.apply(FormEvent::Change(field, value.into()));
    }

    pub fn touch_field(&mut self, field: FieldName) {
        if self.accepts_input() {
            self.apply(FormEvent::Touch(field));
        }
    }

    /// Opening the country menu counts as touching the field
    pub fn open_country_menu(&mut self) {
        self.touch_field(FieldName::Country);
    }

    /// Select a country by code; returns false for codes not in the directory
    pub fn select_country(&mut self, code: &str) -> bool {
        if !self.accepts_input() {
            return false;
        }
        if self.directory.lookup(code).is_none() {
            warn!(code, "country code not in directory");
            return false;
        }
        self.apply(FormEvent::SelectCountry(code.to_string()));
        true
    }

    pub fn clear_country(&mut self) {
        if self.accepts_input() {
            self.apply(FormEvent::ClearCountry);
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn back(&self) -> Route {
        Route::Home
    }

    /// Check the save guard and token, then mark the form as submitting
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SubmitOutcome> {
        if !self.can_save() {
            debug!("submit blocked by save guard");
            return Err(SubmitOutcome::Blocked);
        }
        let Some(user_id) = self.record.as_ref().map(|record| record.id.clone()) else {
            return Err(SubmitOutcome::Blocked);
        };

        self.mode = EditMode::Editing { submitting: true };

        let Some(token) = self.session.snapshot().token else {
            warn!(user_id = %user_id, "profile update without auth token");
            self.mode = EditMode::Editing { submitting: false };
            self.alert = Some(ErrorKey::RequireAuthToken.message().to_string());
            return Err(SubmitOutcome::MissingToken);
        };

        Ok(SubmitRequest {
            user_id,
            token,
            update: self.form.values().to_update(),
        })
    }

    /// Apply the update call's result
    pub fn complete_submit(
        &mut self,
        result: profile_adapter::Result<Option<ProfileRecord>>,
    ) -> SubmitOutcome {
        match result {
            Ok(Some(record)) => {
                info!(user_id = %record.id, "profile updated");
                self.dispatcher.dispatch(SessionAction::SetUser(record.clone()));
                self.form = FormState::new(ProfileValues::from(&record));
                self.record = Some(record.clone());
                self.alert = None;
                self.mode = EditMode::Viewing;
                SubmitOutcome::Saved(record)
            }
            Ok(None) => {
                warn!("profile update returned no record");
                self.alert = Some(UPDATE_FAILED_MESSAGE.to_string());
                self.mode = EditMode::Viewing;
                SubmitOutcome::NoResult
            }
            Err(err) => {
                warn!(error = %err, "profile update failed");
                let message = err.user_message();
                self.alert = Some(message.clone());
                self.mode = EditMode::Editing { submitting: false };
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Run a whole submit against an update service
    pub async fn submit(&mut self, service: &dyn UserService) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = service
            .update(&request.user_id, &request.token, request.update)
            .await;
        self.complete_submit(result)
    }

    fn accepts_input(&self) -> bool {
        self.mode == EditMode::Editing { submitting: false }
    }

    fn apply(&mut self, event: FormEvent) {
        self.form = form::reduce(&self.form, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use profile_adapter::{ProfileError, Result as AdapterResult, SessionSnapshot};
    use std::sync::Mutex;

    struct FakeSession {
        snapshot: Mutex<SessionSnapshot>,
        dispatched: Mutex<Vec<SessionAction>>,
    }

    impl FakeSession {
        fn authed(user: ProfileRecord, token: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                snapshot: Mutex::new(SessionSnapshot {
                    user: Some(user),
                    is_authed: true,
                    token: token.map(str::to_string),
                }),
                dispatched: Mutex::new(Vec::new()),
            })
        }

        fn anonymous() -> Arc<Self> {
            Arc::new(Self {
                snapshot: Mutex::new(SessionSnapshot::default()),
                dispatched: Mutex::new(Vec::new()),
            })
        }

        fn dispatched(&self) -> Vec<SessionAction> {
            self.dispatched.lock().unwrap().clone()
        }
    }

    impl SessionProvider for FakeSession {
        fn snapshot(&self) -> SessionSnapshot {
            self.snapshot.lock().unwrap().clone()
        }
    }

    impl Dispatch for FakeSession {
        fn dispatch(&self, action: SessionAction) {
            self.dispatched.lock().unwrap().push(action);
        }
    }

    enum Reply {
        Record(ProfileRecord),
        Empty,
        Reject(&'static str),
    }

    struct FakeService {
        reply: Reply,
        calls: Mutex<Vec<(String, String, ProfileUpdate)>>,
    }

    impl FakeService {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String, ProfileUpdate)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserService for FakeService {
        async fn update(
            &self,
            user_id: &str,
            token: &str,
            update: ProfileUpdate,
        ) -> AdapterResult<Option<ProfileRecord>> {
            self.calls
                .lock()
                .unwrap()
                .push((user_id.to_string(), token.to_string(), update));
            match &self.reply {
                Reply::Record(record) => Ok(Some(record.clone())),
                Reply::Empty => Ok(None),
                Reply::Reject(message) => Err(ProfileError::Api {
                    code: 503,
                    message: (*message).to_string(),
                }),
            }
        }
    }

    fn alice() -> ProfileRecord {
        ProfileRecord {
            id: "7".to_string(),
            email: "a@x.com".to_string(),
            name: "Alice".to_string(),
            wallet_addr: format!("0x{}", "1".repeat(40)),
            country: "US".to_string(),
        }
    }

    fn bob() -> ProfileRecord {
        ProfileRecord {
            name: "Bob".to_string(),
            wallet_addr: format!("0x{}", "2".repeat(40)),
            country: "DE".to_string(),
            ..alice()
        }
    }

    fn mounted(session: Arc<FakeSession>) -> ProfileController {
        let mut controller = ProfileController::new(
            session.clone(),
            session,
            Arc::new(CountryDirectory::builtin()),
        );
        assert_eq!(controller.mount(), MountOutcome::Render);
        controller
    }

    fn edit_to_bob(controller: &mut ProfileController) {
        controller.toggle_edit();
        let target = bob();
        controller.change_field(FieldName::Name, target.name);
        controller.change_field(FieldName::WalletAddr, target.wallet_addr);
        assert!(controller.select_country("DE"));
    }

    #[test]
    fn unauthenticated_mount_redirects_home() {
        let session = FakeSession::anonymous();
        let mut controller = ProfileController::new(
            session.clone(),
            session,
            Arc::new(CountryDirectory::builtin()),
        );
        assert_eq!(controller.mount(), MountOutcome::Redirect(Route::Home));
        assert!(controller.record().is_none());

        controller.toggle_edit();
        assert_eq!(controller.mode(), EditMode::Viewing);
    }

    #[test]
    fn toggle_edit_keeps_seeded_values() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        assert_eq!(controller.mode(), EditMode::Viewing);

        controller.toggle_edit();
        assert_eq!(controller.mode(), EditMode::Editing { submitting: false });
        assert_eq!(controller.values(), &ProfileValues::from(&alice()));
        assert!(FieldName::ALL
            .iter()
            .all(|field| controller.visible_error(*field).is_none()));
    }

    #[test]
    fn save_enabled_only_when_editing_valid_and_dirty() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        assert!(!controller.can_save());

        controller.toggle_edit();
        assert!(!controller.can_save(), "clean form");

        controller.change_field(FieldName::Name, "Bob");
        assert!(controller.can_save());

        controller.change_field(FieldName::WalletAddr, "0x12");
        assert!(!controller.can_save(), "invalid wallet");
        assert_eq!(
            controller.visible_error(FieldName::WalletAddr),
            Some(ErrorKey::InvalidLengthWalletAddress)
        );
    }

    #[test]
    fn email_is_read_only_while_editing() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        controller.toggle_edit();
        controller.change_field(FieldName::Email, "other@x.com");

        assert_eq!(controller.values().email, "a@x.com");
        assert!(!controller.form().is_dirty());
    }

    #[test]
    fn cancel_discards_unsaved_changes() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        controller.toggle_edit();
        controller.change_field(FieldName::Name, "Mallory");

        controller.toggle_edit();
        assert_eq!(controller.mode(), EditMode::Viewing);
        assert_eq!(controller.values().name, "Alice");
        assert!(!controller.form().is_touched(FieldName::Name));
    }

    #[test]
    fn inputs_ignored_while_viewing() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        controller.change_field(FieldName::Name, "Bob");
        controller.clear_country();
        assert!(!controller.select_country("FR"));
        assert_eq!(controller.values(), &ProfileValues::from(&alice()));
    }

    #[test]
    fn select_country_updates_code_and_name() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        assert_eq!(controller.country_name(), Some("United States"));

        controller.toggle_edit();
        controller.open_country_menu();
        assert!(controller.select_country("FR"));
        assert_eq!(controller.values().country, "FR");
        assert_eq!(controller.country_name(), Some("France"));
    }

    #[test]
    fn clear_country_marks_touched_with_required_error() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        controller.toggle_edit();
        controller.clear_country();

        assert_eq!(controller.values().country, "");
        assert!(controller.form().is_touched(FieldName::Country));
        assert_eq!(controller.country_name(), None);
        assert_eq!(
            controller.visible_error(FieldName::Country),
            Some(ErrorKey::RequireCountry)
        );
        assert!(!controller.can_save());
    }

    #[test]
    fn unknown_country_code_rejected_and_stored_unknown_code_has_no_name() {
        let mut user = alice();
        user.country = "ZZ".to_string();
        let mut controller = mounted(FakeSession::authed(user, Some("tok")));
        assert_eq!(controller.country_name(), None);

        controller.toggle_edit();
        assert!(!controller.select_country("XX"));
        assert_eq!(controller.values().country, "ZZ");
    }

    #[tokio::test]
    async fn successful_submit_returns_to_viewing_and_dispatches() {
        let session = FakeSession::authed(alice(), Some("tok"));
        let mut controller = mounted(session.clone());
        controller.toggle_edit();
        controller.change_field(FieldName::Name, "Mallory");
        controller.change_field(FieldName::WalletAddr, "0x1");
        controller.toggle_edit();
        // A previous failure left an alert behind.
        controller.alert = Some("stale".to_string());

        edit_to_bob(&mut controller);
        let service = FakeService::new(Reply::Record(bob()));
        let outcome = controller.submit(&service).await;

        assert_eq!(outcome, SubmitOutcome::Saved(bob()));
        assert_eq!(controller.mode(), EditMode::Viewing);
        assert_eq!(controller.alert(), None);
        assert_eq!(controller.record(), Some(&bob()));
        assert!(!controller.form().is_dirty());
        assert_eq!(session.dispatched(), vec![SessionAction::SetUser(bob())]);

        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        let (user_id, token, update) = &calls[0];
        assert_eq!(user_id, "7");
        assert_eq!(token, "tok");
        assert_eq!(
            update,
            &ProfileUpdate {
                name: "Bob".to_string(),
                wallet_addr: bob().wallet_addr,
                country: "DE".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn rejected_submit_keeps_editing_with_message() {
        let session = FakeSession::authed(alice(), Some("tok"));
        let mut controller = mounted(session.clone());
        edit_to_bob(&mut controller);

        let service = FakeService::new(Reply::Reject("network down"));
        let outcome = controller.submit(&service).await;

        assert_eq!(outcome, SubmitOutcome::Failed("network down".to_string()));
        assert_eq!(controller.mode(), EditMode::Editing { submitting: false });
        assert_eq!(controller.alert(), Some("network down"));
        assert!(controller.can_save(), "user may retry");
        assert!(session.dispatched().is_empty());

        controller.dismiss_alert();
        assert_eq!(controller.alert(), None);
    }

    #[tokio::test]
    async fn empty_result_shows_generic_alert_and_views() {
        let session = FakeSession::authed(alice(), Some("tok"));
        let mut controller = mounted(session.clone());
        edit_to_bob(&mut controller);

        let outcome = controller.submit(&FakeService::new(Reply::Empty)).await;

        assert_eq!(outcome, SubmitOutcome::NoResult);
        assert_eq!(controller.mode(), EditMode::Viewing);
        assert_eq!(controller.alert(), Some(UPDATE_FAILED_MESSAGE));
        assert_eq!(controller.record(), Some(&alice()));
        assert_eq!(controller.values().name, "Bob");
        assert!(session.dispatched().is_empty());

        controller.toggle_edit();
        assert_eq!(controller.values(), &ProfileValues::from(&alice()));
    }

    #[tokio::test]
    async fn missing_token_rejected_before_network() {
        let session = FakeSession::authed(alice(), None);
        let mut controller = mounted(session.clone());
        edit_to_bob(&mut controller);

        let service = FakeService::new(Reply::Record(bob()));
        let outcome = controller.submit(&service).await;

        assert_eq!(outcome, SubmitOutcome::MissingToken);
        assert!(service.calls().is_empty());
        assert_eq!(controller.mode(), EditMode::Editing { submitting: false });
        assert_eq!(controller.alert(), Some("Missing auth token"));
    }

    #[tokio::test]
    async fn blocked_submit_is_a_no_op() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        controller.toggle_edit();

        let service = FakeService::new(Reply::Record(bob()));
        assert_eq!(controller.submit(&service).await, SubmitOutcome::Blocked);
        assert!(service.calls().is_empty());
        assert_eq!(controller.mode(), EditMode::Editing { submitting: false });
    }

    #[test]
    fn submitting_disables_save_and_toggle() {
        let mut controller = mounted(FakeSession::authed(alice(), Some("tok")));
        edit_to_bob(&mut controller);

        let request = controller.begin_submit().expect("request");
        assert_eq!(request.user_id, "7");
        assert!(controller.is_submitting());
        assert!(!controller.can_save());
        assert_eq!(controller.begin_submit(), Err(SubmitOutcome::Blocked));

        controller.toggle_edit();
        controller.change_field(FieldName::Name, "Eve");
        assert!(controller.is_submitting());
        assert_eq!(controller.values().name, "Bob");

        controller.complete_submit(Ok(Some(bob())));
        assert_eq!(controller.mode(), EditMode::Viewing);
    }

    #[test]
    fn back_goes_home() {
        let controller = mounted(FakeSession::authed(alice(), Some("tok")));
        assert_eq!(controller.back(), Route::Home);
    }
}
