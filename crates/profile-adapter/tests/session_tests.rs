/*
[INPUT]:  Session store operations across threads
[OUTPUT]: Test results for session snapshots and dispatch
[POS]:    Integration tests - session
[UPDATE]: When session shape or dispatch actions change
*/

mod common;

use common::{alice, mock_token};
use profile_adapter::{Dispatch, SessionAction, SessionProvider, SessionStore};
use std::sync::Arc;

#[test]
fn test_session_shared_between_providers() {
    let store = SessionStore::new();
    store.set_token(mock_token(), 3600);
    store.set_user(alice());

    let provider: Arc<dyn SessionProvider> = Arc::new(store.clone());
    let dispatcher: Arc<dyn Dispatch> = Arc::new(store);

    let mut updated = alice();
    updated.wallet_addr = format!("0x{}", "2".repeat(40));
    dispatcher.dispatch(SessionAction::SetUser(updated.clone()));

    let snapshot = provider.snapshot();
    assert!(snapshot.is_authed);
    assert_eq!(snapshot.token, Some(mock_token()));
    assert_eq!(snapshot.user, Some(updated));
}

#[test]
fn test_session_dispatch_from_other_thread() {
    let store = SessionStore::new();
    store.set_token(mock_token(), 3600);
    store.set_user(alice());

    let writer = store.clone();
    let handle = std::thread::spawn(move || {
        let mut renamed = alice();
        renamed.name = "Alicia".to_string();
        writer.dispatch(SessionAction::SetUser(renamed));
    });
    handle.join().expect("writer thread");

    let user = store.user().expect("user present");
    assert_eq!(user.name, "Alicia");
    assert_eq!(user.email, "a@x.com");
}
