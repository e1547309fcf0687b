/*
[INPUT]:  Session tokens and the signed-in user record
[OUTPUT]: Read-only session snapshots and user replacement actions
[POS]:    Auth layer - session state shared with the profile screen
[UPDATE]: When session shape or dispatch actions change
*/

pub mod session;

pub use session::{
    Dispatch, MAX_TOKEN_TTL_SECS, SessionAction, SessionProvider, SessionSnapshot, SessionStore,
};
