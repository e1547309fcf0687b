/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public profile adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{
    Dispatch, MAX_TOKEN_TTL_SECS, SessionAction, SessionProvider, SessionSnapshot, SessionStore,
};

// Re-export commonly used types from http
pub use http::{ClientConfig, ProfileClient, ProfileError, Result, UserService};

// Re-export all types
pub use types::*;
