/*
[INPUT]:  Bearer tokens, expiration, and user records from the service
[OUTPUT]: Session snapshots and wholesale user replacement
[POS]:    Auth layer - session lifecycle management
[UPDATE]: When adding token refresh or changing storage strategy
*/

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::types::ProfileRecord;

/// Longest token lifetime accepted from configuration (100 years)
pub const MAX_TOKEN_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Stored session data with metadata
#[derive(Debug, Clone)]
struct SessionData {
    token: String,
    expires_at: DateTime<Utc>,
    user: Option<ProfileRecord>,
}

/// Point-in-time view of the session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub user: Option<ProfileRecord>,
    pub is_authed: bool,
    pub token: Option<String>,
}

/// Actions that mutate the session from outside the auth layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Replace the current user record wholesale (`SET_USER`)
    SetUser(ProfileRecord),
}

/// Read access to the session
pub trait SessionProvider: Send + Sync {
    fn snapshot(&self) -> SessionSnapshot;
}

/// Write access to the session through actions
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: SessionAction);
}

/// Thread-safe session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    data: Arc<RwLock<Option<SessionData>>>,
}

impl SessionStore {
    /// Create a new signed-out session
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(None)),
        }
    }

    /// Store a new token with expiration, dropping any previous user
    ///
    /// Lifetimes past the representable range saturate to the latest instant.
    pub fn set_token(&self, token: String, expires_seconds: u64) {
        let expires_at = i64::try_from(expires_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut guard = self.data.write().unwrap();
        *guard = Some(SessionData {
            token,
            expires_at,
            user: None,
        });
    }

    /// Attach the signed-in user; ignored when no token is stored
    pub fn set_user(&self, user: ProfileRecord) {
        let mut guard = self.data.write().unwrap();
        match guard.as_mut() {
            Some(data) => data.user = Some(user),
            None => debug!(user_id = %user.id, "ignoring user without a session token"),
        }
    }

    /// Get the current token if available and not expired
    pub fn get_token(&self) -> Option<String> {
        let guard = self.data.read().unwrap();
        guard
            .as_ref()
            .filter(|data| Utc::now() <= data.expires_at)
            .map(|data| data.token.clone())
    }

    /// Get the signed-in user if any
    pub fn user(&self) -> Option<ProfileRecord> {
        let guard = self.data.read().unwrap();
        guard.as_ref().and_then(|data| data.user.clone())
    }

    /// Clear the stored session
    pub fn clear(&self) {
        let mut guard = self.data.write().unwrap();
        *guard = None;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for SessionStore {
    fn snapshot(&self) -> SessionSnapshot {
        let token = self.get_token();
        let user = self.user();
        SessionSnapshot {
            is_authed: token.is_some() && user.is_some(),
            user,
            token,
        }
    }
}

impl Dispatch for SessionStore {
    fn dispatch(&self, action: SessionAction) {
        match action {
            SessionAction::SetUser(user) => {
                debug!(user_id = %user.id, "replacing session user");
                self.set_user(user);
            }
        }
    }
}
