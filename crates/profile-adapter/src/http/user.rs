/*
[INPUT]:  User identifier, bearer token, and partial profile updates
[OUTPUT]: User profile records
[POS]:    HTTP layer - user endpoints (require bearer auth)
[UPDATE]: When adding new user endpoints or changing payloads
*/

// ### User Endpoints

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info};

use crate::http::{ProfileClient, Result};
use crate::types::{ProfileRecord, ProfileUpdate};

/// Remote update collaborator for the profile screen
///
/// `Ok(None)` means the service answered without a record, which callers
/// treat as a non-exceptional failure.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn update(
        &self,
        user_id: &str,
        token: &str,
        update: ProfileUpdate,
    ) -> Result<Option<ProfileRecord>>;
}

impl ProfileClient {
    /// Fetch a user profile
    ///
    /// GET /users/{id}
    pub async fn fetch_user(&self, user_id: &str, token: &str) -> Result<ProfileRecord> {
        let builder = self.request_with_token(Method::GET, &["users", user_id], token)?;
        self.send_json(builder).await
    }

    /// Update name, wallet address, and country of a user
    ///
    /// PUT /users/{id}
    pub async fn update_user(
        &self,
        user_id: &str,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<Option<ProfileRecord>> {
        let builder = self
            .request_with_token(Method::PUT, &["users", user_id], token)?
            .json(update);
        debug!(user_id, "sending profile update");
        let record = self.send_optional_json(builder).await?;
        info!(user_id, updated = record.is_some(), "profile update answered");
        Ok(record)
    }
}

#[async_trait]
impl UserService for ProfileClient {
    async fn update(
        &self,
        user_id: &str,
        token: &str,
        update: ProfileUpdate,
    ) -> Result<Option<ProfileRecord>> {
        self.update_user(user_id, token, &update).await
    }
}
