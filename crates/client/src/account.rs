//! Profile-domain operations (`/api/user`).
//!
//! Self-service account management: the multipart profile editor, account
//! deletion and deactivation, and public profile lookup. Deletion and
//! deactivation drop the local token once the backend confirms - the
//! server invalidates the session on its side, the client just stops
//! presenting a credential that no longer works.

use reqwest::Method;
use tracing::instrument;
use userdeck_core::User;

use crate::auth::{FileAttachment, ProfileUpdate};
use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, RequestBody, USER_PREFIX};
use crate::types::{Envelope, SessionPayload};

impl ApiClient {
    /// Update the profile with optional picture upload
    /// (`PUT /api/user/profile`, multipart).
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token; otherwise any
    /// transport or server error.
    #[instrument(skip(self, update, picture))]
    pub async fn edit_profile(
        &self,
        update: &ProfileUpdate,
        picture: Option<FileAttachment>,
    ) -> ApiResult<User> {
        let token = self.require_token()?;

        let mut form = reqwest::multipart::Form::new();
        for (key, value) in update.multipart_fields() {
            form = form.text(key, value);
        }
        if let Some(picture) = picture {
            form = form.part("profilePicture", picture.into_part()?);
        }

        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::PUT,
                &format!("{USER_PREFIX}/profile"),
                RequestBody::Multipart(form),
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// Permanently delete the account (`DELETE /api/user/profile`).
    ///
    /// Clears the local token on success.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token; otherwise any
    /// transport or server error (the token is kept on failure so the
    /// user can retry).
    #[instrument(skip(self))]
    pub async fn delete_account(&self) -> ApiResult<()> {
        let token = self.require_token()?;
        let _: Envelope<serde_json::Value> = self
            .request(
                Method::DELETE,
                &format!("{USER_PREFIX}/profile"),
                RequestBody::Empty,
                Some(&token),
            )
            .await?;
        self.clear_token();
        Ok(())
    }

    /// Deactivate the account (`PUT /api/user/deactivate`).
    ///
    /// Clears the local token on success; the account can be reactivated
    /// by an admin later.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token; otherwise any
    /// transport or server error.
    #[instrument(skip(self))]
    pub async fn deactivate_account(&self) -> ApiResult<()> {
        let token = self.require_token()?;
        let _: Envelope<serde_json::Value> = self
            .request(
                Method::PUT,
                &format!("{USER_PREFIX}/deactivate"),
                RequestBody::Empty,
                Some(&token),
            )
            .await?;
        self.clear_token();
        Ok(())
    }

    /// Fetch a user's public profile (`GET /api/user/profile/:id`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is empty;
    /// [`ApiError::NotAuthenticated`] without a token.
    #[instrument(skip(self))]
    pub async fn user_profile(&self, user_id: &str) -> ApiResult<User> {
        let token = self.require_token()?;
        if user_id.is_empty() {
            return Err(ApiError::validation("User ID is required"));
        }
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::GET,
                &format!("{USER_PREFIX}/profile/{user_id}"),
                RequestBody::Empty,
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::token::{MemoryTokenStore, TokenStore};

    fn user_envelope() -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "data": {
                "user": {
                    "id": "u1",
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "email": "ada@example.com",
                    "role": "user",
                    "isActive": true
                }
            }
        })
    }

    #[tokio::test]
    async fn test_edit_profile_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/user/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_envelope()))
            .mount(&server)
            .await;

        let client = ApiClient::with_store(
            server.uri(),
            Arc::new(MemoryTokenStore::with_token("jwt-abc")),
        );
        let update = ProfileUpdate {
            first_name: Some("Ada".into()),
            ..ProfileUpdate::default()
        };
        let user = client.edit_profile(&update, None).await.unwrap();
        assert_eq!(user.first_name, "Ada");
    }

    #[tokio::test]
    async fn test_delete_account_clears_token() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/user/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": {}
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::with_token("jwt-abc"));
        let client = ApiClient::with_store(server.uri(), Arc::clone(&store) as Arc<dyn TokenStore>);
        client.delete_account().await.unwrap();
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_delete_account_keeps_token_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "message": "cannot delete"
            })))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::with_token("jwt-abc"));
        let client = ApiClient::with_store(server.uri(), Arc::clone(&store) as Arc<dyn TokenStore>);
        assert!(client.delete_account().await.is_err());
        assert_eq!(store.get(), Some("jwt-abc".to_owned()));
    }

    #[tokio::test]
    async fn test_user_profile_requires_id() {
        let client = ApiClient::with_store(
            "http://127.0.0.1:9".to_owned(),
            Arc::new(MemoryTokenStore::with_token("jwt-abc")),
        );
        let err = client.user_profile("").await.unwrap_err();
        assert_eq!(err.to_string(), "User ID is required");
    }

    #[tokio::test]
    async fn test_deactivate_without_token_short_circuits() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::with_store(server.uri(), Arc::new(MemoryTokenStore::new()));
        let err = client.deactivate_account().await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
    }
}
