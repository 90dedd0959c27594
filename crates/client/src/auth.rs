//! Auth-domain operations (`/api/auth`).
//!
//! Signup, login, session introspection, logout, and self-service profile
//! updates. Login and signup persist the returned bearer token; logout
//! always drops it, even when the backend call fails - a dead backend must
//! never trap a user in an authenticated UI state.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};
use userdeck_core::{
    Address, Gender, SocialLinks, User, validate_new_password, validate_signup_password,
};

use crate::error::{ApiError, ApiResult};
use crate::http::{ApiClient, AUTH_PREFIX, RequestBody};
use crate::types::{AuthPayload, Envelope, SessionPayload, SessionState};

/// A file rider for multipart operations (profile pictures).
#[derive(Debug, Clone)]
pub struct FileAttachment {
    /// File name reported to the backend.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileAttachment {
    pub(crate) fn into_part(self) -> ApiResult<reqwest::multipart::Part> {
        let part = reqwest::multipart::Part::bytes(self.bytes).file_name(self.file_name);
        part.mime_str(&self.mime_type)
            .map_err(|_| ApiError::validation("Invalid attachment content type"))
    }
}

/// Signup form contents.
///
/// First name, last name, email, and password are required; everything
/// else rides along when present.
#[derive(Clone)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: SecretString,
    pub date_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<Address>,
    pub bio: Option<String>,
}

impl SignupForm {
    /// Minimal form with only the required fields.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password,
            date_of_birth: None,
            phone_number: None,
            gender: None,
            address: None,
            bio: None,
        }
    }

    fn validate(&self) -> ApiResult<()> {
        if self.first_name.is_empty()
            || self.last_name.is_empty()
            || self.email.is_empty()
            || self.password.expose_secret().is_empty()
        {
            return Err(ApiError::validation(
                "Please fill in all required fields (First name, Last name, Email, and Password)",
            ));
        }
        validate_signup_password(self.password.expose_secret())
            .map_err(|e| ApiError::validation(e.to_string()))
    }

    fn into_multipart(self, picture: Option<FileAttachment>) -> ApiResult<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new()
            .text("firstName", self.first_name)
            .text("lastName", self.last_name)
            .text("email", self.email)
            .text("password", self.password.expose_secret().to_owned());

        if let Some(dob) = self.date_of_birth.filter(|v| !v.is_empty()) {
            form = form.text("dateOfBirth", dob);
        }
        if let Some(phone) = self.phone_number.filter(|v| !v.is_empty()) {
            form = form.text("phoneNumber", phone);
        }
        if let Some(gender) = self.gender {
            form = form.text("gender", gender.as_str());
        }
        if let Some(address) = &self.address {
            for (key, value) in address.form_fields() {
                form = form.text(key, value);
            }
        }
        if let Some(bio) = self.bio.filter(|v| !v.is_empty()) {
            form = form.text("bio", bio);
        }
        if let Some(picture) = picture {
            form = form.part("profilePicture", picture.into_part()?);
        }
        Ok(form)
    }
}

impl std::fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Self-service profile update.
///
/// `None` fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

impl ProfileUpdate {
    /// Flatten into `(multipart key, value)` pairs, skipping empties.
    pub(crate) fn multipart_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let scalars = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("phoneNumber", &self.phone_number),
            ("dateOfBirth", &self.date_of_birth),
            ("bio", &self.bio),
        ];
        for (key, value) in scalars {
            if let Some(v) = value
                && !v.is_empty()
            {
                fields.push((key, v.clone()));
            }
        }
        if let Some(gender) = self.gender {
            fields.push(("gender", gender.as_str().to_owned()));
        }
        if let Some(address) = &self.address {
            fields.extend(address.form_fields());
        }
        if let Some(links) = &self.social_links {
            fields.extend(links.form_fields());
        }
        fields
    }
}

/// Result of a successful login.
#[derive(Debug)]
pub struct LoginOutcome {
    /// The authenticated account.
    pub user: User,
    /// Token that was just persisted to the store.
    pub token: String,
    /// Suggested landing page based on the account role. Advisory only.
    pub redirect_to: &'static str,
}

impl ApiClient {
    /// Register a new account (`POST /api/auth/signup`, multipart).
    ///
    /// Persists the returned bearer token on success.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] before any network call when required
    /// fields are missing or the password fails the policy; otherwise any
    /// transport or server error, with 409 mapped to the fixed
    /// already-registered message.
    #[instrument(skip(self, form, picture), fields(email = %form.email))]
    pub async fn signup(
        &self,
        form: SignupForm,
        picture: Option<FileAttachment>,
    ) -> ApiResult<AuthPayload> {
        form.validate()?;
        let multipart = form.into_multipart(picture)?;

        let envelope: Envelope<AuthPayload> = self
            .request(
                Method::POST,
                &format!("{AUTH_PREFIX}/signup"),
                RequestBody::Multipart(multipart),
                None,
            )
            .await?;

        self.set_token(&envelope.data.token);
        Ok(envelope.data)
    }

    /// Authenticate with email and password (`POST /api/auth/login`).
    ///
    /// Persists the returned bearer token and suggests a landing page from
    /// the account role.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when either field is empty; otherwise any
    /// transport or server error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> ApiResult<LoginOutcome> {
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(ApiError::validation("Email and password are required"));
        }

        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let envelope: Envelope<AuthPayload> = self
            .request(
                Method::POST,
                &format!("{AUTH_PREFIX}/login"),
                RequestBody::Json(body),
                None,
            )
            .await?;

        self.set_token(&envelope.data.token);
        let redirect_to = envelope.data.user.role.dashboard_path();
        Ok(LoginOutcome {
            user: envelope.data.user,
            token: envelope.data.token,
            redirect_to,
        })
    }

    /// Fetch the account the stored token belongs to (`GET /api/auth/me`).
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a network call when no token
    /// is stored.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> ApiResult<User> {
        let token = self.require_token()?;
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::GET,
                &format!("{AUTH_PREFIX}/me"),
                RequestBody::Empty,
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// End the session (`POST /api/auth/logout`).
    ///
    /// The local token is cleared unconditionally and the call always
    /// reports success; a failing backend must not keep the client in an
    /// authenticated state.
    ///
    /// # Errors
    ///
    /// Never returns an error. The signature stays fallible so call sites
    /// compose uniformly with the other operations.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> ApiResult<()> {
        if let Some(token) = self.token() {
            let result: ApiResult<serde_json::Value> = self
                .request(
                    Method::POST,
                    &format!("{AUTH_PREFIX}/logout"),
                    RequestBody::Empty,
                    Some(&token),
                )
                .await;
            if let Err(e) = result {
                debug!(error = %e, "logout call failed; clearing local session anyway");
            }
        }
        self.clear_token();
        Ok(())
    }

    /// Check whether the stored token still identifies a live session.
    ///
    /// Absence of a token short-circuits to anonymous without a network
    /// call; otherwise delegates to [`Self::current_user`].
    #[instrument(skip(self))]
    pub async fn check_auth(&self) -> SessionState {
        if !self.has_token() {
            return SessionState::Anonymous {
                reason: ApiError::NotAuthenticated.to_string(),
            };
        }
        match self.current_user().await {
            Ok(user) => SessionState::Authenticated(Box::new(user)),
            Err(e) => SessionState::Anonymous {
                reason: e.to_string(),
            },
        }
    }

    /// Update profile fields as JSON (`PUT /api/auth/profile`).
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token; otherwise any
    /// transport or server error.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        let token = self.require_token()?;
        let body = serde_json::to_value(update).map_err(|e| ApiError::validation(e.to_string()))?;
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::PUT,
                &format!("{AUTH_PREFIX}/profile"),
                RequestBody::Json(body),
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// Update the phone number (`PUT /api/auth/phone`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the number is empty;
    /// [`ApiError::NotAuthenticated`] without a token.
    #[instrument(skip(self))]
    pub async fn update_phone(&self, phone_number: &str) -> ApiResult<User> {
        let token = self.require_token()?;
        if phone_number.is_empty() {
            return Err(ApiError::validation("Phone number is required"));
        }
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::PUT,
                &format!("{AUTH_PREFIX}/phone"),
                RequestBody::Json(serde_json::json!({ "phoneNumber": phone_number })),
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// Replace the profile picture (`PUT /api/auth/profile-picture`,
    /// multipart).
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token;
    /// [`ApiError::Validation`] when the attachment type is malformed.
    #[instrument(skip(self, picture))]
    pub async fn update_profile_picture(&self, picture: FileAttachment) -> ApiResult<User> {
        let token = self.require_token()?;
        let form = reqwest::multipart::Form::new().part("profilePicture", picture.into_part()?);
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::PUT,
                &format!("{AUTH_PREFIX}/profile-picture"),
                RequestBody::Multipart(form),
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// Change the password (`POST /api/auth/change-password`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when either password is empty or the new
    /// one is shorter than the minimum; [`ApiError::NotAuthenticated`]
    /// without a token.
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> ApiResult<()> {
        let token = self.require_token()?;
        if current_password.expose_secret().is_empty() || new_password.expose_secret().is_empty() {
            return Err(ApiError::validation(
                "Current password and new password are required",
            ));
        }
        if validate_new_password(new_password.expose_secret()).is_err() {
            return Err(ApiError::validation(
                "New password must be at least 6 characters long",
            ));
        }

        let body = serde_json::json!({
            "currentPassword": current_password.expose_secret(),
            "newPassword": new_password.expose_secret(),
        });
        let _: Envelope<serde_json::Value> = self
            .request(
                Method::POST,
                &format!("{AUTH_PREFIX}/change-password"),
                RequestBody::Json(body),
                Some(&token),
            )
            .await?;
        Ok(())
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

    fn user_json(role: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "u1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "role": role,
            "isActive": true
        })
    }

    fn auth_body(role: &str) -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "data": { "token": "jwt-abc", "user": user_json(role) }
        })
    }

    fn client_with_store(uri: String, store: Arc<MemoryTokenStore>) -> ApiClient {
        ApiClient::with_store(uri, store)
    }

    #[tokio::test]
    async fn test_login_persists_token_and_suggests_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("admin")))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let client = client_with_store(server.uri(), Arc::clone(&store));

        let outcome = client
            .login("ada@example.com", &SecretString::from("Sup3rSecret"))
            .await
            .unwrap();

        assert_eq!(outcome.redirect_to, "/admin/dashboard");
        assert_eq!(store.get(), Some("jwt-abc".to_owned()));
    }

    #[tokio::test]
    async fn test_login_regular_user_redirects_to_user_dashboard() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(auth_body("user")))
            .mount(&server)
            .await;

        let client = client_with_store(server.uri(), Arc::new(MemoryTokenStore::new()));
        let outcome = client
            .login("ada@example.com", &SecretString::from("Sup3rSecret"))
            .await
            .unwrap();
        assert_eq!(outcome.redirect_to, "/user/dashboard");
    }

    #[tokio::test]
    async fn test_login_empty_fields_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with_store(server.uri(), Arc::new(MemoryTokenStore::new()));
        let err = client
            .login("", &SecretString::from("Sup3rSecret"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email and password are required");
    }

    #[tokio::test]
    async fn test_signup_persists_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/signup"))
            .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("user")))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::new());
        let client = client_with_store(server.uri(), Arc::clone(&store));

        let form = SignupForm::new("Ada", "Lovelace", "ada@example.com", SecretString::from("Sup3rSecret"));
        let payload = client.signup(form, None).await.unwrap();

        assert_eq!(payload.token, "jwt-abc");
        assert_eq!(store.get(), Some("jwt-abc".to_owned()));
    }

    #[tokio::test]
    async fn test_signup_missing_required_fields_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with_store(server.uri(), Arc::new(MemoryTokenStore::new()));
        let form = SignupForm::new("Ada", "", "ada@example.com", SecretString::from("Sup3rSecret"));
        let err = client.signup(form, None).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields (First name, Last name, Email, and Password)"
        );
    }

    #[tokio::test]
    async fn test_signup_weak_password_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with_store(server.uri(), Arc::new(MemoryTokenStore::new()));
        let form = SignupForm::new("Ada", "Lovelace", "ada@example.com", SecretString::from("weakpass"));
        let err = client.signup(form, None).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_current_user_without_token_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with_store(server.uri(), Arc::new(MemoryTokenStore::new()));
        let err = client.current_user().await.unwrap_err();
        assert_eq!(err.to_string(), "No authentication token found");
    }

    #[tokio::test]
    async fn test_logout_clears_token_even_when_server_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryTokenStore::with_token("jwt-abc"));
        let client = client_with_store(server.uri(), Arc::clone(&store));

        assert!(client.logout().await.is_ok());
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn test_logout_without_token_is_quiet_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_with_store(server.uri(), Arc::new(MemoryTokenStore::new()));
        assert!(client.logout().await.is_ok());
    }

    #[tokio::test]
    async fn test_check_auth_without_token_is_anonymous() {
        let client = client_with_store(
            "http://127.0.0.1:9".to_owned(),
            Arc::new(MemoryTokenStore::new()),
        );
        let state = client.check_auth().await;
        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn test_check_auth_with_live_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": { "user": user_json("user") }
            })))
            .mount(&server)
            .await;

        let client =
            client_with_store(server.uri(), Arc::new(MemoryTokenStore::with_token("jwt-abc")));
        let state = client.check_auth().await;
        assert!(state.is_authenticated());
        assert_eq!(state.user().unwrap().email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_update_phone_requires_value() {
        let client = client_with_store(
            "http://127.0.0.1:9".to_owned(),
            Arc::new(MemoryTokenStore::with_token("jwt-abc")),
        );
        let err = client.update_phone("").await.unwrap_err();
        assert_eq!(err.to_string(), "Phone number is required");
    }

    #[tokio::test]
    async fn test_change_password_enforces_minimum() {
        let client = client_with_store(
            "http://127.0.0.1:9".to_owned(),
            Arc::new(MemoryTokenStore::with_token("jwt-abc")),
        );
        let err = client
            .change_password(&SecretString::from("old-secret"), &SecretString::from("tiny"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "New password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_profile_update_multipart_fields() {
        let update = ProfileUpdate {
            first_name: Some("Ada".into()),
            bio: Some(String::new()),
            gender: Some(Gender::Female),
            address: Some(Address {
                city: Some("London".into()),
                ..Address::default()
            }),
            ..ProfileUpdate::default()
        };
        let fields = update.multipart_fields();
        assert!(fields.contains(&("firstName", "Ada".to_owned())));
        assert!(fields.contains(&("gender", "female".to_owned())));
        assert!(fields.contains(&("address[city]", "London".to_owned())));
        // Empty bio is dropped.
        assert!(!fields.iter().any(|(k, _)| *k == "bio"));
    }

    #[test]
    fn test_signup_form_debug_redacts_password() {
        let form = SignupForm::new("Ada", "Lovelace", "ada@example.com", SecretString::from("Sup3rSecret"));
        let debug = format!("{form:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("Sup3rSecret"));
    }
}
