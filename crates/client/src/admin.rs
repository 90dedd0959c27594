//! Admin-domain operations (`/api/admin`).
//!
//! User management for the admin dashboard: listing with filters and
//! pagination, per-user CRUD, activation toggles, bulk operations,
//! aggregate stats, and export. Every operation except login requires the
//! stored bearer token; whether that token actually carries admin rights
//! is the backend's call.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use userdeck_core::{User, UserRole};

use crate::error::{ApiError, ApiResult};
use crate::http::{ADMIN_PREFIX, ApiClient, RequestBody};
use crate::types::{AuthPayload, Envelope, SessionPayload};

/// Activation filter for listing and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Sort direction for listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters for `GET /api/admin/users`.
///
/// Unset fields are omitted from the query string entirely, mirroring how
/// the dashboard only sends the filters the operator touched.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub role: Option<UserRole>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl UserListQuery {
    /// Serialize into a query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::new();
        if let Some(page) = self.page {
            pairs.push(format!("page={page}"));
        }
        if let Some(limit) = self.limit {
            pairs.push(format!("limit={limit}"));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(format!("search={}", urlencoding::encode(search)));
        }
        if let Some(status) = self.status {
            pairs.push(format!("status={}", status.as_str()));
        }
        if let Some(role) = self.role {
            pairs.push(format!("role={role}"));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(format!("sortBy={}", urlencoding::encode(sort_by)));
        }
        if let Some(order) = self.sort_order {
            pairs.push(format!("sortOrder={}", order.as_str()));
        }
        pairs.join("&")
    }
}

/// Pagination block returned by the list endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_prev_page: bool,
}

/// One page of the user list.
#[derive(Debug, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Headline counters on the dashboard.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub new_users_this_month: u64,
    #[serde(default)]
    pub new_users_today: u64,
}

/// One slice of a grouped count (gender or role distribution).
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionBucket {
    /// Group key; `None` for accounts that never set the field.
    #[serde(rename = "_id")]
    pub key: Option<String>,
    pub count: u64,
}

/// `data` payload of `GET /api/admin/dashboard`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub overview: Overview,
    #[serde(default)]
    pub gender_distribution: Vec<DistributionBucket>,
    #[serde(default)]
    pub role_distribution: Vec<DistributionBucket>,
    #[serde(default)]
    pub recent_users: Vec<User>,
}

/// Bulk operation verbs accepted by `POST /api/admin/users/bulk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOperation {
    Activate,
    Deactivate,
    Delete,
}

/// Admin-side edit of another account.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Export format for `GET /api/admin/users/export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Exported user data, tagged by format.
#[derive(Debug)]
pub enum UserExport {
    /// Parsed JSON export.
    Json(serde_json::Value),
    /// Raw CSV bytes, ready to write to disk.
    Csv(Vec<u8>),
}

impl ApiClient {
    /// Authenticate against the admin login endpoint
    /// (`POST /api/admin/login`).
    ///
    /// Persists the returned token like the regular login does.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when either field is empty; otherwise any
    /// transport or server error.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn admin_login(
        &self,
        email: &str,
        password: &secrecy::SecretString,
    ) -> ApiResult<AuthPayload> {
        use secrecy::ExposeSecret;

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
                &format!("{ADMIN_PREFIX}/login"),
                RequestBody::Json(body),
                None,
            )
            .await?;

        self.set_token(&envelope.data.token);
        Ok(envelope.data)
    }

    /// List users with filters and pagination
    /// (`GET /api/admin/users?<query>`).
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token; otherwise any
    /// transport or server error.
    #[instrument(skip(self, query))]
    pub async fn list_users(&self, query: &UserListQuery) -> ApiResult<UserList> {
        let token = self.require_token()?;
        let qs = query.to_query_string();
        let path = if qs.is_empty() {
            format!("{ADMIN_PREFIX}/users")
        } else {
            format!("{ADMIN_PREFIX}/users?{qs}")
        };
        let envelope: Envelope<UserList> = self
            .request(Method::GET, &path, RequestBody::Empty, Some(&token))
            .await?;
        Ok(envelope.data)
    }

    /// Fetch one user by id (`GET /api/admin/users/:id`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is empty;
    /// [`ApiError::NotAuthenticated`] without a token.
    #[instrument(skip(self))]
    pub async fn admin_user(&self, user_id: &str) -> ApiResult<User> {
        let token = self.require_token()?;
        if user_id.is_empty() {
            return Err(ApiError::validation("User ID is required"));
        }
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::GET,
                &format!("{ADMIN_PREFIX}/users/{user_id}"),
                RequestBody::Empty,
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// Edit another account (`PUT /api/admin/users/:id`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is empty;
    /// [`ApiError::NotAuthenticated`] without a token.
    #[instrument(skip(self, update))]
    pub async fn update_user(&self, user_id: &str, update: &AdminUserUpdate) -> ApiResult<User> {
        let token = self.require_token()?;
        if user_id.is_empty() {
            return Err(ApiError::validation("User ID is required"));
        }
        let body = serde_json::to_value(update).map_err(|e| ApiError::validation(e.to_string()))?;
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::PUT,
                &format!("{ADMIN_PREFIX}/users/{user_id}"),
                RequestBody::Json(body),
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// Delete an account (`DELETE /api/admin/users/:id`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is empty;
    /// [`ApiError::NotAuthenticated`] without a token.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str) -> ApiResult<()> {
        let token = self.require_token()?;
        if user_id.is_empty() {
            return Err(ApiError::validation("User ID is required"));
        }
        let _: Envelope<serde_json::Value> = self
            .request(
                Method::DELETE,
                &format!("{ADMIN_PREFIX}/users/{user_id}"),
                RequestBody::Empty,
                Some(&token),
            )
            .await?;
        Ok(())
    }

    /// Flip an account's activation state
    /// (`PUT /api/admin/users/:id/toggle-status`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the id is empty;
    /// [`ApiError::NotAuthenticated`] without a token.
    #[instrument(skip(self))]
    pub async fn toggle_user_status(&self, user_id: &str, is_active: bool) -> ApiResult<User> {
        let token = self.require_token()?;
        if user_id.is_empty() {
            return Err(ApiError::validation("User ID is required"));
        }
        let envelope: Envelope<SessionPayload> = self
            .request(
                Method::PUT,
                &format!("{ADMIN_PREFIX}/users/{user_id}/toggle-status"),
                RequestBody::Json(serde_json::json!({ "isActive": is_active })),
                Some(&token),
            )
            .await?;
        Ok(envelope.data.user)
    }

    /// Apply an operation to many accounts at once
    /// (`POST /api/admin/users/bulk`).
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when no ids are given;
    /// [`ApiError::NotAuthenticated`] without a token.
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    pub async fn bulk_operation(
        &self,
        operation: BulkOperation,
        user_ids: &[String],
    ) -> ApiResult<serde_json::Value> {
        let token = self.require_token()?;
        if user_ids.is_empty() {
            return Err(ApiError::validation("Operation and user IDs are required"));
        }
        let body = serde_json::json!({
            "operation": operation,
            "userIds": user_ids,
        });
        let envelope: Envelope<serde_json::Value> = self
            .request(
                Method::POST,
                &format!("{ADMIN_PREFIX}/users/bulk"),
                RequestBody::Json(body),
                Some(&token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Fetch dashboard aggregates (`GET /api/admin/dashboard`).
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token; otherwise any
    /// transport or server error.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let token = self.require_token()?;
        let envelope: Envelope<DashboardStats> = self
            .request(
                Method::GET,
                &format!("{ADMIN_PREFIX}/dashboard"),
                RequestBody::Empty,
                Some(&token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Export users (`GET /api/admin/users/export?format=&status=`).
    ///
    /// CSV comes back as raw bytes; JSON is parsed.
    ///
    /// # Errors
    ///
    /// [`ApiError::NotAuthenticated`] without a token; otherwise any
    /// transport or server error.
    #[instrument(skip(self))]
    pub async fn export_users(
        &self,
        format: ExportFormat,
        status: StatusFilter,
    ) -> ApiResult<UserExport> {
        let token = self.require_token()?;
        let path = format!(
            "{ADMIN_PREFIX}/users/export?format={}&status={}",
            format.as_str(),
            status.as_str()
        );
        match format {
            ExportFormat::Csv => {
                let bytes = self.request_bytes(Method::GET, &path, Some(&token)).await?;
                Ok(UserExport::Csv(bytes))
            }
            ExportFormat::Json => {
                let value: serde_json::Value = self
                    .request(Method::GET, &path, RequestBody::Empty, Some(&token))
                    .await?;
                Ok(UserExport::Json(value))
            }
        }
    }
}
