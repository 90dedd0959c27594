//! Admin commands: user listing, dashboard stats, and export.
//!
//! # Usage
//!
//! ```bash
//! # List users (paged)
//! userdeck admin users --page 1 --limit 20 --search ada --status active
//!
//! # Dashboard aggregates
//! userdeck admin stats
//!
//! # Export active users as CSV
//! userdeck admin export --format csv --status active -o users.csv
//!
//! # Toggle an account
//! userdeck admin toggle <USER_ID> --active false
//! ```
//!
//! All commands require a stored token from `userdeck login` (or
//! `userdeck admin login`) with an admin-role account.

use userdeck_client::admin::{
    ExportFormat, StatusFilter, UserExport, UserListQuery,
};

use super::{CliError, client};

/// Parse a `--status` argument.
fn parse_status(status: &str) -> StatusFilter {
    match status {
        "active" => StatusFilter::Active,
        "inactive" => StatusFilter::Inactive,
        _ => StatusFilter::All,
    }
}

/// List users with optional filters.
pub async fn list_users(
    page: u32,
    limit: u32,
    search: Option<String>,
    status: Option<String>,
) -> Result<(), CliError> {
    let api = client()?;
    let query = UserListQuery {
        page: Some(page),
        limit: Some(limit),
        search,
        status: status.as_deref().map(parse_status),
        ..UserListQuery::default()
    };
    let list = api.list_users(&query).await?;

    for user in &list.users {
        tracing::info!(
            "{}  {} <{}>  role={}  active={}",
            user.id,
            user.full_name(),
            user.email,
            user.role,
            user.is_active
        );
    }
    tracing::info!(
        "Page {}/{} ({} users total)",
        list.pagination.current_page,
        list.pagination.total_pages,
        list.pagination.total_users
    );
    Ok(())
}

/// Show dashboard aggregates.
pub async fn stats() -> Result<(), CliError> {
    let api = client()?;
    let stats = api.dashboard_stats().await?;

    tracing::info!(
        "Users: {} total, {} active, {} new this month, {} new today",
        stats.overview.total_users,
        stats.overview.active_users,
        stats.overview.new_users_this_month,
        stats.overview.new_users_today
    );
    for bucket in &stats.role_distribution {
        tracing::info!(
            "Role {}: {}",
            bucket.key.as_deref().unwrap_or("(unset)"),
            bucket.count
        );
    }
    for bucket in &stats.gender_distribution {
        tracing::info!(
            "Gender {}: {}",
            bucket.key.as_deref().unwrap_or("(unset)"),
            bucket.count
        );
    }
    Ok(())
}

/// Export users to a local file.
pub async fn export(format: &str, status: Option<String>, output: &str) -> Result<(), CliError> {
    let api = client()?;
    let format = match format {
        "csv" => ExportFormat::Csv,
        _ => ExportFormat::Json,
    };
    let status = status.as_deref().map_or(StatusFilter::All, parse_status);

    let export = api.export_users(format, status).await?;
    match export {
        UserExport::Csv(bytes) => std::fs::write(output, bytes)?,
        UserExport::Json(value) => {
            let pretty = serde_json::to_string_pretty(&value)
                .map_err(|e| userdeck_client::ApiError::validation(e.to_string()))?;
            std::fs::write(output, pretty)?;
        }
    }
    tracing::info!("Export written to {output}");
    Ok(())
}

/// Flip an account's activation state.
pub async fn toggle(user_id: &str, active: bool) -> Result<(), CliError> {
    let api = client()?;
    let user = api.toggle_user_status(user_id, active).await?;
    tracing::info!(
        "{} <{}> is now {}",
        user.full_name(),
        user.email,
        if user.is_active { "active" } else { "inactive" }
    );
    Ok(())
}

/// Log in against the admin endpoint and persist the token.
pub async fn login(email: &str, password: &str) -> Result<(), CliError> {
    let api = client()?;
    let payload = api
        .admin_login(email, &secrecy::SecretString::from(password))
        .await?;
    tracing::info!(
        "Logged in as {} <{}>",
        payload.user.full_name(),
        payload.user.email
    );
    Ok(())
}
