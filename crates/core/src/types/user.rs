//! User account wire models.
//!
//! These mirror the JSON shapes the backend serves. Most fields are
//! optional because different endpoints return differently trimmed views
//! of the same account (the list endpoint omits profile details, `/me`
//! returns everything).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::UserRole;

/// Self-reported gender on the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

impl Gender {
    /// Wire value used in both JSON and multipart bodies.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::PreferNotToSay => "prefer_not_to_say",
        }
    }
}

/// Postal address block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// Fields as `(multipart key, value)` pairs, skipping empties.
    ///
    /// The backend expects bracketed keys (`address[city]`) when the
    /// address rides along in a multipart form.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let entries = [
            ("address[street]", &self.street),
            ("address[city]", &self.city),
            ("address[state]", &self.state),
            ("address[zipCode]", &self.zip_code),
            ("address[country]", &self.country),
        ];
        for (key, value) in entries {
            if let Some(v) = value
                && !v.is_empty()
            {
                fields.push((key, v.clone()));
            }
        }
        fields
    }
}

/// Social profile links shown on the public profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl SocialLinks {
    /// Fields as `(multipart key, value)` pairs, skipping empties.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        let entries = [
            ("socialLinks[twitter]", &self.twitter),
            ("socialLinks[linkedin]", &self.linkedin),
            ("socialLinks[github]", &self.github),
            ("socialLinks[website]", &self.website),
        ];
        for (key, value) in entries {
            if let Some(v) = value
                && !v.is_empty()
            {
                fields.push((key, v.clone()));
            }
        }
        fields
    }
}

/// A user account as the backend serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier (`id` or legacy `_id`).
    #[serde(alias = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Display name as "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserializes_trimmed_view() {
        // The admin list endpoint omits profile details entirely.
        let json = serde_json::json!({
            "id": "u_123",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "role": "admin",
            "isActive": true
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert!(user.address.is_none());
    }

    #[test]
    fn test_user_accepts_legacy_id_key() {
        let json = serde_json::json!({
            "_id": "507f1f77bcf86cd799439011",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com"
        });
        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, "507f1f77bcf86cd799439011");
        assert_eq!(user.role, UserRole::User);
        assert!(!user.is_active);
    }

    #[test]
    fn test_address_form_fields_skip_empty() {
        let address = Address {
            city: Some("Lisbon".into()),
            country: Some(String::new()),
            ..Address::default()
        };
        let fields = address.form_fields();
        assert_eq!(fields, vec![("address[city]", "Lisbon".to_string())]);
    }

    #[test]
    fn test_social_links_form_fields() {
        let links = SocialLinks {
            github: Some("https://github.com/ada".into()),
            ..SocialLinks::default()
        };
        assert_eq!(
            links.form_fields(),
            vec![("socialLinks[github]", "https://github.com/ada".to_string())]
        );
    }

    #[test]
    fn test_gender_wire_format() {
        assert_eq!(
            serde_json::to_string(&Gender::PreferNotToSay).unwrap(),
            "\"prefer_not_to_say\""
        );
    }
}
