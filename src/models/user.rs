// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::users;

/// Account role, stored as text in the `role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub posts_count: i32,
    pub followers_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Lean author representation nested inside posts, comments and suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub avatar_url: Option<String>,
}

/// Columns backing a [`UserSummary`]; loaded as a tuple and converted.
pub type UserSummaryRow = (Uuid, String, String, String, Option<String>);

impl From<UserSummaryRow> for UserSummary {
    fn from((id, username, first_name, last_name, avatar_url): UserSummaryRow) -> Self {
        UserSummary {
            id,
            username,
            name: format!("{first_name} {last_name}"),
            avatar_url,
        }
    }
}

/// Public profile returned by the user endpoints, with the viewer's
/// follow state resolved.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub posts_count: i32,
    pub followers_count: i32,
    pub following_count: i32,
    pub created_at: DateTime<Utc>,
    pub is_following: bool,
}

/// Directory entry for the admin user table.
#[derive(Debug, Serialize)]
pub struct AdminUserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of an admin status toggle.
#[derive(Debug, Serialize)]
pub struct AdminUserStatus {
    pub id: Uuid,
    pub is_active: bool,
}

/// Dashboard counters for the admin overview.
#[derive(Debug, Serialize)]
pub struct AdminStats {
    pub total_users: i64,
    pub total_posts: i64,
    pub active_today: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        assert!("moderator".parse::<Role>().is_err());
    }

    #[test]
    fn test_summary_joins_names() {
        let row: UserSummaryRow = (
            Uuid::nil(),
            "ada".into(),
            "Ada".into(),
            "Lovelace".into(),
            None,
        );
        let summary = UserSummary::from(row);
        assert_eq!(summary.name, "Ada Lovelace");
    }
}
