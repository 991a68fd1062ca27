// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::schema::notifications;

/// What kind of social action produced the notification. Stored as text
/// in the `notification_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Like,
    Comment,
    Follow,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Like => "like",
            NotificationType::Comment => "comment",
            NotificationType::Follow => "follow",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(NotificationType::Like),
            "comment" => Ok(NotificationType::Comment),
            "follow" => Ok(NotificationType::Follow),
            other => Err(format!("unknown notification type: {other}")),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub notification_type: String,
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub post_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewNotification {
    pub id: Uuid,
    pub notification_type: String,
    pub recipient_id: Uuid,
    pub sender_id: Uuid,
    pub post_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Sender details nested inside a notification listing entry.
#[derive(Debug, Serialize)]
pub struct NotificationSender {
    pub username: String,
    pub avatar_url: Option<String>,
}

/// A notification as returned by `GET /api/notifications`, with the
/// sender summary and the referenced post content for context.
#[derive(Debug, Serialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub notification_type: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub sender: NotificationSender,
    pub post_id: Option<Uuid>,
    pub post_content: Option<String>,
}

/// Page of notifications plus the unread total, which is independent of
/// the requested page.
#[derive(Debug, Serialize)]
pub struct NotificationPage {
    pub notifications: Vec<NotificationView>,
    pub unread_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_round_trip() {
        for kind in [
            NotificationType::Like,
            NotificationType::Comment,
            NotificationType::Follow,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_notification_type_rejects_unknown() {
        assert!("mention".parse::<NotificationType>().is_err());
    }
}
