// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

//! Notification fan-out and read state.
//!
//! The fan-out helpers take the caller's transaction connection, so a
//! like, comment or follow and its notification commit or roll back as
//! one unit. A record is never produced for a user's action on their
//! own content.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Error;
use crate::metrics::NOTIFICATIONS_CREATED;
use crate::models::notification::{
    NewNotification, Notification, NotificationPage, NotificationSender, NotificationType,
    NotificationView,
};
use crate::schema::{notifications, posts, users};

/// Whether an action by `sender` on `recipient`'s content produces a
/// notification.
fn fans_out(recipient_id: Uuid, sender_id: Uuid) -> bool {
    recipient_id != sender_id
}

#[derive(Clone)]
pub struct NotificationStore {
    db: Arc<Database>,
}

impl NotificationStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn notify_like(
        conn: &mut AsyncPgConnection,
        post_author_id: Uuid,
        actor_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), Error> {
        Self::record(conn, NotificationType::Like, post_author_id, actor_id, Some(post_id)).await
    }

    pub async fn notify_comment(
        conn: &mut AsyncPgConnection,
        post_author_id: Uuid,
        actor_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), Error> {
        Self::record(
            conn,
            NotificationType::Comment,
            post_author_id,
            actor_id,
            Some(post_id),
        )
        .await
    }

    pub async fn notify_follow(
        conn: &mut AsyncPgConnection,
        target_id: Uuid,
        actor_id: Uuid,
    ) -> Result<(), Error> {
        Self::record(conn, NotificationType::Follow, target_id, actor_id, None).await
    }

    async fn record(
        conn: &mut AsyncPgConnection,
        kind: NotificationType,
        recipient_id: Uuid,
        sender_id: Uuid,
        post_id: Option<Uuid>,
    ) -> Result<(), Error> {
        if !fans_out(recipient_id, sender_id) {
            return Ok(());
        }

        let row = NewNotification {
            id: Uuid::new_v4(),
            notification_type: kind.as_str().to_string(),
            recipient_id,
            sender_id,
            post_id,
            is_read: false,
            created_at: Utc::now(),
        };

        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(conn)
            .await?;

        NOTIFICATIONS_CREATED.inc();
        debug!("{} notification for {} from {}", kind, recipient_id, sender_id);

        Ok(())
    }

    /// Newest-first page plus the unread total. The unread count covers
    /// the whole mailbox, not just the requested page.
    pub async fn list(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<NotificationPage, Error> {
        let mut conn = self.db.conn().await?;

        let rows = notifications::table
            .filter(notifications::recipient_id.eq(user_id))
            .inner_join(users::table.on(users::id.eq(notifications::sender_id)))
            .left_join(posts::table.on(notifications::post_id.eq(posts::id.nullable())))
            .order_by(notifications::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((
                Notification::as_select(),
                users::username,
                users::avatar_url,
                posts::content.nullable(),
            ))
            .load::<(Notification, String, Option<String>, Option<String>)>(&mut conn)
            .await?;

        let unread_count = notifications::table
            .filter(notifications::recipient_id.eq(user_id))
            .filter(notifications::is_read.eq(false))
            .count()
            .get_result::<i64>(&mut conn)
            .await?;

        let notifications = rows
            .into_iter()
            .map(|(notification, username, avatar_url, post_content)| NotificationView {
                id: notification.id,
                notification_type: notification.notification_type,
                is_read: notification.is_read,
                created_at: notification.created_at,
                sender: NotificationSender {
                    username,
                    avatar_url,
                },
                post_id: notification.post_id,
                post_content,
            })
            .collect();

        Ok(NotificationPage {
            notifications,
            unread_count,
        })
    }

    /// Mark one notification read; only its recipient may do so.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        requester_id: Uuid,
    ) -> Result<Notification, Error> {
        let mut conn = self.db.conn().await?;

        let notification = notifications::table
            .find(notification_id)
            .first::<Notification>(&mut conn)
            .await
            .optional()?
            .ok_or(Error::NotFound("notification"))?;

        if notification.recipient_id != requester_id {
            return Err(Error::Forbidden(
                "only the recipient can mark this notification read".to_string(),
            ));
        }

        let updated = diesel::update(notifications::table.find(notification_id))
            .set(notifications::is_read.eq(true))
            .get_result::<Notification>(&mut conn)
            .await?;

        Ok(updated)
    }

    /// Mark every unread notification read; returns how many changed.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<usize, Error> {
        let mut conn = self.db.conn().await?;

        let updated = diesel::update(
            notifications::table
                .filter(notifications::recipient_id.eq(user_id))
                .filter(notifications::is_read.eq(false)),
        )
        .set(notifications::is_read.eq(true))
        .execute(&mut conn)
        .await?;

        debug!("marked {} notifications read for {}", updated, user_id);

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_actions_do_not_fan_out() {
        let user = Uuid::new_v4();
        assert!(!fans_out(user, user));
    }

    #[test]
    fn test_distinct_users_fan_out() {
        assert!(fans_out(Uuid::new_v4(), Uuid::new_v4()));
    }
}
