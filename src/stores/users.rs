// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

//! User directory reads and the admin moderation surface.

use chrono::{NaiveTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Error;
use crate::models::user::{AdminStats, AdminUserRow, AdminUserStatus, ProfileView, User};
use crate::schema::{posts, users};

#[derive(Clone)]
pub struct UserStore {
    db: Arc<Database>,
}

impl UserStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Public profile. The viewer's follow state starts out false; the
    /// handler resolves it through the social graph store.
    pub async fn profile(&self, user_id: Uuid) -> Result<ProfileView, Error> {
        let mut conn = self.db.conn().await?;

        let user = users::table
            .find(user_id)
            .first::<User>(&mut conn)
            .await
            .optional()?
            .ok_or(Error::NotFound("user"))?;

        Ok(ProfileView {
            id: user.id,
            name: user.display_name(),
            username: user.username,
            bio: user.bio,
            avatar_url: user.avatar_url,
            website: user.website,
            location: user.location,
            posts_count: user.posts_count,
            followers_count: user.followers_count,
            following_count: user.following_count,
            created_at: user.created_at,
            is_following: false,
        })
    }

    /// The full row for the acting user.
    pub async fn me(&self, user_id: Uuid) -> Result<User, Error> {
        let mut conn = self.db.conn().await?;

        users::table
            .find(user_id)
            .first::<User>(&mut conn)
            .await
            .optional()?
            .ok_or(Error::NotFound("user"))
    }

    /// Admin directory, newest accounts first.
    pub async fn admin_list(&self, limit: i64, offset: i64) -> Result<Vec<AdminUserRow>, Error> {
        let mut conn = self.db.conn().await?;

        let rows = users::table
            .order_by(users::created_at.desc())
            .limit(limit)
            .offset(offset)
            .load::<User>(&mut conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|user| AdminUserRow {
                id: user.id,
                name: user.display_name(),
                email: user.email,
                role: user.role,
                is_active: user.is_active,
                created_at: user.created_at,
            })
            .collect())
    }

    /// Toggle an account's active flag. Admins cannot change their own
    /// status.
    pub async fn admin_set_active(
        &self,
        admin_id: Uuid,
        user_id: Uuid,
        is_active: bool,
    ) -> Result<AdminUserStatus, Error> {
        if admin_id == user_id {
            return Err(Error::Validation(
                "admins cannot change their own status".to_string(),
            ));
        }

        let mut conn = self.db.conn().await?;

        let (id, is_active) = diesel::update(users::table.find(user_id))
            .set((users::is_active.eq(is_active), users::updated_at.eq(Utc::now())))
            .returning((users::id, users::is_active))
            .get_result::<(Uuid, bool)>(&mut conn)
            .await
            .optional()?
            .ok_or(Error::NotFound("user"))?;

        debug!("user {} active flag set to {} by {}", id, is_active, admin_id);

        Ok(AdminUserStatus { id, is_active })
    }

    /// Dashboard counters: account and post totals plus accounts seen
    /// since the start of today.
    pub async fn admin_stats(&self) -> Result<AdminStats, Error> {
        let mut conn = self.db.conn().await?;

        let total_users = users::table.count().get_result::<i64>(&mut conn).await?;

        let total_posts = posts::table.count().get_result::<i64>(&mut conn).await?;

        let start_of_day = Utc::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();

        let active_today = users::table
            .filter(users::last_login.ge(start_of_day))
            .count()
            .get_result::<i64>(&mut conn)
            .await?;

        Ok(AdminStats {
            total_users,
            total_posts,
            active_today,
        })
    }
}
