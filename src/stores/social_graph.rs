// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

//! Directed follow graph: edge mutations keep the two users' counters in
//! the same transaction, so followers_count and following_count always
//! agree with the edges.

use chrono::{DateTime, Utc};
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Error;
use crate::metrics::FOLLOWS_CREATED;
use crate::models::social_graph::{Follow, FollowDetail, NewFollow};
use crate::models::user::{UserSummary, UserSummaryRow};
use crate::schema::{follows, users};
use crate::stores::notifications::NotificationStore;

#[derive(Clone)]
pub struct SocialGraphStore {
    db: Arc<Database>,
}

impl SocialGraphStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a follow edge and bump both counters atomically. Fails
    /// before touching the store on a self-follow.
    pub async fn follow(&self, follower_id: Uuid, target_id: Uuid) -> Result<Follow, Error> {
        if follower_id == target_id {
            return Err(Error::Validation("you cannot follow yourself".to_string()));
        }

        let mut conn = self.db.conn().await?;

        let edge = conn
            .build_transaction()
            .run(|conn| {
                async move {
                    let target_exists: bool =
                        select(exists(users::table.find(target_id))).get_result(conn).await?;
                    if !target_exists {
                        return Err(Error::NotFound("user"));
                    }

                    let new_edge = NewFollow {
                        follower_id,
                        following_id: target_id,
                        created_at: Utc::now(),
                    };

                    // The composite primary key closes the race between a
                    // pre-check and the insert.
                    let edge = diesel::insert_into(follows::table)
                        .values(&new_edge)
                        .get_result::<Follow>(conn)
                        .await
                        .map_err(|e| match e {
                            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                                Error::AlreadyExists("follow")
                            }
                            other => Error::from(other),
                        })?;

                    diesel::update(users::table.find(follower_id))
                        .set(users::following_count.eq(users::following_count + 1))
                        .execute(conn)
                        .await?;

                    diesel::update(users::table.find(target_id))
                        .set(users::followers_count.eq(users::followers_count + 1))
                        .execute(conn)
                        .await?;

                    NotificationStore::notify_follow(conn, target_id, follower_id).await?;

                    Ok(edge)
                }
                .scope_boxed()
            })
            .await?;

        FOLLOWS_CREATED.inc();
        debug!("{} now follows {}", follower_id, target_id);

        Ok(edge)
    }

    /// Remove a follow edge and decrement both counters atomically.
    pub async fn unfollow(&self, follower_id: Uuid, target_id: Uuid) -> Result<(), Error> {
        let mut conn = self.db.conn().await?;

        conn.build_transaction()
            .run(|conn| {
                async move {
                    let deleted = diesel::delete(follows::table.find((follower_id, target_id)))
                        .execute(conn)
                        .await?;

                    if deleted == 0 {
                        return Err(Error::NotFound("follow"));
                    }

                    decrement_follow_counters(conn, follower_id, target_id).await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        debug!("{} no longer follows {}", follower_id, target_id);

        Ok(())
    }

    /// O(1) existence check used to resolve personalized follow flags.
    pub async fn is_following(&self, viewer_id: Uuid, target_id: Uuid) -> Result<bool, Error> {
        let mut conn = self.db.conn().await?;

        let following: bool = select(exists(follows::table.find((viewer_id, target_id))))
            .get_result(&mut conn)
            .await?;

        Ok(following)
    }

    /// Ids of everyone the user follows; the feed composer unions this
    /// with the viewer's own id.
    pub async fn following_ids(&self, user_id: Uuid) -> Result<Vec<Uuid>, Error> {
        let mut conn = self.db.conn().await?;

        let ids = follows::table
            .filter(follows::follower_id.eq(user_id))
            .select(follows::following_id)
            .load::<Uuid>(&mut conn)
            .await?;

        Ok(ids)
    }

    pub async fn list_followers(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FollowDetail>, Error> {
        let mut conn = self.db.conn().await?;
        ensure_user_exists(&mut conn, user_id).await?;

        let rows = follows::table
            .filter(follows::following_id.eq(user_id))
            .inner_join(users::table.on(users::id.eq(follows::follower_id)))
            .order_by(follows::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((
                users::id,
                users::username,
                users::first_name,
                users::last_name,
                users::avatar_url,
                users::bio,
                follows::created_at,
            ))
            .load::<FollowRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(into_follow_detail).collect())
    }

    pub async fn list_following(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<FollowDetail>, Error> {
        let mut conn = self.db.conn().await?;
        ensure_user_exists(&mut conn, user_id).await?;

        let rows = follows::table
            .filter(follows::follower_id.eq(user_id))
            .inner_join(users::table.on(users::id.eq(follows::following_id)))
            .order_by(follows::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((
                users::id,
                users::username,
                users::first_name,
                users::last_name,
                users::avatar_url,
                users::bio,
                follows::created_at,
            ))
            .load::<FollowRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(into_follow_detail).collect())
    }

    /// Active accounts the viewer does not follow yet, for the
    /// who-to-follow panel.
    pub async fn suggestions(
        &self,
        viewer_id: Uuid,
        limit: i64,
    ) -> Result<Vec<UserSummary>, Error> {
        let mut conn = self.db.conn().await?;

        let already_following = follows::table
            .filter(follows::follower_id.eq(viewer_id))
            .select(follows::following_id);

        let rows = users::table
            .filter(users::id.ne(viewer_id))
            .filter(users::is_active.eq(true))
            .filter(users::id.ne_all(already_following))
            .order_by(users::created_at.desc())
            .limit(limit)
            .select((
                users::id,
                users::username,
                users::first_name,
                users::last_name,
                users::avatar_url,
            ))
            .load::<UserSummaryRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }
}

type FollowRow = (
    Uuid,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    DateTime<Utc>,
);

fn into_follow_detail(
    (id, username, first_name, last_name, avatar_url, bio, followed_at): FollowRow,
) -> FollowDetail {
    FollowDetail {
        id,
        username,
        name: format!("{first_name} {last_name}"),
        avatar_url,
        bio,
        followed_at,
    }
}

pub(crate) async fn ensure_user_exists(
    conn: &mut AsyncPgConnection,
    user_id: Uuid,
) -> Result<(), Error> {
    let found: bool = select(exists(users::table.find(user_id)))
        .get_result(conn)
        .await?;

    if found {
        Ok(())
    } else {
        Err(Error::NotFound("user"))
    }
}

/// Counter decrements are floored at zero in SQL so a torn history can
/// never drive them negative.
async fn decrement_follow_counters(
    conn: &mut AsyncPgConnection,
    follower_id: Uuid,
    target_id: Uuid,
) -> Result<(), Error> {
    diesel::update(users::table.find(follower_id))
        .set(users::following_count.eq(diesel::dsl::sql::<diesel::sql_types::Integer>(
            "GREATEST(following_count - 1, 0)",
        )))
        .execute(conn)
        .await?;

    diesel::update(users::table.find(target_id))
        .set(users::followers_count.eq(diesel::dsl::sql::<diesel::sql_types::Integer>(
            "GREATEST(followers_count - 1, 0)",
        )))
        .execute(conn)
        .await?;

    Ok(())
}
