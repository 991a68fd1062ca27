// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

//! Like and comment mutations. Every mutation updates the edge, the
//! post's denormalized counter and the notification fan-out as a single
//! transaction, so edges and counters never diverge.

use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Error;
use crate::metrics::{COMMENTS_CREATED, LIKES_RECORDED};
use crate::models::engagement::{Comment, CommentView, Like, NewComment, NewLike};
use crate::models::user::UserSummary;
use crate::schema::{comments, likes, posts, users};
use crate::stores::notifications::NotificationStore;
use crate::stores::validate_content;

#[derive(Clone)]
pub struct EngagementStore {
    db: Arc<Database>,
}

impl EngagementStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Record a like: counter increment, edge insert and fan-out in one
    /// transaction. A duplicate like rolls the increment back.
    pub async fn like(&self, user_id: Uuid, post_id: Uuid) -> Result<Like, Error> {
        let mut conn = self.db.conn().await?;

        let like = conn
            .build_transaction()
            .run(|conn| {
                async move {
                    let author_id = diesel::update(
                        posts::table
                            .filter(posts::id.eq(post_id))
                            .filter(posts::is_active.eq(true)),
                    )
                    .set(posts::like_count.eq(posts::like_count + 1))
                    .returning(posts::author_id)
                    .get_result::<Uuid>(conn)
                    .await
                    .optional()?
                    .ok_or(Error::NotFound("post"))?;

                    let new_like = NewLike {
                        user_id,
                        post_id,
                        created_at: Utc::now(),
                    };

                    let like = diesel::insert_into(likes::table)
                        .values(&new_like)
                        .get_result::<Like>(conn)
                        .await
                        .map_err(|e| match e {
                            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                                Error::AlreadyExists("like")
                            }
                            other => Error::from(other),
                        })?;

                    NotificationStore::notify_like(conn, author_id, user_id, post_id).await?;

                    Ok::<_, Error>(like)
                }
                .scope_boxed()
            })
            .await?;

        LIKES_RECORDED.inc();
        debug!("user {} liked post {}", user_id, post_id);

        Ok(like)
    }

    /// Remove a like and decrement the counter, floored at zero.
    pub async fn unlike(&self, user_id: Uuid, post_id: Uuid) -> Result<(), Error> {
        let mut conn = self.db.conn().await?;

        conn.build_transaction()
            .run(|conn| {
                async move {
                    let deleted = diesel::delete(likes::table.find((user_id, post_id)))
                        .execute(conn)
                        .await?;

                    if deleted == 0 {
                        return Err(Error::NotFound("like"));
                    }

                    diesel::update(posts::table.filter(posts::id.eq(post_id)))
                        .set(posts::like_count.eq(diesel::dsl::sql::<diesel::sql_types::Integer>(
                            "GREATEST(like_count - 1, 0)",
                        )))
                        .execute(conn)
                        .await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        debug!("user {} unliked post {}", user_id, post_id);

        Ok(())
    }

    /// Create a comment, bump the post's counter and notify the author,
    /// all in one transaction.
    pub async fn add_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: String,
    ) -> Result<Comment, Error> {
        validate_content("comment", &content)?;

        let mut conn = self.db.conn().await?;

        let comment = conn
            .build_transaction()
            .run(|conn| {
                async move {
                    let author_id = diesel::update(
                        posts::table
                            .filter(posts::id.eq(post_id))
                            .filter(posts::is_active.eq(true)),
                    )
                    .set(posts::comment_count.eq(posts::comment_count + 1))
                    .returning(posts::author_id)
                    .get_result::<Uuid>(conn)
                    .await
                    .optional()?
                    .ok_or(Error::NotFound("post"))?;

                    let new_comment = NewComment {
                        id: Uuid::new_v4(),
                        post_id,
                        author_id: user_id,
                        content,
                        created_at: Utc::now(),
                    };

                    let comment = diesel::insert_into(comments::table)
                        .values(&new_comment)
                        .get_result::<Comment>(conn)
                        .await?;

                    NotificationStore::notify_comment(conn, author_id, user_id, post_id).await?;

                    Ok::<_, Error>(comment)
                }
                .scope_boxed()
            })
            .await?;

        COMMENTS_CREATED.inc();
        debug!("user {} commented on post {}", user_id, post_id);

        Ok(comment)
    }

    /// Delete a comment; only its author may do so.
    pub async fn delete_comment(&self, user_id: Uuid, comment_id: Uuid) -> Result<(), Error> {
        let mut conn = self.db.conn().await?;

        conn.build_transaction()
            .run(|conn| {
                async move {
                    let comment = comments::table
                        .find(comment_id)
                        .first::<Comment>(conn)
                        .await
                        .optional()?
                        .ok_or(Error::NotFound("comment"))?;

                    if comment.author_id != user_id {
                        return Err(Error::Forbidden(
                            "only the comment author can delete it".to_string(),
                        ));
                    }

                    diesel::delete(comments::table.find(comment_id))
                        .execute(conn)
                        .await?;

                    diesel::update(posts::table.filter(posts::id.eq(comment.post_id)))
                        .set(posts::comment_count.eq(
                            diesel::dsl::sql::<diesel::sql_types::Integer>(
                                "GREATEST(comment_count - 1, 0)",
                            ),
                        ))
                        .execute(conn)
                        .await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        debug!("user {} deleted comment {}", user_id, comment_id);

        Ok(())
    }

    /// Newest-first comments for a post, with author summaries.
    pub async fn list_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentView>, Error> {
        let mut conn = self.db.conn().await?;

        let post_exists: bool = diesel::select(diesel::dsl::exists(
            posts::table
                .filter(posts::id.eq(post_id))
                .filter(posts::is_active.eq(true)),
        ))
        .get_result(&mut conn)
        .await?;

        if !post_exists {
            return Err(Error::NotFound("post"));
        }

        let rows = comments::table
            .filter(comments::post_id.eq(post_id))
            .inner_join(users::table)
            .order_by(comments::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((
                Comment::as_select(),
                (
                    users::id,
                    users::username,
                    users::first_name,
                    users::last_name,
                    users::avatar_url,
                ),
            ))
            .load::<(Comment, crate::models::user::UserSummaryRow)>(&mut conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(comment, author)| CommentView {
                id: comment.id,
                post_id: comment.post_id,
                content: comment.content,
                created_at: comment.created_at,
                author: UserSummary::from(author),
            })
            .collect())
    }
}
