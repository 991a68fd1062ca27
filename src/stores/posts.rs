// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

//! Post lifecycle: creation, edits, soft deletion and listings. Posts
//! are never hard-deleted; `is_active` gates every listing read so
//! likes, comments and notifications keep valid references.

use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::RunQueryDsl;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::Database;
use crate::error::Error;
use crate::metrics::POSTS_CREATED;
use crate::models::post::{
    AdminPostRow, CreatePostRequest, NewPost, Post, PostChanges, PostView, UpdatePostRequest,
};
use crate::models::user::{UserSummary, UserSummaryRow};
use crate::schema::{likes, posts, users};
use crate::stores::validate_content;

#[derive(Clone)]
pub struct PostStore {
    db: Arc<Database>,
}

impl PostStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a post and bump the author's posts_count in one
    /// transaction.
    pub async fn create(
        &self,
        author_id: Uuid,
        request: CreatePostRequest,
    ) -> Result<PostView, Error> {
        validate_content("post content", &request.content)?;

        let mut conn = self.db.conn().await?;

        let new_post = NewPost {
            id: Uuid::new_v4(),
            author_id,
            content: request.content,
            image_url: request.image_url,
            category: request.category.as_str().to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let (post, author) = conn
            .build_transaction()
            .run(|conn| {
                async move {
                    let author = diesel::update(users::table.find(author_id))
                        .set(users::posts_count.eq(users::posts_count + 1))
                        .returning((
                            users::id,
                            users::username,
                            users::first_name,
                            users::last_name,
                            users::avatar_url,
                        ))
                        .get_result::<UserSummaryRow>(conn)
                        .await
                        .optional()?
                        .ok_or(Error::NotFound("user"))?;

                    let post = diesel::insert_into(posts::table)
                        .values(&new_post)
                        .get_result::<Post>(conn)
                        .await?;

                    Ok::<_, Error>((post, author))
                }
                .scope_boxed()
            })
            .await?;

        POSTS_CREATED.inc();
        debug!("user {} created post {}", author_id, post.id);

        Ok(PostView::assemble(post, UserSummary::from(author), false))
    }

    /// Fetch an active post with the viewer's like state resolved.
    pub async fn get(&self, post_id: Uuid, viewer_id: Option<Uuid>) -> Result<PostView, Error> {
        let mut conn = self.db.conn().await?;

        let viewer_key = viewer_id.unwrap_or_else(Uuid::nil);

        let row = posts::table
            .inner_join(users::table)
            .left_join(
                likes::table.on(likes::post_id
                    .eq(posts::id)
                    .and(likes::user_id.eq(viewer_key))),
            )
            .filter(posts::id.eq(post_id))
            .filter(posts::is_active.eq(true))
            .select((
                Post::as_select(),
                (
                    users::id,
                    users::username,
                    users::first_name,
                    users::last_name,
                    users::avatar_url,
                ),
                likes::user_id.nullable(),
            ))
            .first::<(Post, UserSummaryRow, Option<Uuid>)>(&mut conn)
            .await
            .optional()?
            .ok_or(Error::NotFound("post"))?;

        let (post, author, viewer_like) = row;
        Ok(PostView::assemble(
            post,
            UserSummary::from(author),
            viewer_like.is_some(),
        ))
    }

    /// Partial update by the post's author.
    pub async fn update(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        request: UpdatePostRequest,
    ) -> Result<PostView, Error> {
        if let Some(content) = &request.content {
            validate_content("post content", content)?;
        }

        let mut conn = self.db.conn().await?;

        let changes = PostChanges {
            content: request.content,
            category: request.category.map(|c| c.as_str().to_string()),
            image_url: request.image_url,
            updated_at: Utc::now(),
        };

        conn.build_transaction()
            .run(|conn| {
                async move {
                    let post = posts::table
                        .find(post_id)
                        .filter(posts::is_active.eq(true))
                        .first::<Post>(conn)
                        .await
                        .optional()?
                        .ok_or(Error::NotFound("post"))?;

                    if post.author_id != actor_id {
                        return Err(Error::Forbidden(
                            "only the author can edit this post".to_string(),
                        ));
                    }

                    diesel::update(posts::table.find(post_id))
                        .set(&changes)
                        .execute(conn)
                        .await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        self.get(post_id, Some(actor_id)).await
    }

    /// Soft-delete a post; allowed for the author and for admins. The
    /// author's posts_count is decremented in the same transaction.
    pub async fn soft_delete(&self, post_id: Uuid, actor: &AuthUser) -> Result<(), Error> {
        let actor_id = actor.user_id;
        let is_admin = actor.role.is_admin();

        let mut conn = self.db.conn().await?;

        conn.build_transaction()
            .run(|conn| {
                async move {
                    let post = posts::table
                        .find(post_id)
                        .filter(posts::is_active.eq(true))
                        .first::<Post>(conn)
                        .await
                        .optional()?
                        .ok_or(Error::NotFound("post"))?;

                    if post.author_id != actor_id && !is_admin {
                        return Err(Error::Forbidden(
                            "only the author or an admin can delete this post".to_string(),
                        ));
                    }

                    diesel::update(posts::table.find(post_id))
                        .set((posts::is_active.eq(false), posts::updated_at.eq(Utc::now())))
                        .execute(conn)
                        .await?;

                    diesel::update(users::table.find(post.author_id))
                        .set(users::posts_count.eq(diesel::dsl::sql::<diesel::sql_types::Integer>(
                            "GREATEST(posts_count - 1, 0)",
                        )))
                        .execute(conn)
                        .await?;

                    Ok(())
                }
                .scope_boxed()
            })
            .await?;

        debug!("post {} deactivated by {}", post_id, actor_id);

        Ok(())
    }

    /// Public explore listing: every active post, newest first.
    pub async fn list_public(
        &self,
        viewer_id: Option<Uuid>,
        page: i64,
        limit: i64,
    ) -> Result<Vec<PostView>, Error> {
        let mut conn = self.db.conn().await?;

        let offset = (page.max(1) - 1) * limit;
        let viewer_key = viewer_id.unwrap_or_else(Uuid::nil);

        let rows = posts::table
            .inner_join(users::table)
            .left_join(
                likes::table.on(likes::post_id
                    .eq(posts::id)
                    .and(likes::user_id.eq(viewer_key))),
            )
            .filter(posts::is_active.eq(true))
            .order_by(posts::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((
                Post::as_select(),
                (
                    users::id,
                    users::username,
                    users::first_name,
                    users::last_name,
                    users::avatar_url,
                ),
                likes::user_id.nullable(),
            ))
            .load::<(Post, UserSummaryRow, Option<Uuid>)>(&mut conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(post, author, viewer_like)| {
                PostView::assemble(post, UserSummary::from(author), viewer_like.is_some())
            })
            .collect())
    }

    /// Moderation listing: all posts including deactivated ones.
    pub async fn admin_list(&self, limit: i64, offset: i64) -> Result<Vec<AdminPostRow>, Error> {
        let mut conn = self.db.conn().await?;

        let rows = posts::table
            .inner_join(users::table)
            .order_by(posts::created_at.desc())
            .limit(limit)
            .offset(offset)
            .select((
                Post::as_select(),
                users::username,
                users::first_name,
                users::last_name,
            ))
            .load::<(Post, String, String, String)>(&mut conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(post, username, first_name, last_name)| AdminPostRow {
                id: post.id,
                author_name: format!("{first_name} {last_name}"),
                author_username: username,
                content: post.content,
                category: post.category,
                is_active: post.is_active,
                created_at: post.created_at,
            })
            .collect())
    }
}
