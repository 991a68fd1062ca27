// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

//! Feed composition: the time-ordered union of posts authored by the
//! viewer and everyone the viewer follows, enriched with the viewer's
//! own like state. Soft-deleted posts never appear in a feed.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::db::Database;
use crate::error::Error;
use crate::models::post::{Post, PostView};
use crate::models::user::{UserSummary, UserSummaryRow};
use crate::schema::{likes, posts, users};
use crate::stores::social_graph::{ensure_user_exists, SocialGraphStore};

#[derive(Clone)]
pub struct FeedComposer {
    db: Arc<Database>,
    graph: SocialGraphStore,
}

impl FeedComposer {
    pub fn new(db: Arc<Database>, graph: SocialGraphStore) -> Self {
        Self { db, graph }
    }

    /// Personalized home feed. An empty page signals the end of the feed.
    pub async fn compose_feed(
        &self,
        viewer_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<Vec<PostView>, Error> {
        let mut author_ids = self.graph.following_ids(viewer_id).await?;
        author_ids.push(viewer_id);

        debug!(
            "composing feed for {} over {} authors",
            viewer_id,
            author_ids.len()
        );

        let mut conn = self.db.conn().await?;
        load_post_page(&mut conn, author_ids, Some(viewer_id), page, limit).await
    }

    /// Single-profile timeline; the viewer may be anonymous.
    pub async fn compose_profile_feed(
        &self,
        profile_user_id: Uuid,
        viewer_id: Option<Uuid>,
        page: i64,
        limit: i64,
    ) -> Result<Vec<PostView>, Error> {
        let mut conn = self.db.conn().await?;
        ensure_user_exists(&mut conn, profile_user_id).await?;

        load_post_page(&mut conn, vec![profile_user_id], viewer_id, page, limit).await
    }
}

/// One page of active posts by the given authors, newest first, each
/// joined against the viewer's like edge.
pub(crate) async fn load_post_page(
    conn: &mut AsyncPgConnection,
    author_ids: Vec<Uuid>,
    viewer_id: Option<Uuid>,
    page: i64,
    limit: i64,
) -> Result<Vec<PostView>, Error> {
    let offset = (page.max(1) - 1) * limit;

    // The nil uuid never identifies a real user, so anonymous viewers
    // join no like rows.
    let viewer_key = viewer_id.unwrap_or_else(Uuid::nil);

    let rows = posts::table
        .inner_join(users::table)
        .left_join(
            likes::table.on(likes::post_id
                .eq(posts::id)
                .and(likes::user_id.eq(viewer_key))),
        )
        .filter(posts::author_id.eq_any(author_ids))
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
        .load::<(Post, UserSummaryRow, Option<Uuid>)>(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(post, author, viewer_like)| {
            PostView::assemble(post, UserSummary::from(author), viewer_like.is_some())
        })
        .collect())
}
