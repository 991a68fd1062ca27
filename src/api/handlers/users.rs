// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::api::{AppState, PageQuery};
use crate::auth::{AuthUser, MaybeAuthUser};
use crate::error::Error;
use crate::models::post::PostView;
use crate::models::user::{ProfileView, User};

pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<User>, Error> {
    let user = state.users.me(auth.user_id).await?;

    Ok(Json(user))
}

/// Public profile with the viewer's follow state resolved. A viewer
/// never "follows" their own profile.
pub async fn get_user(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileView>, Error> {
    let mut profile = state.users.profile(user_id).await?;

    if let Some(viewer) = viewer {
        if viewer.user_id != user_id {
            profile.is_following = state.graph.is_following(viewer.user_id, user_id).await?;
        }
    }

    Ok(Json(profile))
}

/// A single profile's timeline, newest first.
pub async fn get_user_posts(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PostView>>, Error> {
    let posts = state
        .feed
        .compose_profile_feed(
            user_id,
            viewer.map(|v| v.user_id),
            query.page(),
            query.limit(),
        )
        .await?;

    Ok(Json(posts))
}
