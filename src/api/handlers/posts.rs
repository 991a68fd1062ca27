// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::api::{AppState, PageQuery};
use crate::auth::{AuthUser, MaybeAuthUser};
use crate::error::Error;
use crate::models::post::{CreatePostRequest, PostView, UpdatePostRequest};

/// Public explore listing; the like state is personalized when a viewer
/// is present.
pub async fn list_posts(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PostView>>, Error> {
    let posts = state
        .posts
        .list_public(viewer.map(|v| v.user_id), query.page(), query.limit())
        .await?;

    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, Error> {
    let post = state.posts.create(auth.user_id, request).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn get_post(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostView>, Error> {
    let post = state
        .posts
        .get(post_id, viewer.map(|v| v.user_id))
        .await?;

    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<PostView>, Error> {
    let post = state.posts.update(post_id, auth.user_id, request).await?;

    Ok(Json(post))
}

/// Soft delete by the author or an admin.
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    state.posts.soft_delete(post_id, &auth).await?;

    Ok(StatusCode::NO_CONTENT)
}
