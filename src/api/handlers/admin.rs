// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::{AppState, PageQuery};
use crate::auth::AuthUser;
use crate::error::Error;
use crate::models::post::AdminPostRow;
use crate::models::user::{AdminStats, AdminUserRow, AdminUserStatus};

#[derive(Debug, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub is_active: bool,
}

pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<AdminUserRow>>, Error> {
    auth.require_admin()?;

    let users = state
        .users
        .admin_list(query.limit(), query.offset())
        .await?;

    Ok(Json(users))
}

/// Activate or deactivate an account.
pub async fn update_user_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateUserStatusRequest>,
) -> Result<Json<AdminUserStatus>, Error> {
    auth.require_admin()?;

    let status = state
        .users
        .admin_set_active(auth.user_id, user_id, request.is_active)
        .await?;

    Ok(Json(status))
}

pub async fn list_posts(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<AdminPostRow>>, Error> {
    auth.require_admin()?;

    let posts = state
        .posts
        .admin_list(query.limit(), query.offset())
        .await?;

    Ok(Json(posts))
}

/// Moderation takedown; posts are deactivated, never hard-deleted.
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    auth.require_admin()?;

    state.posts.soft_delete(post_id, &auth).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<AdminStats>, Error> {
    auth.require_admin()?;

    let stats = state.users.admin_stats().await?;

    Ok(Json(stats))
}
