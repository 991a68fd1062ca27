// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::api::{AppState, PageQuery};
use crate::auth::AuthUser;
use crate::error::Error;
use crate::models::social_graph::FollowDetail;
use crate::models::user::UserSummary;

/// Follow a user. Self-follows are rejected before any store mutation;
/// an existing edge yields 409.
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    state.graph.follow(auth.user_id, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Successfully followed user."
        })),
    ))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, Error> {
    state.graph.unfollow(auth.user_id, user_id).await?;

    Ok(Json(json!({
        "message": "Successfully unfollowed user."
    })))
}

pub async fn get_followers(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<FollowDetail>>, Error> {
    let followers = state
        .graph
        .list_followers(user_id, query.limit(), query.offset())
        .await?;

    Ok(Json(followers))
}

pub async fn get_following(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<FollowDetail>>, Error> {
    let following = state
        .graph
        .list_following(user_id, query.limit(), query.offset())
        .await?;

    Ok(Json(following))
}

/// Accounts the viewer might want to follow.
pub async fn get_suggestions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<UserSummary>>, Error> {
    let suggestions = state.graph.suggestions(auth.user_id, 5).await?;

    Ok(Json(suggestions))
}
