// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use crate::api::{AppState, PageQuery};
use crate::auth::AuthUser;
use crate::error::Error;
use crate::models::engagement::{CommentView, CreateCommentRequest};

/// Like a post. Liking twice yields 409 from the edge's uniqueness.
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<impl IntoResponse, Error> {
    let like = state.engagement.like(auth.user_id, post_id).await?;

    Ok((StatusCode::CREATED, Json(like)))
}

pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    state.engagement.unlike(auth.user_id, post_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<CommentView>>, Error> {
    let comments = state
        .engagement
        .list_comments(post_id, query.limit(), query.offset())
        .await?;

    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, Error> {
    let comment = state
        .engagement
        .add_comment(auth.user_id, post_id, request.content)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Delete a comment; only its author may.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((_post_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Error> {
    state
        .engagement
        .delete_comment(auth.user_id, comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
