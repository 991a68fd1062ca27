// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::{AppState, PageQuery};
use crate::auth::AuthUser;
use crate::error::Error;
use crate::models::notification::{Notification, NotificationPage};

/// The viewer's notifications plus the unread total.
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<NotificationPage>, Error> {
    let page = state
        .notifications
        .list(auth.user_id, query.limit(), query.offset())
        .await?;

    Ok(Json(page))
}

pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<Notification>, Error> {
    let notification = state
        .notifications
        .mark_read(notification_id, auth.user_id)
        .await?;

    Ok(Json(notification))
}

pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, Error> {
    state.notifications.mark_all_read(auth.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
