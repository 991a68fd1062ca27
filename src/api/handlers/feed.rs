// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use axum::extract::{Query, State};
use axum::Json;
use tracing::debug;

use crate::api::{AppState, PageQuery};
use crate::auth::AuthUser;
use crate::error::Error;
use crate::models::post::PostView;

/// Personalized feed for the authenticated viewer.
pub async fn get_feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PostView>>, Error> {
    debug!(
        "feed request from {}: page {}, limit {}",
        auth.user_id,
        query.page(),
        query.limit()
    );

    let posts = state
        .feed
        .compose_feed(auth.user_id, query.page(), query.limit())
        .await?;

    Ok(Json(posts))
}
