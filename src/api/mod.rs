// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

mod handlers;
mod pagination;

pub use pagination::PageQuery;

use anyhow::Result;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::auth::AuthKeys;
use crate::config::Config;
use crate::db::Database;
use crate::stores::{
    EngagementStore, FeedComposer, NotificationStore, PostStore, SocialGraphStore, UserStore,
};

/// Shared handler state: the pool plus one handle per store, built once
/// by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: AuthKeys,
    pub graph: SocialGraphStore,
    pub engagement: EngagementStore,
    pub notifications: NotificationStore,
    pub feed: FeedComposer,
    pub posts: PostStore,
    pub users: UserStore,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth: AuthKeys) -> Self {
        let graph = SocialGraphStore::new(db.clone());

        Self {
            feed: FeedComposer::new(db.clone(), graph.clone()),
            engagement: EngagementStore::new(db.clone()),
            notifications: NotificationStore::new(db.clone()),
            posts: PostStore::new(db.clone()),
            users: UserStore::new(db.clone()),
            graph,
            auth,
            db,
        }
    }
}

/// Build the full route table.
pub fn router(state: AppState) -> Router {
    Router::new()
        // General routes
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::health::get_metrics))
        // Feed
        .route("/api/feed", get(handlers::feed::get_feed))
        // Posts
        .route(
            "/api/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/api/posts/:post_id",
            get(handlers::posts::get_post)
                .patch(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        // Engagement
        .route(
            "/api/posts/:post_id/like",
            post(handlers::engagement::like_post).delete(handlers::engagement::unlike_post),
        )
        .route(
            "/api/posts/:post_id/comments",
            get(handlers::engagement::list_comments).post(handlers::engagement::create_comment),
        )
        .route(
            "/api/posts/:post_id/comments/:comment_id",
            delete(handlers::engagement::delete_comment),
        )
        // Users and the social graph
        .route("/api/users/me", get(handlers::users::get_me))
        .route(
            "/api/users/suggestions",
            get(handlers::social_graph::get_suggestions),
        )
        .route("/api/users/:user_id", get(handlers::users::get_user))
        .route(
            "/api/users/:user_id/posts",
            get(handlers::users::get_user_posts),
        )
        .route(
            "/api/users/:user_id/follow",
            post(handlers::social_graph::follow_user)
                .delete(handlers::social_graph::unfollow_user),
        )
        .route(
            "/api/users/:user_id/followers",
            get(handlers::social_graph::get_followers),
        )
        .route(
            "/api/users/:user_id/following",
            get(handlers::social_graph::get_following),
        )
        // Notifications
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications)
                .patch(handlers::notifications::mark_all_read),
        )
        .route(
            "/api/notifications/:notification_id/read",
            post(handlers::notifications::mark_read),
        )
        // Admin
        .route("/api/admin/users", get(handlers::admin::list_users))
        .route(
            "/api/admin/users/:user_id",
            patch(handlers::admin::update_user_status),
        )
        .route("/api/admin/posts", get(handlers::admin::list_posts))
        .route(
            "/api/admin/posts/:post_id",
            delete(handlers::admin::delete_post),
        )
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .with_state(state)
}

/// Start the API server and run it until a shutdown signal arrives.
pub async fn start_api_server(config: &Config, db: Arc<Database>) -> Result<()> {
    let state = AppState::new(db, AuthKeys::new(&config.auth));

    let cors = if config.server.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = format!("{}:{}", config.server.host, config.server.port).parse::<SocketAddr>()?;

    info!("Starting API server on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping API server"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
