// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

// Import diesel table macros
use diesel::{allow_tables_to_appear_in_same_query, joinable, table};

table! {
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        bio -> Nullable<Text>,
        avatar_url -> Nullable<Varchar>,
        website -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
        role -> Varchar,
        is_active -> Bool,
        posts_count -> Integer,
        followers_count -> Integer,
        following_count -> Integer,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        last_login -> Nullable<Timestamptz>,
    }
}

table! {
    posts (id) {
        id -> Uuid,
        author_id -> Uuid,
        content -> Varchar,
        image_url -> Nullable<Varchar>,
        category -> Varchar,
        is_active -> Bool,
        like_count -> Integer,
        comment_count -> Integer,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

table! {
    likes (user_id, post_id) {
        user_id -> Uuid,
        post_id -> Uuid,
        created_at -> Timestamptz,
    }
}

table! {
    comments (id) {
        id -> Uuid,
        post_id -> Uuid,
        author_id -> Uuid,
        content -> Varchar,
        created_at -> Timestamptz,
    }
}

table! {
    follows (follower_id, following_id) {
        follower_id -> Uuid,
        following_id -> Uuid,
        created_at -> Timestamptz,
    }
}

table! {
    notifications (id) {
        id -> Uuid,
        notification_type -> Varchar,
        recipient_id -> Uuid,
        sender_id -> Uuid,
        post_id -> Nullable<Uuid>,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

joinable!(posts -> users (author_id));
joinable!(likes -> posts (post_id));
joinable!(likes -> users (user_id));
joinable!(comments -> posts (post_id));
joinable!(comments -> users (author_id));

allow_tables_to_appear_in_same_query!(
    users,
    posts,
    likes,
    comments,
    follows,
    notifications,
);
