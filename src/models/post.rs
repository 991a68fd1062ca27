// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::user::UserSummary;
use crate::schema::posts;

/// Post category, stored as text in the `category` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Announcement,
    Question,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Announcement => "announcement",
            Category::Question => "question",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::General
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Category::General),
            "announcement" => Ok(Category::Announcement),
            "question" => Ok(Category::Question),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

#[derive(Debug, Queryable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub is_active: bool,
    pub like_count: i32,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewPost {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied by the post author; `None` fields are untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = posts)]
pub struct PostChanges {
    pub content: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/posts`.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(default)]
    pub category: Category,
    pub image_url: Option<String>,
}

/// Body of `PATCH /api/posts/:post_id`.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub category: Option<Category>,
    pub image_url: Option<String>,
}

/// Post enriched for feed and detail reads: author summary plus the
/// viewer's like state.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub like_count: i32,
    pub comment_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: UserSummary,
    pub is_liked: bool,
}

impl PostView {
    pub fn assemble(post: Post, author: UserSummary, is_liked: bool) -> Self {
        PostView {
            id: post.id,
            content: post.content,
            image_url: post.image_url,
            category: post.category,
            like_count: post.like_count,
            comment_count: post.comment_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author,
            is_liked,
        }
    }
}

/// Moderation listing entry; includes soft-deleted posts.
#[derive(Debug, Serialize)]
pub struct AdminPostRow {
    pub id: Uuid,
    pub author_name: String,
    pub author_username: String,
    pub content: String,
    pub category: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [Category::General, Category::Announcement, Category::Question] {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!("meme".parse::<Category>().is_err());
    }

    #[test]
    fn test_create_request_defaults_category() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert_eq!(req.category, Category::General);
        assert!(req.image_url.is_none());
    }
}
