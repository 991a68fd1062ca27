// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

pub mod engagement;
pub mod feed;
pub mod notifications;
pub mod posts;
pub mod social_graph;
pub mod users;

pub use engagement::EngagementStore;
pub use feed::FeedComposer;
pub use notifications::NotificationStore;
pub use posts::PostStore;
pub use social_graph::SocialGraphStore;
pub use users::UserStore;

use crate::error::Error;

pub const MAX_CONTENT_LEN: usize = 280;

/// Posts and comments share the same bounded-length content rule.
pub(crate) fn validate_content(label: &str, content: &str) -> Result<(), Error> {
    if content.is_empty() {
        return Err(Error::Validation(format!("{label} cannot be empty")));
    }

    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(Error::Validation(format!(
            "{label} cannot exceed {MAX_CONTENT_LEN} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_rejected() {
        assert!(validate_content("post content", "").is_err());
    }

    #[test]
    fn test_overlong_content_rejected() {
        let long = "x".repeat(MAX_CONTENT_LEN + 1);
        assert!(validate_content("comment", &long).is_err());
    }

    #[test]
    fn test_boundary_lengths_accepted() {
        assert!(validate_content("post content", "a").is_ok());
        let max = "y".repeat(MAX_CONTENT_LEN);
        assert!(validate_content("post content", &max).is_ok());
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 280 multibyte chars are within bounds even though the byte
        // length is far larger.
        let max = "é".repeat(MAX_CONTENT_LEN);
        assert!(validate_content("post content", &max).is_ok());
    }
}
