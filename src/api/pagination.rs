// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Pagination query parameters. Listings accept either a 1-based `page`
/// or a raw `offset`; `page` wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        let page = self.page.unwrap_or(1);

        if page > 1 {
            (page - 1) * self.limit()
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.limit(), DEFAULT_LIMIT);
        assert_eq!(query.page(), 1);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let query = PageQuery {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(query.limit(), MAX_LIMIT);

        let query = PageQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn test_page_converts_to_offset() {
        let query = PageQuery {
            page: Some(3),
            limit: Some(20),
            offset: None,
        };
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_page_wins_over_offset() {
        let query = PageQuery {
            page: Some(2),
            limit: Some(10),
            offset: Some(77),
        };
        assert_eq!(query.offset(), 10);
    }

    #[test]
    fn test_negative_values_are_normalized() {
        let query = PageQuery {
            page: Some(-4),
            limit: Some(-1),
            offset: Some(-9),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 1);
        assert_eq!(query.offset(), 0);
    }
}
