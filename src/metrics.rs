// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

fn counter(name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::new(name, help).expect("metric definition");
    REGISTRY
        .register(Box::new(counter.clone()))
        .expect("metric registration");
    counter
}

pub static POSTS_CREATED: Lazy<IntCounter> =
    Lazy::new(|| counter("ripple_posts_created_total", "Posts created"));

pub static LIKES_RECORDED: Lazy<IntCounter> =
    Lazy::new(|| counter("ripple_likes_total", "Likes recorded"));

pub static COMMENTS_CREATED: Lazy<IntCounter> =
    Lazy::new(|| counter("ripple_comments_total", "Comments created"));

pub static FOLLOWS_CREATED: Lazy<IntCounter> =
    Lazy::new(|| counter("ripple_follows_total", "Follow edges created"));

pub static NOTIFICATIONS_CREATED: Lazy<IntCounter> =
    Lazy::new(|| counter("ripple_notifications_total", "Notifications fanned out"));

/// Render the registry in the Prometheus text exposition format.
pub fn render() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    if encoder.encode(&REGISTRY.gather(), &mut buffer).is_err() {
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_render() {
        LIKES_RECORDED.inc();

        let output = render();
        assert!(output.contains("ripple_likes_total"));
    }
}
