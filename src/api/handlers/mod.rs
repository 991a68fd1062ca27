// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

pub mod admin;
pub mod engagement;
pub mod feed;
pub mod health;
pub mod notifications;
pub mod posts;
pub mod social_graph;
pub mod users;
