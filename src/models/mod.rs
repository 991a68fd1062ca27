// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

pub mod engagement;
pub mod notification;
pub mod post;
pub mod social_graph;
pub mod user;
