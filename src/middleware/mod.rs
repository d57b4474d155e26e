// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response header middleware.

pub mod cache;
pub mod security;

pub use cache::no_store;
pub use security::add_security_headers;
