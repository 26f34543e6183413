//! Infrastructure layer - Hashing, tokens, storage and logging

pub mod auth;
pub mod logging;
pub mod user;
