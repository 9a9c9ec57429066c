//! IngreChef library
//!
//! Recipe discovery by ingredients: a daily request quota, saved
//! bookmarks and a user profile over one key-value store, plus a thin
//! client for the external recipe API.

pub mod api;
pub mod app;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
