//! Galin Education site
//!
//! Server-rendered marketing pages, blog, events calendar and team pages,
//! plus the admin editors that write to the hosted data store.

pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod models;
pub mod services;
pub mod store;
pub mod theme;
pub mod ui;
