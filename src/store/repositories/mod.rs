//! Typed repositories
//!
//! One repository per aggregate. Each knows its table and column names and
//! the ordering the pages expect; handlers and services never build raw
//! queries themselves.

pub mod blog;
pub mod event;
pub mod team;

pub use blog::{BlogRepository, StoreBlogRepository};
pub use event::{EventRepository, StoreEventRepository};
pub use team::{StoreTeamRepository, TeamRepository};
