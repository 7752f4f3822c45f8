//! Data models
//!
//! Entities owned and persisted by the external store, the write-side
//! inputs sent to it, and the identity returned by the auth collaborator.

mod blog;
mod event;
mod team;
mod user;

pub use blog::{
    AuthorInput, BlogAuthor, BlogPost, BlogPostView, BlogTag, PostInput, PostTagLink, TagInput,
};
pub use event::{
    Event, EventInput, EventRegistration, EventType, NewRegistration, RegistrationStatus,
};
pub use team::{TeamCategory, TeamMember, TeamMemberInput};
pub use user::AuthUser;
