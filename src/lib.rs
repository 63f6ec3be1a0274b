//! Static ActivityPub documents for a blog: an actor, its webfinger record,
//! an empty inbox, and an outbox paginated over every published post.

pub mod config;
pub mod console;
pub mod content;
pub mod emit;
pub mod errors;
pub mod generator;
pub mod handlers;
pub mod identity;
pub mod paginate;
pub mod project;
pub mod skeleton;
pub mod types;
pub mod utils;

pub use config::SiteConfig;
pub use generator::{generate, Generation};
pub use types::{ContentItem, EmittedDocument};
