pub mod cache;
pub mod client;
pub mod community;
pub mod config;
pub mod gateway;
pub mod post;
pub mod search;
pub mod store;
pub mod user;

// Re-export important structs for convenience
pub use cache::{FeedCache, FeedStatus};
pub use client::{MockClient, SocialApi};
pub use community::{Conversation, FanPage, Group, Message};
pub use config::{Config, ThemeMode};
pub use post::{Comment, FeedPage, Post};
pub use search::SearchResults;
pub use store::MockStore;
pub use user::User;
