pub mod models;
pub mod views;
pub mod controllers;
pub mod cli;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use error::{FriendifyError, Result};
pub use models::{Config, FeedCache, FeedPage, MockClient, MockStore, Post, SocialApi};
pub use controllers::{start_app, FeedQuery};
