pub mod app_controller;
pub mod feed_controller;
pub mod post_controller;

// Re-export key functions
pub use app_controller::start_app;
pub use feed_controller::FeedQuery;
pub use post_controller::{publish_comment, publish_post, toggle_like};
