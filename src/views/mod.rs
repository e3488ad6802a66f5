pub mod tui;
pub mod widgets;

pub use tui::FeedView;
pub use widgets::{LoadMoreTrigger, StatefulList};
