use serde::{Deserialize, Serialize};

use crate::models::community::{FanPage, Group};
use crate::models::post::Post;
use crate::models::store::MockStore;
use crate::models::user::User;

pub const MAX_POST_RESULTS: usize = 5;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SearchResults {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub groups: Vec<Group>,
    pub pages: Vec<FanPage>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.posts.is_empty() && self.groups.is_empty() && self.pages.is_empty()
    }
}

/// Case-insensitive substring search across the store.
///
/// A blank query is never run and yields `None`.
pub fn search(store: &MockStore, query: &str) -> Option<SearchResults> {
    if query.trim().is_empty() {
        return None;
    }
    let needle = query.to_lowercase();

    Some(SearchResults {
        users: store
            .users()
            .iter()
            .filter(|u| u.matches(&needle))
            .cloned()
            .collect(),
        posts: store
            .posts()
            .iter()
            .filter(|p| p.content.to_lowercase().contains(&needle))
            .take(MAX_POST_RESULTS)
            .cloned()
            .collect(),
        groups: store
            .groups()
            .iter()
            .filter(|g| g.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
        pages: store
            .fan_pages()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    })
}
