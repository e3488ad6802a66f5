use std::collections::HashSet;

use log::debug;

use crate::error::FriendifyError;
use crate::models::post::{FeedPage, Post};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedStatus {
    #[default]
    Idle,
    LoadingFirstPage,
    FetchingNext,
}

/// Client-side accumulation of feed pages.
///
/// `pages[i]` was fetched for `page_params[i]`. Pages are append-only; the only in-place
/// edits are inserting freshly created posts and replacing post snapshots.
#[derive(Debug, Clone, Default)]
pub struct FeedCache {
    pages: Vec<FeedPage>,
    page_params: Vec<u32>,
    status: FeedStatus,
    has_next_page: bool,
    last_error: Option<FriendifyError>,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[FeedPage] {
        &self.pages
    }

    pub fn page_params(&self) -> &[u32] {
        &self.page_params
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn is_fetching(&self) -> bool {
        self.status != FeedStatus::Idle
    }

    pub fn last_error(&self) -> Option<&FriendifyError> {
        self.last_error.as_ref()
    }

    /// Every cached post, page by page.
    pub fn items(&self) -> Vec<Post> {
        self.pages.iter().flat_map(|p| p.items.iter().cloned()).collect()
    }

    pub fn len(&self) -> usize {
        self.pages.iter().map(|p| p.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Claim the next fetch. Returns the page number to request, or `None` when a fetch
    /// is already in flight or the feed is exhausted.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if self.status != FeedStatus::Idle {
            return None;
        }
        if self.pages.is_empty() {
            self.status = FeedStatus::LoadingFirstPage;
            return Some(1);
        }
        if !self.has_next_page {
            return None;
        }
        self.status = FeedStatus::FetchingNext;
        Some(self.pages.len() as u32 + 1)
    }

    /// Settle the fetch claimed by [`begin_fetch`](Self::begin_fetch).
    pub fn complete_fetch(&mut self, page_param: u32, result: Result<FeedPage, FriendifyError>) {
        self.status = FeedStatus::Idle;
        match result {
            Ok(mut page) => {
                // Posts inserted in place shift the backing slice; drop what we already hold
                let seen: HashSet<String> = self
                    .pages
                    .iter()
                    .flat_map(|p| p.items.iter().map(|post| post.id.clone()))
                    .collect();
                page.items.retain(|post| !seen.contains(&post.id));

                self.has_next_page = page.has_more;
                self.pages.push(page);
                self.page_params.push(page_param);
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(e);
            }
        }
    }

    /// Put a freshly created post at the head of the feed. Returns whether the post is cached
    /// afterwards; before the first page lands there is nowhere to put it.
    pub fn prepend_post(&mut self, post: Post) -> bool {
        let Some(first) = self.pages.first_mut() else {
            debug!("Post {} created before the first page landed; it appears on refresh", post.id);
            return false;
        };
        if first.items.iter().any(|p| p.id == post.id) {
            return true;
        }
        first.items.insert(0, post);
        for page in &mut self.pages {
            page.total += 1;
        }
        true
    }

    /// Swap in a newer snapshot of a cached post. Returns whether it was cached.
    pub fn replace_post(&mut self, post: Post) -> bool {
        for page in &mut self.pages {
            if let Some(slot) = page.items.iter_mut().find(|p| p.id == post.id) {
                *slot = post;
                return true;
            }
        }
        false
    }

    /// Forget every page. Refused while a fetch is in flight.
    pub fn reset(&mut self) -> bool {
        if self.is_fetching() {
            return false;
        }
        *self = Self::default();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store::MockStore;

    fn load(cache: &mut FeedCache, store: &MockStore) -> bool {
        match cache.begin_fetch() {
            Some(page) => {
                cache.complete_fetch(page, store.fetch_page(page, 10));
                true
            }
            None => false,
        }
    }

    #[test]
    fn first_fetch_is_page_one() {
        let mut cache = FeedCache::new();
        assert_eq!(cache.begin_fetch(), Some(1));
        assert_eq!(cache.status(), FeedStatus::LoadingFirstPage);
        assert_eq!(cache.begin_fetch(), None);
    }

    #[test]
    fn pages_accumulate_in_order() {
        let store = MockStore::with_posts(25);
        let mut cache = FeedCache::new();
        while load(&mut cache, &store) {}

        assert_eq!(cache.page_params(), &[1, 2, 3]);
        assert!(!cache.has_next_page());
        assert_eq!(cache.items(), store.posts().to_vec());
        assert_eq!(cache.status(), FeedStatus::Idle);
    }

    #[test]
    fn failure_returns_to_idle_and_keeps_pages() {
        let store = MockStore::with_posts(25);
        let mut cache = FeedCache::new();
        load(&mut cache, &store);

        let page = cache.begin_fetch().unwrap();
        cache.complete_fetch(page, Err(FriendifyError::NetworkUnavailable("offline".into())));
        assert_eq!(cache.status(), FeedStatus::Idle);
        assert_eq!(cache.pages().len(), 1);
        assert!(cache.last_error().is_some());

        // retry asks for the same page
        assert_eq!(cache.begin_fetch(), Some(2));
    }

    #[test]
    fn prepend_then_next_page_has_no_duplicates() {
        let mut store = MockStore::with_posts(25);
        let mut cache = FeedCache::new();
        load(&mut cache, &store);

        let id = store.next_id("post");
        let post = Post::new(id, store.viewer().clone(), "hello".into(), vec![]);
        store.insert_post(post.clone()).unwrap();
        assert!(cache.prepend_post(post));
        while load(&mut cache, &store) {}

        let ids: Vec<String> = cache.items().into_iter().map(|p| p.id).collect();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
        assert_eq!(ids.len(), 26);
        assert_eq!(cache.items(), store.posts().to_vec());
    }

    #[test]
    fn prepend_before_first_load_is_ignored() {
        let store = MockStore::with_posts(1);
        let mut cache = FeedCache::new();
        assert!(!cache.prepend_post(store.posts()[0].clone()));
        assert!(cache.is_empty());
    }

    #[test]
    fn replace_post_updates_snapshot() {
        let mut store = MockStore::with_posts(15);
        let mut cache = FeedCache::new();
        while load(&mut cache, &store) {}

        let liked = store.toggle_like("p12").unwrap();
        assert!(cache.replace_post(liked.clone()));
        assert_eq!(cache.items()[11], liked);

        let mut stranger = liked;
        stranger.id = "unknown".into();
        assert!(!cache.replace_post(stranger));
    }

    #[test]
    fn reset_is_refused_mid_fetch() {
        let mut cache = FeedCache::new();
        cache.begin_fetch();
        assert!(!cache.reset());
        cache.complete_fetch(1, Ok(FeedPage::default()));
        assert!(cache.reset());
        assert_eq!(cache.begin_fetch(), Some(1));
    }
}
