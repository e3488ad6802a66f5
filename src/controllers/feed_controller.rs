use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::models::{FeedCache, Post, SocialApi};

/// Infinite feed: a [`FeedCache`] kept in step with a [`SocialApi`].
///
/// The cache lock is released while a page is in flight. The cache's fetch status is
/// what keeps concurrent triggers down to a single request.
#[derive(Clone)]
pub struct FeedQuery {
    api: Arc<dyn SocialApi>,
    cache: Arc<Mutex<FeedCache>>,
    page_size: usize,
}

impl FeedQuery {
    pub fn new(api: Arc<dyn SocialApi>, page_size: usize) -> Self {
        Self {
            api,
            cache: Arc::new(Mutex::new(FeedCache::new())),
            page_size,
        }
    }

    pub fn api(&self) -> &Arc<dyn SocialApi> {
        &self.api
    }

    pub fn cache(&self) -> Arc<Mutex<FeedCache>> {
        Arc::clone(&self.cache)
    }

    pub async fn snapshot(&self) -> FeedCache {
        self.cache.lock().await.clone()
    }

    pub async fn items(&self) -> Vec<Post> {
        self.cache.lock().await.items()
    }

    /// Initial load. Does nothing once a page is held.
    pub async fn load_first_page(&self) -> Result<bool> {
        if !self.cache.lock().await.pages().is_empty() {
            return Ok(false);
        }
        self.fetch().await
    }

    /// Request the next page. Returns `false` without fetching when a fetch is already
    /// in flight or the feed is exhausted.
    pub async fn fetch_next_page(&self) -> Result<bool> {
        self.fetch().await
    }

    /// Drop every page and load the first one again.
    pub async fn refresh(&self) -> Result<bool> {
        if !self.cache.lock().await.reset() {
            debug!("Refresh skipped, fetch in flight");
            return Ok(false);
        }
        self.fetch().await
    }

    async fn fetch(&self) -> Result<bool> {
        let page = match self.cache.lock().await.begin_fetch() {
            Some(page) => page,
            None => return Ok(false),
        };

        debug!("Fetching feed page {}", page);
        let result = self.api.fetch_page(page, self.page_size).await;
        if let Err(e) = &result {
            warn!("Failed to fetch feed page {}: {}", page, e);
        }
        let outcome = result.as_ref().map(|_| true).map_err(|e| e.clone());
        self.cache.lock().await.complete_fetch(page, result);
        outcome
    }

    pub async fn prepend_post(&self, post: Post) -> bool {
        self.cache.lock().await.prepend_post(post)
    }

    pub async fn replace_post(&self, post: Post) -> bool {
        self.cache.lock().await.replace_post(post)
    }
}
