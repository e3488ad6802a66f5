use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use tokio::sync::RwLock;

use crate::error::{FriendifyError, Result};
use crate::models::community::{Conversation, Message};
use crate::models::gateway;
use crate::models::post::{Comment, FeedPage, Post};
use crate::models::search::{self, SearchResults};
use crate::models::store::MockStore;
use crate::models::user::User;

/// Async data access for the feed, comments, search and chat.
#[async_trait]
pub trait SocialApi: Send + Sync {
    async fn viewer(&self) -> User;
    async fn fetch_page(&self, page: u32, page_size: usize) -> Result<FeedPage>;
    async fn create_post(&self, content: String, images: Vec<String>) -> Result<Post>;
    async fn create_comment(&self, post_id: &str, content: String) -> Result<(Comment, Post)>;
    async fn like_post(&self, post_id: &str) -> Result<Post>;
    async fn comments(&self, post_id: &str) -> Result<Vec<Comment>>;
    async fn search(&self, query: &str) -> Result<Option<SearchResults>>;
    async fn conversations(&self) -> Result<Vec<Conversation>>;
    async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>>;
    async fn send_message(&self, conversation_id: &str, content: String) -> Result<Message>;
}

/// `SocialApi` over a shared [`MockStore`], with every round-trip delayed by `latency`.
///
/// The store lock is never held across the delay.
#[derive(Clone)]
pub struct MockClient {
    store: Arc<RwLock<MockStore>>,
    latency: Duration,
}

impl MockClient {
    pub fn new(store: MockStore, latency: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            latency,
        }
    }

    /// No simulated latency at all.
    pub fn instant(store: MockStore) -> Self {
        Self::new(store, Duration::ZERO)
    }

    pub fn store(&self) -> Arc<RwLock<MockStore>> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl SocialApi for MockClient {
    async fn viewer(&self) -> User {
        self.store.read().await.viewer().clone()
    }

    async fn fetch_page(&self, page: u32, page_size: usize) -> Result<FeedPage> {
        let fetched = self.store.read().await.fetch_page(page, page_size)?;
        debug!(
            "Fetched page {} ({} items, has_more: {})",
            page,
            fetched.items.len(),
            fetched.has_more
        );
        Ok(gateway::simulate(fetched, self.latency).await)
    }

    async fn create_post(&self, content: String, images: Vec<String>) -> Result<Post> {
        let post = {
            let mut store = self.store.write().await;
            let id = store.next_id("post");
            Post::new(id, store.viewer().clone(), content, images)
        };
        post.validate()?;

        let post = gateway::simulate(post, self.latency).await;
        self.store.write().await.insert_post(post.clone())?;
        info!("Created post {}", post.id);
        Ok(post)
    }

    async fn create_comment(&self, post_id: &str, content: String) -> Result<(Comment, Post)> {
        let comment = {
            let mut store = self.store.write().await;
            if store.post(post_id).is_none() {
                return Err(FriendifyError::NotFound(format!("post {}", post_id)));
            }
            let id = store.next_id("comment");
            Comment::new(id, post_id.to_string(), store.viewer().clone(), content)
        };
        comment.validate()?;

        let comment = gateway::simulate(comment, self.latency).await;
        let post = self.store.write().await.insert_comment(comment.clone())?;
        info!("Created comment {} on post {}", comment.id, post_id);
        Ok((comment, post))
    }

    // Synchronous in spirit: no gateway delay.
    async fn like_post(&self, post_id: &str) -> Result<Post> {
        let post = self.store.write().await.toggle_like(post_id)?;
        debug!("Post {} liked: {} ({} likes)", post.id, post.is_liked, post.likes);
        Ok(post)
    }

    async fn comments(&self, post_id: &str) -> Result<Vec<Comment>> {
        let comments = self.store.read().await.comments_for(post_id);
        Ok(gateway::simulate(comments, self.latency).await)
    }

    async fn search(&self, query: &str) -> Result<Option<SearchResults>> {
        let results = match search::search(&*self.store.read().await, query) {
            Some(results) => results,
            None => return Ok(None),
        };
        Ok(Some(gateway::simulate(results, self.latency).await))
    }

    async fn conversations(&self) -> Result<Vec<Conversation>> {
        let conversations = self.store.read().await.conversations().to_vec();
        Ok(gateway::simulate(conversations, self.latency).await)
    }

    async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let messages = self
            .store
            .read()
            .await
            .conversation(conversation_id)?
            .messages
            .clone();
        Ok(gateway::simulate(messages, self.latency).await)
    }

    async fn send_message(&self, conversation_id: &str, content: String) -> Result<Message> {
        let message = {
            let mut store = self.store.write().await;
            store.conversation(conversation_id)?;
            Message {
                id: store.next_id("message"),
                conversation_id: conversation_id.to_string(),
                sender_id: store.viewer().id.clone(),
                content,
                timestamp: Utc::now(),
            }
        };

        let message = gateway::simulate(message, self.latency).await;
        self.store.write().await.push_message(message.clone())?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::store::DEFAULT_PAGE_SIZE;

    #[tokio::test]
    async fn create_post_lands_first_with_zeroed_counters() {
        let client = MockClient::instant(MockStore::with_posts(12));
        let post = client.create_post("hello".into(), vec![]).await.unwrap();

        let page = client.fetch_page(1, DEFAULT_PAGE_SIZE).await.unwrap();
        assert_eq!(page.items[0].id, post.id);
        assert_eq!(page.items[0].author, client.viewer().await);
        assert_eq!((post.likes, post.comments, post.shares), (0, 0, 0));
        assert_eq!(page.total, 13);
    }

    #[tokio::test]
    async fn blank_post_is_rejected_and_not_stored() {
        let client = MockClient::instant(MockStore::with_posts(2));
        let err = client.create_post("  ".into(), vec![]).await.unwrap_err();
        assert!(matches!(err, FriendifyError::ValidationFailed(_)));
        assert_eq!(client.store().read().await.posts().len(), 2);
    }

    #[tokio::test]
    async fn create_comment_increments_exactly_once() {
        let client = MockClient::instant(MockStore::with_posts(3));
        let (comment, post) = client.create_comment("p2", "hi".into()).await.unwrap();

        assert_eq!(post.comments, 1);
        let comments = client.comments("p2").await.unwrap();
        assert_eq!(comments.last().map(|c| &c.id), Some(&comment.id));
        assert_eq!(client.comments("p1").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn comment_on_unknown_post_fails() {
        let client = MockClient::instant(MockStore::with_posts(1));
        let err = client.create_comment("missing", "hi".into()).await.unwrap_err();
        assert!(matches!(err, FriendifyError::NotFound(_)));
    }

    #[tokio::test]
    async fn like_twice_is_a_round_trip() {
        let client = MockClient::instant(MockStore::with_posts(3));
        let original = client.store().read().await.post("p3").cloned().unwrap();

        let liked = client.like_post("p3").await.unwrap();
        assert_ne!(liked.is_liked, original.is_liked);

        let restored = client.like_post("p3").await.unwrap();
        assert_eq!(restored.likes, original.likes);
        assert_eq!(restored.is_liked, original.is_liked);
    }

    #[tokio::test(start_paused = true)]
    async fn reads_wait_for_the_gateway() {
        let client = MockClient::new(MockStore::with_posts(3), Duration::from_millis(800));
        let start = tokio::time::Instant::now();
        client.fetch_page(1, 10).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn likes_skip_the_gateway() {
        let client = MockClient::new(MockStore::with_posts(3), Duration::from_millis(800));
        let start = tokio::time::Instant::now();
        client.like_post("p1").await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(800));
    }

    #[tokio::test]
    async fn send_message_appends_to_conversation() {
        let client = MockClient::instant(MockStore::seeded());
        let before = client.messages("conv2").await.unwrap().len();
        let sent = client.send_message("conv2", "see you".into()).await.unwrap();

        let messages = client.messages("conv2").await.unwrap();
        assert_eq!(messages.len(), before + 1);
        assert_eq!(messages.last(), Some(&sent));
        assert_eq!(sent.sender_id, client.viewer().await.id);
    }

    #[tokio::test]
    async fn empty_search_is_not_fetched() {
        let client = MockClient::instant(MockStore::seeded());
        assert_eq!(client.search("").await.unwrap(), None);
        assert!(client.search("priya").await.unwrap().is_some());
    }
}
