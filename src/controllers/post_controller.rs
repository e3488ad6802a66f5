use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

use log::{info, warn};

use crate::controllers::feed_controller::FeedQuery;
use crate::error::{FriendifyError, Result};
use crate::models::{Comment, Post, SocialApi};

/// Create a post and slot it into the cached feed in place.
pub async fn publish_post(feed: &FeedQuery, content: String, images: Vec<String>) -> Result<Post> {
    let post = feed.api().create_post(content, images).await.map_err(|e| {
        warn!("Failed to create post: {}", e);
        e
    })?;
    feed.prepend_post(post.clone()).await;
    Ok(post)
}

/// Create a comment and refresh the cached snapshot of its post.
pub async fn publish_comment(feed: &FeedQuery, post_id: &str, content: String) -> Result<Comment> {
    let (comment, post) = feed.api().create_comment(post_id, content).await.map_err(|e| {
        warn!("Failed to comment on post {}: {}", post_id, e);
        e
    })?;
    feed.replace_post(post).await;
    Ok(comment)
}

pub async fn toggle_like(feed: &FeedQuery, post_id: &str) -> Result<Post> {
    let post = feed.api().like_post(post_id).await?;
    feed.replace_post(post.clone()).await;
    Ok(post)
}

/// Open `$EDITOR` on a scratch file and return what was written. An editor that quits
/// without saving yields an empty string.
pub fn compose_via_editor(draft_name: &str) -> Result<String> {
    let editor = env::var("EDITOR")
        .unwrap_or_else(|_| "vi".to_string());
    compose_in(&env::temp_dir(), &editor, draft_name)
}

/// The draft lives in `dir` only while the editor runs and is removed on every exit path.
pub fn compose_in(dir: &Path, editor: &str, draft_name: &str) -> Result<String> {
    let draft = tempfile::Builder::new()
        .prefix(&format!("friendify-{}-", draft_name))
        .tempfile_in(dir)?;

    let status = Command::new(editor)
        .arg(draft.path())
        .status()?;

    if !status.success() {
        return Err(FriendifyError::Io("Editor exited with non-zero status".to_string()));
    }

    let content = match fs::read_to_string(draft.path()) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    info!("Composed {} ({} bytes)", draft_name, content.len());
    Ok(content.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::models::{MockClient, MockStore};

    async fn loaded_feed(posts: usize) -> (MockClient, FeedQuery) {
        let client = MockClient::instant(MockStore::with_posts(posts));
        let feed = FeedQuery::new(Arc::new(client.clone()), 10);
        feed.load_first_page().await.unwrap();
        (client, feed)
    }

    #[tokio::test]
    async fn published_post_heads_the_cached_feed() {
        let (client, feed) = loaded_feed(15).await;
        let post = publish_post(&feed, "hello".into(), vec![]).await.unwrap();

        let items = feed.items().await;
        assert_eq!(items[0].id, post.id);
        assert_eq!(items.len(), 11);

        let first = client.fetch_page(1, 10).await.unwrap();
        assert_eq!(first.items[0], post);
    }

    #[tokio::test]
    async fn post_published_before_first_load_shows_up_on_refresh() {
        let client = MockClient::instant(MockStore::with_posts(3));
        let feed = FeedQuery::new(Arc::new(client), 10);

        let post = publish_post(&feed, "early".into(), vec![]).await.unwrap();
        assert!(feed.items().await.is_empty());

        feed.refresh().await.unwrap();
        assert_eq!(feed.items().await[0].id, post.id);
    }

    #[tokio::test]
    async fn published_comment_bumps_cached_counter() {
        let (_client, feed) = loaded_feed(15).await;
        publish_comment(&feed, "p4", "hi".into()).await.unwrap();

        let cached = feed.items().await.into_iter().find(|p| p.id == "p4").unwrap();
        assert_eq!(cached.comments, 1);
    }

    #[tokio::test]
    async fn failed_comment_leaves_cache_alone() {
        let (_client, feed) = loaded_feed(3).await;
        let before = feed.items().await;
        assert!(publish_comment(&feed, "p9", "hi".into()).await.is_err());
        assert!(publish_comment(&feed, "p1", "   ".into()).await.is_err());
        assert_eq!(feed.items().await, before);
    }

    #[tokio::test]
    async fn like_round_trip_through_the_cache() {
        let (_client, feed) = loaded_feed(5).await;
        let original = feed.items().await[1].clone();

        toggle_like(&feed, &original.id).await.unwrap();
        let liked = feed.items().await[1].clone();
        assert_eq!(liked.likes, original.likes + 1);
        assert!(liked.is_liked);

        toggle_like(&feed, &original.id).await.unwrap();
        assert_eq!(feed.items().await[1], original);
    }

    #[cfg(unix)]
    #[test]
    fn editor_quitting_without_saving_yields_empty_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let content = compose_in(dir.path(), "true", "post").unwrap();
        assert_eq!(content, "");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_still_removes_the_draft() {
        let dir = tempfile::tempdir().unwrap();
        let err = compose_in(dir.path(), "false", "comment").unwrap_err();
        assert!(matches!(err, FriendifyError::Io(_)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
