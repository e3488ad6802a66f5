use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FriendifyError;
use crate::models::user::User;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: String,
    pub author: User,
    pub content: String,
    pub images: Vec<String>,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
    pub timestamp: DateTime<Utc>,
    pub is_liked: bool,
}

impl Post {
    /// A fresh post by `author` with all counters zeroed.
    pub fn new(id: String, author: User, content: String, images: Vec<String>) -> Self {
        Self {
            id,
            author,
            content,
            images,
            likes: 0,
            comments: 0,
            shares: 0,
            timestamp: Utc::now(),
            is_liked: false,
        }
    }

    pub fn validate(&self) -> Result<(), FriendifyError> {
        if self.id.is_empty() {
            return Err(FriendifyError::ValidationFailed("post id is empty".to_string()));
        }
        if self.content.trim().is_empty() && self.images.is_empty() {
            return Err(FriendifyError::ValidationFailed(
                "post needs content or at least one image".to_string(),
            ));
        }
        Ok(())
    }

    /// Flip the viewer's like, keeping the counter in step.
    pub fn toggle_like(&mut self) {
        if self.is_liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes += 1;
        }
        self.is_liked = !self.is_liked;
    }

    pub fn datetime(&self) -> String {
        let local_time: DateTime<Local> = DateTime::from(self.timestamp);
        local_time.format("%H:%M %h-%d-%Y").to_string()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author: User,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(id: String, post_id: String, author: User, content: String) -> Self {
        Self {
            id,
            post_id,
            author,
            content,
            timestamp: Utc::now(),
            likes: 0,
            replies: vec![],
        }
    }

    pub fn validate(&self) -> Result<(), FriendifyError> {
        if self.id.is_empty() || self.post_id.is_empty() {
            return Err(FriendifyError::ValidationFailed(
                "comment needs an id and a post id".to_string(),
            ));
        }
        if self.content.trim().is_empty() {
            return Err(FriendifyError::ValidationFailed("comment content is empty".to_string()));
        }
        self.replies.iter().try_for_each(Comment::validate)
    }
}

/// One fetch result of the paginated feed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct FeedPage {
    pub items: Vec<Post>,
    pub has_more: bool,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> User {
        User::new("u1", "Ada", "Lovelace", "ada")
    }

    #[test]
    fn toggle_like_twice_restores_state() {
        let mut post = Post::new("p1".into(), author(), "hello".into(), vec![]);
        post.likes = 7;

        post.toggle_like();
        assert!(post.is_liked);
        assert_eq!(post.likes, 8);

        post.toggle_like();
        assert!(!post.is_liked);
        assert_eq!(post.likes, 7);
    }

    #[test]
    fn unlike_never_underflows() {
        let mut post = Post::new("p1".into(), author(), "hello".into(), vec![]);
        post.is_liked = true;
        post.toggle_like();
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn image_only_post_is_valid() {
        let post = Post::new("p1".into(), author(), "  ".into(), vec!["a.png".into()]);
        assert!(post.validate().is_ok());

        let empty = Post::new("p2".into(), author(), "  ".into(), vec![]);
        assert!(matches!(empty.validate(), Err(FriendifyError::ValidationFailed(_))));
    }

    #[test]
    fn nested_reply_is_validated() {
        let mut comment = Comment::new("c1".into(), "p1".into(), author(), "hi".into());
        comment.replies.push(Comment::new("c2".into(), "p1".into(), author(), "".into()));
        assert!(comment.validate().is_err());
    }
}
