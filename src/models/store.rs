use chrono::{Duration, Utc};
use log::debug;

use crate::error::{FriendifyError, Result};
use crate::models::community::{Conversation, FanPage, Group, Message};
use crate::models::post::{Comment, FeedPage, Post};
use crate::models::user::User;

pub const DEFAULT_PAGE_SIZE: usize = 10;

const SEED_POST_COUNT: usize = 25;

const SEED_CONTENT: [&str; 8] = [
    "Just finished a morning run along the river. Feeling great!",
    "Does anyone have a good recipe for sourdough? Mine keeps coming out flat.",
    "Throwback to last summer's hiking trip in the mountains.",
    "New blog post is up: ten things I learned shipping my first app.",
    "Coffee first, questions later.",
    "Our community garden finally has tomatoes!",
    "Anyone going to the concert downtown this weekend?",
    "Reading recommendations for a long flight? Fiction preferred.",
];

/// In-memory backing collections for one session.
///
/// Posts are kept newest first: creates prepend, so store order is the feed order.
#[derive(Debug, Clone)]
pub struct MockStore {
    viewer: User,
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    groups: Vec<Group>,
    fan_pages: Vec<FanPage>,
    conversations: Vec<Conversation>,
    sequence: u64,
}

impl MockStore {
    /// An empty store acting on behalf of `viewer`.
    pub fn new(viewer: User) -> Self {
        Self {
            users: vec![viewer.clone()],
            viewer,
            posts: vec![],
            comments: vec![],
            groups: vec![],
            fan_pages: vec![],
            conversations: vec![],
            sequence: 0,
        }
    }

    /// The stock session data: a handful of users, a feed of posts, some comments,
    /// groups, fan pages and conversations.
    pub fn seeded() -> Self {
        let mut store = Self::new(default_viewer());
        store.users.extend([
            User::new("2", "Sarah", "Connor", "sconnor"),
            User::new("3", "Miguel", "Alvarez", "malvarez"),
            User::new("4", "Priya", "Natarajan", "priyan"),
            User::new("5", "Tom", "Baker", "tbaker"),
            User::new("6", "Lena", "Fischer", "lfischer"),
        ]);

        store.posts = store.generate_posts(SEED_POST_COUNT);

        let now = Utc::now();
        for (i, post) in store.posts.iter_mut().take(5).enumerate() {
            let author = store.users[(i + 2) % store.users.len()].clone();
            let mut comment = Comment::new(
                format!("c{}", i + 1),
                post.id.clone(),
                author,
                "Love this!".to_string(),
            );
            comment.timestamp = now - Duration::minutes(i as i64 * 7);
            if i == 0 {
                let mut reply = Comment::new(
                    "c1-r1".to_string(),
                    post.id.clone(),
                    store.viewer.clone(),
                    "Thanks!".to_string(),
                );
                reply.timestamp = comment.timestamp + Duration::minutes(1);
                comment.replies.push(reply);
            }
            post.comments += 1;
            store.comments.push(comment);
        }

        store.groups = vec![
            Group { id: "g1".into(), name: "Trail Runners".into(), members: 1240 },
            Group { id: "g2".into(), name: "Sourdough Bakers".into(), members: 388 },
            Group { id: "g3".into(), name: "Rust Developers".into(), members: 5021 },
        ];
        store.fan_pages = vec![
            FanPage { id: "fp1".into(), name: "City Concert Hall".into(), category: "Music".into(), followers: 9800 },
            FanPage { id: "fp2".into(), name: "Community Garden Co-op".into(), category: "Nonprofit".into(), followers: 640 },
            FanPage { id: "fp3".into(), name: "Riverside Running Club".into(), category: "Sports".into(), followers: 2150 },
        ];

        let sarah = store.users[1].clone();
        let miguel = store.users[2].clone();
        store.conversations = vec![
            Conversation {
                id: "conv1".into(),
                messages: vec![
                    message("m1", "conv1", &sarah.id, "Are we still on for Saturday?", now - Duration::hours(3)),
                    message("m2", "conv1", &store.viewer.id, "Yes! 10am at the trailhead.", now - Duration::hours(2)),
                ],
                participant: sarah,
            },
            Conversation {
                id: "conv2".into(),
                messages: vec![
                    message("m3", "conv2", &miguel.id, "Sent you the photos from the trip.", now - Duration::days(1)),
                ],
                participant: miguel,
            },
        ];

        store
    }

    /// A store holding `count` generated posts and nothing else.
    pub fn with_posts(count: usize) -> Self {
        let mut store = Self::new(default_viewer());
        store.users.push(User::new("2", "Sarah", "Connor", "sconnor"));
        store.posts = store.generate_posts(count);
        store
    }

    fn generate_posts(&self, count: usize) -> Vec<Post> {
        let now = Utc::now();
        (0..count)
            .map(|i| {
                let author = self.users[i % self.users.len()].clone();
                let images = if i % 3 == 0 {
                    vec![format!("https://picsum.photos/seed/{}/600/400", i + 1)]
                } else {
                    vec![]
                };
                let mut post = Post::new(
                    format!("p{}", i + 1),
                    author,
                    SEED_CONTENT[i % SEED_CONTENT.len()].to_string(),
                    images,
                );
                post.likes = ((i * 7) % 40) as u32;
                post.shares = (i % 4) as u32;
                post.timestamp = now - Duration::hours(i as i64);
                post
            })
            .collect()
    }

    pub fn viewer(&self) -> &User {
        &self.viewer
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn fan_pages(&self) -> &[FanPage] {
        &self.fan_pages
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Time-derived identifier; the sequence keeps creates within one millisecond apart.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.sequence += 1;
        format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), self.sequence)
    }

    /// The half-open slice `[(page - 1) * page_size, page * page_size)` of the feed.
    pub fn fetch_page(&self, page: u32, page_size: usize) -> Result<FeedPage> {
        if page == 0 || page_size == 0 {
            return Err(FriendifyError::ValidationFailed(format!(
                "page {} of size {} is not addressable",
                page, page_size
            )));
        }

        let total = self.posts.len();
        let start = (page as usize - 1).saturating_mul(page_size);
        let end = start.saturating_add(page_size);
        let items = if start < total {
            self.posts[start..end.min(total)].to_vec()
        } else {
            vec![]
        };

        Ok(FeedPage {
            items,
            has_more: end < total,
            total,
        })
    }

    pub fn insert_post(&mut self, post: Post) -> Result<()> {
        post.validate()?;
        debug!("Prepending post {}", post.id);
        self.posts.insert(0, post);
        Ok(())
    }

    /// Append `comment` and bump its post's counter. Returns the updated post.
    pub fn insert_comment(&mut self, comment: Comment) -> Result<Post> {
        comment.validate()?;
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == comment.post_id)
            .ok_or_else(|| FriendifyError::NotFound(format!("post {}", comment.post_id)))?;

        post.comments += 1;
        let updated = post.clone();
        debug!("Appending comment {} to post {}", comment.id, comment.post_id);
        self.comments.push(comment);
        Ok(updated)
    }

    pub fn toggle_like(&mut self, post_id: &str) -> Result<Post> {
        let post = self
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| FriendifyError::NotFound(format!("post {}", post_id)))?;
        post.toggle_like();
        Ok(post.clone())
    }

    pub fn comments_for(&self, post_id: &str) -> Vec<Comment> {
        self.comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }

    pub fn conversation(&self, id: &str) -> Result<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| FriendifyError::NotFound(format!("conversation {}", id)))
    }

    pub fn push_message(&mut self, message: Message) -> Result<()> {
        if message.content.trim().is_empty() {
            return Err(FriendifyError::ValidationFailed("message content is empty".to_string()));
        }
        let conversation = self
            .conversations
            .iter_mut()
            .find(|c| c.id == message.conversation_id)
            .ok_or_else(|| FriendifyError::NotFound(format!("conversation {}", message.conversation_id)))?;
        conversation.messages.push(message);
        Ok(())
    }
}

/// The static identity the auth stub hands out.
pub fn default_viewer() -> User {
    User::new("1", "John", "Doe", "johndoe")
}

fn message(id: &str, conversation_id: &str, sender_id: &str, content: &str, at: chrono::DateTime<Utc>) -> Message {
    Message {
        id: id.to_string(),
        conversation_id: conversation_id.to_string(),
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        timestamp: at,
    }
}
