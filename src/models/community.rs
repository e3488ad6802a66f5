use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FanPage {
    pub id: String,
    pub name: String,
    pub category: String,
    pub followers: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub participant: User,
    pub messages: Vec<Message>,
}
