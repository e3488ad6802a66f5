use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub avatar: String,
}

impl User {
    pub fn new(id: &str, first_name: &str, last_name: &str, username: &str) -> Self {
        Self {
            id: id.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: username.to_string(),
            avatar: format!("https://i.pravatar.cc/150?u={}", username),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against every name field. `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        [&self.first_name, &self.last_name, &self.username]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
            || self.full_name().to_lowercase().contains(needle)
    }
}
