use serde::{Deserialize, Serialize};

/// A single authored post with its engagement count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}
