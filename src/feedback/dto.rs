use serde::{Deserialize, Serialize};

use crate::recipes::repo_types::Comment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reactions {
    pub likes: u64,
    pub dislikes: u64,
}

#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentThread {
    pub comments: Vec<Comment>,
}
