//! Reddit activity fetching
//!
//! The pipeline only sees the [`Fetcher`] trait; [`RedditClient`] is the
//! network-backed implementation used by the binary.

pub mod client;

use eyre::Result;
use serde::{Deserialize, Serialize};

pub use client::{RedditClient, RedditCredentials};

/// A submission authored by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub title: String,
    pub selftext: String,
}

/// A comment authored by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub body: String,
}

/// Recent posts and comments, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserActivity {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl UserActivity {
    pub fn new(posts: Vec<Post>, comments: Vec<Comment>) -> Self {
        Self { posts, comments }
    }

    /// True when neither posts nor comments were found
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }
}

/// Source of a user's recent activity
pub trait Fetcher {
    /// Fetch up to `limit` most-recent submissions and, separately, up to
    /// `limit` most-recent comments for `username`.
    fn fetch(&self, username: &str, limit: usize) -> Result<UserActivity>;
}
