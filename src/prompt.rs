//! Prompt assembly from fetched activity

use crate::config::PromptConfig;
use crate::reddit::{Comment, Post};

/// Build the generation prompt.
///
/// Layout: header, blank line, one `[Post]` line per post and one `[Comment]`
/// line per comment (capped, fetch order kept), blank line, cue.
pub fn build_prompt(posts: &[Post], comments: &[Comment], config: &PromptConfig) -> String {
    let mut prompt = format!("{}\n\n", config.header);

    for post in posts.iter().take(config.max_posts) {
        prompt.push_str(&format!("[Post] {}: {}\n", post.title, post.selftext));
    }

    for comment in comments.iter().take(config.max_comments) {
        prompt.push_str(&format!("[Comment] {}\n", comment.body));
    }

    prompt.push_str(&format!("\n{}\n", config.cue));
    prompt
}
