//! Heuristic citations for persona traits
//!
//! A trait is cited when its keyword appears both in the generated persona and
//! in a fetched post or comment. This is keyword co-occurrence only: it says
//! nothing about which source the model actually drew on.

use crate::config::CitationConfig;
use crate::reddit::{Comment, Post};

/// A fetched item a citation can point back to
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Post(&'a Post),
    Comment(&'a Comment),
}

impl<'a> Source<'a> {
    /// First non-empty field among title, selftext and body
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Source::Post(post) => [post.title.as_str(), post.selftext.as_str()]
                .into_iter()
                .find(|f| !f.is_empty()),
            Source::Comment(comment) => Some(comment.body.as_str()).filter(|b| !b.is_empty()),
        }
    }
}

/// Posts then comments, in fetch order
pub fn sources<'a>(posts: &'a [Post], comments: &'a [Comment]) -> impl Iterator<Item = Source<'a>> {
    posts
        .iter()
        .map(Source::Post)
        .chain(comments.iter().map(Source::Comment))
}

/// Build the `[Citations]` block appended to the persona text.
///
/// Always emits one bullet per configured trait, in order.
pub fn cite_sources(persona: &str, posts: &[Post], comments: &[Comment], config: &CitationConfig) -> String {
    let persona_lower = persona.to_lowercase();
    let mut citations = String::from("\n\n[Citations]\n");

    for keyword in &config.traits {
        let keyword_lower = keyword.to_lowercase();
        let label = title_case(keyword);

        let evidence = if persona_lower.contains(&keyword_lower) {
            sources(posts, comments)
                .filter_map(|s| s.text())
                .find(|text| text.to_lowercase().contains(&keyword_lower))
        } else {
            None
        };

        match evidence {
            Some(text) => {
                log::debug!("Trait '{}' cited from source text", keyword);
                citations.push_str(&format!(
                    "- {} from: \"{}...\"\n",
                    label,
                    snippet(text, config.snippet_chars)
                ));
            }
            None => {
                log::debug!("Trait '{}' has no matching source", keyword);
                citations.push_str(&format!("- {}: Not explicitly found, inferred by model.\n", label));
            }
        }
    }

    citations
}

/// First `max_chars` characters of `text`, trimmed
fn snippet(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect::<String>().trim().to_string()
}

/// Capitalize the first letter of each word and lowercase the rest
fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    result
}
