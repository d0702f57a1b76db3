//! Reddit API client
//!
//! Uses an app-only bearer token obtained from the client id/secret pair,
//! then reads the user's `submitted` and `comments` listings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use colored::*;
use eyre::{Context, Result};
use lazy_regex::regex_is_match;
use serde::Deserialize;

use super::{Comment, Fetcher, Post, UserActivity};
use crate::config::RedditConfig;

/// Largest page Reddit serves for a listing
const MAX_PAGE_SIZE: usize = 100;

/// API credentials read from the environment
#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl RedditCredentials {
    /// Read `REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET` and `REDDIT_USER_AGENT`
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required_env("REDDIT_CLIENT_ID")?,
            client_secret: required_env("REDDIT_CLIENT_SECRET")?,
            user_agent: required_env("REDDIT_USER_AGENT")?,
        })
    }

    fn basic_auth(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        format!("Basic {}", encoded)
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => eyre::bail!("Missing Reddit credential: {} is not set", name),
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: ThingData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ThingData {
    title: Option<String>,
    selftext: Option<String>,
    body: Option<String>,
}

/// Blocking Reddit client holding an app-only access token
pub struct RedditClient {
    api_base: String,
    user_agent: String,
    access_token: String,
}

impl RedditClient {
    /// Exchange the credentials for an access token
    pub fn connect(credentials: &RedditCredentials, config: &RedditConfig) -> Result<Self> {
        log::info!("Requesting Reddit access token from {}", config.auth_url);

        let mut response = ureq::post(&config.auth_url)
            .header("Authorization", &credentials.basic_auth())
            .header("User-Agent", &credentials.user_agent)
            .send_form([("grant_type", "client_credentials")])
            .context("Failed to request Reddit access token")?;

        let response_body = response
            .body_mut()
            .read_to_string()
            .context("Failed to read token response")?;
        let access_token = parse_token(&response_body)?;

        log::debug!("Obtained Reddit access token");
        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            user_agent: credentials.user_agent.clone(),
            access_token,
        })
    }

    fn listing(&self, username: &str, kind: &str, limit: usize) -> Result<String> {
        let url = format!("{}/user/{}/{}", self.api_base, username, kind);
        log::debug!("GET {} limit={}", url, limit);

        let mut response = ureq::get(&url)
            .query("sort", "new")
            .query("limit", limit.to_string())
            .query("raw_json", "1")
            .header("Authorization", &format!("bearer {}", self.access_token))
            .header("User-Agent", &self.user_agent)
            .call()
            .with_context(|| format!("Failed to fetch {} for u/{}", kind, username))?;

        response
            .body_mut()
            .read_to_string()
            .context("Failed to read listing response")
    }
}

impl Fetcher for RedditClient {
    fn fetch(&self, username: &str, limit: usize) -> Result<UserActivity> {
        if username.trim().is_empty() {
            log::warn!("Empty username, skipping fetch");
            return Ok(UserActivity::default());
        }
        validate_username(username)?;

        let page = page_size(limit);

        println!("{} Scraping u/{}'s posts...", "[+]".blue(), username.cyan());
        let posts = newest(parse_submissions(&self.listing(username, "submitted", page)?)?, page);
        println!("    {} posts", posts.len());

        println!("{} Scraping u/{}'s comments...", "[+]".blue(), username.cyan());
        let comments = newest(parse_comments(&self.listing(username, "comments", page)?)?, page);
        println!("    {} comments", comments.len());

        log::info!(
            "Fetched {} posts and {} comments for u/{}",
            posts.len(),
            comments.len(),
            username
        );
        Ok(UserActivity::new(posts, comments))
    }
}

/// Usernames go into the URL path unencoded, so only Reddit's own charset passes
fn validate_username(username: &str) -> Result<()> {
    if !regex_is_match!(r"^[A-Za-z0-9_-]+$", username) {
        eyre::bail!("Invalid Reddit username: {:?}", username);
    }
    Ok(())
}

/// Clamp a requested limit to one listing page
fn page_size(limit: usize) -> usize {
    let page = limit.min(MAX_PAGE_SIZE);
    if page < limit {
        log::warn!("Limit {} exceeds one listing page, fetching {}", limit, page);
    }
    page
}

/// Keep the first `page` items, which are the newest
fn newest<T>(mut items: Vec<T>, page: usize) -> Vec<T> {
    items.truncate(page);
    items
}

fn parse_token(body: &str) -> Result<String> {
    let token: TokenResponse = serde_json::from_str(body).context("Failed to parse token response")?;
    match (token.access_token, token.error) {
        (Some(access_token), _) => Ok(access_token),
        (None, Some(error)) => eyre::bail!("Reddit rejected the credentials: {}", error),
        (None, None) => eyre::bail!("No access token in Reddit response"),
    }
}

fn parse_listing(body: &str) -> Result<Vec<ThingData>> {
    let listing: Listing = serde_json::from_str(body).context("Failed to parse Reddit listing")?;
    Ok(listing.data.children.into_iter().map(|c| c.data).collect())
}

fn parse_submissions(body: &str) -> Result<Vec<Post>> {
    Ok(parse_listing(body)?
        .into_iter()
        .map(|d| Post {
            title: d.title.unwrap_or_default(),
            selftext: d.selftext.unwrap_or_default(),
        })
        .collect())
}

fn parse_comments(body: &str) -> Result<Vec<Comment>> {
    Ok(parse_listing(body)?
        .into_iter()
        .map(|d| Comment {
            body: d.body.unwrap_or_default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> RedditClient {
        // Nothing listens on the discard port, so any request would fail
        RedditClient {
            api_base: "http://127.0.0.1:9".to_string(),
            user_agent: "test/0.1".to_string(),
            access_token: "token".to_string(),
        }
    }

    #[test]
    fn test_empty_username_skips_request() {
        let client = offline_client();
        assert!(client.fetch("", 30).unwrap().is_empty());
        assert!(client.fetch("   ", 30).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_username_rejected_before_request() {
        let client = offline_client();
        let err = client.fetch("alice#x", 30).unwrap_err();
        assert!(err.to_string().contains("Invalid Reddit username"));
        assert!(client.fetch("a/b", 30).is_err());
        assert!(client.fetch("bob smith", 30).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("-Poison_Ivy-").is_ok());
        assert!(validate_username("Hungry-Move-6603").is_ok());
        assert!(validate_username("alice?x=1").is_err());
        assert!(validate_username("café").is_err());
    }

    #[test]
    fn test_page_size_clamps_to_one_page() {
        assert_eq!(page_size(30), 30);
        assert_eq!(page_size(100), 100);
        assert_eq!(page_size(150), 100);
        assert_eq!(page_size(0), 0);
    }

    #[test]
    fn test_newest_truncates_listing() {
        let listing: Vec<usize> = (0..120).collect();
        let kept = newest(listing, page_size(150));
        assert_eq!(kept.len(), 100);
        assert_eq!(kept[0], 0);
        assert_eq!(kept[99], 99);

        let short = newest(vec!["a", "b"], 30);
        assert_eq!(short, vec!["a", "b"]);

        let posts = newest(vec![Post::default(); 40], 30);
        assert_eq!(posts.len(), 30);
    }

    #[test]
    fn test_basic_auth_header() {
        let credentials = RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            user_agent: "test/0.1".to_string(),
        };
        // base64("id:secret")
        assert_eq!(credentials.basic_auth(), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = required_env("REDDIT_PERSONA_TEST_UNSET_VAR").unwrap_err();
        assert!(err.to_string().contains("REDDIT_PERSONA_TEST_UNSET_VAR"));
    }

    #[test]
    fn test_parse_token() {
        let body = r#"{"access_token": "abc123", "token_type": "bearer", "expires_in": 86400, "scope": "*"}"#;
        assert_eq!(parse_token(body).unwrap(), "abc123");
    }

    #[test]
    fn test_parse_token_error() {
        let err = parse_token(r#"{"error": "invalid_grant"}"#).unwrap_err();
        assert!(err.to_string().contains("invalid_grant"));
    }

    #[test]
    fn test_parse_submissions_keeps_order() {
        let body = r#"{
            "kind": "Listing",
            "data": {
                "after": null,
                "children": [
                    {"kind": "t3", "data": {"title": "Newest", "selftext": "body one"}},
                    {"kind": "t3", "data": {"title": "Link post", "selftext": "", "url": "https://example.com"}},
                    {"kind": "t3", "data": {"title": "Oldest", "selftext": null}}
                ]
            }
        }"#;

        let posts = parse_submissions(body).unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Newest");
        assert_eq!(posts[0].selftext, "body one");
        assert_eq!(posts[1].selftext, "");
        assert_eq!(posts[2].title, "Oldest");
        assert_eq!(posts[2].selftext, "");
    }

    #[test]
    fn test_parse_comments() {
        let body = r#"{
            "kind": "Listing",
            "data": {
                "children": [
                    {"kind": "t1", "data": {"body": "first", "subreddit": "rust"}},
                    {"kind": "t1", "data": {"body": "second"}}
                ]
            }
        }"#;

        let comments = parse_comments(body).unwrap();
        assert_eq!(
            comments,
            vec![
                Comment { body: "first".to_string() },
                Comment { body: "second".to_string() },
            ]
        );
    }

    #[test]
    fn test_parse_empty_listing() {
        let body = r#"{"kind": "Listing", "data": {"children": []}}"#;
        assert!(parse_submissions(body).unwrap().is_empty());
        assert!(parse_comments(r#"{"kind": "Listing", "data": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_listing_rejects_garbage() {
        assert!(parse_submissions("<html>rate limited</html>").is_err());
    }
}
