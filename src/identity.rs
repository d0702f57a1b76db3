//! Username extraction from profile URLs or bare names

use lazy_regex::regex_captures;

/// Extract a Reddit username from a profile URL or a raw username.
///
/// `https://www.reddit.com/user/alice/` yields `alice`; anything without the
/// `reddit.com/user/<name>` shape is returned with surrounding slashes removed.
pub fn extract_username(input: &str) -> String {
    if let Some((_, name)) = regex_captures!(r"reddit\.com/user/([^/]+)/?", input) {
        return name.to_string();
    }
    input.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url() {
        assert_eq!(extract_username("https://www.reddit.com/user/kojied/"), "kojied");
    }

    #[test]
    fn test_profile_url_without_trailing_slash() {
        assert_eq!(extract_username("https://www.reddit.com/user/Hungry-Move-6603"), "Hungry-Move-6603");
    }

    #[test]
    fn test_profile_url_with_subpath() {
        assert_eq!(extract_username("https://old.reddit.com/user/alice/comments/"), "alice");
    }

    #[test]
    fn test_scheme_less_url() {
        assert_eq!(extract_username("reddit.com/user/bob"), "bob");
    }

    #[test]
    fn test_bare_username() {
        assert_eq!(extract_username("alice"), "alice");
    }

    #[test]
    fn test_bare_username_with_slashes() {
        assert_eq!(extract_username("//alice/"), "alice");
    }

    #[test]
    fn test_other_url_passes_through() {
        // Not a user profile, so only the outer slashes go
        assert_eq!(extract_username("/r/rust/"), "r/rust");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_username(""), "");
        assert_eq!(extract_username("///"), "");
    }
}
