use clap::{CommandFactory, Parser};

#[derive(Parser)]
#[command(
    name = "reddit-persona",
    about = "Build a user persona from a Reddit profile's recent posts and comments",
    version,
    after_help = "Credentials: REDDIT_CLIENT_ID, REDDIT_CLIENT_SECRET, REDDIT_USER_AGENT (environment or .env)\n\
                  Optional: HF_API_TOKEN for the inference API\n\n\
                  Personas are written to: personas/<username>_persona.txt\n\
                  Logs are written to: ~/.local/share/reddit-persona/logs/reddit-persona.log"
)]
pub struct Cli {
    /// Reddit profile URL (https://www.reddit.com/user/<name>/) or bare username
    #[arg(allow_hyphen_values = true)]
    pub profile: Option<String>,
}

impl Cli {
    /// One-line usage shown when no profile is given
    pub fn usage() -> String {
        let name = Cli::command().get_name().to_string();
        format!("Usage: {} <reddit_profile_url>", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_profile() {
        let cli = Cli::try_parse_from(["reddit-persona", "https://www.reddit.com/user/kojied/"]).unwrap();
        assert_eq!(cli.profile.as_deref(), Some("https://www.reddit.com/user/kojied/"));
    }

    #[test]
    fn test_profile_is_optional() {
        let cli = Cli::try_parse_from(["reddit-persona"]).unwrap();
        assert!(cli.profile.is_none());
    }

    #[test]
    fn test_username_starting_with_hyphen() {
        let cli = Cli::try_parse_from(["reddit-persona", "-Poison_Ivy-"]).unwrap();
        assert_eq!(cli.profile.as_deref(), Some("-Poison_Ivy-"));
    }

    #[test]
    fn test_help_still_recognized() {
        for flag in ["--help", "-h"] {
            let err = Cli::try_parse_from(["reddit-persona", flag]).err().unwrap();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        }
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["reddit-persona", "alice", "bob"]).is_err());
    }

    #[test]
    fn test_usage_line() {
        assert_eq!(Cli::usage(), "Usage: reddit-persona <reddit_profile_url>");
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
