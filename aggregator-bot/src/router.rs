//! Command routing for plain text messages.
//!
//! The raw text splits on the first whitespace run into a lowercased command
//! token and a verbatim argument. Everything that is not a recognized
//! command — including admin-only commands from non-admins — falls through
//! to a title search over the rejoined text.

use url::Url;

/// User-facing validation lines for `/link`; returned without calling any
/// collaborator.
pub const MSG_LINK_USAGE: &str = "❗️ Please provide a link: /link <url>";
pub const MSG_LINK_INVALID: &str =
    "❗️ Invalid URL. Make sure it starts with http:// or https://";

/// The single side-effecting action one message resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Welcome { is_admin: bool },
    AddArticle { url: Url },
    RejectLink { errors: Vec<String> },
    Search { query: String },
}

/// Splits the trimmed text on the first whitespace run: lowercased command
/// token plus the remainder kept verbatim (internal whitespace preserved).
pub fn parse_command(text: &str) -> (String, Option<String>) {
    let trimmed = text.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((token, rest)) => (token.to_lowercase(), Some(rest.trim_start().to_string())),
        None => (trimmed.to_lowercase(), None),
    }
}

/// Resolves one message to one action. First match wins; an admin-only
/// token from a non-admin is not rejected, it becomes a search query.
pub fn route(text: &str, is_admin: bool) -> Action {
    let (command, argument) = parse_command(text);

    match (command.as_str(), is_admin) {
        ("/start", _) => Action::Welcome { is_admin },
        ("/link", true) => match validate_link(argument.as_deref()) {
            Ok(url) => Action::AddArticle { url },
            Err(errors) => Action::RejectLink { errors },
        },
        _ => {
            let query = match argument {
                Some(argument) => format!("{command} {argument}"),
                None => command,
            };
            Action::Search { query }
        }
    }
}

/// The argument must be a non-empty absolute http/https URL.
fn validate_link(argument: Option<&str>) -> Result<Url, Vec<String>> {
    let raw = argument.unwrap_or("").trim();

    let mut errors = Vec::new();
    if raw.is_empty() {
        errors.push(MSG_LINK_USAGE.to_string());
    }

    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            if errors.is_empty() {
                return Ok(url);
            }
        }
        _ => errors.push(MSG_LINK_INVALID.to_string()),
    }

    Err(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_on_first_whitespace_run() {
        assert_eq!(
            parse_command("/link http://x.com"),
            ("/link".to_string(), Some("http://x.com".to_string()))
        );
        assert_eq!(
            parse_command("  title words  "),
            ("title".to_string(), Some("words".to_string()))
        );
        assert_eq!(parse_command("/start"), ("/start".to_string(), None));
        assert_eq!(
            parse_command("many   inner   spaces"),
            ("many".to_string(), Some("inner   spaces".to_string()))
        );
    }

    #[test]
    fn parse_lowercases_token_only() {
        assert_eq!(
            parse_command("/LINK HTTP://X.com/Path"),
            ("/link".to_string(), Some("HTTP://X.com/Path".to_string()))
        );
    }

    #[test]
    fn start_works_for_everyone() {
        assert_eq!(route("/start", false), Action::Welcome { is_admin: false });
        assert_eq!(route("/start", true), Action::Welcome { is_admin: true });
    }

    #[test]
    fn admin_link_with_valid_url_adds_article() {
        match route("/link https://example.com/a", true) {
            Action::AddArticle { url } => assert_eq!(url.as_str(), "https://example.com/a"),
            other => panic!("expected AddArticle, got {other:?}"),
        }
    }

    #[test]
    fn link_validation_rejects_bad_urls() {
        for bad in ["/link not-a-url", "/link ftp://x.com"] {
            match route(bad, true) {
                Action::RejectLink { errors } => {
                    assert_eq!(errors, vec![MSG_LINK_INVALID.to_string()])
                }
                other => panic!("expected RejectLink, got {other:?}"),
            }
        }
    }

    #[test]
    fn link_without_argument_reports_usage_and_invalid() {
        match route("/link", true) {
            Action::RejectLink { errors } => assert_eq!(
                errors,
                vec![MSG_LINK_USAGE.to_string(), MSG_LINK_INVALID.to_string()]
            ),
            other => panic!("expected RejectLink, got {other:?}"),
        }
    }

    #[test]
    fn non_admin_link_falls_through_to_search() {
        assert_eq!(
            route("/link http://x.com", false),
            Action::Search {
                query: "/link http://x.com".to_string()
            }
        );
    }

    #[test]
    fn plain_text_becomes_search_query() {
        assert_eq!(
            route("  Byzantine trade  routes ", false),
            Action::Search {
                query: "byzantine trade  routes".to_string()
            }
        );
    }
}
