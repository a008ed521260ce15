//! Robots.txt policy wrapper around the robotstxt crate

use robotstxt::DefaultMatcher;

/// Parsed robots.txt policy for one origin
///
/// The robotstxt matcher works directly on the raw body, so the policy keeps
/// the text and matches on demand. An empty body allows everything.
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    content: String,
}

impl ParsedRobots {
    /// Creates a policy from a raw robots.txt body
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Creates a permissive policy
    ///
    /// Used whenever robots.txt is missing, non-200 or unreachable.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Returns true if this policy places no restrictions at all
    pub fn is_permissive(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Checks whether `url` may be fetched by `user_agent`
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL or path to check
    /// * `user_agent` - Full User-Agent header; the matcher uses its product token
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.is_permissive() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, product_token(user_agent), url)
    }
}

/// Reduces a User-Agent header to the product token robots.txt groups match on
///
/// `Mozilla/5.0 (X11; ...)` becomes `Mozilla`.
fn product_token(user_agent: &str) -> &str {
    let trimmed = user_agent.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_alphabetic() || c == '_' || c == '-'))
        .unwrap_or(trimmed.len());
    if end == 0 {
        trimmed
    } else {
        &trimmed[..end]
    }
}
