use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Jira account email and API token.
///
/// Values pasted into secret stores often arrive wrapped in quotes or with
/// line breaks inside the token, so both are normalised on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    email: String,
    api_token: String,
}

impl JiraCredentials {
    pub fn new(email: &str, api_token: &str) -> Self {
        Self {
            email: strip_quotes(email).to_string(),
            api_token: strip_quotes(api_token)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// `Authorization` header value: `Basic base64(email:token)`.
    pub fn basic_auth_header(&self) -> String {
        let encoded = STANDARD.encode(format!("{}:{}", self.email, self.api_token));
        format!("Basic {encoded}")
    }
}

// Keep the token out of logs.
impl fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '"' || c == '\'').trim()
}
