use std::fmt;

/// Errors raised while loading [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("REQUEST_TIMEOUT_SECS ({request}) must be greater than JIRA_TIMEOUT_SECS ({jira})")]
    TimeoutOrder { request: u64, jira: u64 },
}

/// Jira connection settings.
#[derive(Clone)]
pub struct JiraConfig {
    /// Site URL, e.g. `https://example.atlassian.net`.
    pub base_url: String,
    /// Account email used for Basic auth.
    pub user_email: String,
    /// API token used for Basic auth.
    pub api_token: String,
    /// Project new issues are filed under (default: `RVS`).
    pub project_key: String,
    /// Call `/myself` before each create and log the outcome (default: `false`).
    pub identity_check: bool,
    /// Deadline for the whole Jira exchange in seconds (default: `30`).
    pub timeout_secs: u64,
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("user_email", &self.user_email)
            .field("api_token", &"<redacted>")
            .field("project_key", &self.project_key)
            .field("identity_check", &self.identity_check)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8787`).
    pub port: u16,
    /// Origin allowed to call the endpoint from a browser.
    pub allowed_origin: String,
    /// HTTP request timeout in seconds (default: `35`). Always greater than
    /// the Jira timeout.
    pub request_timeout_secs: u64,
    pub jira: JiraConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default    |
    /// |------------------------|------------|
    /// | `HOST`                 | `0.0.0.0`  |
    /// | `PORT`                 | `8787`     |
    /// | `ALLOWED_ORIGIN`       | required   |
    /// | `REQUEST_TIMEOUT_SECS` | `35`       |
    /// | `JIRA_SERVER_URL`      | required   |
    /// | `JIRA_USER_EMAIL`      | required   |
    /// | `JIRA_API_TOKEN`       | required   |
    /// | `JIRA_PROJECT_KEY`     | `RVS`      |
    /// | `JIRA_IDENTITY_CHECK`  | `false`    |
    /// | `JIRA_TIMEOUT_SECS`    | `30`       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let host = optional("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", optional("PORT"), 8787)?;
        let allowed_origin = required("ALLOWED_ORIGIN")?;
        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", optional("REQUEST_TIMEOUT_SECS"), 35)?;

        let jira = JiraConfig {
            base_url: required("JIRA_SERVER_URL")?,
            user_email: required("JIRA_USER_EMAIL")?,
            api_token: required("JIRA_API_TOKEN")?,
            project_key: optional("JIRA_PROJECT_KEY").unwrap_or_else(|| "RVS".into()),
            identity_check: parse_flag("JIRA_IDENTITY_CHECK", optional("JIRA_IDENTITY_CHECK"))?,
            timeout_secs: parse_or("JIRA_TIMEOUT_SECS", optional("JIRA_TIMEOUT_SECS"), 30)?,
        };

        if request_timeout_secs <= jira.timeout_secs {
            return Err(ConfigError::TimeoutOrder {
                request: request_timeout_secs,
                jira: jira.timeout_secs,
            });
        }

        Ok(Self {
            host,
            port,
            allowed_origin,
            request_timeout_secs,
            jira,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_flag(key: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value }),
    }
}
