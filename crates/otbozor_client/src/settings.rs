use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

/// How requests prove who the user is.
///
/// Both styles are in use against the same backend: admin screens send a
/// bearer token, public screens rely on the session cookie.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthStrategy {
    #[default]
    Anonymous,
    Bearer(String),
    CookieSession,
}

impl fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStrategy::Anonymous => write!(f, "Anonymous"),
            AuthStrategy::Bearer(token) => {
                write!(f, "Bearer({})", otbozor_logging::redact_token(token))
            }
            AuthStrategy::CookieSession => write!(f, "CookieSession"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub auth: AuthStrategy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            auth: AuthStrategy::Anonymous,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
