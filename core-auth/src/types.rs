use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported social networks.
///
/// # Examples
///
/// ```
/// use core_auth::ProviderKind;
///
/// let provider = ProviderKind::Facebook;
/// assert_eq!(provider.display_name(), "Facebook");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Facebook Graph API
    Facebook,
    /// Twitter REST API
    Twitter,
}

impl ProviderKind {
    /// Get the human-readable display name for this provider
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Facebook => "Facebook",
            ProviderKind::Twitter => "Twitter",
        }
    }

    /// Get the provider identifier string
    ///
    /// Used for logging and configuration purposes.
    ///
    /// ```
    /// use core_auth::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::Twitter.as_str(), "twitter");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Facebook => "facebook",
            ProviderKind::Twitter => "twitter",
        }
    }

    /// Parse a provider kind from a string identifier
    ///
    /// ```
    /// use core_auth::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::parse("Facebook"), Some(ProviderKind::Facebook));
    /// assert_eq!(ProviderKind::parse("myspace"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "facebook" | "fb" => Some(ProviderKind::Facebook),
            "twitter" => Some(ProviderKind::Twitter),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of a completed OAuth 2.0 authorization.
///
/// # Security
///
/// Tokens should never be logged. The `Debug` implementation redacts them.
///
/// # Examples
///
/// ```
/// use core_auth::AccessGrant;
/// use chrono::{Duration, Utc};
///
/// let grant = AccessGrant::new("EAAB...")
///     .with_scope("user_photos,publish_stream")
///     .with_expires_at(Utc::now() + Duration::hours(2));
///
/// assert!(!grant.is_expired_at(Utc::now()));
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Comma separated permissions granted by the user
    pub scope: Option<String>,
    /// `None` for long-lived tokens that do not expire
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessGrant {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            scope: None,
            expires_at: None,
        }
    }

    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    /// Whether `permission` appears in the granted scope.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.scope
            .as_deref()
            .is_some_and(|scope| scope.split(',').any(|p| p.trim() == permission))
    }
}

// Custom Debug implementation to avoid logging tokens
impl fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGrant")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
