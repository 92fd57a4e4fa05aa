//! Authentication domain models.
//!
//! Describes who is making a request (`AuthData`), which principals a route accepts
//! (`AuthRule`) and the entity kinds addressable by URL (`TargetType`).

use std::{fmt, str::FromStr};

use uuid::Uuid;

use crate::server::error::permission::PermissionError;

/// Session scope granting normal access.
pub const SCOPE_NORMAL: &str = "normal";
/// Session scope that lets banned users reach appeal routes.
pub const SCOPE_BAN_EXEMPT: &str = "ban_exempt";
/// Session scope for third-party login integrations.
pub const SCOPE_EXTERNAL_AUTH: &str = "external_auth";

/// Every scope a login may request.
pub const LOGIN_SCOPES: [&str; 3] = [SCOPE_NORMAL, SCOPE_BAN_EXEMPT, SCOPE_EXTERNAL_AUTH];

/// Kind of entity addressed by a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    User,
    Bot,
    Server,
    Team,
    Pack,
    Blog,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::Server => "server",
            Self::Team => "team",
            Self::Pack => "pack",
            Self::Blog => "blog",
        }
    }

    /// Whether principals of this kind can hold sessions and permissions.
    pub fn is_principal(&self) -> bool {
        matches!(self, Self::User | Self::Bot | Self::Server | Self::Team)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a target type from a URL segment.
///
/// A single trailing `s` is accepted so that both `bot` and `bots` resolve.
impl FromStr for TargetType {
    type Err = PermissionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.strip_suffix('s').unwrap_or(value) {
            "user" => Ok(Self::User),
            "bot" => Ok(Self::Bot),
            "server" => Ok(Self::Server),
            "team" => Ok(Self::Team),
            "pack" => Ok(Self::Pack),
            "blog" => Ok(Self::Blog),
            _ => Err(PermissionError::InvalidTargetType(value.to_string())),
        }
    }
}

/// The authenticated principal of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthData {
    pub target_type: TargetType,
    pub id: String,
    pub banned: bool,
    /// Permission limits of the session, empty when unrestricted.
    pub perm_limits: Vec<String>,
    /// Set when the principal authenticated with a session token.
    pub session_id: Option<Uuid>,
    pub scope: String,
}

impl AuthData {
    /// Whether this principal is the given entity.
    pub fn is_target(&self, target_type: TargetType, target_id: &str) -> bool {
        self.target_type == target_type && self.id == target_id
    }
}

/// One kind of principal a route accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTarget {
    pub target_type: TargetType,
    /// Path-bound identifier the principal must match.
    pub url_id: Option<String>,
}

/// Which principals a route accepts and under which conditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRule {
    pub targets: Vec<AuthTarget>,
    pub optional: bool,
    pub allowed_scope: Option<&'static str>,
}

impl AuthRule {
    /// Accepts a principal of `target_type`, bound to `url_id` when given.
    pub fn new(target_type: TargetType, url_id: Option<&str>) -> Self {
        Self {
            targets: vec![AuthTarget {
                target_type,
                url_id: url_id.map(str::to_string),
            }],
            optional: false,
            allowed_scope: None,
        }
    }

    /// Accepts only the user whose id appears in the URL.
    pub fn user(url_id: &str) -> Self {
        Self::new(TargetType::User, Some(url_id))
    }

    /// Accepts any authenticated user.
    pub fn any_user() -> Self {
        Self::new(TargetType::User, None)
    }

    /// Additionally accepts a principal of `target_type`.
    pub fn or(mut self, target_type: TargetType, url_id: Option<&str>) -> Self {
        self.targets.push(AuthTarget {
            target_type,
            url_id: url_id.map(str::to_string),
        });
        self
    }

    /// Lets unauthenticated requests through.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Allows sessions with the given non-normal scope.
    pub fn scope(mut self, scope: &'static str) -> Self {
        self.allowed_scope = Some(scope);
        self
    }

    pub fn accepts(&self, target_type: TargetType) -> bool {
        self.targets.iter().any(|t| t.target_type == target_type)
    }
}
