//! Client-side session state.
//!
//! A [`SessionContext`] holds at most one bearer session. The session is
//! consulted before owner and admin actions, and it is dropped as soon as it
//! is observed past its expiry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Lifetime, in minutes, the auth service gives new tokens.
pub const SESSION_TTL_MINUTES: i64 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not logged in")]
    NotLoggedIn,
    #[error("Session expired at {0}")]
    Expired(DateTime<Utc>),
    #[error("Role {actual} cannot perform this action, requires {required}")]
    Forbidden { required: Role, actual: Role },
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A diner. The only role allowed to leave reviews.
    User,
    Owner,
    Admin,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" | "customer" => Ok(Self::User),
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            _ => Err(SessionError::UnknownRole(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: u64,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user_id: u64, role: Role, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            user_id,
            role,
            expires_at: issued_at + Duration::minutes(SESSION_TTL_MINUTES),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct SessionContext {
    current: Option<Session>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any existing session.
    pub fn login(&mut self, session: Session) {
        info!(user_id = session.user_id, role = %session.role, "Logged in");
        self.current = Some(session);
    }

    pub fn logout(&mut self) -> Option<Session> {
        let previous = self.current.take();
        if let Some(session) = &previous {
            info!(user_id = session.user_id, "Logged out");
        }
        previous
    }

    /// The live session, if any. An expired session is cleared.
    pub fn active(&mut self, now: DateTime<Utc>) -> Result<&Session, SessionError> {
        match self.current.take() {
            None => Err(SessionError::NotLoggedIn),
            Some(session) if session.is_expired(now) => {
                debug!(user_id = session.user_id, expires_at = %session.expires_at, "Session expired");
                Err(SessionError::Expired(session.expires_at))
            }
            Some(session) => Ok(&*self.current.insert(session)),
        }
    }

    /// Value for an `Authorization` header.
    pub fn authorization_header(&mut self, now: DateTime<Utc>) -> Result<String, SessionError> {
        self.active(now).map(|s| format!("Bearer {}", s.token))
    }

    /// Admins pass every role check.
    pub fn require_role(&mut self, required: Role, now: DateTime<Utc>) -> Result<&Session, SessionError> {
        let session = self.active(now)?;
        if session.role == required || session.role == Role::Admin {
            Ok(session)
        } else {
            Err(SessionError::Forbidden {
                required,
                actual: session.role,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn logged_in(role: Role) -> SessionContext {
        let mut ctx = SessionContext::new();
        ctx.login(Session::new("tok", 7, role, t0()));
        ctx
    }

    #[test]
    fn test_session_expires_after_thirty_minutes() {
        let session = Session::new("tok", 1, Role::User, t0());
        assert!(!session.is_expired(t0() + Duration::minutes(29)));
        assert!(session.is_expired(t0() + Duration::minutes(30)));
    }

    #[test]
    fn test_not_logged_in() {
        let mut ctx = SessionContext::new();
        assert_eq!(ctx.active(t0()), Err(SessionError::NotLoggedIn));
    }

    #[test]
    fn test_expired_session_is_cleared() {
        let mut ctx = logged_in(Role::Owner);
        let later = t0() + Duration::hours(1);
        assert!(matches!(ctx.active(later), Err(SessionError::Expired(_))));
        assert_eq!(ctx.active(t0()), Err(SessionError::NotLoggedIn));
    }

    #[test]
    fn test_authorization_header() {
        let mut ctx = logged_in(Role::User);
        assert_eq!(ctx.authorization_header(t0()).unwrap(), "Bearer tok");
        ctx.logout();
        assert!(ctx.authorization_header(t0()).is_err());
    }

    #[test]
    fn test_require_role() {
        let mut ctx = logged_in(Role::Owner);
        assert!(ctx.require_role(Role::Owner, t0()).is_ok());
        assert_eq!(
            ctx.require_role(Role::User, t0()).unwrap_err(),
            SessionError::Forbidden {
                required: Role::User,
                actual: Role::Owner
            }
        );

        let mut admin = logged_in(Role::Admin);
        assert!(admin.require_role(Role::Owner, t0()).is_ok());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("customer".parse::<Role>().unwrap(), Role::User);
        assert!("chef".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
