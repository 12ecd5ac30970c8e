use std::env;

/// Admin credential check.
///
/// Reproduces the pass/fail contract of the dashboard login and nothing
/// more; hardening (hashing, lockout, sessions) is out of scope.
#[derive(Clone, Debug)]
pub struct AdminAuth {
    username: String,
    password: String,
}

impl AdminAuth {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build from `TRACKER_ADMIN_PASSWORD` (required) and
    /// `TRACKER_ADMIN_USER` (defaults to `Creator`).
    ///
    /// Returns `None` when no password is configured, in which case the
    /// presentation layer has no admin login to offer.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let password = env::var("TRACKER_ADMIN_PASSWORD").ok()?;
        if password.trim().is_empty() {
            return None;
        }
        let username = env::var("TRACKER_ADMIN_USER").unwrap_or_else(|_| "Creator".into());
        Some(Self { username, password })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// True iff the candidate password matches exactly.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        candidate == self.password
    }
}
