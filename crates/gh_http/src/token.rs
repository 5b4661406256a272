use std::fmt;

use anyhow::{anyhow, Result};
use http::HeaderValue;

/// A personal access token, taken verbatim from the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct GithubToken {
    secret: String,
}

impl GithubToken {
    /// Returns `None` for an empty or whitespace-only value, which GitHub
    /// would reject anyway.
    pub fn new(secret: impl Into<String>) -> Option<Self> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            None
        } else {
            Some(Self { secret })
        }
    }

    pub fn authorization(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.secret))
            .map_err(|_| anyhow!("token contains characters not valid in a header"))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for GithubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubToken")
            .field("secret", &"<redacted>")
            .finish()
    }
}
