/// Source of the personal access token sent in the `Authorization` header.
pub trait TokenProvider: Send + Sync {
    /// `None` when no token is configured.
    fn token(&self) -> Option<String>;
}

/// Reads the token from the environment variable named by the configured
/// access property.
#[derive(Debug, Clone)]
pub struct EnvTokenProvider {
    variable: String,
}

impl EnvTokenProvider {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }
}

impl TokenProvider for EnvTokenProvider {
    fn token(&self) -> Option<String> {
        std::env::var(&self.variable).ok().and_then(non_blank)
    }
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone().and_then(non_blank)
    }
}

/// Blank tokens count as missing; anything else is sent exactly as given.
fn non_blank(token: String) -> Option<String> {
    if token.trim().is_empty() { None } else { Some(token) }
}
