/// Supplies the bearer credential attached to every request.
///
/// Looked up synchronously per request, so a token refreshed elsewhere is
/// picked up without rebuilding the client.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Fixed token, e.g. read once from the environment
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone()).filter(|t| !t.is_empty())
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        assert_eq!(StaticToken::new("abc").token().as_deref(), Some("abc"));
        assert_eq!(StaticToken::new("").token(), None);
        assert_eq!(format!("{:?}", StaticToken::new("abc")), "StaticToken(***)");
    }

    #[test]
    fn test_closure_provider() {
        let provider = || Some("from-closure".to_string());
        assert_eq!(provider.token().as_deref(), Some("from-closure"));
    }
}
