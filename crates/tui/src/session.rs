//! Session context: the bearer token every service call reads.
//!
//! The token is looked up synchronously per request, so a token typed in the
//! prompt screen is picked up by the next call without rebuilding the client.

use std::sync::RwLock;

/// Supplies the current access token, if any.
pub trait TokenSource: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct Session {
    token: RwLock<Option<String>>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(normalize(token)),
        }
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = normalize(token);
        }
    }

    pub fn has_token(&self) -> bool {
        self.access_token().is_some()
    }
}

impl TokenSource for Session {
    fn access_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }
}

fn normalize(token: Option<String>) -> Option<String> {
    token
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_counts_as_missing() {
        let session = Session::new(Some("   ".to_string()));
        assert!(!session.has_token());
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn set_token_replaces_previous_value() {
        let session = Session::new(None);
        session.set_token(Some(" abc ".to_string()));
        assert_eq!(session.access_token().as_deref(), Some("abc"));

        session.set_token(None);
        assert!(!session.has_token());
    }
}
