use serde::{Deserialize, Serialize};

/// Credentials handed out by `/login`, sent as a bearer token afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Session {
    pub fn new(token: impl Into<String>, is_admin: bool) -> Self {
        Self {
            token: Some(token.into()),
            is_admin,
        }
    }

    /// Parses the login response body, `"<token> <isAdmin>"`.
    pub fn from_login_response(body: &str) -> Self {
        let mut parts = body.trim().split(' ');
        let token = parts.next().filter(|t| !t.is_empty()).map(str::to_string);
        let is_admin = parts.next() == Some("true");
        Self { token, is_admin }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    pub fn shows_logout(&self) -> bool {
        self.is_authenticated()
    }

    pub fn shows_admin_link(&self) -> bool {
        self.is_admin
    }

    pub fn clear(&mut self) {
        *self = Session::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_and_admin_flag() {
        let s = Session::from_login_response("token123 true");
        assert_eq!(s.token.as_deref(), Some("token123"));
        assert!(s.is_admin);
        assert!(s.shows_admin_link());
        assert_eq!(s.bearer().as_deref(), Some("Bearer token123"));
    }

    #[test]
    fn admin_flag_defaults_to_false() {
        assert!(!Session::from_login_response("abc").is_admin);
        assert!(!Session::from_login_response("abc false").is_admin);
        assert!(!Session::from_login_response("").is_authenticated());
    }

    #[test]
    fn clear_hides_chrome() {
        let mut s = Session::new("t", true);
        assert!(s.shows_logout());
        s.clear();
        assert!(!s.shows_logout());
        assert!(!s.shows_admin_link());
    }
}
