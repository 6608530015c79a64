//! Admin session flag. Lives only as long as the process; never persisted.

use crate::models::AdminSettings;

#[derive(Debug, Default)]
pub struct AdminSession {
    logged_in: bool,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact, plaintext comparison against the configured password.
    /// A mismatch leaves the session as it was.
    pub fn login(&mut self, settings: &AdminSettings, password: &str) -> bool {
        if password == settings.password {
            self.logged_in = true;
            tracing::info!("admin logged in");
            true
        } else {
            tracing::warn!("admin login rejected");
            false
        }
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_password_logs_in() {
        let mut session = AdminSession::new();
        assert!(!session.is_logged_in());
        assert!(session.login(&AdminSettings::default(), "admin123"));
        assert!(session.is_logged_in());
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let mut session = AdminSession::new();
        let settings = AdminSettings::default();
        for attempt in ["", "admin", "Admin123", "admin123 "] {
            assert!(!session.login(&settings, attempt));
            assert!(!session.is_logged_in());
        }
    }

    #[test]
    fn test_changed_password_replaces_default() {
        let settings = AdminSettings {
            password: "n3w".to_string(),
            ..AdminSettings::default()
        };
        let mut session = AdminSession::new();
        assert!(!session.login(&settings, "admin123"));
        assert!(session.login(&settings, "n3w"));
    }

    #[test]
    fn test_logout_is_unconditional() {
        let mut session = AdminSession::new();
        session.logout();
        assert!(!session.is_logged_in());

        session.login(&AdminSettings::default(), "admin123");
        session.logout();
        assert!(!session.is_logged_in());
    }
}
