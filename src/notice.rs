use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A short user-facing message, shown once after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub title: &'static str,
    pub description: String,
}

impl Notice {
    pub fn info(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            title,
            description: description.into(),
        }
    }

    pub fn error(title: &'static str, description: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            title,
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    /// Errors go to stderr, everything else to stdout.
    pub fn emit(&self) {
        match self.level {
            Level::Info => println!("{}", self),
            Level::Error => eprintln!("{}", self),
        }
    }

    pub fn post_created() -> Self {
        Self::info("Post created", "Your post has been submitted for approval")
    }

    pub fn missing_fields(details: impl Into<String>) -> Self {
        Self::error("Missing fields", details)
    }

    pub fn login_successful() -> Self {
        Self::info("Login successful", "Welcome to admin panel")
    }

    pub fn login_failed() -> Self {
        Self::error("Login failed", "Incorrect password")
    }

    pub fn logged_out() -> Self {
        Self::info("Logged out", "You have been logged out successfully")
    }

    pub fn post_approved() -> Self {
        Self::info("Post approved", "The post is now visible to all users")
    }

    pub fn post_deleted() -> Self {
        Self::info("Post deleted", "The post has been removed successfully")
    }

    pub fn post_not_found(id: &str) -> Self {
        Self::info("Nothing to do", format!("No post with id {}", id))
    }

    pub fn settings_updated() -> Self {
        Self::info("Settings updated", "Admin settings have been saved successfully")
    }

    pub fn copied() -> Self {
        Self::info("Copied to clipboard", "Text has been copied successfully")
    }

    pub fn copy_failed() -> Self {
        Self::error("Copy failed", "Unable to copy text to clipboard")
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}
