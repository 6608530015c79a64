use crate::external::{open_if_present, Clipboard, NavigateError, Navigator};
use crate::feed::{Feed, FeedPage};
use crate::models::{AdminSettings, DraftError, LinkButton, Post, PostForm, SettingsPatch};
use crate::notice::Notice;
use crate::post_store::PostStore;
use crate::session::AdminSession;
use crate::settings_store::SettingsStore;
use crate::storage::Storage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Incorrect password")]
    LoginFailed,
    #[error("Admin login required")]
    NotAuthorized,
    #[error(transparent)]
    Draft(#[from] DraftError),
}

impl BoardError {
    pub fn notice(&self) -> Notice {
        match self {
            BoardError::LoginFailed => Notice::login_failed(),
            BoardError::NotAuthorized => Notice::error("Not authorized", self.to_string()),
            BoardError::Draft(e) => Notice::missing_fields(e.to_string()),
        }
    }
}

/// Owns everything one page load sees: posts, settings and the admin session.
/// Handed explicitly to whatever renders or mutates the board.
pub struct Board<'a> {
    posts: PostStore<'a>,
    settings: SettingsStore<'a>,
    session: AdminSession,
}

impl<'a> Board<'a> {
    /// Rehydrates from storage. Every load starts logged out.
    pub fn load(storage: &'a dyn Storage) -> Self {
        Self {
            posts: PostStore::load(storage),
            settings: SettingsStore::load(storage),
            session: AdminSession::new(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        self.posts.list()
    }

    pub fn post(&self, id: &str) -> Option<&Post> {
        self.posts.get(id)
    }

    pub fn settings(&self) -> &AdminSettings {
        self.settings.get()
    }

    pub fn link_buttons(&self) -> (Option<LinkButton>, Option<LinkButton>) {
        self.settings.link_buttons()
    }

    pub fn is_admin(&self) -> bool {
        self.session.is_logged_in()
    }

    pub fn login(&mut self, password: &str) -> Result<(), BoardError> {
        if self.session.login(self.settings.get(), password) {
            Ok(())
        } else {
            Err(BoardError::LoginFailed)
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
    }

    /// Open to every visitor; the post waits for approval.
    pub fn submit(&mut self, form: PostForm) -> Result<Post, BoardError> {
        let draft = form.validate()?;
        Ok(self.posts.add(draft))
    }

    pub fn pending(&self) -> Result<Vec<&Post>, BoardError> {
        self.require_admin()?;
        Ok(self.posts.pending())
    }

    /// `Ok(false)` when no post has that id.
    pub fn approve(&mut self, id: &str) -> Result<bool, BoardError> {
        self.require_admin()?;
        Ok(self.posts.approve(id))
    }

    /// `Ok(false)` when no post has that id.
    pub fn delete(&mut self, id: &str) -> Result<bool, BoardError> {
        self.require_admin()?;
        Ok(self.posts.remove(id))
    }

    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<(), BoardError> {
        self.require_admin()?;
        self.settings.update(patch);
        Ok(())
    }

    pub fn feed_page(&self, feed: &Feed) -> FeedPage<'_> {
        feed.page(self.posts.list())
    }

    /// Puts a post's copyable text on the clipboard. Never changes board state.
    pub fn copy_text(&self, id: &str, clipboard: &mut dyn Clipboard) -> Notice {
        let Some(post) = self.posts.get(id) else {
            return Notice::post_not_found(id);
        };
        match clipboard.write_text(&post.copyable_text) {
            Ok(()) => Notice::copied(),
            Err(e) => {
                tracing::warn!(error = %e, id, "clipboard write failed");
                Notice::copy_failed()
            }
        }
    }

    /// Opens the attached image, if the post has one.
    pub fn open_image(
        &self,
        id: &str,
        navigator: &mut dyn Navigator,
    ) -> Result<bool, NavigateError> {
        let url = self.posts.get(id).and_then(|p| p.image_url.as_deref());
        open_if_present(navigator, url)
    }

    fn require_admin(&self) -> Result<(), BoardError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(BoardError::NotAuthorized)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{ClipboardError, WriterClipboard};
    use crate::models::{Category, CategoryFilter, DeviceTag};
    use crate::storage::MemoryStorage;

    fn form(title: &str, category: Category) -> PostForm {
        PostForm {
            title: title.to_string(),
            device_tag: Some(DeviceTag::Pc),
            category: Some(category),
            copyable_text: "RPK | Desert".to_string(),
            description: "Suppressive fire".to_string(),
            posted_by: "gunner".to_string(),
            image_url: "https://img.example/rpk.png".to_string(),
        }
    }

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::EmptyCommand)
        }
    }

    struct RecordingNavigator(Vec<String>);

    impl Navigator for RecordingNavigator {
        fn open_url(&mut self, url: &str) -> Result<(), NavigateError> {
            self.0.push(url.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_moderation_requires_login() {
        let storage = MemoryStorage::new();
        let mut board = Board::load(&storage);
        let id = board.submit(form("RPK", Category::Lmg)).unwrap().id;

        assert!(matches!(board.approve(&id), Err(BoardError::NotAuthorized)));
        assert!(matches!(board.delete(&id), Err(BoardError::NotAuthorized)));
        assert!(matches!(
            board.update_settings(SettingsPatch::default()),
            Err(BoardError::NotAuthorized)
        ));
        assert!(board.pending().is_err());
        assert!(!board.post(&id).unwrap().approved);
    }

    #[test]
    fn test_submission_reaches_feed_only_after_approval() {
        let storage = MemoryStorage::new();
        let mut board = Board::load(&storage);
        let id = board.submit(form("RPK", Category::Lmg)).unwrap().id;

        let mut feed = Feed::default();
        feed.select_category(CategoryFilter::Only(Category::Lmg));
        assert!(board.feed_page(&feed).is_empty());

        board.login("admin123").unwrap();
        assert_eq!(board.pending().unwrap().len(), 1);
        assert!(board.approve(&id).unwrap());

        let page = board.feed_page(&feed);
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].id, id);
    }

    #[test]
    fn test_invalid_submission_is_not_stored() {
        let storage = MemoryStorage::new();
        let mut board = Board::load(&storage);
        let before = board.posts().len();

        let mut incomplete = form("", Category::Ar);
        incomplete.category = None;
        let err = board.submit(incomplete).unwrap_err();
        assert_eq!(err.notice().title, "Missing fields");
        assert_eq!(board.posts().len(), before);
    }

    #[test]
    fn test_login_failure_keeps_session_closed() {
        let storage = MemoryStorage::new();
        let mut board = Board::load(&storage);
        assert!(matches!(board.login("guess"), Err(BoardError::LoginFailed)));
        assert!(!board.is_admin());

        board.login("admin123").unwrap();
        board.logout();
        assert!(!board.is_admin());
    }

    #[test]
    fn test_password_change_applies_to_next_load() {
        let storage = MemoryStorage::new();
        {
            let mut board = Board::load(&storage);
            board.login("admin123").unwrap();
            board
                .update_settings(SettingsPatch {
                    password: Some("rotated".to_string()),
                    ..Default::default()
                })
                .unwrap();
        }

        let mut board = Board::load(&storage);
        assert!(!board.is_admin());
        assert!(board.login("admin123").is_err());
        assert!(board.login("rotated").is_ok());
    }

    #[test]
    fn test_delete_twice_is_a_no_op() {
        let storage = MemoryStorage::new();
        let mut board = Board::load(&storage);
        board.login("admin123").unwrap();

        assert!(board.delete("1").unwrap());
        let remaining = board.posts().to_vec();
        assert!(!board.delete("1").unwrap());
        assert_eq!(board.posts(), remaining.as_slice());
    }

    #[test]
    fn test_copy_text_reports_outcome_without_changing_state() {
        let storage = MemoryStorage::new();
        let board = Board::load(&storage);

        let mut clipboard = WriterClipboard::new(Vec::new());
        assert_eq!(board.copy_text("3", &mut clipboard), Notice::copied());
        assert_eq!(clipboard.into_inner(), b"AWM | Arctic Warfare\n");

        let before = board.posts().to_vec();
        assert_eq!(
            board.copy_text("3", &mut BrokenClipboard),
            Notice::copy_failed()
        );
        assert_eq!(board.posts(), before.as_slice());
    }

    #[test]
    fn test_open_image_only_when_attached() {
        let storage = MemoryStorage::new();
        let mut board = Board::load(&storage);
        let id = board.submit(form("RPK", Category::Lmg)).unwrap().id;
        let mut navigator = RecordingNavigator(Vec::new());

        assert!(!board.open_image("1", &mut navigator).unwrap());
        assert!(!board.open_image("missing", &mut navigator).unwrap());
        assert!(board.open_image(&id, &mut navigator).unwrap());
        assert_eq!(navigator.0, ["https://img.example/rpk.png"]);
    }
}
