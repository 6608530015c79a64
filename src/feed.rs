use crate::models::{CategoryFilter, Post};

/// Posts revealed per "load more" step.
pub const POSTS_PER_PAGE: usize = 12;

/// Public view over the post collection: approved posts only, one category
/// tab at a time, newest first, revealed a page at a time.
#[derive(Debug, Clone)]
pub struct Feed {
    category: CategoryFilter,
    page_size: usize,
    display_count: usize,
}

impl Default for Feed {
    fn default() -> Self {
        Self::new(POSTS_PER_PAGE)
    }
}

impl Feed {
    pub fn new(page_size: usize) -> Self {
        let page_size = page_size.max(1);
        Self {
            category: CategoryFilter::All,
            page_size,
            display_count: page_size,
        }
    }

    pub fn display_count(&self) -> usize {
        self.display_count
    }

    /// Switching tabs starts again from the first page.
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.category = category;
        self.display_count = self.page_size;
    }

    pub fn load_more(&mut self) {
        self.display_count = self.display_count.saturating_add(self.page_size);
    }

    /// Reveals the first `pages` pages at once; zero counts as one.
    pub fn show_pages(&mut self, pages: usize) {
        self.display_count = self.page_size.saturating_mul(pages.max(1));
    }

    /// Approved posts in the selected category, newest first. Posts sharing a
    /// timestamp keep their collection order.
    pub fn filtered<'p>(&self, posts: &'p [Post]) -> Vec<&'p Post> {
        let mut filtered: Vec<&Post> = posts
            .iter()
            .filter(|p| p.approved && self.category.matches(p.category))
            .collect();
        filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        filtered
    }

    pub fn page<'p>(&self, posts: &'p [Post]) -> FeedPage<'p> {
        let filtered = self.filtered(posts);
        let total = filtered.len();
        let visible = filtered.into_iter().take(self.display_count).collect();
        FeedPage {
            category: self.category,
            posts: visible,
            total,
            has_more: total > self.display_count,
        }
    }
}

#[derive(Debug)]
pub struct FeedPage<'p> {
    pub category: CategoryFilter,
    pub posts: Vec<&'p Post>,
    pub total: usize,
    pub has_more: bool,
}

impl FeedPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn empty_message(&self) -> String {
        match self.category {
            CategoryFilter::All => "No approved posts available yet.".to_string(),
            CategoryFilter::Only(category) => {
                format!("No approved posts in \"{}\" category.", category)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, DeviceTag};
    use chrono::{Duration, TimeZone, Utc};

    fn post(id: usize, category: Category, approved: bool) -> Post {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Post {
            id: id.to_string(),
            title: format!("post {}", id),
            device_tag: DeviceTag::Pc,
            category,
            copyable_text: "code".to_string(),
            description: String::new(),
            posted_by: "someone".to_string(),
            image_url: None,
            approved,
            created_at: base + Duration::minutes(id as i64),
        }
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_feed_never_shows_unapproved_posts() {
        let posts = vec![
            post(1, Category::Ar, true),
            post(2, Category::Ar, false),
            post(3, Category::Smg, false),
        ];
        let page = Feed::default().page(&posts);
        assert_eq!(ids(&page.posts), ["1"]);
        assert!(page.posts.iter().all(|p| p.approved));
    }

    #[test]
    fn test_category_filter_is_exact() {
        let posts = vec![
            post(1, Category::SniperRifle, true),
            post(2, Category::MarksmanRifle, true),
            post(3, Category::SniperRifle, true),
        ];
        let mut feed = Feed::default();
        feed.select_category(CategoryFilter::Only(Category::SniperRifle));
        assert_eq!(ids(&feed.page(&posts).posts), ["3", "1"]);

        feed.select_category(CategoryFilter::All);
        assert_eq!(feed.page(&posts).total, 3);
    }

    #[test]
    fn test_newest_first_regardless_of_collection_order() {
        let posts = vec![
            post(2, Category::Lmg, true),
            post(5, Category::Lmg, true),
            post(1, Category::Lmg, true),
        ];
        assert_eq!(ids(&Feed::default().page(&posts).posts), ["5", "2", "1"]);
    }

    #[test]
    fn test_load_more_pages_through_results() {
        let posts: Vec<Post> = (1..=5).map(|i| post(i, Category::HandGun, true)).collect();
        let mut feed = Feed::new(2);

        let page = feed.page(&posts);
        assert_eq!(ids(&page.posts), ["5", "4"]);
        assert!(page.has_more);

        feed.load_more();
        feed.load_more();
        let page = feed.page(&posts);
        assert_eq!(page.posts.len(), 5);
        assert!(!page.has_more);
    }

    #[test]
    fn test_selecting_category_resets_page() {
        let mut feed = Feed::new(3);
        feed.load_more();
        assert_eq!(feed.display_count(), 6);
        feed.select_category(CategoryFilter::Only(Category::Ar));
        assert_eq!(feed.display_count(), 3);
    }

    #[test]
    fn test_huge_page_counts_saturate() {
        let posts: Vec<Post> = (1..=3).map(|i| post(i, Category::Ar, true)).collect();

        let mut feed = Feed::new(usize::MAX);
        feed.load_more();
        assert_eq!(feed.display_count(), usize::MAX);

        let mut feed = Feed::new(2);
        feed.show_pages(100_000_000_000_000);
        let page = feed.page(&posts);
        assert_eq!(page.posts.len(), 3);
        assert!(!page.has_more);

        feed.show_pages(0);
        assert_eq!(feed.display_count(), 2);
    }

    #[test]
    fn test_empty_messages() {
        let posts: Vec<Post> = Vec::new();
        let mut feed = Feed::default();
        assert_eq!(
            feed.page(&posts).empty_message(),
            "No approved posts available yet."
        );
        feed.select_category(CategoryFilter::Only(Category::Shotgun));
        let page = feed.page(&posts);
        assert!(page.is_empty());
        assert_eq!(
            page.empty_message(),
            "No approved posts in \"Shotgun\" category."
        );
    }
}
