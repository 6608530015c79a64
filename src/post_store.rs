use crate::models::{Category, DeviceTag, Post, PostDraft};
use crate::storage::{Storage, StorageError, POSTS_KEY};
use chrono::{DateTime, Utc};

/// The post collection, held in memory and written through to storage after
/// every mutation. Newest submissions sit at the front.
pub struct PostStore<'a> {
    storage: &'a dyn Storage,
    posts: Vec<Post>,
}

impl<'a> PostStore<'a> {
    /// Rehydrates the collection. An absent key seeds the demo posts; a value
    /// that cannot be read leaves the store empty and storage untouched.
    pub fn load(storage: &'a dyn Storage) -> Self {
        let mut store = Self {
            storage,
            posts: Vec::new(),
        };

        match storage.get_item(POSTS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Post>>(&raw) {
                Ok(posts) => store.posts = posts,
                Err(e) => tracing::warn!(error = %e, "stored posts are unreadable, starting empty"),
            },
            Ok(None) => {
                tracing::info!("no stored posts, seeding demo content");
                store.posts = demo_posts(Utc::now());
                store.persist();
            }
            Err(e) => tracing::error!(error = %e, "failed to read posts from storage"),
        }

        store
    }

    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    pub fn get(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    /// Posts still awaiting approval, in collection order.
    pub fn pending(&self) -> Vec<&Post> {
        self.posts.iter().filter(|p| !p.approved).collect()
    }

    pub fn add(&mut self, draft: PostDraft) -> Post {
        self.add_at(draft, Utc::now())
    }

    pub fn add_at(&mut self, draft: PostDraft, created_at: DateTime<Utc>) -> Post {
        let id = self.next_id(created_at);
        let post = Post::from_draft(draft, id, created_at);
        tracing::info!(id = %post.id, category = %post.category, "post submitted");

        self.posts.insert(0, post.clone());
        self.persist();
        post
    }

    /// Returns whether a post with `id` exists.
    pub fn approve(&mut self, id: &str) -> bool {
        let Some(post) = self.posts.iter_mut().find(|p| p.id == id) else {
            tracing::debug!(id, "approve: no such post");
            return false;
        };
        post.approved = true;
        self.persist();
        true
    }

    /// Returns whether a post with `id` was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        if self.posts.len() == before {
            tracing::debug!(id, "remove: no such post");
            return false;
        }
        self.persist();
        true
    }

    /// Millisecond timestamp, bumped past any id already taken.
    fn next_id(&self, created_at: DateTime<Utc>) -> String {
        let mut candidate = created_at.timestamp_millis();
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    // A failed write is logged; the in-memory collection stays authoritative.
    fn persist(&self) {
        let result = serde_json::to_string(&self.posts)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(POSTS_KEY, &json));
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to persist posts");
        }
    }
}

fn demo_posts(now: DateTime<Utc>) -> Vec<Post> {
    let demo = |id: &str,
                title: &str,
                device_tag: DeviceTag,
                category: Category,
                copyable_text: &str,
                description: &str,
                posted_by: &str| Post {
        id: id.to_string(),
        title: title.to_string(),
        device_tag,
        category,
        copyable_text: copyable_text.to_string(),
        description: description.to_string(),
        posted_by: posted_by.to_string(),
        image_url: None,
        approved: true,
        created_at: now,
    };

    vec![
        demo(
            "1",
            "Advanced AR Setup",
            DeviceTag::Pc,
            Category::Ar,
            "M4A1-S | Blue Phosphor",
            "High damage assault rifle perfect for mid-range combat. Excellent accuracy and manageable recoil.",
            "WeaponMaster",
        ),
        demo(
            "2",
            "Close Combat SMG",
            DeviceTag::Mobile,
            Category::Smg,
            "Vector | Neon Storm",
            "Fast firing SMG designed for close quarters combat. High mobility and excellent hip fire accuracy.",
            "TacticPro",
        ),
        demo(
            "3",
            "Precision Sniper Build",
            DeviceTag::Pc,
            Category::SniperRifle,
            "AWM | Arctic Warfare",
            "One-shot potential sniper rifle for long-range elimination. Requires skill but devastating when mastered.",
            "SniperElite",
        ),
    ]
}
