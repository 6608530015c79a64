//! Plain-text views of the board for the terminal.

use crate::feed::FeedPage;
use crate::models::{AdminSettings, LinkButton, Post};
use std::fmt::Write;

pub fn post_card(post: &Post, show_status: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}  (id {})", post.device_tag, post.title, post.id);
    let _ = writeln!(
        out,
        "  {} | posted by {} | {}",
        post.category,
        post.posted_by,
        post.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out, "  copy: {}", post.copyable_text);
    if !post.description.is_empty() {
        let _ = writeln!(out, "  {}", post.description);
    }
    if let Some(url) = &post.image_url {
        let _ = writeln!(out, "  image: {}", url);
    }
    if show_status && !post.approved {
        let _ = writeln!(out, "  status: pending approval");
    }
    out
}

/// `next_pages` is the `--pages` value that reveals one more page.
pub fn feed(page: &FeedPage<'_>, next_pages: usize) -> String {
    if page.is_empty() {
        return format!("No posts found\n{}\n", page.empty_message());
    }

    let mut out = String::new();
    for post in &page.posts {
        out.push_str(&post_card(post, false));
        out.push('\n');
    }
    if page.has_more {
        let _ = writeln!(
            out,
            "Showing {} of {} posts. Load more with --pages {}.",
            page.posts.len(),
            page.total,
            next_pages
        );
    }
    out
}

pub fn post_list(posts: &[&Post]) -> String {
    if posts.is_empty() {
        return "No posts.\n".to_string();
    }
    posts
        .iter()
        .map(|p| post_card(p, true))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn links(left: Option<&LinkButton>, right: Option<&LinkButton>) -> String {
    let mut out = String::new();
    for (side, button) in [("left", left), ("right", right)] {
        if let Some(button) = button {
            let _ = writeln!(out, "{}: {} -> {}", side, button.label, button.url);
        }
    }
    if out.is_empty() {
        out.push_str("No link buttons configured.\n");
    }
    out
}

pub fn settings(settings: &AdminSettings) -> String {
    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "(unset)".to_string());

    let mut out = String::new();
    let _ = writeln!(out, "password: {}", settings.password);
    let _ = writeln!(
        out,
        "left button: {} -> {}",
        show(&settings.left_button_text),
        show(&settings.left_button_url)
    );
    let _ = writeln!(
        out,
        "right button: {} -> {}",
        show(&settings.right_button_text),
        show(&settings.right_button_url)
    );
    let _ = writeln!(out, "colors:");
    for (name, value) in settings.custom_colors.entries() {
        let _ = writeln!(out, "  {}: {}", name, value);
    }
    out
}
