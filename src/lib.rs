//! A small board for sharing weapon loadouts: visitors browse approved posts
//! by category and copy their loadout text, an admin approves submissions and
//! edits the site settings. State lives in a string-keyed store on disk.

pub mod app;
pub mod board;
pub mod cli;
pub mod config;
pub mod external;
pub mod feed;
pub mod models;
pub mod notice;
pub mod post_store;
pub mod render;
pub mod session;
pub mod settings_store;
pub mod storage;
