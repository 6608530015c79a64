use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod settings;

pub use settings::{AdminSettings, ColorsPatch, CustomColors, LinkButton, SettingsPatch};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum DeviceTag {
    #[serde(rename = "PC")]
    Pc,
    Mobile,
}

impl DeviceTag {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceTag::Pc => "PC",
            DeviceTag::Mobile => "Mobile",
        }
    }
}

impl fmt::Display for DeviceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pc" => Ok(DeviceTag::Pc),
            "mobile" => Ok(DeviceTag::Mobile),
            _ => Err(ParseError::DeviceTag(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Category {
    #[serde(rename = "AR")]
    Ar,
    #[serde(rename = "SMG")]
    Smg,
    Shotgun,
    #[serde(rename = "LMG")]
    Lmg,
    #[serde(rename = "Sniper Rifle")]
    SniperRifle,
    #[serde(rename = "Marksman Rifle")]
    MarksmanRifle,
    #[serde(rename = "Hand Gun")]
    HandGun,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Category; 7] = [
        Category::Ar,
        Category::Smg,
        Category::Shotgun,
        Category::Lmg,
        Category::SniperRifle,
        Category::MarksmanRifle,
        Category::HandGun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ar => "AR",
            Category::Smg => "SMG",
            Category::Shotgun => "Shotgun",
            Category::Lmg => "LMG",
            Category::SniperRifle => "Sniper Rifle",
            Category::MarksmanRifle => "Marksman Rifle",
            Category::HandGun => "Hand Gun",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Category::ALL
            .into_iter()
            .find(|c| normalize_label(c.as_str()) == wanted)
            .ok_or_else(|| ParseError::Category(s.to_string()))
    }
}

/// Feed selector: every category, or exactly one.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid device tag: {0} (expected PC or Mobile)")]
    DeviceTag(String),
    #[error("Invalid category: {0}")]
    Category(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub device_tag: DeviceTag,
    pub category: Category,
    pub copyable_text: String,
    pub description: String,
    pub posted_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub approved: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Builds an unapproved post from a validated draft.
    pub fn from_draft(draft: PostDraft, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            device_tag: draft.device_tag,
            category: draft.category,
            copyable_text: draft.copyable_text,
            description: draft.description,
            posted_by: draft.posted_by,
            image_url: draft.image_url,
            approved: false,
            created_at,
        }
    }
}

/// Everything a visitor supplies when submitting a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub device_tag: DeviceTag,
    pub category: Category,
    pub copyable_text: String,
    pub description: String,
    pub posted_by: String,
    pub image_url: Option<String>,
}

/// Raw submission form, before required fields are checked.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub title: String,
    pub device_tag: Option<DeviceTag>,
    pub category: Option<Category>,
    pub copyable_text: String,
    pub description: String,
    pub posted_by: String,
    pub image_url: String,
}

impl PostForm {
    pub fn validate(self) -> Result<PostDraft, DraftError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.device_tag.is_none() {
            missing.push("device tag");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.copyable_text.trim().is_empty() {
            missing.push("copyable text");
        }
        if self.posted_by.trim().is_empty() {
            missing.push("posted by");
        }

        match (self.device_tag, self.category) {
            (Some(device_tag), Some(category)) if missing.is_empty() => Ok(PostDraft {
                title: self.title,
                device_tag,
                category,
                copyable_text: self.copyable_text,
                description: self.description,
                posted_by: self.posted_by,
                image_url: Some(self.image_url).filter(|url| !url.trim().is_empty()),
            }),
            _ => Err(DraftError::MissingFields(missing)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Please fill in all required fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}
