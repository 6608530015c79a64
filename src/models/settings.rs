use serde::{Deserialize, Serialize};

const DEFAULT_PASSWORD: &str = "admin123";
const DEFAULT_LINK_URL: &str = "https://example.com";

/// Site-wide settings editable from the admin panel.
///
/// Stored fields are overlaid on top of the defaults when decoding, so a
/// record written by an older build still yields a complete value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminSettings {
    /// Compared in plaintext and persisted alongside the cosmetic settings.
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_button_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_button_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_button_text: Option<String>,
    pub custom_colors: CustomColors,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            password: DEFAULT_PASSWORD.to_string(),
            left_button_url: Some(DEFAULT_LINK_URL.to_string()),
            left_button_text: Some("Link 1".to_string()),
            right_button_url: Some(DEFAULT_LINK_URL.to_string()),
            right_button_text: Some("Link 2".to_string()),
            custom_colors: CustomColors::default(),
        }
    }
}

impl AdminSettings {
    /// Shallow merge, except `custom_colors` which is merged per color.
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(url) = patch.left_button_url {
            self.left_button_url = Some(url);
        }
        if let Some(text) = patch.left_button_text {
            self.left_button_text = Some(text);
        }
        if let Some(url) = patch.right_button_url {
            self.right_button_url = Some(url);
        }
        if let Some(text) = patch.right_button_text {
            self.right_button_text = Some(text);
        }
        if let Some(colors) = patch.custom_colors {
            self.custom_colors.apply(colors);
        }
    }

    pub fn left_button(&self) -> Option<LinkButton> {
        LinkButton::visible(&self.left_button_text, &self.left_button_url)
    }

    pub fn right_button(&self) -> Option<LinkButton> {
        LinkButton::visible(&self.right_button_text, &self.right_button_url)
    }
}

/// A header link; only shown when both label and target are filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkButton {
    pub label: String,
    pub url: String,
}

impl LinkButton {
    fn visible(label: &Option<String>, url: &Option<String>) -> Option<Self> {
        match (label.as_deref(), url.as_deref()) {
            (Some(label), Some(url)) if !label.is_empty() && !url.is_empty() => Some(Self {
                label: label.to_string(),
                url: url.to_string(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomColors {
    pub background: String,
    pub button_heading: String,
    pub button_title: String,
    pub button_title_hover: String,
    pub button_content: String,
    pub post_background: String,
    pub post_heading: String,
    pub post_text: String,
}

impl Default for CustomColors {
    fn default() -> Self {
        Self {
            background: "hsl(210 11% 8%)".to_string(),
            button_heading: "hsl(210 20% 95%)".to_string(),
            button_title: "hsl(210 20% 95%)".to_string(),
            button_title_hover: "hsl(150 65% 55%)".to_string(),
            button_content: "hsl(210 15% 85%)".to_string(),
            post_background: "hsl(210 15% 12%)".to_string(),
            post_heading: "hsl(210 20% 95%)".to_string(),
            post_text: "hsl(210 15% 85%)".to_string(),
        }
    }
}

impl CustomColors {
    pub fn apply(&mut self, patch: ColorsPatch) {
        let slots = [
            (&mut self.background, patch.background),
            (&mut self.button_heading, patch.button_heading),
            (&mut self.button_title, patch.button_title),
            (&mut self.button_title_hover, patch.button_title_hover),
            (&mut self.button_content, patch.button_content),
            (&mut self.post_background, patch.post_background),
            (&mut self.post_heading, patch.post_heading),
            (&mut self.post_text, patch.post_text),
        ];
        for (slot, value) in slots {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }

    /// Name/value pairs in panel order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("background", self.background.as_str()),
            ("buttonHeading", self.button_heading.as_str()),
            ("buttonTitle", self.button_title.as_str()),
            ("buttonTitleHover", self.button_title_hover.as_str()),
            ("buttonContent", self.button_content.as_str()),
            ("postBackground", self.post_background.as_str()),
            ("postHeading", self.post_heading.as_str()),
            ("postText", self.post_text.as_str()),
        ]
    }
}

/// Partial settings update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub password: Option<String>,
    pub left_button_url: Option<String>,
    pub left_button_text: Option<String>,
    pub right_button_url: Option<String>,
    pub right_button_text: Option<String>,
    pub custom_colors: Option<ColorsPatch>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorsPatch {
    pub background: Option<String>,
    pub button_heading: Option<String>,
    pub button_title: Option<String>,
    pub button_title_hover: Option<String>,
    pub button_content: Option<String>,
    pub post_background: Option<String>,
    pub post_heading: Option<String>,
    pub post_text: Option<String>,
}

impl ColorsPatch {
    pub fn is_empty(&self) -> bool {
        *self == ColorsPatch::default()
    }
}
