use crate::models::{Category, CategoryFilter, ColorsPatch, DeviceTag, PostForm, SettingsPatch};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "loadout-board",
    version,
    about = "Browse, share and moderate weapon loadout posts"
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show approved posts, newest first
    Feed {
        /// Category tab to show (All, AR, SMG, Shotgun, LMG, Sniper Rifle, Marksman Rifle, Hand Gun)
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,
        /// Number of pages to reveal
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Show the header link buttons
    Links,
    /// Open a header link button in the browser
    OpenLink {
        #[arg(value_enum)]
        side: Side,
    },
    /// Submit and interact with posts
    #[command(subcommand)]
    Post(PostCommands),
    /// Moderation and site settings (requires the admin password)
    Admin {
        #[arg(short, long)]
        password: String,
        #[command(subcommand)]
        command: AdminCommands,
    },
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Delete all stored posts and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// Submit a new post for approval
    Add(PostArgs),
    /// Copy a post's loadout text to the clipboard
    Copy { id: String },
    /// Open a post's attached image in the browser
    Image { id: String },
}

#[derive(Args, Debug, Default)]
pub struct PostArgs {
    #[arg(long, default_value = "")]
    pub title: String,
    /// PC or Mobile
    #[arg(long)]
    pub device: Option<DeviceTag>,
    #[arg(long)]
    pub category: Option<Category>,
    /// Text visitors can copy
    #[arg(long, default_value = "")]
    pub text: String,
    #[arg(long, default_value = "")]
    pub description: String,
    /// Author name
    #[arg(long = "by", default_value = "")]
    pub posted_by: String,
    #[arg(long, default_value = "")]
    pub image: String,
}

impl From<PostArgs> for PostForm {
    fn from(args: PostArgs) -> Self {
        PostForm {
            title: args.title,
            device_tag: args.device,
            category: args.category,
            copyable_text: args.text,
            description: args.description,
            posted_by: args.posted_by,
            image_url: args.image,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List every post, pending ones included
    Posts,
    /// List posts awaiting approval
    Pending,
    /// Approve a post so it appears in the feed
    Approve { id: String },
    /// Delete a post
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the current site settings
    Settings,
    /// Change site settings; unspecified fields keep their values
    Set(SettingsArgs),
}

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    #[arg(long)]
    pub new_password: Option<String>,
    #[arg(long)]
    pub left_text: Option<String>,
    #[arg(long)]
    pub left_url: Option<String>,
    #[arg(long)]
    pub right_text: Option<String>,
    #[arg(long)]
    pub right_url: Option<String>,
    #[arg(long)]
    pub background: Option<String>,
    #[arg(long)]
    pub button_heading: Option<String>,
    #[arg(long)]
    pub button_title: Option<String>,
    #[arg(long)]
    pub button_title_hover: Option<String>,
    #[arg(long)]
    pub button_content: Option<String>,
    #[arg(long)]
    pub post_background: Option<String>,
    #[arg(long)]
    pub post_heading: Option<String>,
    #[arg(long)]
    pub post_text: Option<String>,
}

impl From<SettingsArgs> for SettingsPatch {
    fn from(args: SettingsArgs) -> Self {
        let colors = ColorsPatch {
            background: args.background,
            button_heading: args.button_heading,
            button_title: args.button_title,
            button_title_hover: args.button_title_hover,
            button_content: args.button_content,
            post_background: args.post_background,
            post_heading: args.post_heading,
            post_text: args.post_text,
        };

        SettingsPatch {
            password: args.new_password,
            left_button_url: args.left_url,
            left_button_text: args.left_text,
            right_button_url: args.right_url,
            right_button_text: args.right_text,
            custom_colors: Some(colors).filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// Remove a configuration value
    Unset { key: String },
    /// List all configuration values
    List,
}
