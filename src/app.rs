use crate::board::{Board, BoardError};
use crate::cli::{AdminCommands, Cli, Commands, ConfigCommands, PostCommands, Side};
use crate::config::{ConfigError, ConfigManager};
use crate::external::{
    open_if_present, AlwaysConfirm, BrowserNavigator, ClipboardError, CommandClipboard, Confirm,
    NavigateError, PromptConfirm, WriterClipboard,
};
use crate::feed::Feed;
use crate::models::{Post, SettingsPatch};
use crate::notice::Notice;
use crate::render;
use crate::storage::{Storage, StorageError, POSTS_KEY, SETTINGS_KEY};
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
    #[error("{0}")]
    Navigate(#[from] NavigateError),
}

/// Runs one command against freshly loaded state, the way a page load would.
pub fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let mut config = ConfigManager::from_env()?;

    match cli.command {
        Commands::Config(command) => run_config(&mut config, command),
        Commands::Feed { category, pages } => {
            let storage = config.create_storage()?;
            let board = Board::load(storage.as_ref());
            let pages = pages.max(1);
            let mut feed = Feed::new(config.page_size());
            feed.select_category(category);
            feed.show_pages(pages);
            print!(
                "{}",
                render::feed(&board.feed_page(&feed), pages.saturating_add(1))
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Links => {
            let storage = config.create_storage()?;
            let board = Board::load(storage.as_ref());
            let (left, right) = board.link_buttons();
            print!("{}", render::links(left.as_ref(), right.as_ref()));
            Ok(ExitCode::SUCCESS)
        }
        Commands::OpenLink { side } => {
            let storage = config.create_storage()?;
            let board = Board::load(storage.as_ref());
            let (left, right) = board.link_buttons();
            let (name, button) = match side {
                Side::Left => ("left", left),
                Side::Right => ("right", right),
            };
            let url = button.as_ref().map(|b| b.url.as_str());
            if !open_if_present(&mut BrowserNavigator, url)? {
                println!("No {} link button configured.", name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Post(command) => {
            let storage = config.create_storage()?;
            run_post(&config, storage.as_ref(), command)
        }
        Commands::Admin { password, command } => {
            let storage = config.create_storage()?;
            run_admin(storage.as_ref(), &password, command)
        }
        Commands::Reset { yes } => {
            let storage = config.create_storage()?;
            run_reset(storage.as_ref(), yes)
        }
    }
}

fn run_post(
    config: &ConfigManager,
    storage: &dyn Storage,
    command: PostCommands,
) -> Result<ExitCode, AppError> {
    let mut board = Board::load(storage);

    match command {
        PostCommands::Add(args) => match board.submit(args.into()) {
            Ok(post) => {
                Notice::post_created().emit();
                println!("id: {}", post.id);
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => fail(e),
        },
        PostCommands::Copy { id } => {
            if board.post(&id).is_none() {
                Notice::post_not_found(&id).emit();
                return Ok(ExitCode::SUCCESS);
            }
            let notice = match config.clipboard_command() {
                Some(command) => board.copy_text(&id, &mut CommandClipboard::new(command)?),
                None => board.copy_text(&id, &mut WriterClipboard::stdout()),
            };
            // With the stdout fallback the copied text is the output; keep it clean.
            if config.clipboard_command().is_some() || notice.is_error() {
                notice.emit();
            } else {
                tracing::info!("{}", notice);
            }
            Ok(if notice.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        PostCommands::Image { id } => {
            if board.post(&id).is_none() {
                Notice::post_not_found(&id).emit();
            } else if !board.open_image(&id, &mut BrowserNavigator)? {
                println!("Post {} has no image attached.", id);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_admin(
    storage: &dyn Storage,
    password: &str,
    command: AdminCommands,
) -> Result<ExitCode, AppError> {
    let mut board = Board::load(storage);
    if let Err(e) = board.login(password) {
        return fail(e);
    }
    tracing::info!("{}", Notice::login_successful());

    match command {
        AdminCommands::Posts => {
            let posts: Vec<&Post> = board.posts().iter().collect();
            print!("{}", render::post_list(&posts));
        }
        AdminCommands::Pending => match board.pending() {
            Ok(posts) => print!("{}", render::post_list(&posts)),
            Err(e) => return fail(e),
        },
        AdminCommands::Approve { id } => match board.approve(&id) {
            Ok(true) => Notice::post_approved().emit(),
            Ok(false) => Notice::post_not_found(&id).emit(),
            Err(e) => return fail(e),
        },
        AdminCommands::Delete { id, yes } => {
            if board.post(&id).is_none() {
                Notice::post_not_found(&id).emit();
            } else if confirm(yes, "Are you sure you want to delete this post?") {
                match board.delete(&id) {
                    Ok(_) => Notice::post_deleted().emit(),
                    Err(e) => return fail(e),
                }
            } else {
                println!("Operation cancelled");
            }
        }
        AdminCommands::Settings => print!("{}", render::settings(board.settings())),
        AdminCommands::Set(args) => {
            let patch = SettingsPatch::from(args);
            if patch.is_empty() {
                println!("No settings given; nothing changed.");
            } else {
                match board.update_settings(patch) {
                    Ok(()) => Notice::settings_updated().emit(),
                    Err(e) => return fail(e),
                }
            }
        }
    }

    board.logout();
    tracing::info!("{}", Notice::logged_out());
    Ok(ExitCode::SUCCESS)
}

fn run_reset(storage: &dyn Storage, yes: bool) -> Result<ExitCode, AppError> {
    println!("Warning: This will delete all posts and settings");
    if !confirm(yes, "Are you sure you want to continue?") {
        println!("Operation cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    storage.remove_item(POSTS_KEY)?;
    storage.remove_item(SETTINGS_KEY)?;
    println!("Board has been reset; demo posts and default settings return on next load");
    Ok(ExitCode::SUCCESS)
}

fn run_config(config: &mut ConfigManager, command: ConfigCommands) -> Result<ExitCode, AppError> {
    match command {
        ConfigCommands::Get { key } => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => println!("{} is not set", key),
        },
        ConfigCommands::Set { key, value } => {
            config.set(&key, &value)?;
            println!("{} = {}", key, value);
        }
        ConfigCommands::Unset { key } => {
            config.unset(&key)?;
            println!("{} unset", key);
        }
        ConfigCommands::List => {
            for (key, value, is_default) in config.list() {
                let marker = if is_default { " (default)" } else { "" };
                println!("{} = {}{}", key, value, marker);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn confirm(yes: bool, question: &str) -> bool {
    if yes {
        AlwaysConfirm.confirm(question)
    } else {
        PromptConfirm::stdin().confirm(question)
    }
}

fn fail(error: BoardError) -> Result<ExitCode, AppError> {
    error.notice().emit();
    Ok(ExitCode::FAILURE)
}
