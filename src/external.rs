//! Side effects that leave the process: clipboard, browser, and the yes/no prompt.

use std::io::{self, BufRead, Write};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Clipboard command is empty")]
    EmptyCommand,
    #[error("Clipboard command exited with {0}")]
    CommandFailed(std::process::ExitStatus),
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Pipes the text into an external program such as `xclip -selection clipboard`.
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(command: &str) -> Result<Self, ClipboardError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ClipboardError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        tracing::debug!(program = %self.program, "piping text to clipboard command");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()?;

        // Dropping stdin closes the pipe so the child sees EOF.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child.wait()?;
        written?;
        if !status.success() {
            return Err(ClipboardError::CommandFailed(status));
        }
        Ok(())
    }
}

/// Writes the text to any sink; the CLI uses stdout when no command is configured.
pub struct WriterClipboard<W: Write> {
    out: W,
}

impl<W: Write> WriterClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterClipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Clipboard for WriterClipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("Failed to open {url}: {source}")]
    Open {
        url: String,
        #[source]
        source: io::Error,
    },
}

pub trait Navigator {
    fn open_url(&mut self, url: &str) -> Result<(), NavigateError>;
}

/// Opens URLs in the user's default browser.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open_url(&mut self, url: &str) -> Result<(), NavigateError> {
        tracing::info!(url, "opening external link");
        open::that(url).map_err(|source| NavigateError::Open {
            url: url.to_string(),
            source,
        })
    }
}

/// Opens `url` when there is one; absent or blank targets are ignored.
/// Returns whether anything was opened.
pub fn open_if_present(
    navigator: &mut dyn Navigator,
    url: Option<&str>,
) -> Result<bool, NavigateError> {
    match url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => navigator.open_url(url).map(|_| true),
        None => Ok(false),
    }
}

pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Asks on stdout and reads a line from the given input. Only `y`/`yes` accept.
pub struct PromptConfirm<R: BufRead> {
    input: R,
}

impl<R: BufRead> PromptConfirm<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl PromptConfirm<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Confirm for PromptConfirm<R> {
    fn confirm(&mut self, question: &str) -> bool {
        print!("{} [y/N] ", question);
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Used for `--yes`.
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}
