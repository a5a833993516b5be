//! Terminal styling helpers

use anstream::eprintln;
use owo_colors::{OwoColorize, Stream};
use squash_merge::error::Error;
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold
    fn emphasis(&self) -> String;
    /// Cyan, for names and refs
    fn accent(&self) -> String;
    /// Dimmed, for secondary information
    fn muted(&self) -> String;
    /// Yellow
    fn warn(&self) -> String;
    /// Green
    fn success(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.bold())
            .to_string()
    }

    fn accent(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string()
    }

    fn muted(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string()
    }

    fn warn(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.yellow())
            .to_string()
    }

    fn success(&self) -> String {
        self.if_supports_color(Stream::Stdout, |t| t.green())
            .to_string()
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Render `text` as a terminal hyperlink to `url` when the terminal supports it
pub fn hyperlink(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}

/// Print a fatal error to stderr
pub fn print_error(error: &Error) {
    let label = "Error:".if_supports_color(Stream::Stderr, |t| t.red()).to_string();
    eprintln!("{label} {error}");
}
