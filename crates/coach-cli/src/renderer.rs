//! Markdown output for the terminal, styled with termimad or printed as
//! plain text.

use std::fmt::Display;

use termimad::{crossterm::style::Color, MadSkin};

/// Prints the markdown produced by the core `Display` impls.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Green);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.bullet.set_fg(Color::Green);

        Self { rich_enabled, skin }
    }

    /// Renders any value whose `Display` output is markdown.
    pub fn render(&self, value: &impl Display) {
        self.render_markdown(&value.to_string());
    }

    pub fn render_markdown(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }

        for line in markdown.lines() {
            // Keep the hashes so the heading level stays visible
            if line.starts_with('#') {
                println!("\x1b[32m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }
}
