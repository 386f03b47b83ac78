//! Terminal rendering for markdown output.
//!
//! Rich mode styles inline markdown with termimad and colors headers while
//! keeping their `#` markers; plain mode prints the markdown untouched.

use std::io::{self, Write};

use anyhow::{Context, Result};
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::Reset);

        Self { rich_enabled, skin }
    }

    /// Formats markdown for the terminal without printing it.
    pub fn format(&self, markdown: &str) -> String {
        if !self.rich_enabled {
            return markdown.to_string();
        }

        let mut output = String::with_capacity(markdown.len());
        for line in markdown.lines() {
            if line.starts_with("# ") {
                output.push_str(&format!("\x1b[1;34m{line}\x1b[0m"));
            } else if line.starts_with('#') {
                output.push_str(&format!("\x1b[36m{line}\x1b[0m"));
            } else {
                output.push_str(&self.skin.inline(line).to_string());
            }
            output.push('\n');
        }
        output
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(self.format(markdown).as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")
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
    fn test_plain_output_is_untouched() {
        let renderer = TerminalRenderer::new(false);
        let markdown = "# Title\n\n- **Band** `id`\n";
        assert_eq!(renderer.format(markdown), markdown);
    }

    #[test]
    fn test_rich_output_colors_headers() {
        let renderer = TerminalRenderer::new(true);
        let output = renderer.format("# Title\n## Stage\n");
        assert!(output.contains("\x1b[1;34m# Title\x1b[0m"));
        assert!(output.contains("\x1b[36m## Stage\x1b[0m"));
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }
}
