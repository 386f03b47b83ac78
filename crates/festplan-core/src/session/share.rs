//! Share-link copying and its manual fallback.

use thiserror::Error;

/// The environment refused a programmatic copy.
#[derive(Error, Debug)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Something that can receive the share link.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// How the share link reached the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The link is on the clipboard
    Copied(String),
    /// Copying failed; the view should present the link for manual copy
    Manual(String),
}

impl ShareOutcome {
    pub fn url(&self) -> &str {
        match self {
            ShareOutcome::Copied(url) | ShareOutcome::Manual(url) => url,
        }
    }
}
