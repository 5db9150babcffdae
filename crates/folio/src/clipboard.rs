//! Copying text to the system clipboard with toast feedback.

use std::io;

use crossterm::{clipboard::CopyToClipboard, execute};
use log::error;

use crate::toast::Toast;

/// Toast shown after a successful copy.
pub const COPIED_MESSAGE: &str = "Account number copied.";

/// Toast shown after copying a news link.
pub const LINK_COPIED_MESSAGE: &str = "Link copied.";

/// Toast shown when the copy fails.
pub const COPY_FAILED_MESSAGE: &str = "Copy failed. Please enter it manually.";

/// Destination for copied text.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()>;
}

/// Clipboard access through the OSC 52 terminal escape sequence.
///
/// The terminal decides whether to honour the request, so success only means
/// the sequence was written.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        execute!(io::stdout(), CopyToClipboard::to_clipboard_from(text))
    }
}

/// Copy `text` and report the outcome through `toast`, showing `copied` on
/// success.
pub fn copy_with_feedback(
    clipboard: &mut dyn Clipboard,
    text: &str,
    copied: &str,
    toast: &mut Toast,
    now_ms: u64,
) -> bool {
    match clipboard.copy(text) {
        Ok(()) => {
            toast.show(copied, now_ms);
            true
        }
        Err(e) => {
            error!("copy to clipboard failed: {e}");
            toast.show(COPY_FAILED_MESSAGE, now_ms);
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records copied text.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryClipboard {
        pub(crate) copied: Vec<String>,
    }

    impl Clipboard for MemoryClipboard {
        fn copy(&mut self, text: &str) -> io::Result<()> {
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    /// Rejects every copy.
    #[derive(Debug, Default)]
    pub(crate) struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn copy(&mut self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Unsupported, "no clipboard"))
        }
    }

    #[test]
    fn test_copy_success() {
        let mut clipboard = MemoryClipboard::default();
        let mut toast = Toast::new();
        assert!(copy_with_feedback(&mut clipboard, "123-456", COPIED_MESSAGE, &mut toast, 0));
        assert_eq!(clipboard.copied, vec!["123-456"]);
        assert_eq!(toast.message(), Some(COPIED_MESSAGE));
    }

    #[test]
    fn test_copy_link_message() {
        let mut clipboard = MemoryClipboard::default();
        let mut toast = Toast::new();
        let href = "https://news.example/1";
        assert!(copy_with_feedback(&mut clipboard, href, LINK_COPIED_MESSAGE, &mut toast, 0));
        assert_eq!(clipboard.copied, vec![href]);
        assert_eq!(toast.message(), Some(LINK_COPIED_MESSAGE));
    }

    #[test]
    fn test_copy_failure_shows_manual_entry_toast() {
        let mut toast = Toast::new();
        assert!(!copy_with_feedback(
            &mut BrokenClipboard,
            "123-456",
            COPIED_MESSAGE,
            &mut toast,
            500
        ));
        assert_eq!(toast.message(), Some(COPY_FAILED_MESSAGE));

        toast.update(500 + 2_999);
        assert!(toast.is_visible());
        toast.update(500 + 3_000);
        assert!(!toast.is_visible());
    }
}
