// In-memory desktop: a scripted clipboard plus a log of every
// notification and clipboard write. Used by the handler tests.

use super::{ClipboardReader, ClipboardWriter, DesktopError, Notifier};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct MemoryDesktop {
    files: Vec<PathBuf>,
    image: Option<Vec<u8>>,
    fail_reads: bool,
    reads: Cell<usize>,
    notifications: RefCell<Vec<Notification>>,
    copied: RefCell<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl MemoryDesktop {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        MemoryDesktop {
            files: paths.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_image(bytes: Vec<u8>) -> Self {
        Self::empty().and_image(bytes)
    }

    pub fn and_image(mut self, bytes: Vec<u8>) -> Self {
        self.image = Some(bytes);
        self
    }

    /// Make every clipboard read fail, as if the helper program were missing.
    pub fn broken() -> Self {
        MemoryDesktop {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Number of clipboard reads performed so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.borrow().clone()
    }

    /// Text written to the clipboard, oldest first.
    pub fn copied(&self) -> Vec<String> {
        self.copied.borrow().clone()
    }

    fn read(&self) -> Result<(), DesktopError> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_reads {
            return Err(DesktopError::Command {
                program: "clipboard".into(),
                reason: "unavailable".into(),
            });
        }
        Ok(())
    }
}

impl ClipboardReader for MemoryDesktop {
    fn file_paths(&self) -> Result<Vec<PathBuf>, DesktopError> {
        self.read()?;
        Ok(self.files.clone())
    }

    fn image_bytes(&self) -> Result<Option<Vec<u8>>, DesktopError> {
        self.read()?;
        Ok(self.image.clone())
    }
}

impl ClipboardWriter for MemoryDesktop {
    fn write_text(&self, text: &str) -> Result<(), DesktopError> {
        self.copied.borrow_mut().push(text.to_string());
        Ok(())
    }
}

impl Notifier for MemoryDesktop {
    fn notify(&self, message: &str, title: &str) -> Result<(), DesktopError> {
        self.notifications.borrow_mut().push(Notification {
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}
