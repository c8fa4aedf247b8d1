// Desktop capabilities: clipboard access and notifications.
//
// The handlers only see the traits below. Platform adapters shell out to
// the usual command-line tools (`osascript`/`pbcopy` on macOS, `xclip`
// and `notify-send` elsewhere); `memory` is a scripted stand-in for tests.

pub mod linux;
pub mod macos;
pub mod memory;

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Errors returned by desktop adapters.
#[derive(Debug, thiserror::Error)]
pub enum DesktopError {
    /// A helper program could not be started or exited with failure.
    #[error("{program}: {reason}")]
    Command { program: String, reason: String },

    /// Clipboard payload was not in the expected encoding.
    #[error("clipboard data: {0}")]
    Decode(String),
}

/// What the clipboard currently offers, in order of preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    /// One or more copied files (e.g. from a file manager).
    FilePaths(Vec<PathBuf>),
    /// Rendered image data in whatever format the clipboard holds it.
    ImageBytes(Vec<u8>),
    Empty,
}

pub trait ClipboardReader {
    /// Paths of files currently on the clipboard; empty if there are none.
    fn file_paths(&self) -> Result<Vec<PathBuf>, DesktopError>;

    /// Raw image data currently on the clipboard, if any.
    fn image_bytes(&self) -> Result<Option<Vec<u8>>, DesktopError>;

    /// Classify the clipboard. File paths win over image data, so copying
    /// a file in a file manager uploads the file, not its icon.
    fn content(&self) -> Result<ClipboardContent, DesktopError> {
        let paths = self.file_paths()?;
        if !paths.is_empty() {
            return Ok(ClipboardContent::FilePaths(paths));
        }
        Ok(match self.image_bytes()? {
            Some(bytes) if !bytes.is_empty() => ClipboardContent::ImageBytes(bytes),
            _ => ClipboardContent::Empty,
        })
    }
}

pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> Result<(), DesktopError>;
}

pub trait Notifier {
    /// Show a fire-and-forget desktop notification.
    fn notify(&self, message: &str, title: &str) -> Result<(), DesktopError>;
}

/// Everything the command handlers need from the desktop.
pub trait Desktop: ClipboardReader + ClipboardWriter + Notifier {}

impl<T: ClipboardReader + ClipboardWriter + Notifier> Desktop for T {}

/// The adapter for the platform this binary was built for.
#[cfg(target_os = "macos")]
pub fn system() -> macos::MacDesktop {
    macos::MacDesktop::new()
}

/// The adapter for the platform this binary was built for.
#[cfg(not(target_os = "macos"))]
pub fn system() -> linux::X11Desktop {
    linux::X11Desktop::new()
}

/// Run `program` to completion and hand back its output, whatever the exit
/// status.
pub(crate) fn capture(program: &str, args: &[&str]) -> Result<Output, DesktopError> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| DesktopError::Command {
            program: program.into(),
            reason: format!("failed to spawn: {e}"),
        })
}

/// Run `program` with `input` on stdin and require a successful exit.
pub(crate) fn feed(program: &str, args: &[&str], input: &[u8]) -> Result<(), DesktopError> {
    let fail = |reason: String| DesktopError::Command {
        program: program.into(),
        reason,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| fail(format!("failed to spawn: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input)
            .map_err(|e| fail(format!("failed to write stdin: {e}")))?;
        // Dropping stdin closes the pipe so the child can finish.
    }

    let status = child
        .wait()
        .map_err(|e| fail(format!("failed to wait: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(fail(format!("exited with status {status}")))
    }
}

/// Run `program` and require a successful exit, discarding its output.
pub(crate) fn run(program: &str, args: &[&str]) -> Result<(), DesktopError> {
    let output = capture(program, args)?;
    if output.status.success() {
        Ok(())
    } else {
        Err(DesktopError::Command {
            program: program.into(),
            reason: format!("exited with status {}", output.status),
        })
    }
}
