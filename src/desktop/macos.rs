// macOS adapter: pasteboard access through JavaScript for Automation
// (`osascript -l JavaScript`), clipboard writes through `pbcopy`.

use super::{capture, feed, run, ClipboardReader, ClipboardWriter, DesktopError, Notifier};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::PathBuf;

/// Prints one copied file path per line.
const FILE_PATHS_JXA: &str = r#"
ObjC.import('AppKit');
var pb = $.NSPasteboard.generalPasteboard;
var paths = ObjC.deepUnwrap(pb.propertyListForType('NSFilenamesPboardType')) || [];
paths.join('\n');
"#;

/// Prints the pasteboard image (PNG, else TIFF) as base64, or nothing.
const IMAGE_JXA: &str = r#"
ObjC.import('AppKit');
var pb = $.NSPasteboard.generalPasteboard;
var data = pb.dataForType('public.png');
if (data.isNil()) { data = pb.dataForType('public.tiff'); }
data.isNil() ? '' : ObjC.unwrap(data.base64EncodedStringWithOptions(0));
"#;

const NOTIFY_SCRIPT: [&str; 6] = [
    "-e",
    "on run argv",
    "-e",
    "display notification (item 1 of argv) with title (item 2 of argv)",
    "-e",
    "end run",
];

#[derive(Debug, Default)]
pub struct MacDesktop;

impl MacDesktop {
    pub fn new() -> Self {
        Self
    }

    fn jxa(script: &str) -> Result<String, DesktopError> {
        let output = capture("osascript", &["-l", "JavaScript", "-e", script])?;
        if !output.status.success() {
            return Err(DesktopError::Command {
                program: "osascript".into(),
                reason: format!("exited with status {}", output.status),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ClipboardReader for MacDesktop {
    fn file_paths(&self) -> Result<Vec<PathBuf>, DesktopError> {
        Ok(parse_path_lines(&Self::jxa(FILE_PATHS_JXA)?))
    }

    fn image_bytes(&self) -> Result<Option<Vec<u8>>, DesktopError> {
        decode_image_payload(&Self::jxa(IMAGE_JXA)?)
    }
}

impl ClipboardWriter for MacDesktop {
    fn write_text(&self, text: &str) -> Result<(), DesktopError> {
        feed("pbcopy", &[], text.as_bytes())
    }
}

impl Notifier for MacDesktop {
    fn notify(&self, message: &str, title: &str) -> Result<(), DesktopError> {
        // Passing the text as argv avoids quoting it into AppleScript source.
        let mut args: Vec<&str> = NOTIFY_SCRIPT.to_vec();
        args.push(message);
        args.push(title);
        run("osascript", &args)
    }
}

pub(crate) fn parse_path_lines(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

pub(crate) fn decode_image_payload(output: &str) -> Result<Option<Vec<u8>>, DesktopError> {
    let payload = output.trim();
    if payload.is_empty() {
        return Ok(None);
    }
    STANDARD
        .decode(payload)
        .map(Some)
        .map_err(|e| DesktopError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_lines_skip_blanks() {
        let paths = parse_path_lines("/Users/me/a.png\n\n/Users/me/My Docs/b.txt\n");
        assert_eq!(
            paths,
            vec![PathBuf::from("/Users/me/a.png"), PathBuf::from("/Users/me/My Docs/b.txt")]
        );
        assert!(parse_path_lines("\n").is_empty());
    }

    #[test]
    fn image_payload_is_base64() {
        assert_eq!(decode_image_payload("iVBORw==\n").unwrap(), Some(vec![0x89, b'P', b'N', b'G']));
        assert_eq!(decode_image_payload("\n").unwrap(), None);
        assert!(decode_image_payload("not base64!").is_err());
    }
}
