// X11 adapter: `xclip -selection clipboard` for reads and writes,
// `notify-send` for notifications.

use super::{capture, feed, run, ClipboardReader, ClipboardWriter, DesktopError, Notifier};
use reqwest::Url;
use std::path::PathBuf;

/// Clipboard image targets we can decode, most preferred first.
const IMAGE_TARGETS: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/bmp",
    "image/webp",
    "image/tiff",
];

#[derive(Debug, Default)]
pub struct X11Desktop;

impl X11Desktop {
    pub fn new() -> Self {
        Self
    }

    /// Contents of the clipboard for `target`, or `None` when the
    /// clipboard doesn't offer it (xclip exits non-zero).
    fn read_target(target: &str) -> Result<Option<Vec<u8>>, DesktopError> {
        let output = capture("xclip", &["-selection", "clipboard", "-t", target, "-o"])?;
        if output.status.success() {
            Ok(Some(output.stdout))
        } else {
            Ok(None)
        }
    }
}

impl ClipboardReader for X11Desktop {
    fn file_paths(&self) -> Result<Vec<PathBuf>, DesktopError> {
        Ok(Self::read_target("text/uri-list")?
            .map(|raw| parse_uri_list(&String::from_utf8_lossy(&raw)))
            .unwrap_or_default())
    }

    fn image_bytes(&self) -> Result<Option<Vec<u8>>, DesktopError> {
        let Some(raw) = Self::read_target("TARGETS")? else {
            return Ok(None);
        };
        match pick_image_target(&String::from_utf8_lossy(&raw)) {
            Some(target) => Self::read_target(target),
            None => Ok(None),
        }
    }
}

impl ClipboardWriter for X11Desktop {
    fn write_text(&self, text: &str) -> Result<(), DesktopError> {
        feed("xclip", &["-selection", "clipboard"], text.as_bytes())
    }
}

impl Notifier for X11Desktop {
    fn notify(&self, message: &str, title: &str) -> Result<(), DesktopError> {
        run("notify-send", &[title, message])
    }
}

/// Local paths from a `text/uri-list` payload; comments and non-file URIs
/// are skipped.
pub(crate) fn parse_uri_list(list: &str) -> Vec<PathBuf> {
    list.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| Url::parse(line).ok())
        .filter(|url| url.scheme() == "file")
        .filter_map(|url| url.to_file_path().ok())
        .collect()
}

/// First decodable image target offered in an xclip `TARGETS` listing.
pub(crate) fn pick_image_target(targets: &str) -> Option<&'static str> {
    let offered: Vec<&str> = targets.lines().map(str::trim).collect();
    IMAGE_TARGETS
        .iter()
        .copied()
        .find(|wanted| offered.contains(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_list_decodes_file_urls() {
        let list = "# copied\r\nfile:///home/me/a%20b.png\r\nhttps://example.com/x.png\r\nfile:///tmp/c.txt\r\n";
        assert_eq!(
            parse_uri_list(list),
            vec![PathBuf::from("/home/me/a b.png"), PathBuf::from("/tmp/c.txt")]
        );
    }

    #[test]
    fn plain_text_is_not_a_path() {
        assert!(parse_uri_list("just some copied words").is_empty());
    }

    #[test]
    fn image_target_preference() {
        let targets = "TARGETS\nTIMESTAMP\nimage/bmp\nimage/png\n";
        assert_eq!(pick_image_target(targets), Some("image/png"));
        assert_eq!(pick_image_target("UTF8_STRING\nTEXT\n"), None);
    }
}
