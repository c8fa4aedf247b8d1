// Command handlers: `list`, `upload` and `delete`. Every failure ends here
// as a result item or a notification; nothing bubbles up to `main`.

use crate::api::{ApiError, ImageHost, RemoteImage};
use crate::cli::Command;
use crate::config::ConfigError;
use crate::desktop::{ClipboardContent, Desktop, DesktopError, Notifier};
use crate::items::{ResultItem, ResultList};
use crate::thumbnail::ThumbnailCache;
use image::ImageFormat;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// File suffixes accepted from copied files, compared case-insensitively.
pub const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp"];

const GENERIC_FAILURE: &str = "Check the network connection and API token";
const DELETE_HINT: &str = "Press Enter to delete";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Desktop(#[from] DesktopError),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot convert clipboard image: {0}")]
    Encode(#[from] image::ImageError),
}

pub fn is_image_path(path: &Path) -> bool {
    let name = path.to_string_lossy().to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Decode clipboard image data in any supported format and re-encode it
/// as PNG.
pub fn encode_png(raw: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let img = image::load_from_memory(raw)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Upload name for clipboard image data, unique per second.
pub fn clipboard_filename(now: SystemTime) -> String {
    let secs = now.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    format!("clipboard_{secs}.png")
}

/// Report a failure that happened before any handler could run. `list`
/// and `upload` get a one-item list to print; `delete` gets a
/// notification and prints nothing.
pub fn startup_failure<N: Notifier + ?Sized>(
    command: &Command,
    title: &str,
    reason: &str,
    notifier: &N,
) -> Option<ResultList> {
    match command {
        Command::Delete { .. } => {
            if let Err(e) = notifier.notify(reason, "Delete failed") {
                warn!(error = %e, "cannot show notification");
            }
            None
        }
        Command::List | Command::Upload => Some(ResultList::single(ResultItem::notice(title, reason))),
    }
}

pub fn config_failure<N: Notifier + ?Sized>(
    command: &Command,
    err: &ConfigError,
    notifier: &N,
) -> Option<ResultList> {
    let title = match err {
        ConfigError::MissingToken => "Missing API token",
        ConfigError::InvalidToken => "Invalid API token",
    };
    startup_failure(command, title, &err.to_string(), notifier)
}

pub struct Bridge<H, D> {
    host: H,
    desktop: D,
    thumbnails: ThumbnailCache,
}

impl<H: ImageHost, D: Desktop> Bridge<H, D> {
    pub fn new(host: H, desktop: D, thumbnails: ThumbnailCache) -> Self {
        Bridge {
            host,
            desktop,
            thumbnails,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// Upload history, newest first as the API returns it.
    pub fn list(&self) -> ResultList {
        match self.host.list_uploads() {
            Ok(images) => {
                debug!(count = images.len(), "upload history fetched");
                ResultList::new(images.iter().map(|image| self.history_item(image)).collect())
            }
            Err(e) => {
                warn!(error = %e, "cannot fetch upload history");
                ResultList::single(ResultItem::notice(
                    "Failed to fetch image list",
                    "Check that the API token is correct",
                ))
            }
        }
    }

    fn history_item(&self, image: &RemoteImage) -> ResultItem {
        let icon = self.thumbnails.fetch(&image.url, &self.host);
        ResultItem::action(&image.filename, &image.url, &image.url)
            .with_icon(icon.as_deref())
            .with_quicklook(&image.url)
            .with_cmd(&image.hash, DELETE_HINT)
    }

    /// Upload whatever image the clipboard holds.
    pub fn upload(&self) -> ResultList {
        let mut items = Vec::new();
        if let Err(e) = self.upload_clipboard(&mut items) {
            warn!(error = %e, "upload aborted");
            items.push(ResultItem::notice("Upload error", e.to_string()));
        }
        ResultList::new(items)
    }

    fn upload_clipboard(&self, items: &mut Vec<ResultItem>) -> Result<(), UploadError> {
        match self.desktop.content()? {
            ClipboardContent::FilePaths(paths) => {
                let images: Vec<PathBuf> = paths.into_iter().filter(|p| is_image_path(p)).collect();
                if images.is_empty() {
                    items.push(ResultItem::notice(
                        "No image files",
                        "Make sure the copied files include images",
                    ));
                    return Ok(());
                }
                for path in images {
                    let bytes = std::fs::read(&path).map_err(|source| UploadError::Read {
                        path: path.clone(),
                        source,
                    })?;
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| clipboard_filename(SystemTime::now()));
                    items.push(self.upload_one(bytes, &filename));
                }
            }
            ClipboardContent::ImageBytes(raw) => {
                let png = encode_png(&raw)?;
                items.push(self.upload_one(png, &clipboard_filename(SystemTime::now())));
            }
            ClipboardContent::Empty => {
                items.push(ResultItem::notice(
                    "No image in clipboard",
                    "Copy an image or an image file",
                ));
            }
        }
        Ok(())
    }

    fn upload_one(&self, bytes: Vec<u8>, filename: &str) -> ResultItem {
        match self.host.upload_bytes(bytes, filename) {
            Ok(uploaded) => {
                info!(url = %uploaded.url, filename, "image uploaded");
                let icon = self.thumbnails.fetch(&uploaded.url, &self.host);
                self.announce("Image uploaded to SM.MS", "Upload succeeded");
                if let Err(e) = self.desktop.write_text(&uploaded.url) {
                    warn!(error = %e, "cannot copy URL to clipboard");
                }
                ResultItem::action("Upload succeeded", &uploaded.url, &uploaded.url)
                    .with_icon(icon.as_deref())
            }
            Err(e @ (ApiError::Transport(_) | ApiError::Decode(_) | ApiError::MissingData)) => {
                warn!(filename, error = %e, "upload request failed");
                ResultItem::notice("Upload error", e.to_string())
            }
            Err(e) => {
                warn!(filename, error = %e, "upload rejected");
                ResultItem::notice("Upload failed", e.api_message().unwrap_or(GENERIC_FAILURE))
            }
        }
    }

    /// Delete an image by hash. Feedback goes through notifications only;
    /// the return value says whether the image is gone.
    pub fn delete(&self, hash: Option<&str>) -> bool {
        let Some(hash) = hash.map(str::trim).filter(|h| !h.is_empty()) else {
            self.announce("No image hash given", "Delete failed");
            return false;
        };
        match self.host.delete_by_hash(hash) {
            Ok(()) => {
                info!(hash, "image deleted");
                self.announce("Image deleted from SM.MS", "Delete succeeded");
                true
            }
            Err(e) => {
                warn!(hash, error = %e, "delete failed");
                self.announce(GENERIC_FAILURE, "Delete failed");
                false
            }
        }
    }

    fn announce(&self, message: &str, title: &str) {
        if let Err(e) = self.desktop.notify(message, title) {
            warn!(error = %e, title, "cannot show notification");
        }
    }
}
