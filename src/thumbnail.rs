// Thumbnail cache: a flat directory of downloaded images named after the
// MD5 of their URL. Files are written once and never refreshed or evicted;
// the OS temp cleanup is the only thing that ever removes them.

use crate::api::ImageHost;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct ThumbnailCache {
    dir: PathBuf,
}

/// Cache filename for `url`: lowercase hex MD5 of the URL plus `.png`.
pub fn cache_key(url: &str) -> String {
    format!("{:x}.png", md5::compute(url.as_bytes()))
}

impl ThumbnailCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ThumbnailCache { dir: dir.into() }
    }

    /// Where the thumbnail for `url` lives, whether or not it was fetched.
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.dir.join(cache_key(url))
    }

    /// Return a local file holding the bytes behind `url`, downloading them
    /// through `host` only if no such file exists yet.
    ///
    /// `None` means the thumbnail could not be produced (download failed,
    /// non-200 status, or the cache directory is not writable); callers
    /// should leave the icon out rather than point at a missing file.
    pub fn fetch<H: ImageHost + ?Sized>(&self, url: &str, host: &H) -> Option<PathBuf> {
        let path = self.path_for(url);
        if path.is_file() {
            debug!(path = %path.display(), "thumbnail cache hit");
            return Some(path);
        }

        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!(dir = %self.dir.display(), error = %e, "cannot create thumbnail directory");
            return None;
        }

        let bytes = match host.download(url) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%url, error = %e, "thumbnail unavailable");
                return None;
            }
        };

        // Concurrent processes may race on the same URL; the rename keeps
        // readers from ever seeing a half-written file.
        let partial = path.with_extension(format!("part-{}", std::process::id()));
        let written = fs::write(&partial, &bytes).and_then(|_| fs::rename(&partial, &path));
        if let Err(e) = written {
            warn!(path = %path.display(), error = %e, "cannot store thumbnail");
            let _ = fs::remove_file(&partial);
            return None;
        }
        Some(path)
    }
}
