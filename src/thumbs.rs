//! Thumbnail generation behind a provider trait.
//!
//! The exporter asks a [`ThumbnailProvider`] for a PNG thumbnail of a media
//! file, optionally cropped to a percent-coordinate region, and copies the
//! returned file into the output directory. Keeping the provider behind a
//! trait lets the export tests run against a recording mock, the same seam
//! the imaging backend would occupy in a larger pipeline.
//!
//! [`ThumbnailCache`] is the production implementation: pure-Rust decoding
//! and resizing via the `image` crate, with generated thumbnails stored in a
//! cache directory under a SHA-256 content key of `(path, mime, region)`.
//! A second export run over the same media reuses the cached files instead
//! of re-decoding.

use crate::model::Region;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Produces a local thumbnail file for a media file.
pub trait ThumbnailProvider {
    /// Resolve a thumbnail for `path`, keyed by the file path, its MIME
    /// type, and an optional crop region. Returns the path of a PNG file
    /// that exists until at least the end of the run.
    fn resolve(
        &self,
        path: &Path,
        mime: &str,
        region: Option<Region>,
    ) -> Result<PathBuf, ThumbnailError>;
}

/// On-disk thumbnail cache.
#[derive(Debug)]
pub struct ThumbnailCache {
    cache_dir: PathBuf,
    size: u32,
}

impl ThumbnailCache {
    pub fn new(cache_dir: PathBuf, size: u32) -> Self {
        Self { cache_dir, size }
    }

    /// Cache filename for a `(path, mime, region)` combination.
    fn cache_key(path: &Path, mime: &str, region: Option<Region>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(path.to_string_lossy().as_bytes());
        hasher.update(b"\0");
        hasher.update(mime.as_bytes());
        hasher.update(b"\0");
        match region {
            Some(r) => hasher.update(r.to_string().as_bytes()),
            None => hasher.update(b"full"),
        }
        format!("{:x}", hasher.finalize())
    }
}

impl ThumbnailProvider for ThumbnailCache {
    fn resolve(
        &self,
        path: &Path,
        mime: &str,
        region: Option<Region>,
    ) -> Result<PathBuf, ThumbnailError> {
        let key = Self::cache_key(path, mime, region);
        let dst = self.cache_dir.join(format!("{}.png", key));
        if dst.exists() {
            return Ok(dst);
        }

        let mut img = image::open(path)?;
        if let Some(r) = region {
            let (w, h) = (img.width(), img.height());
            let x0 = w * r.left.min(100) / 100;
            let y0 = h * r.top.min(100) / 100;
            let x1 = w * r.right.min(100) / 100;
            let y1 = h * r.bottom.min(100) / 100;
            // Degenerate regions fall back to the full image.
            if x1 > x0 && y1 > y0 {
                img = img.crop_imm(x0, y0, x1 - x0, y1 - y0);
            }
        }
        let thumb = img.thumbnail(self.size, self.size);

        std::fs::create_dir_all(&self.cache_dir)?;
        thumb.save_with_format(&dst, image::ImageFormat::Png)?;
        Ok(dst)
    }
}
