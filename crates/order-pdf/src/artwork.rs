//! Artwork resolution
//!
//! Artwork comes from one of three places, in order:
//! 1. Inline bytes carried on the line item
//! 2. The injected [`ArtworkLoader`], keyed by owner and filename
//! 3. The deterministic placeholder
//!
//! Resolution never fails. Loader errors are logged and fall through.

use crate::placeholder::placeholder_png;
use crate::types::LineItem;
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArtworkLoadError {
    #[error("Artwork not found: {0}")]
    NotFound(String),
    #[error("Invalid artwork filename: {0}")]
    InvalidFilename(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bytes handed back by a loader, with an optional content type hint
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedArtwork {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Capability supplied by the storage collaborator.
///
/// Calls are synchronous and may block; they happen at most once per page.
pub trait ArtworkLoader: Send + Sync {
    fn load(&self, owner_id: i64, filename: &str) -> Result<LoadedArtwork, ArtworkLoadError>;
}

impl<F> ArtworkLoader for F
where
    F: Fn(i64, &str) -> Result<LoadedArtwork, ArtworkLoadError> + Send + Sync,
{
    fn load(&self, owner_id: i64, filename: &str) -> Result<LoadedArtwork, ArtworkLoadError> {
        self(owner_id, filename)
    }
}

/// Loader for callers without artwork storage; everything falls back to the placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoArtworkLoader;

impl ArtworkLoader for NoArtworkLoader {
    fn load(&self, _owner_id: i64, filename: &str) -> Result<LoadedArtwork, ArtworkLoadError> {
        Err(ArtworkLoadError::NotFound(filename.to_string()))
    }
}

/// Reads artwork from `root/<owner_id>/<filename>`, then `root/<filename>`.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtworkLoader for DirectoryLoader {
    fn load(&self, owner_id: i64, filename: &str) -> Result<LoadedArtwork, ArtworkLoadError> {
        let relative = Path::new(filename);
        let is_plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if filename.is_empty() || !is_plain {
            return Err(ArtworkLoadError::InvalidFilename(filename.to_string()));
        }

        let candidates = [
            self.root.join(owner_id.to_string()).join(relative),
            self.root.join(relative),
        ];
        for path in &candidates {
            if path.is_file() {
                let bytes = std::fs::read(path)?;
                return Ok(LoadedArtwork {
                    bytes,
                    content_type: content_type_for(path).map(str::to_string),
                });
            }
        }

        Err(ArtworkLoadError::NotFound(filename.to_string()))
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Where resolved artwork came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworkSource {
    Inline,
    Loaded,
    Placeholder,
}

/// Artwork bytes ready for decoding; never empty
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArtwork<'a> {
    pub bytes: Cow<'a, [u8]>,
    pub source: ArtworkSource,
}

/// Resolves a line item's artwork through a borrowed loader
pub struct ArtworkResolver<'a> {
    loader: &'a dyn ArtworkLoader,
}

impl<'a> ArtworkResolver<'a> {
    pub fn new(loader: &'a dyn ArtworkLoader) -> Self {
        Self { loader }
    }

    pub fn resolve<'i>(&self, owner_id: i64, item: &'i LineItem) -> ResolvedArtwork<'i> {
        if let Some(bytes) = item.inline_artwork_bytes.as_deref() {
            if !bytes.is_empty() {
                return ResolvedArtwork {
                    bytes: Cow::Borrowed(bytes),
                    source: ArtworkSource::Inline,
                };
            }
        }

        if let Some(filename) = item.artwork_filename.as_deref() {
            if !filename.is_empty() {
                match self.loader.load(owner_id, filename) {
                    Ok(loaded) if !loaded.bytes.is_empty() => {
                        return ResolvedArtwork {
                            bytes: Cow::Owned(loaded.bytes),
                            source: ArtworkSource::Loaded,
                        };
                    }
                    Ok(_) => {
                        log::warn!(
                            "Artwork {} for owner {} is empty, using placeholder",
                            filename,
                            owner_id
                        );
                    }
                    Err(e) => {
                        log::warn!(
                            "Could not load artwork {} for owner {}, using placeholder: {}",
                            filename,
                            owner_id,
                            e
                        );
                    }
                }
            }
        }

        ResolvedArtwork {
            bytes: Cow::Borrowed(placeholder_png()),
            source: ArtworkSource::Placeholder,
        }
    }
}
