//! External collaborators — image resizing, QR rendering and document
//! rasterizing — behind async traits.
//!
//! The [`Builder`](crate::routes::Builder) holds each one inside a
//! [`LazyLibrary`], so a backend is only loaded the first time an action needs
//! it. Swap backends by handing different loaders to [`Collaborators`].

pub mod builtin;
pub mod lazy;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub use builtin::{LinkQrRenderer, PassthroughResizer, PrintHtmlRasterizer};
pub use lazy::LazyLibrary;

// ────────────────────────────────────────────────────────────────────────────
// Data handed to collaborators
// ────────────────────────────────────────────────────────────────────────────

/// A file picked by the user, as read from the file input.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl ImageFile {
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
}

/// Options for the document export. The defaults are the only values the
/// builder ever sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfOptions {
    /// Top, right, bottom, left.
    pub margin_mm: [u32; 4],
    pub scale: u32,
    pub format: PageFormat,
    pub orientation: Orientation,
    pub background: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margin_mm: [10, 10, 10, 10],
            scale: 2,
            format: PageFormat::A4,
            orientation: Orientation::Portrait,
            background: "#ffffff".to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Traits
// ────────────────────────────────────────────────────────────────────────────

/// Downscales a picked photo so its longest side is at most `max_side`, and
/// returns it as a data URL.
#[async_trait]
pub trait ImageResizer: Send + Sync {
    async fn resize(&self, file: ImageFile, max_side: u32, quality: f32)
        -> Result<String, AppError>;
}

/// Renders a QR code for `target` as markup for the `#qrBox` element.
#[async_trait]
pub trait QrRenderer: Send + Sync {
    async fn render(&self, target: &str) -> Result<String, AppError>;
}

/// Turns the preview markup into a downloadable document.
#[async_trait]
pub trait DocumentRasterizer: Send + Sync {
    async fn rasterize(&self, html: &str, options: &PdfOptions) -> Result<Bytes, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Bundle
// ────────────────────────────────────────────────────────────────────────────

pub struct Collaborators {
    pub image: LazyLibrary<dyn ImageResizer>,
    pub qr: LazyLibrary<dyn QrRenderer>,
    pub pdf: LazyLibrary<dyn DocumentRasterizer>,
}

impl Collaborators {
    /// The backends that ship with the binary, each loaded on first use.
    pub fn builtin() -> Self {
        Self {
            image: LazyLibrary::builtin("image-resizer", || {
                Arc::new(PassthroughResizer) as Arc<dyn ImageResizer>
            }),
            qr: LazyLibrary::builtin("qr-renderer", || {
                Arc::new(LinkQrRenderer) as Arc<dyn QrRenderer>
            }),
            pdf: LazyLibrary::builtin("document-rasterizer", || {
                Arc::new(PrintHtmlRasterizer) as Arc<dyn DocumentRasterizer>
            }),
        }
    }
}
