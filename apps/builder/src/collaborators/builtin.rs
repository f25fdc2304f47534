//! Backends shipped with the binary.
//!
//! None of them needs a native image or PDF library: the resizer embeds the
//! picked image as-is, the QR renderer emits a scannable link block, and the
//! rasterizer produces a print-ready A4 page for the host to print to PDF.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use tracing::warn;

use super::{DocumentRasterizer, ImageFile, ImageResizer, Orientation, PageFormat, PdfOptions, QrRenderer};
use crate::errors::AppError;
use crate::render::escape::escape_html;

/// Embeds the image unchanged as a base64 data URL. The size bound and
/// quality are not applied; a real resizer plugs in through
/// [`LazyLibrary::new`](super::LazyLibrary::new).
pub struct PassthroughResizer;

#[async_trait]
impl ImageResizer for PassthroughResizer {
    async fn resize(
        &self,
        file: ImageFile,
        max_side: u32,
        quality: f32,
    ) -> Result<String, AppError> {
        if !file.is_image() {
            return Err(AppError::UnsupportedFile(file.mime));
        }
        if file.bytes.is_empty() {
            return Err(AppError::ImageProcessing(format!(
                "'{}' is empty",
                file.file_name
            )));
        }
        warn!(
            "Embedding '{}' ({} bytes) without applying max side {max_side} or quality {quality}",
            file.file_name,
            file.bytes.len()
        );
        Ok(format!("data:{};base64,{}", file.mime, BASE64.encode(&file.bytes)))
    }
}

pub struct LinkQrRenderer;

#[async_trait]
impl QrRenderer for LinkQrRenderer {
    async fn render(&self, target: &str) -> Result<String, AppError> {
        let target = escape_html(target);
        Ok(format!(
            r#"<a class="qr-link" href="{target}" target="_blank" rel="noopener">{target}</a>"#
        ))
    }
}

/// Wraps the preview in a standalone page with `@page` rules matching the options.
pub struct PrintHtmlRasterizer;

#[async_trait]
impl DocumentRasterizer for PrintHtmlRasterizer {
    async fn rasterize(&self, html: &str, options: &PdfOptions) -> Result<Bytes, AppError> {
        let [top, right, bottom, left] = options.margin_mm;
        let size = match options.format {
            PageFormat::A4 => "A4",
        };
        let orientation = match options.orientation {
            Orientation::Portrait => "portrait",
        };
        let page = format!(
            concat!(
                "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">",
                "<style>@page {{ size: {size} {orientation}; margin: {top}mm {right}mm {bottom}mm {left}mm; }} ",
                "body {{ background: {background}; zoom: {scale}; }}</style>",
                "</head><body>{html}</body></html>\n"
            ),
            size = size,
            orientation = orientation,
            top = top,
            right = right,
            bottom = bottom,
            left = left,
            background = escape_html(&options.background),
            scale = options.scale,
            html = html,
        );
        Ok(Bytes::from(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(mime: &str, bytes: &'static [u8]) -> ImageFile {
        ImageFile {
            file_name: "me.png".to_string(),
            mime: mime.to_string(),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[tokio::test]
    async fn test_resizer_builds_data_url() {
        let url = PassthroughResizer
            .resize(image("image/png", b"\x89PNG"), 512, 0.85)
            .await
            .unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_resizer_rejects_non_image() {
        let err = PassthroughResizer
            .resize(image("text/plain", b"hi"), 512, 0.85)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFile(_)));
    }

    #[tokio::test]
    async fn test_resizer_rejects_empty_file() {
        let err = PassthroughResizer
            .resize(image("image/jpeg", b""), 512, 0.85)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ImageProcessing(_)));
    }

    #[tokio::test]
    async fn test_qr_markup_escapes_target() {
        let html = LinkQrRenderer.render("https://x.dev/?a=1&b=2").await.unwrap();
        assert!(html.contains(r#"href="https://x.dev/?a=1&amp;b=2""#));
    }

    #[tokio::test]
    async fn test_rasterizer_page_rules() {
        let out = PrintHtmlRasterizer
            .rasterize("<div class=\"cv-page\"></div>", &PdfOptions::default())
            .await
            .unwrap();
        let text = std::str::from_utf8(&out).unwrap();
        assert!(text.contains("size: A4 portrait; margin: 10mm 10mm 10mm 10mm;"));
        assert!(text.contains("background: #ffffff"));
        assert!(text.contains("<div class=\"cv-page\"></div>"));
    }
}
