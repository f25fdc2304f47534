//! The host document the builder paints into.
//!
//! In a browser this is the DOM; natively it is [`FileSurface`], which keeps
//! the latest markup and writes it to an output directory. Every call is
//! synchronous: the builder never awaits the surface.

pub mod file;
#[cfg(test)]
pub mod recording;

use serde::{Deserialize, Serialize};

use crate::editor::SectionForm;
use crate::errors::AppError;
use crate::models::{ProfileField, Section, Template, Theme};

pub use file::FileSurface;
#[cfg(test)]
pub use recording::{RecordingSurface, SurfaceCall};

/// Preview frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    #[default]
    Desktop,
    Mobile,
    A4,
}

impl PreviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewMode::Desktop => "desktop",
            PreviewMode::Mobile => "mobile",
            PreviewMode::A4 => "a4",
        }
    }
}

pub trait Surface {
    /// Replaces the whole preview.
    fn paint_preview(&mut self, html: &str);
    fn scroll_preview_to_bottom(&mut self);
    /// Fills the QR placeholder of the current preview.
    fn paint_qr(&mut self, markup: &str);

    /// Replaces one section's form and rebinds its inputs.
    fn paint_section_form(&mut self, section: Section, form: &SectionForm);
    fn paint_skill_chips(&mut self, html: &str);
    fn paint_photo(&mut self, html: &str);

    /// Writes a value into a scalar input without firing its handler.
    fn set_input(&mut self, field: ProfileField, value: &str);
    fn set_qr_controls(&mut self, show: bool, custom: &str);
    fn set_field_error(&mut self, field: ProfileField, message: Option<&str>);

    fn apply_theme(&mut self, theme: Theme);
    fn apply_template(&mut self, template: Template);
    fn set_dark(&mut self, dark: bool);
    fn set_preview_mode(&mut self, mode: PreviewMode);
    fn clear_import_input(&mut self);

    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
    fn reload(&mut self);

    fn download(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), AppError>;
    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), AppError>;
}

/// `theme-<t>` class for the page root.
pub fn theme_class(theme: Theme) -> String {
    format!("theme-{}", theme.as_str())
}

/// `template-<t>` class for the preview.
pub fn template_class(template: Template) -> String {
    format!("template-{}", template.as_str())
}
