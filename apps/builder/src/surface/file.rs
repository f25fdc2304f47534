//! Native surface: keeps the painted state in memory and writes it out as files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{template_class, theme_class, PreviewMode, Surface};
use crate::editor::SectionForm;
use crate::errors::AppError;
use crate::models::{ProfileField, Section, Template, Theme};
use crate::render::escape::escape_html;
use crate::render::preview::QR_BOX;

pub const PREVIEW_FILE: &str = "preview.html";
pub const FORMS_FILE: &str = "forms.html";

pub struct FileSurface {
    out_dir: PathBuf,
    assume_yes: bool,
    preview: String,
    qr: Option<String>,
    forms: HashMap<Section, String>,
    chips: String,
    photo: String,
    errors: HashMap<ProfileField, String>,
    theme: Theme,
    template: Template,
    dark: bool,
    mode: PreviewMode,
    reload_requested: bool,
}

impl FileSurface {
    pub fn new(out_dir: impl Into<PathBuf>, assume_yes: bool) -> Self {
        Self {
            out_dir: out_dir.into(),
            assume_yes,
            preview: String::new(),
            qr: None,
            forms: HashMap::new(),
            chips: String::new(),
            photo: String::new(),
            errors: HashMap::new(),
            theme: Theme::default(),
            template: Template::default(),
            dark: false,
            mode: PreviewMode::default(),
            reload_requested: false,
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Returns and clears the pending reload request.
    pub fn take_reload(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    /// The preview wrapped in a standalone page, QR box filled in.
    pub fn preview_page(&self) -> String {
        let body = match &self.qr {
            Some(qr) => self
                .preview
                .replace(QR_BOX, &format!(r#"<div id="qrBox">{qr}</div>"#)),
            None => self.preview.clone(),
        };
        let dark = if self.dark { " dark" } else { "" };
        format!(
            "<!DOCTYPE html>\n<html class=\"{}{dark}\"><head><meta charset=\"utf-8\"></head>\
             <body data-preview-mode=\"{}\"><div id=\"preview\" class=\"{}\">{body}</div></body></html>\n",
            theme_class(self.theme),
            self.mode.as_str(),
            template_class(self.template),
        )
    }

    fn forms_page(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"></head><body>");
        for field in ProfileField::ALL {
            if let Some(msg) = self.errors.get(&field) {
                html.push_str(&format!(
                    r#"<p class="field-error" data-field="{field}">{}</p>"#,
                    escape_html(msg)
                ));
            }
        }
        html.push_str(&format!(r#"<div id="photoPreview">{}</div>"#, self.photo));
        html.push_str(&format!(r#"<div id="skillsChips">{}</div>"#, self.chips));
        for section in Section::ALL {
            if let Some(form) = self.forms.get(&section) {
                html.push_str(form);
            }
        }
        html.push_str("</body></html>\n");
        html
    }

    /// Writes the preview and form pages into the output directory.
    pub fn write_snapshot(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.out_dir)?;
        let preview = self.out_dir.join(PREVIEW_FILE);
        fs::write(&preview, self.preview_page())?;
        fs::write(self.out_dir.join(FORMS_FILE), self.forms_page())?;
        info!("Wrote {}", preview.display());
        Ok(())
    }
}

impl Surface for FileSurface {
    fn paint_preview(&mut self, html: &str) {
        self.preview = html.to_string();
        self.qr = None;
    }

    fn scroll_preview_to_bottom(&mut self) {}

    fn paint_qr(&mut self, markup: &str) {
        self.qr = Some(markup.to_string());
    }

    fn paint_section_form(&mut self, section: Section, form: &SectionForm) {
        debug!("Painted {section} form ({} bindings)", form.bindings.len());
        self.forms.insert(section, form.html.clone());
    }

    fn paint_skill_chips(&mut self, html: &str) {
        self.chips = html.to_string();
    }

    fn paint_photo(&mut self, html: &str) {
        self.photo = html.to_string();
    }

    fn set_input(&mut self, _field: ProfileField, _value: &str) {}

    fn set_qr_controls(&mut self, _show: bool, _custom: &str) {}

    fn set_field_error(&mut self, field: ProfileField, message: Option<&str>) {
        match message {
            Some(msg) => {
                self.errors.insert(field, msg.to_string());
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn apply_template(&mut self, template: Template) {
        self.template = template;
    }

    fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    fn set_preview_mode(&mut self, mode: PreviewMode) {
        self.mode = mode;
    }

    fn clear_import_input(&mut self) {}

    fn alert(&mut self, message: &str) {
        println!("[alert] {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        println!("[confirm] {message} -> {}", if self.assume_yes { "yes" } else { "no" });
        self.assume_yes
    }

    fn reload(&mut self) {
        self.reload_requested = true;
    }

    fn download(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), AppError> {
        let name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| AppError::Validation(format!("invalid download name '{file_name}'")))?;
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(name);
        fs::write(&path, bytes)?;
        info!("Downloaded {} ({mime}, {} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), AppError> {
        println!("[clipboard] {text}");
        Ok(())
    }
}
