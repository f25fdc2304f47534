//! Test double that records every surface call.

use std::collections::HashMap;

use crate::editor::SectionForm;
use crate::errors::AppError;
use crate::models::{ProfileField, Section, Template, Theme};

use super::{PreviewMode, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Preview,
    Scroll,
    Qr(String),
    SectionForm(Section),
    SkillChips,
    Photo,
    Input(ProfileField, String),
    QrControls(bool, String),
    FieldError(ProfileField, Option<String>),
    Theme(Theme),
    Template(Template),
    Dark(bool),
    PreviewMode(PreviewMode),
    ClearImport,
    Alert(String),
    Confirm(String),
    Reload,
    Download(String),
    Clipboard(String),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    pub preview: String,
    pub forms: HashMap<Section, SectionForm>,
    pub chips: String,
    pub photo: String,
    pub downloads: Vec<(String, String, Vec<u8>)>,
    pub confirm_answer: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Alert(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn paint_preview(&mut self, html: &str) {
        self.preview = html.to_string();
        self.calls.push(SurfaceCall::Preview);
    }

    fn scroll_preview_to_bottom(&mut self) {
        self.calls.push(SurfaceCall::Scroll);
    }

    fn paint_qr(&mut self, markup: &str) {
        self.calls.push(SurfaceCall::Qr(markup.to_string()));
    }

    fn paint_section_form(&mut self, section: Section, form: &SectionForm) {
        self.forms.insert(section, form.clone());
        self.calls.push(SurfaceCall::SectionForm(section));
    }

    fn paint_skill_chips(&mut self, html: &str) {
        self.chips = html.to_string();
        self.calls.push(SurfaceCall::SkillChips);
    }

    fn paint_photo(&mut self, html: &str) {
        self.photo = html.to_string();
        self.calls.push(SurfaceCall::Photo);
    }

    fn set_input(&mut self, field: ProfileField, value: &str) {
        self.calls.push(SurfaceCall::Input(field, value.to_string()));
    }

    fn set_qr_controls(&mut self, show: bool, custom: &str) {
        self.calls.push(SurfaceCall::QrControls(show, custom.to_string()));
    }

    fn set_field_error(&mut self, field: ProfileField, message: Option<&str>) {
        self.calls
            .push(SurfaceCall::FieldError(field, message.map(str::to_string)));
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.calls.push(SurfaceCall::Theme(theme));
    }

    fn apply_template(&mut self, template: Template) {
        self.calls.push(SurfaceCall::Template(template));
    }

    fn set_dark(&mut self, dark: bool) {
        self.calls.push(SurfaceCall::Dark(dark));
    }

    fn set_preview_mode(&mut self, mode: PreviewMode) {
        self.calls.push(SurfaceCall::PreviewMode(mode));
    }

    fn clear_import_input(&mut self) {
        self.calls.push(SurfaceCall::ClearImport);
    }

    fn alert(&mut self, message: &str) {
        self.calls.push(SurfaceCall::Alert(message.to_string()));
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.calls.push(SurfaceCall::Confirm(message.to_string()));
        self.confirm_answer
    }

    fn reload(&mut self) {
        self.calls.push(SurfaceCall::Reload);
    }

    fn download(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<(), AppError> {
        self.downloads
            .push((file_name.to_string(), mime.to_string(), bytes.to_vec()));
        self.calls.push(SurfaceCall::Download(file_name.to_string()));
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), AppError> {
        self.calls.push(SurfaceCall::Clipboard(text.to_string()));
        Ok(())
    }
}
