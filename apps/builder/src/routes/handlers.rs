//! Handlers for events that do more than a single store mutation.

use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use super::{Builder, ItemRef};
use crate::collaborators::{ImageFile, PdfOptions};
use crate::errors::AppError;
use crate::models::{ProfileField, Section};
use crate::persistence::{codec, DARK_KEY, DATA_KEY};
use crate::render::preview::QR_BOX;
use crate::render::render_preview;
use crate::surface::Surface;
use crate::state::Change;
use crate::validation::validate_field;

impl<S: Surface> Builder<S> {
    /// Index addresses are resolved against the current order.
    pub(super) fn resolve_item(&self, section: Section, item: ItemRef) -> Result<Uuid, AppError> {
        match item {
            ItemRef::Id(id) => Ok(id),
            ItemRef::Index(index) => self
                .store
                .profile()
                .section(section)
                .id_at(index)
                .ok_or_else(|| AppError::ItemNotFound(format!("{section} index {index}"))),
        }
    }

    /// Checks the text as typed, untrimmed, when the host sends it.
    pub(super) fn validate_on_blur(&mut self, field: ProfileField, raw: Option<&str>) -> Change {
        let value = raw.unwrap_or_else(|| self.store.profile().field(field));
        let message = validate_field(field, value, self.labels);
        self.surface.set_field_error(field, message);
        Change::None
    }

    /// Flips dark mode and stores the preference right away.
    pub(super) fn toggle_dark(&mut self) -> Result<Change, AppError> {
        self.dark = !self.dark;
        self.surface.set_dark(self.dark);
        self.backend
            .set(DARK_KEY, if self.dark { "1" } else { "0" })?;
        Ok(Change::None)
    }

    /// Checks the file type, resizes through the image collaborator, then
    /// stores the data URL.
    pub(super) async fn select_photo(&mut self, file: ImageFile) -> Result<Change, AppError> {
        if !file.is_image() {
            return Err(AppError::UnsupportedFile(file.mime));
        }
        let resizer = self.collaborators.image.get().await?;
        let data_url = resizer
            .resize(file, self.config.photo_max_side, self.config.photo_quality)
            .await?;
        Ok(self.store.set_photo(data_url))
    }

    /// Clears both keys and asks the host to reload. Nothing happens when the
    /// user declines.
    pub(super) fn reset(&mut self) -> Result<Change, AppError> {
        if !self.surface.confirm(self.labels.confirm_reset) {
            info!("Reset declined");
            return Ok(Change::None);
        }
        self.scheduler.cancel();
        self.backend.remove(DATA_KEY)?;
        self.backend.remove(DARK_KEY)?;
        info!("Profile storage cleared");
        self.surface.reload();
        Ok(Change::None)
    }

    fn share_base(&self) -> &str {
        self.page_url
            .as_deref()
            .filter(|url| Url::parse(url).is_ok())
            .unwrap_or(&self.config.share_base_url)
    }

    /// Copies a share link. A clipboard failure is logged without an alert.
    pub(super) fn share(&mut self) -> Result<Change, AppError> {
        let link = codec::share_link(self.share_base(), self.store.profile())?;
        match self.surface.copy_to_clipboard(&link) {
            Ok(()) => {
                info!("Share link copied ({} chars)", link.len());
                self.surface.alert(self.labels.alert_link_copied);
            }
            Err(e) => warn!("Clipboard write failed: {e}"),
        }
        Ok(Change::None)
    }

    /// Downloads the pretty-printed profile. Runs immediately, not debounced.
    pub(super) fn export_json(&mut self) -> Result<Change, AppError> {
        let profile = self.store.profile();
        let json = codec::to_json_pretty(profile)?;
        let file_name = codec::export_filename(&profile.name);
        self.surface
            .download(&file_name, "application/json", json.as_bytes())?;
        Ok(Change::None)
    }

    /// Merges an imported file. Rejected files leave the profile untouched.
    pub(super) fn import(&mut self, text: &str) -> Result<Change, AppError> {
        let incoming = codec::parse_import(text)?;
        let keys = incoming.len();
        let change = self.store.merge_import(incoming)?;
        info!("Imported {keys} top-level keys");
        self.surface.clear_import_input();
        Ok(change)
    }

    /// Rasterizes the current preview, QR code included, and downloads it.
    pub(super) async fn download_pdf(&mut self) -> Result<Change, AppError> {
        let rendered = render_preview(self.store.profile(), self.labels);
        let mut html = rendered.html;
        if let Some(target) = rendered.qr_target {
            let markup = self.qr_markup(&target).await?;
            html = html.replace(QR_BOX, &format!(r#"<div id="qrBox">{markup}</div>"#));
        }

        let rasterizer = self.collaborators.pdf.get().await?;
        let bytes = rasterizer.rasterize(&html, &PdfOptions::default()).await?;
        let file_name = codec::pdf_filename(&self.store.profile().name);
        self.surface.download(&file_name, "application/pdf", &bytes)?;
        info!("Exported {file_name} ({} bytes)", bytes.len());
        Ok(Change::None)
    }
}
