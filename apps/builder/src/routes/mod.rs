//! Event router — turns UI events into profile mutations and keeps the
//! surface in sync.
//!
//! Every event runs the same sequence: mutate the [`ProfileStore`], repaint
//! what the returned [`Change`] names, re-render the full preview, schedule a
//! debounced write. Errors stop at [`Builder::dispatch`]; they become an alert
//! or a log line, never a panic or a propagated error.

pub mod events;
pub mod handlers;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::collaborators::{Collaborators, ImageFile};
use crate::config::Config;
use crate::editor::{photo_preview, section_form, skill_chips};
use crate::errors::AppError;
use crate::i18n::Labels;
use crate::models::{Profile, ProfileField, Section};
use crate::persistence::{codec, KeyValueStore, PersistScheduler, DARK_KEY, DATA_KEY};
use crate::render::render_preview;
use crate::state::{Change, ProfileStore};
use crate::surface::Surface;

pub use events::{ItemRef, UiEvent};

/// Where the profile shown after bootstrap came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    ShareLink,
    Stored,
    Empty,
}

pub struct Builder<S: Surface> {
    store: ProfileStore,
    backend: Arc<dyn KeyValueStore>,
    scheduler: PersistScheduler,
    surface: S,
    labels: &'static Labels,
    collaborators: Collaborators,
    config: Config,
    dark: bool,
    /// Location passed to the last bootstrap; share links are built on it.
    page_url: Option<String>,
}

impl<S: Surface> Builder<S> {
    pub fn new(
        config: Config,
        backend: Arc<dyn KeyValueStore>,
        surface: S,
        collaborators: Collaborators,
    ) -> Self {
        let scheduler = PersistScheduler::new(Arc::clone(&backend), config.persist_debounce);
        Self {
            store: ProfileStore::default(),
            backend,
            scheduler,
            surface,
            labels: Labels::for_locale(config.locale),
            collaborators,
            config,
            dark: false,
            page_url: None,
        }
    }

    pub fn profile(&self) -> &Profile {
        self.store.profile()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Writes any debounced snapshot now. Call before the host exits.
    pub fn flush(&mut self) -> Result<bool, AppError> {
        self.scheduler.flush()
    }

    // ── startup ─────────────────────────────────────────────────────────────

    /// Loads the profile and paints everything.
    ///
    /// Sources in order: the `data` parameter of `location`, the stored blob,
    /// an empty profile. A source that fails to decode is skipped.
    pub async fn bootstrap(&mut self, location: Option<&str>) -> ProfileSource {
        self.scheduler.cancel();
        self.page_url = location.map(str::to_string);

        self.dark = match self.backend.get(DARK_KEY) {
            Ok(value) => value.as_deref() == Some("1"),
            Err(e) => {
                warn!("Reading {DARK_KEY} failed: {e}");
                false
            }
        };
        self.surface.set_dark(self.dark);

        let (profile, source) = self.initial_profile(location);
        info!("Bootstrapped profile from {source:?}");
        self.store.replace(profile);
        self.hydrate();
        self.render().await;
        source
    }

    fn initial_profile(&self, location: Option<&str>) -> (Profile, ProfileSource) {
        if let Some(param) = location.and_then(codec::share_param_from_location) {
            match codec::decode_share_param(&param) {
                Ok(profile) => return (profile, ProfileSource::ShareLink),
                Err(e) => debug!("Ignoring share link: {e}"),
            }
        }
        match self.backend.get(DATA_KEY) {
            Ok(Some(text)) => match codec::from_json(&text) {
                Ok(profile) => return (profile, ProfileSource::Stored),
                Err(e) => debug!("Ignoring stored profile: {e}"),
            },
            Ok(None) => {}
            Err(e) => warn!("Reading {DATA_KEY} failed: {e}"),
        }
        (Profile::default(), ProfileSource::Empty)
    }

    // ── event boundary ──────────────────────────────────────────────────────

    pub async fn dispatch(&mut self, event: UiEvent) {
        let kind = event.kind();
        debug!("Dispatching {kind}");
        if let Err(e) = self.handle(event).await {
            debug!("{kind} failed: {e}");
            self.report(e);
        }
    }

    fn report(&mut self, err: AppError) {
        if let Some(message) = err.user_message(self.labels) {
            self.surface.alert(&message);
        }
    }

    async fn handle(&mut self, event: UiEvent) -> Result<(), AppError> {
        let change = match event {
            UiEvent::Input { field, value } => self.store.set_field(field, &value),
            UiEvent::FieldBlur { field, value } => self.validate_on_blur(field, value.as_deref()),

            UiEvent::Theme { theme } => self.store.set_theme(theme),
            UiEvent::Template { template } => self.store.set_template(template),
            UiEvent::DarkToggled => self.toggle_dark()?,
            UiEvent::PreviewMode { mode } => {
                self.surface.set_preview_mode(mode);
                Change::None
            }
            UiEvent::ShowQr { show } => self.store.set_show_qr(show),
            UiEvent::QrCustom { value } => self.store.set_qr_custom(&value),

            UiEvent::SkillInput { raw } => self.store.add_skills(&raw),
            UiEvent::SkillRemoved { index } => self.store.remove_skill(index)?,
            UiEvent::SkillsReordered {
                old_index,
                new_index,
            } => self.store.reorder_skill(old_index, new_index)?,

            UiEvent::AddItem {
                section,
                values,
                index,
            } => self.store.add_item(section, &values, index)?.1,
            UiEvent::RemoveItem { section, item } => match item {
                ItemRef::Id(id) => self.store.remove_item(section, id)?,
                ItemRef::Index(index) => self.store.remove_item_at(section, index)?,
            },
            UiEvent::ItemInput {
                section,
                item,
                key,
                value,
            } => {
                let id = self.resolve_item(section, item)?;
                self.store.update_item_field(section, id, &key, &value)?
            }
            UiEvent::Reordered {
                section,
                old_index,
                new_index,
            } => self.store.reorder_item(section, old_index, new_index)?,

            UiEvent::PhotoSelected {
                file_name,
                mime,
                bytes,
            } => {
                self.select_photo(ImageFile {
                    file_name,
                    mime,
                    bytes,
                })
                .await?
            }
            UiEvent::PhotoRemoved => self.store.clear_photo(),

            UiEvent::Reset => self.reset()?,
            UiEvent::DownloadPdf => self.download_pdf().await?,
            UiEvent::Share => self.share()?,
            UiEvent::ExportJson => self.export_json()?,
            UiEvent::ImportFile { text } => self.import(&text)?,
        };
        self.commit(change).await
    }

    // ── repaint / render / persist ──────────────────────────────────────────

    async fn commit(&mut self, change: Change) -> Result<(), AppError> {
        match change {
            Change::None => return Ok(()),
            Change::Field(_) | Change::Record(_) | Change::Qr => {}
            Change::Section(section) => self.paint_section(section),
            Change::Skills => self.paint_skills(),
            Change::Photo => self.paint_photo(),
            Change::Theme => {
                // Styling only; the preview markup does not change.
                self.surface.apply_theme(self.store.profile().theme);
                return self.schedule_persist();
            }
            Change::Template => self.surface.apply_template(self.store.profile().template),
            Change::All => self.hydrate(),
        }
        self.render().await;
        self.schedule_persist()
    }

    /// Writes every input and form from the profile.
    fn hydrate(&mut self) {
        let profile = self.store.profile();
        for field in ProfileField::ALL {
            self.surface.set_input(field, profile.field(field));
        }
        self.surface.set_qr_controls(profile.show_qr, &profile.qr_custom);
        self.surface.apply_theme(profile.theme);
        self.surface.apply_template(profile.template);
        for section in Section::ALL {
            self.paint_section(section);
        }
        self.paint_skills();
        self.paint_photo();
    }

    fn paint_section(&mut self, section: Section) {
        let form = section_form(section, self.store.profile().section(section), self.labels);
        self.surface.paint_section_form(section, &form);
    }

    fn paint_skills(&mut self) {
        let html = skill_chips(&self.store.profile().skills, self.labels);
        self.surface.paint_skill_chips(&html);
    }

    fn paint_photo(&mut self) {
        let html = photo_preview(&self.store.profile().photo, self.labels);
        self.surface.paint_photo(&html);
    }

    /// Full preview rebuild. A QR failure is reported but leaves the preview in place.
    async fn render(&mut self) {
        let rendered = render_preview(self.store.profile(), self.labels);
        self.surface.paint_preview(&rendered.html);
        self.surface.scroll_preview_to_bottom();
        if let Some(target) = rendered.qr_target {
            match self.qr_markup(&target).await {
                Ok(markup) => self.surface.paint_qr(&markup),
                Err(e) => self.report(e),
            }
        }
    }

    async fn qr_markup(&self, target: &str) -> Result<String, AppError> {
        let renderer = self.collaborators.qr.get().await?;
        renderer.render(target).await
    }

    fn schedule_persist(&mut self) -> Result<(), AppError> {
        let snapshot = codec::to_json(self.store.profile())?;
        self.scheduler.schedule(snapshot);
        Ok(())
    }
}
