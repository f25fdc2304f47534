//! UI events delivered to [`Builder::dispatch`](super::Builder::dispatch).
//!
//! Events are plain data so a host can forward them from DOM listeners or the
//! CLI can read them one JSON object per line:
//!
//! ```json
//! {"type":"input","field":"name","value":"Alex Doe"}
//! {"type":"add_item","section":"experience","values":{"role":"Dev"}}
//! {"type":"item_input","section":"experience","item":0,"key":"company","value":"Acme"}
//! ```

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{FieldValues, ProfileField, Section, Template, Theme};
use crate::surface::PreviewMode;

/// A record address: its stable id, or its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemRef {
    Id(Uuid),
    Index(usize),
}

impl From<Uuid> for ItemRef {
    fn from(id: Uuid) -> Self {
        ItemRef::Id(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    // ── scalar form ────────────────────────────────────────────────────────
    Input {
        field: ProfileField,
        value: String,
    },
    /// `value` is the raw input text; without it the stored value is checked.
    FieldBlur {
        field: ProfileField,
        #[serde(default)]
        value: Option<String>,
    },

    // ── preferences ────────────────────────────────────────────────────────
    Theme {
        theme: Theme,
    },
    Template {
        template: Template,
    },
    DarkToggled,
    PreviewMode {
        mode: PreviewMode,
    },
    ShowQr {
        show: bool,
    },
    QrCustom {
        value: String,
    },

    // ── skills ─────────────────────────────────────────────────────────────
    SkillInput {
        raw: String,
    },
    SkillRemoved {
        index: usize,
    },
    SkillsReordered {
        old_index: usize,
        new_index: usize,
    },

    // ── list editor ────────────────────────────────────────────────────────
    AddItem {
        section: Section,
        #[serde(default)]
        values: FieldValues,
        #[serde(default)]
        index: Option<usize>,
    },
    RemoveItem {
        section: Section,
        item: ItemRef,
    },
    ItemInput {
        section: Section,
        item: ItemRef,
        key: String,
        value: String,
    },
    Reordered {
        section: Section,
        old_index: usize,
        new_index: usize,
    },

    // ── photo ──────────────────────────────────────────────────────────────
    PhotoSelected {
        file_name: String,
        mime: String,
        /// File contents, base64 on the wire.
        #[serde(with = "base64_bytes")]
        bytes: Bytes,
    },
    PhotoRemoved,

    // ── actions ────────────────────────────────────────────────────────────
    Reset,
    DownloadPdf,
    Share,
    ExportJson,
    ImportFile {
        text: String,
    },
}

impl UiEvent {
    /// Short name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            UiEvent::Input { .. } => "input",
            UiEvent::FieldBlur { .. } => "field_blur",
            UiEvent::Theme { .. } => "theme",
            UiEvent::Template { .. } => "template",
            UiEvent::DarkToggled => "dark_toggled",
            UiEvent::PreviewMode { .. } => "preview_mode",
            UiEvent::ShowQr { .. } => "show_qr",
            UiEvent::QrCustom { .. } => "qr_custom",
            UiEvent::SkillInput { .. } => "skill_input",
            UiEvent::SkillRemoved { .. } => "skill_removed",
            UiEvent::SkillsReordered { .. } => "skills_reordered",
            UiEvent::AddItem { .. } => "add_item",
            UiEvent::RemoveItem { .. } => "remove_item",
            UiEvent::ItemInput { .. } => "item_input",
            UiEvent::Reordered { .. } => "reordered",
            UiEvent::PhotoSelected { .. } => "photo_selected",
            UiEvent::PhotoRemoved => "photo_removed",
            UiEvent::Reset => "reset",
            UiEvent::DownloadPdf => "download_pdf",
            UiEvent::Share => "share",
            UiEvent::ExportJson => "export_json",
            UiEvent::ImportFile { .. } => "import_file",
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use bytes::Bytes;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let text = String::deserialize(deserializer)?;
        BASE64
            .decode(text.as_bytes())
            .map(Bytes::from)
            .map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> UiEvent {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_parse_scalar_and_unit_events() {
        assert_eq!(
            parse(r#"{"type":"input","field":"email","value":"a@b.co"}"#),
            UiEvent::Input {
                field: ProfileField::Email,
                value: "a@b.co".to_string()
            }
        );
        assert_eq!(parse(r#"{"type":"reset"}"#), UiEvent::Reset);
        assert_eq!(
            parse(r#"{"type":"field_blur","field":"email"}"#),
            UiEvent::FieldBlur {
                field: ProfileField::Email,
                value: None
            }
        );
        assert_eq!(
            parse(r#"{"type":"preview_mode","mode":"mobile"}"#),
            UiEvent::PreviewMode {
                mode: PreviewMode::Mobile
            }
        );
    }

    #[test]
    fn test_item_ref_by_index_or_id() {
        let id = Uuid::new_v4();
        let by_id = parse(&format!(
            r#"{{"type":"remove_item","section":"projects","item":"{id}"}}"#
        ));
        assert_eq!(
            by_id,
            UiEvent::RemoveItem {
                section: Section::Projects,
                item: ItemRef::Id(id)
            }
        );
        let by_index = parse(r#"{"type":"remove_item","section":"projects","item":2}"#);
        assert_eq!(
            by_index,
            UiEvent::RemoveItem {
                section: Section::Projects,
                item: ItemRef::Index(2)
            }
        );
    }

    #[test]
    fn test_add_item_defaults() {
        assert_eq!(
            parse(r#"{"type":"add_item","section":"languages"}"#),
            UiEvent::AddItem {
                section: Section::Languages,
                values: FieldValues::new(),
                index: None
            }
        );
    }

    #[test]
    fn test_photo_bytes_are_base64() {
        let event = parse(r#"{"type":"photo_selected","file_name":"a.png","mime":"image/png","bytes":"iVBORw=="}"#);
        match event {
            UiEvent::PhotoSelected { bytes, .. } => assert_eq!(&bytes[..], b"\x89PNG"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(serde_json::from_str::<UiEvent>(
            r#"{"type":"add_item","section":"hobbies"}"#
        )
        .is_err());
    }
}
