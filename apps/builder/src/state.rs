//! The profile store — the single owner of the in-memory [`Profile`].
//!
//! Every mutation goes through a method here and reports a [`Change`] so the
//! router can repaint the right part of the form and then run render + persist.
//! Renderers and codecs only ever see `&Profile`.

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{FieldValues, Profile, ProfileField, Section, Template, Theme};

/// What a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing changed (e.g. reorder onto the same index).
    None,
    /// A scalar form input.
    Field(ProfileField),
    /// Records were added, removed or reordered; the section's form must be repainted.
    Section(Section),
    /// A field inside one record changed in place. The form already shows the
    /// new value, so only the preview is refreshed.
    Record(Section),
    Skills,
    Photo,
    Theme,
    Template,
    Qr,
    /// The profile was replaced or merged; rehydrate everything.
    All,
}

#[derive(Debug, Default)]
pub struct ProfileStore {
    profile: Profile,
}

impl ProfileStore {
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn replace(&mut self, profile: Profile) -> Change {
        self.profile = profile;
        Change::All
    }

    // ── scalar fields ───────────────────────────────────────────────────────

    /// Stores the trimmed value. Validation is advisory and never blocks this.
    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Change {
        *self.profile.field_mut(field) = value.trim().to_string();
        Change::Field(field)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Change {
        self.profile.theme = theme;
        Change::Theme
    }

    pub fn set_template(&mut self, template: Template) -> Change {
        self.profile.template = template;
        Change::Template
    }

    pub fn set_show_qr(&mut self, show: bool) -> Change {
        self.profile.show_qr = show;
        Change::Qr
    }

    pub fn set_qr_custom(&mut self, value: &str) -> Change {
        self.profile.qr_custom = value.trim().to_string();
        Change::Qr
    }

    pub fn set_photo(&mut self, data_url: String) -> Change {
        self.profile.photo = data_url;
        Change::Photo
    }

    pub fn clear_photo(&mut self) -> Change {
        self.profile.photo.clear();
        Change::Photo
    }

    // ── collections ─────────────────────────────────────────────────────────

    /// Inserts a new record at `index` (end when `None`, clamped when past the end).
    pub fn add_item(
        &mut self,
        section: Section,
        values: &FieldValues,
        index: Option<usize>,
    ) -> Result<(Uuid, Change), AppError> {
        let id = self.profile.section_mut(section).insert(values, index)?;
        debug!("Added {section} record {id}");
        Ok((id, Change::Section(section)))
    }

    pub fn remove_item(&mut self, section: Section, id: Uuid) -> Result<Change, AppError> {
        self.profile.section_mut(section).remove(id)?;
        debug!("Removed {section} record {id}");
        Ok(Change::Section(section))
    }

    /// Index form of [`ProfileStore::remove_item`] for callers that only know
    /// positions. Out-of-range indices are reported, not ignored.
    pub fn remove_item_at(&mut self, section: Section, index: usize) -> Result<Change, AppError> {
        let id = self
            .profile
            .section(section)
            .id_at(index)
            .ok_or_else(|| AppError::ItemNotFound(format!("{section} index {index}")))?;
        self.remove_item(section, id)
    }

    pub fn reorder_item(
        &mut self,
        section: Section,
        from: usize,
        to: usize,
    ) -> Result<Change, AppError> {
        let moved = self.profile.section_mut(section).move_item(from, to)?;
        Ok(if moved {
            Change::Section(section)
        } else {
            Change::None
        })
    }

    /// Sets one field of one record in place. The value is stored as typed.
    pub fn update_item_field(
        &mut self,
        section: Section,
        id: Uuid,
        key: &str,
        value: &str,
    ) -> Result<Change, AppError> {
        self.profile.section_mut(section).set_field(id, key, value)?;
        Ok(Change::Record(section))
    }

    // ── skills ──────────────────────────────────────────────────────────────

    /// Appends every non-empty comma-separated part of `raw`.
    pub fn add_skills(&mut self, raw: &str) -> Change {
        let before = self.profile.skills.len();
        self.profile.skills.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        if self.profile.skills.len() == before {
            Change::None
        } else {
            Change::Skills
        }
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<Change, AppError> {
        if index >= self.profile.skills.len() {
            return Err(AppError::ItemNotFound(format!("skill index {index}")));
        }
        self.profile.skills.remove(index);
        Ok(Change::Skills)
    }

    pub fn reorder_skill(&mut self, from: usize, to: usize) -> Result<Change, AppError> {
        let len = self.profile.skills.len();
        if from >= len || to >= len {
            return Err(AppError::ItemNotFound(format!(
                "move skill {from} -> {to} in list of {len}"
            )));
        }
        if from == to {
            return Ok(Change::None);
        }
        let skill = self.profile.skills.remove(from);
        self.profile.skills.insert(to, skill);
        Ok(Change::Skills)
    }

    // ── import ──────────────────────────────────────────────────────────────

    /// Shallow-merges `incoming` onto the current profile.
    ///
    /// Top-level keys replace the current value, missing keys keep it, unknown
    /// keys are retained. The merged object is deserialized as a whole, so a
    /// known key with the wrong shape rejects the import and the profile stays
    /// as it was.
    pub fn merge_import(&mut self, incoming: Map<String, Value>) -> Result<Change, AppError> {
        let mut merged = match serde_json::to_value(&self.profile)? {
            Value::Object(map) => map,
            _ => return Err(AppError::Internal(anyhow::anyhow!("profile did not serialize to an object"))),
        };
        let keys: Vec<String> = incoming.keys().cloned().collect();
        for (key, value) in incoming {
            merged.insert(key, value);
        }
        let profile: Profile = serde_json::from_value(Value::Object(merged))
            .map_err(|e| AppError::Import(format!("{e} (keys: {})", keys.join(", "))))?;
        self.profile = profile;
        Ok(Change::All)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_set_field_trims() {
        let mut store = ProfileStore::default();
        let change = store.set_field(ProfileField::Name, "  Alex Doe \n");
        assert_eq!(change, Change::Field(ProfileField::Name));
        assert_eq!(store.profile().name, "Alex Doe");
    }

    #[test]
    fn test_set_field_never_blocked_by_validation() {
        let mut store = ProfileStore::default();
        store.set_field(ProfileField::Email, "not-an-email");
        assert_eq!(store.profile().email, "not-an-email");
    }

    #[test]
    fn test_add_item_defaults_to_end() {
        let mut store = ProfileStore::default();
        store
            .add_item(Section::Experience, &values(&[("role", "a")]), None)
            .unwrap();
        let (id, change) = store
            .add_item(Section::Experience, &values(&[("role", "b")]), None)
            .unwrap();
        assert_eq!(change, Change::Section(Section::Experience));
        assert_eq!(store.profile().experience.position(id), Some(1));
    }

    #[test]
    fn test_add_item_at_index() {
        let mut store = ProfileStore::default();
        store.add_item(Section::Projects, &values(&[("title", "a")]), None).unwrap();
        let (id, _) = store
            .add_item(Section::Projects, &values(&[("title", "b")]), Some(0))
            .unwrap();
        assert_eq!(store.profile().projects.position(id), Some(0));
    }

    #[test]
    fn test_remove_out_of_range_is_reported() {
        let mut store = ProfileStore::default();
        store.add_item(Section::Education, &FieldValues::new(), None).unwrap();
        let err = store.remove_item_at(Section::Education, 5).unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound(_)));
        assert_eq!(store.profile().education.len(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_reported() {
        let mut store = ProfileStore::default();
        let err = store
            .remove_item(Section::References, Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound(_)));
    }

    #[test]
    fn test_remove_at_index_removes_that_record() {
        let mut store = ProfileStore::default();
        for name in ["a", "b", "c"] {
            store
                .add_item(Section::Certificates, &values(&[("name", name)]), None)
                .unwrap();
        }
        store.remove_item_at(Section::Certificates, 1).unwrap();
        let names: Vec<_> = store
            .profile()
            .certificates
            .iter()
            .map(|(_, c)| c.name.clone())
            .collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_reorder_same_index_reports_no_change() {
        let mut store = ProfileStore::default();
        store.add_item(Section::Languages, &FieldValues::new(), None).unwrap();
        assert_eq!(
            store.reorder_item(Section::Languages, 0, 0).unwrap(),
            Change::None
        );
    }

    #[test]
    fn test_update_item_field_in_place_keeps_whitespace() {
        let mut store = ProfileStore::default();
        let (id, _) = store
            .add_item(Section::Experience, &FieldValues::new(), None)
            .unwrap();
        let change = store
            .update_item_field(Section::Experience, id, "desc", "  line one\n")
            .unwrap();
        assert_eq!(change, Change::Record(Section::Experience));
        assert_eq!(store.profile().experience.get(id).unwrap().desc, "  line one\n");
    }

    #[test]
    fn test_update_item_survives_earlier_removal() {
        let mut store = ProfileStore::default();
        let (first, _) = store
            .add_item(Section::Experience, &values(&[("role", "first")]), None)
            .unwrap();
        let (second, _) = store
            .add_item(Section::Experience, &values(&[("role", "second")]), None)
            .unwrap();
        store.remove_item(Section::Experience, first).unwrap();
        store
            .update_item_field(Section::Experience, second, "company", "Acme")
            .unwrap();
        let exp = store.profile().experience.get(second).unwrap();
        assert_eq!(exp.role, "second");
        assert_eq!(exp.company, "Acme");
    }

    #[test]
    fn test_add_skills_splits_and_trims() {
        let mut store = ProfileStore::default();
        assert_eq!(store.add_skills(" Rust, , SQL ,Go"), Change::Skills);
        assert_eq!(store.profile().skills, ["Rust", "SQL", "Go"]);
        assert_eq!(store.add_skills(" , "), Change::None);
    }

    #[test]
    fn test_skill_reorder_and_remove() {
        let mut store = ProfileStore::default();
        store.add_skills("a,b,c");
        store.reorder_skill(0, 2).unwrap();
        assert_eq!(store.profile().skills, ["b", "c", "a"]);
        store.remove_skill(1).unwrap();
        assert_eq!(store.profile().skills, ["b", "a"]);
        assert!(store.remove_skill(2).is_err());
        assert!(store.reorder_skill(0, 5).is_err());
    }

    #[test]
    fn test_merge_import_shallow() {
        let mut store = ProfileStore::default();
        store.set_field(ProfileField::Headline, "Engineer");
        store
            .merge_import(object(json!({ "name": "Alex", "custom": 7 })))
            .unwrap();
        let p = store.profile();
        assert_eq!(p.name, "Alex");
        assert_eq!(p.headline, "Engineer");
        assert_eq!(p.extra.get("custom"), Some(&json!(7)));
    }

    #[test]
    fn test_merge_import_rejects_wrong_shape() {
        let mut store = ProfileStore::default();
        store.set_field(ProfileField::Name, "Keep");
        let err = store
            .merge_import(object(json!({ "name": "New", "experience": "oops" })))
            .unwrap_err();
        assert!(matches!(err, AppError::Import(_)));
        assert_eq!(store.profile().name, "Keep");
    }

    #[test]
    fn test_merge_import_replaces_collections() {
        let mut store = ProfileStore::default();
        store.add_item(Section::Experience, &values(&[("role", "old")]), None).unwrap();
        store
            .merge_import(object(json!({ "experience": [{ "role": "new" }] })))
            .unwrap();
        let roles: Vec<_> = store
            .profile()
            .experience
            .iter()
            .map(|(_, e)| e.role.clone())
            .collect();
        assert_eq!(roles, ["new"]);
    }
}
