//! Form markup for the editable lists.
//!
//! Only the form of the section that changed is rebuilt. Every record block
//! carries its stable `data-id`, and the returned [`FieldBinding`]s tell the
//! surface which inputs to (re)attach handlers to.

use serde::Serialize;
use uuid::Uuid;

use crate::i18n::Labels;
use crate::models::{LanguageLevel, Section, SectionList};
use crate::render::escape::escape_html;

/// One bound input: `[data-section][data-id] [data-bind=key]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldBinding {
    pub section: Section,
    pub item_id: Uuid,
    pub key: &'static str,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionForm {
    pub html: String,
    pub bindings: Vec<FieldBinding>,
}

pub fn section_form(section: Section, list: &dyn SectionList, labels: &Labels) -> SectionForm {
    let tag = section.as_str();
    let mut form = SectionForm {
        html: format!(r#"<div class="section-list" data-section="{tag}">"#),
        bindings: Vec::with_capacity(list.len() * list.field_keys().len()),
    };

    for (n, id) in list.ids().into_iter().enumerate() {
        let Some(fields) = list.fields(id) else {
            continue;
        };
        form.html.push_str(&format!(
            concat!(
                r#"<div class="item-block" data-section="{tag}" data-id="{id}" draggable="true">"#,
                r#"<div class="item-head"><span class="drag-handle" title="{hint}">⋮⋮</span>"#,
                r#"<strong>{item} {n}</strong>"#,
                r#"<button type="button" class="btn-remove" data-action="remove-item" data-section="{tag}" data-id="{id}">{remove}</button>"#,
                "</div>"
            ),
            tag = tag,
            id = id,
            hint = escape_html(labels.drag_hint),
            item = escape_html(labels.item_number),
            n = n + 1,
            remove = escape_html(labels.remove),
        ));

        for (key, value) in fields {
            let label = escape_html(labels.field_label(section, key));
            form.html.push_str(&format!("<label>{label}"));
            form.html.push_str(&field_input(key, &value, labels));
            form.html.push_str("</label>");
            form.bindings.push(FieldBinding {
                section,
                item_id: id,
                key,
            });
        }
        form.html.push_str("</div>");
    }

    form.html.push_str("</div>");
    form
}

fn field_input(key: &str, value: &str, labels: &Labels) -> String {
    match key {
        "desc" => format!(
            r#"<textarea data-bind="desc" rows="3">{}</textarea>"#,
            escape_html(value)
        ),
        "level" => {
            let current = value.parse::<LanguageLevel>().unwrap_or_default();
            let options: String = LanguageLevel::ALL
                .into_iter()
                .map(|level| {
                    let selected = if level == current { " selected" } else { "" };
                    format!(
                        r#"<option value="{}"{selected}>{}</option>"#,
                        level.as_str(),
                        escape_html(labels.level(level))
                    )
                })
                .collect();
            format!(r#"<select data-bind="level">{options}</select>"#)
        }
        _ => format!(
            r#"<input type="text" data-bind="{key}" value="{}">"#,
            escape_html(value)
        ),
    }
}

/// Chip list for the skills input. Chips are addressed by position.
pub fn skill_chips(skills: &[String], labels: &Labels) -> String {
    let mut html = String::from(r#"<div class="chips">"#);
    for (i, skill) in skills.iter().enumerate() {
        html.push_str(&format!(
            concat!(
                r#"<span class="chip" data-index="{i}" draggable="true">{skill}"#,
                r#"<button type="button" data-action="remove-skill" data-index="{i}" aria-label="{remove}">×</button>"#,
                "</span>"
            ),
            i = i,
            skill = escape_html(skill),
            remove = escape_html(labels.remove),
        ));
    }
    html.push_str("</div>");
    html
}

/// Thumbnail plus remove button, or nothing when no photo is set.
pub fn photo_preview(photo: &str, labels: &Labels) -> String {
    if photo.is_empty() {
        return String::new();
    }
    format!(
        r#"<img class="photo-thumb" src="{}" alt="{}"><button type="button" data-action="remove-photo">{}</button>"#,
        escape_html(photo),
        escape_html(labels.photo_alt),
        escape_html(labels.remove_photo),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::models::collection::Collection;
    use crate::models::sections::{Experience, Language};

    fn labels() -> &'static Labels {
        Labels::for_locale(Locale::Id)
    }

    #[test]
    fn test_section_form_binds_every_field_of_every_record() {
        let mut exp: Collection<Experience> = Collection::default();
        let a = exp.push(Experience {
            role: "Dev".to_string(),
            ..Default::default()
        });
        let b = exp.push(Experience::default());

        let form = section_form(Section::Experience, &exp, labels());
        assert_eq!(form.bindings.len(), 10);
        assert_eq!(form.bindings[0].item_id, a);
        assert_eq!(form.bindings[0].key, "role");
        assert_eq!(form.bindings[5].item_id, b);
        assert!(form.html.contains(&format!(r#"data-id="{a}""#)));
        assert!(form.html.contains(&format!(
            r#"data-action="remove-item" data-section="experience" data-id="{b}""#
        )));
        assert!(form.html.contains(r#"<input type="text" data-bind="role" value="Dev">"#));
        assert!(form.html.contains(r#"<textarea data-bind="desc" rows="3"></textarea>"#));
        assert!(form.html.contains("<strong>Item 2</strong>"));
    }

    #[test]
    fn test_section_form_escapes_values() {
        let mut exp: Collection<Experience> = Collection::default();
        exp.push(Experience {
            company: r#"A "&" B"#.to_string(),
            ..Default::default()
        });
        let form = section_form(Section::Experience, &exp, labels());
        assert!(form.html.contains(r#"value="A &quot;&amp;&quot; B""#));
    }

    #[test]
    fn test_language_level_select() {
        let mut langs: Collection<Language> = Collection::default();
        langs.push(Language {
            name: "English".to_string(),
            level: LanguageLevel::Menengah,
        });
        let form = section_form(Section::Languages, &langs, Labels::for_locale(Locale::En));
        assert!(form
            .html
            .contains(r#"<option value="Menengah" selected>Intermediate</option>"#));
        assert!(form.html.contains(r#"<option value="Dasar">Basic</option>"#));
    }

    #[test]
    fn test_empty_section_form() {
        let exp: Collection<Experience> = Collection::default();
        let form = section_form(Section::Experience, &exp, labels());
        assert!(form.bindings.is_empty());
        assert_eq!(form.html, r#"<div class="section-list" data-section="experience"></div>"#);
    }

    #[test]
    fn test_skill_chips_indexed_and_escaped() {
        let html = skill_chips(&["Rust".to_string(), "<b>".to_string()], labels());
        assert!(html.contains(r#"data-index="1" draggable="true">&lt;b&gt;"#));
        assert!(html.contains(r#"data-action="remove-skill" data-index="0""#));
    }

    #[test]
    fn test_photo_preview() {
        assert_eq!(photo_preview("", labels()), "");
        let html = photo_preview("data:image/png;base64,AAAA", labels());
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
        assert!(html.contains("Hapus Foto"));
    }
}
