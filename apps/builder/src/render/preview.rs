//! Preview renderer — turns the whole profile into one document fragment.
//!
//! Pure and deterministic: the same profile and labels always produce the same
//! markup. Callers replace the previous preview wholesale; there is no diffing.
//!
//! Section order is fixed: header, Summary, Experience, Education, Projects,
//! Skills, Certificates, Languages, References, QR footer. A section whose
//! records are all blank is left out entirely.

use crate::i18n::Labels;
use crate::models::{Profile, Section, SectionRecord};
use crate::render::escape::{escape_html, format_summary, nl2br};

/// Placeholder the host fills with the QR collaborator's output.
pub const QR_BOX: &str = r#"<div id="qrBox"></div>"#;
pub const QR_FOOTER: &str = r#"<div class="qr-wrap"><div id="qrBox"></div></div>"#;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPreview {
    pub html: String,
    /// Set when the QR footer was emitted; the value to encode.
    pub qr_target: Option<String>,
}

pub fn render_preview(profile: &Profile, labels: &Labels) -> RenderedPreview {
    let mut html = String::from(r#"<div class="cv-page">"#);
    html.push_str(&render_header(profile, labels));

    let sections = [
        summary_section(profile, labels),
        experience_section(profile, labels),
        education_section(profile, labels),
        projects_section(profile, labels),
        skills_section(profile, labels),
        certificates_section(profile, labels),
        languages_section(profile, labels),
        references_section(profile, labels),
    ];
    for section in sections.into_iter().flatten() {
        html.push_str(&section);
    }

    let qr_target = profile.qr_target().map(str::to_string);
    if qr_target.is_some() {
        html.push_str(QR_FOOTER);
    }

    html.push_str("</div>");
    RenderedPreview { html, qr_target }
}

// ────────────────────────────────────────────────────────────────────────────
// Header
// ────────────────────────────────────────────────────────────────────────────

fn render_header(profile: &Profile, labels: &Labels) -> String {
    let mut h = String::from(r#"<header class="cv-header"><div>"#);

    let name = or_placeholder(&profile.name, labels.placeholder_name);
    let headline = or_placeholder(&profile.headline, labels.placeholder_headline);
    h.push_str(&format!(r#"<div class="cv-name">{name}</div>"#));
    h.push_str(&format!(r#"<div class="cv-headline">{headline}</div>"#));

    h.push_str(r#"<div class="cv-meta">"#);
    for (icon, value) in [
        ("✉️", &profile.email),
        ("📞", &profile.phone),
        ("📍", &profile.address),
    ] {
        if !value.is_empty() {
            h.push_str(&format!("<span>{icon} {}</span>", escape_html(value)));
        }
    }
    for (icon, href, text) in [
        ("🔗", &profile.website, labels.link_website),
        ("💼", &profile.linkedin, labels.link_linkedin),
        ("🐙", &profile.github, labels.link_github),
    ] {
        if !href.is_empty() {
            h.push_str(&format!("<span>{icon} {}</span>", external_link(href, text)));
        }
    }
    h.push_str("</div></div>");

    h.push_str("<div>");
    if !profile.photo.is_empty() {
        h.push_str(&format!(
            r#"<img src="{}" alt="{}" class="cv-photo"/>"#,
            escape_html(&profile.photo),
            labels.photo_alt
        ));
    }
    h.push_str("</div></header>");
    h
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        escape_html(value)
    }
}

fn external_link(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener">{text}</a>"#,
        escape_html(href)
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn section_shell(title: &str, class: Option<&str>, body: &str) -> String {
    let class = match class {
        Some(extra) => format!("cv-section {extra}"),
        None => "cv-section".to_string(),
    };
    format!(r#"<section class="{class}"><div class="cv-sec-title">{title}</div>{body}</section>"#)
}

/// Wraps visible items into a section, or `None` if there are none.
fn list_section(title: &str, items: Vec<String>) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(section_shell(title, None, &items.concat()))
}

/// `first — second`, with the separator only when `second` is set.
fn joined(first: &str, sep: &str, second: &str) -> String {
    if second.is_empty() {
        escape_html(first)
    } else {
        format!("{}{sep}{}", escape_html(first), escape_html(second))
    }
}

fn item(title: &str, sub: Option<String>, desc: &str) -> String {
    let mut h = String::from(r#"<div class="bubble mb-2">"#);
    h.push_str(&format!(r#"<div class="item-title">{title}</div>"#));
    if let Some(sub) = sub {
        h.push_str(&format!(r#"<div class="item-sub">{sub}</div>"#));
    }
    if !desc.is_empty() {
        h.push_str(&format!(
            r#"<div class="item-desc">{}</div>"#,
            nl2br(&escape_html(desc))
        ));
    }
    h.push_str("</div>");
    h
}

fn summary_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let paragraphs = format_summary(&profile.summary);
    if paragraphs.is_empty() {
        return None;
    }
    Some(section_shell(
        labels.title_summary,
        Some("cv-summary"),
        &format!(r#"<div class="bubble summary-text">{paragraphs}</div>"#),
    ))
}

fn experience_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let items = profile
        .experience
        .iter()
        .filter(|(_, it)| !it.is_blank())
        .map(|(_, it)| {
            item(
                &joined(&it.role, " — ", &it.company),
                Some(joined(&it.start, " – ", &it.end)),
                &it.desc,
            )
        })
        .collect();
    list_section(labels.section_title(Section::Experience), items)
}

fn education_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let items = profile
        .education
        .iter()
        .filter(|(_, it)| !it.is_blank())
        .map(|(_, it)| {
            item(
                &joined(&it.institution, " — ", &it.major),
                Some(joined(&it.start, " – ", &it.end)),
                &it.desc,
            )
        })
        .collect();
    list_section(labels.section_title(Section::Education), items)
}

fn projects_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let items = profile
        .projects
        .iter()
        .filter(|(_, it)| !it.is_blank())
        .map(|(_, it)| {
            let mut title = escape_html(&it.title);
            if !it.link.is_empty() {
                title.push_str(" — ");
                title.push_str(&external_link(&it.link, labels.link_project));
            }
            item(&title, None, &it.desc)
        })
        .collect();
    list_section(labels.section_title(Section::Projects), items)
}

fn skills_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let chips: String = profile
        .skills
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| format!(r#"<span class="skill-chip">{}</span>"#, escape_html(s)))
        .collect();
    if chips.is_empty() {
        return None;
    }
    Some(section_shell(
        labels.title_skills,
        None,
        &format!("<div>{chips}</div>"),
    ))
}

fn certificates_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let items = profile
        .certificates
        .iter()
        .filter(|(_, it)| !it.is_blank())
        .map(|(_, it)| {
            item(
                &escape_html(&it.name),
                Some(joined(&it.issuer, " – ", &it.year)),
                "",
            )
        })
        .collect();
    list_section(labels.section_title(Section::Certificates), items)
}

fn languages_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let items = profile
        .languages
        .iter()
        .filter(|(_, it)| !it.is_blank())
        .map(|(_, it)| {
            item(
                &escape_html(&it.name),
                Some(labels.level(it.level).to_string()),
                "",
            )
        })
        .collect();
    list_section(labels.section_title(Section::Languages), items)
}

fn references_section(profile: &Profile, labels: &Labels) -> Option<String> {
    let items = profile
        .references
        .iter()
        .filter(|(_, it)| !it.is_blank())
        .map(|(_, it)| {
            let sub = [it.company.as_str(), it.contact.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .map(escape_html)
                .collect::<Vec<_>>()
                .join(" ");
            item(&escape_html(&it.name), Some(sub), "")
        })
        .collect();
    list_section(labels.section_title(Section::References), items)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
