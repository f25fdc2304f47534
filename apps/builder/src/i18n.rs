//! Locale tables for preview headings, form labels, validation messages and alerts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{LanguageLevel, Section};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Id,
    En,
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(Locale::Id),
            "en" => Ok(Locale::En),
            other => Err(AppError::Validation(format!("unsupported locale '{other}'"))),
        }
    }
}

/// All user-visible strings for one locale.
#[derive(Debug)]
pub struct Labels {
    pub locale: Locale,
    pub placeholder_name: &'static str,
    pub placeholder_headline: &'static str,
    pub photo_alt: &'static str,

    pub title_summary: &'static str,
    pub title_experience: &'static str,
    pub title_education: &'static str,
    pub title_projects: &'static str,
    pub title_skills: &'static str,
    pub title_certificates: &'static str,
    pub title_languages: &'static str,
    pub title_references: &'static str,

    pub link_website: &'static str,
    pub link_linkedin: &'static str,
    pub link_github: &'static str,
    pub link_project: &'static str,

    pub level_basic: &'static str,
    pub level_intermediate: &'static str,
    pub level_fluent: &'static str,

    pub item_number: &'static str,
    pub drag_hint: &'static str,
    pub remove: &'static str,
    pub remove_photo: &'static str,

    pub invalid_name: &'static str,
    pub invalid_email: &'static str,
    pub invalid_phone: &'static str,
    pub invalid_website: &'static str,
    pub invalid_linkedin: &'static str,
    pub invalid_github: &'static str,

    pub alert_invalid_file: &'static str,
    pub alert_must_be_image: &'static str,
    pub alert_image_failed: &'static str,
    pub alert_resource_failed: &'static str,
    pub alert_link_copied: &'static str,
    pub alert_internal: &'static str,
    pub confirm_reset: &'static str,
}

static ID: Labels = Labels {
    locale: Locale::Id,
    placeholder_name: "Nama Lengkap",
    placeholder_headline: "Jabatan / Headline",
    photo_alt: "Foto",

    title_summary: "Ringkasan",
    title_experience: "Pengalaman",
    title_education: "Pendidikan",
    title_projects: "Project",
    title_skills: "Skill",
    title_certificates: "Sertifikat",
    title_languages: "Bahasa",
    title_references: "Referensi",

    link_website: "Website",
    link_linkedin: "LinkedIn",
    link_github: "GitHub",
    link_project: "Link",

    level_basic: "Dasar",
    level_intermediate: "Menengah",
    level_fluent: "Lancar",

    item_number: "Item",
    drag_hint: "Geser untuk urut",
    remove: "Hapus",
    remove_photo: "Hapus Foto",

    invalid_name: "Nama wajib diisi",
    invalid_email: "Format email tidak valid",
    invalid_phone: "Nomor HP tidak valid",
    invalid_website: "URL tidak valid",
    invalid_linkedin: "URL LinkedIn tidak valid",
    invalid_github: "URL GitHub tidak valid",

    alert_invalid_file: "File tidak valid",
    alert_must_be_image: "File harus berupa gambar!",
    alert_image_failed: "Gagal memproses gambar",
    alert_resource_failed: "Gagal memuat",
    alert_link_copied: "Link disalin ke clipboard!",
    alert_internal: "Terjadi kesalahan",
    confirm_reset: "Hapus semua data dan riwayat?",
};

static EN: Labels = Labels {
    locale: Locale::En,
    placeholder_name: "Full Name",
    placeholder_headline: "Title / Headline",
    photo_alt: "Photo",

    title_summary: "Summary",
    title_experience: "Experience",
    title_education: "Education",
    title_projects: "Projects",
    title_skills: "Skills",
    title_certificates: "Certificates",
    title_languages: "Languages",
    title_references: "References",

    link_website: "Website",
    link_linkedin: "LinkedIn",
    link_github: "GitHub",
    link_project: "Link",

    level_basic: "Basic",
    level_intermediate: "Intermediate",
    level_fluent: "Fluent",

    item_number: "Item",
    drag_hint: "Drag to reorder",
    remove: "Remove",
    remove_photo: "Remove Photo",

    invalid_name: "Name is required",
    invalid_email: "Invalid email format",
    invalid_phone: "Invalid phone number",
    invalid_website: "Invalid URL",
    invalid_linkedin: "Invalid LinkedIn URL",
    invalid_github: "Invalid GitHub URL",

    alert_invalid_file: "Invalid file",
    alert_must_be_image: "File must be an image!",
    alert_image_failed: "Failed to process image",
    alert_resource_failed: "Failed to load",
    alert_link_copied: "Link copied to clipboard!",
    alert_internal: "Something went wrong",
    confirm_reset: "Delete all data and history?",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::Id => &ID,
            Locale::En => &EN,
        }
    }

    pub fn section_title(&self, section: Section) -> &'static str {
        match section {
            Section::Education => self.title_education,
            Section::Experience => self.title_experience,
            Section::Projects => self.title_projects,
            Section::Certificates => self.title_certificates,
            Section::Languages => self.title_languages,
            Section::References => self.title_references,
        }
    }

    /// Display text for a language level. The stored value stays the canonical
    /// `Dasar | Menengah | Lancar` regardless of locale.
    pub fn level(&self, level: LanguageLevel) -> &'static str {
        match level {
            LanguageLevel::Dasar => self.level_basic,
            LanguageLevel::Menengah => self.level_intermediate,
            LanguageLevel::Lancar => self.level_fluent,
        }
    }

    /// Form label for one record field. Keys are shared between sections
    /// (`name`, `company`, `desc`), so the section disambiguates.
    pub fn field_label(&self, section: Section, key: &str) -> &'static str {
        let en = self.locale == Locale::En;
        match (section, key, en) {
            (_, "start", false) => "Tahun Mulai",
            (_, "start", true) => "Start",
            (_, "end", false) => "Tahun Selesai",
            (_, "end", true) => "End",
            (_, "desc", false) => "Deskripsi",
            (_, "desc", true) => "Description",
            (Section::Education, "institution", false) => "Institusi",
            (Section::Education, "institution", true) => "Institution",
            (Section::Education, "major", false) => "Jurusan",
            (Section::Education, "major", true) => "Major",
            (Section::Experience, "role", false) => "Posisi",
            (Section::Experience, "role", true) => "Role",
            (Section::Experience, "company", false) => "Perusahaan/Organisasi",
            (Section::References, "company", false) => "Perusahaan",
            (_, "company", true) => "Company",
            (Section::Projects, "title", false) => "Judul Project",
            (Section::Projects, "title", true) => "Project Title",
            (Section::Projects, "link", false) => "Link (GitHub/Website)",
            (Section::Projects, "link", true) => "Link (GitHub/Website)",
            (Section::Certificates, "name", false) => "Nama Sertifikat",
            (Section::Certificates, "name", true) => "Certificate Name",
            (Section::Certificates, "issuer", false) => "Penerbit",
            (Section::Certificates, "issuer", true) => "Issuer",
            (Section::Certificates, "year", false) => "Tahun",
            (Section::Certificates, "year", true) => "Year",
            (Section::Languages, "name", false) => "Bahasa",
            (Section::Languages, "name", true) => "Language",
            (Section::Languages, "level", false) => "Tingkat",
            (Section::Languages, "level", true) => "Level",
            (Section::References, "name", false) => "Nama",
            (Section::References, "name", true) => "Name",
            (Section::References, "contact", false) => "Kontak",
            (Section::References, "contact", true) => "Contact",
            _ => "",
        }
    }
}
