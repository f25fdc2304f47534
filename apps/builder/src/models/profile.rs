use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::collection::{Collection, SectionList};
use crate::models::sections::{
    Certificate, Education, Experience, Language, Project, Reference, Section,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blue,
    Green,
    Gray,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Blue, Theme::Green, Theme::Gray];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Green => "green",
            Theme::Gray => "gray",
        }
    }
}

impl FromStr for Theme {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown theme '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Classic,
    Modern,
    Elegant,
    Minimalist,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Classic,
        Template::Modern,
        Template::Elegant,
        Template::Minimalist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Classic => "classic",
            Template::Modern => "modern",
            Template::Elegant => "elegant",
            Template::Minimalist => "minimalist",
        }
    }
}

impl FromStr for Template {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown template '{s}'")))
    }
}

/// The free-text scalar inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileField {
    Name,
    Headline,
    Email,
    Phone,
    Address,
    Summary,
    Website,
    Linkedin,
    Github,
}

impl ProfileField {
    pub const ALL: [ProfileField; 9] = [
        ProfileField::Name,
        ProfileField::Headline,
        ProfileField::Email,
        ProfileField::Phone,
        ProfileField::Address,
        ProfileField::Summary,
        ProfileField::Website,
        ProfileField::Linkedin,
        ProfileField::Github,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Headline => "headline",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Address => "address",
            ProfileField::Summary => "summary",
            ProfileField::Website => "website",
            ProfileField::Linkedin => "linkedin",
            ProfileField::Github => "github",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| AppError::UnknownField(s.to_string()))
    }
}

/// All user-entered resume data plus UI preferences.
///
/// Serialized field names follow the stored/share-link format (`showQR`,
/// `qrCustom`). Keys this struct does not know are kept in `extra` and written
/// back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub headline: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    /// Embedded image data URL, or empty.
    pub photo: String,

    pub education: Collection<Education>,
    pub experience: Collection<Experience>,
    pub projects: Collection<Project>,
    pub skills: Vec<String>,
    pub certificates: Collection<Certificate>,
    pub languages: Collection<Language>,
    pub references: Collection<Reference>,

    pub theme: Theme,
    pub template: Template,
    #[serde(rename = "showQR")]
    pub show_qr: bool,
    #[serde(rename = "qrCustom")]
    pub qr_custom: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Headline => &self.headline,
            ProfileField::Email => &self.email,
            ProfileField::Phone => &self.phone,
            ProfileField::Address => &self.address,
            ProfileField::Summary => &self.summary,
            ProfileField::Website => &self.website,
            ProfileField::Linkedin => &self.linkedin,
            ProfileField::Github => &self.github,
        }
    }

    pub fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Headline => &mut self.headline,
            ProfileField::Email => &mut self.email,
            ProfileField::Phone => &mut self.phone,
            ProfileField::Address => &mut self.address,
            ProfileField::Summary => &mut self.summary,
            ProfileField::Website => &mut self.website,
            ProfileField::Linkedin => &mut self.linkedin,
            ProfileField::Github => &mut self.github,
        }
    }

    pub fn section(&self, section: Section) -> &dyn SectionList {
        match section {
            Section::Education => &self.education,
            Section::Experience => &self.experience,
            Section::Projects => &self.projects,
            Section::Certificates => &self.certificates,
            Section::Languages => &self.languages,
            Section::References => &self.references,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut dyn SectionList {
        match section {
            Section::Education => &mut self.education,
            Section::Experience => &mut self.experience,
            Section::Projects => &mut self.projects,
            Section::Certificates => &mut self.certificates,
            Section::Languages => &mut self.languages,
            Section::References => &mut self.references,
        }
    }

    /// The QR footer target: custom link first, then LinkedIn, then GitHub.
    /// `None` when QR is switched off or nothing is available to encode.
    pub fn qr_target(&self) -> Option<&str> {
        if !self.show_qr {
            return None;
        }
        [&self.qr_custom, &self.linkedin, &self.github]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_profile_is_empty() {
        let p = Profile::default();
        assert!(p.name.is_empty());
        assert_eq!(p.theme, Theme::Blue);
        assert_eq!(p.template, Template::Classic);
        assert!(!p.show_qr);
        assert!(p.experience.is_empty());
    }

    #[test]
    fn test_wire_names_match_stored_format() {
        let p = Profile {
            show_qr: true,
            qr_custom: "https://x.dev".to_string(),
            ..Default::default()
        };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["showQR"], json!(true));
        assert_eq!(v["qrCustom"], json!("https://x.dev"));
        assert_eq!(v["theme"], json!("blue"));
        assert!(v["experience"].is_array());
    }

    #[test]
    fn test_missing_keys_default() {
        let p: Profile = serde_json::from_value(json!({ "name": "Alex" })).unwrap();
        assert_eq!(p.name, "Alex");
        assert!(p.headline.is_empty());
        assert!(p.skills.is_empty());
    }

    #[test]
    fn test_unknown_keys_retained() {
        let p: Profile =
            serde_json::from_value(json!({ "name": "Alex", "hobbies": ["chess"] })).unwrap();
        assert_eq!(p.extra.get("hobbies"), Some(&json!(["chess"])));
        let back = serde_json::to_value(&p).unwrap();
        assert_eq!(back["hobbies"], json!(["chess"]));
    }

    #[test]
    fn test_qr_target_priority() {
        let mut p = Profile {
            show_qr: true,
            linkedin: "https://linkedin.com/in/x".to_string(),
            github: "https://github.com/x".to_string(),
            ..Default::default()
        };
        assert_eq!(p.qr_target(), Some("https://linkedin.com/in/x"));
        p.qr_custom = "https://me.dev".to_string();
        assert_eq!(p.qr_target(), Some("https://me.dev"));
        p.show_qr = false;
        assert_eq!(p.qr_target(), None);
    }

    #[test]
    fn test_qr_target_none_without_links() {
        let p = Profile {
            show_qr: true,
            ..Default::default()
        };
        assert_eq!(p.qr_target(), None);
    }

    #[test]
    fn test_profile_field_parse() {
        assert_eq!("linkedin".parse::<ProfileField>().unwrap(), ProfileField::Linkedin);
        assert!("photo".parse::<ProfileField>().is_err());
    }
}
