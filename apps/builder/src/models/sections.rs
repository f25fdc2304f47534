//! Record shapes for the six ordered collections of a profile.
//!
//! Every record type implements [`SectionRecord`], which is what lets the list
//! editor and the form painter treat all sections the same way regardless of
//! their fields.

use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Section tag
// ────────────────────────────────────────────────────────────────────────────

/// One of the six record collections. The skills list is handled separately
/// because its items are bare strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Education,
    Experience,
    Projects,
    Certificates,
    Languages,
    References,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Education,
        Section::Experience,
        Section::Projects,
        Section::Certificates,
        Section::Languages,
        Section::References,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Education => "education",
            Section::Experience => "experience",
            Section::Projects => "projects",
            Section::Certificates => "certificates",
            Section::Languages => "languages",
            Section::References => "references",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| AppError::UnknownSection(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record trait
// ────────────────────────────────────────────────────────────────────────────

/// Shape-independent access to a collection record.
pub trait SectionRecord:
    Clone + Default + PartialEq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Field keys in form order. These are the `data-bind` keys of the editor.
    const FIELDS: &'static [&'static str];

    fn field(&self, key: &str) -> Option<&str>;

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError>;

    /// True when every field that makes the record visible in the preview is
    /// empty. Such placeholder records stay in the model but render nothing.
    fn is_blank(&self) -> bool;
}

/// Implements [`SectionRecord`] for a record made only of string fields.
macro_rules! string_record {
    ($ty:ident { $($field:ident),+ $(,)? }, meaningful: [$($visible:ident),+ $(,)?]) => {
        impl SectionRecord for $ty {
            const FIELDS: &'static [&'static str] = &[$(stringify!($field)),+];

            fn field(&self, key: &str) -> Option<&str> {
                match key {
                    $(stringify!($field) => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }

            fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
                match key {
                    $(stringify!($field) => self.$field = value.to_string(),)+
                    other => return Err(AppError::UnknownField(other.to_string())),
                }
                Ok(())
            }

            fn is_blank(&self) -> bool {
                true $(&& self.$visible.is_empty())+
            }
        }
    };
}

// ────────────────────────────────────────────────────────────────────────────
// Record types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub major: String,
    pub start: String,
    pub end: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub start: String,
    pub end: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub link: String,
    pub desc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    pub name: String,
    pub issuer: String,
    pub year: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LanguageLevel {
    #[default]
    Dasar,
    Menengah,
    Lancar,
}

impl LanguageLevel {
    pub const ALL: [LanguageLevel; 3] = [
        LanguageLevel::Dasar,
        LanguageLevel::Menengah,
        LanguageLevel::Lancar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageLevel::Dasar => "Dasar",
            LanguageLevel::Menengah => "Menengah",
            LanguageLevel::Lancar => "Lancar",
        }
    }
}

impl FromStr for LanguageLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown language level '{s}'")))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub name: String,
    pub level: LanguageLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub name: String,
    pub contact: String,
    pub company: String,
}

string_record!(Education { institution, major, start, end, desc }, meaningful: [institution, major, desc]);
string_record!(Experience { role, company, start, end, desc }, meaningful: [role, company, desc]);
string_record!(Project { title, link, desc }, meaningful: [title, desc]);
string_record!(Certificate { name, issuer, year }, meaningful: [name, issuer]);
string_record!(Reference { name, contact, company }, meaningful: [name]);

impl SectionRecord for Language {
    const FIELDS: &'static [&'static str] = &["name", "level"];

    fn field(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(self.name.as_str()),
            "level" => Some(self.level.as_str()),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key {
            "name" => self.name = value.to_string(),
            "level" => self.level = value.parse()?,
            other => return Err(AppError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn is_blank(&self) -> bool {
        self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_tag_round_trips_through_str() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn test_unknown_section_tag_rejected() {
        let err = "hobbies".parse::<Section>().unwrap_err();
        assert!(matches!(err, AppError::UnknownSection(tag) if tag == "hobbies"));
    }

    #[test]
    fn test_experience_blank_ignores_dates() {
        let exp = Experience {
            start: "2020".to_string(),
            end: "2023".to_string(),
            ..Default::default()
        };
        assert!(exp.is_blank());
    }

    #[test]
    fn test_experience_with_company_not_blank() {
        let exp = Experience {
            company: "Acme".to_string(),
            ..Default::default()
        };
        assert!(!exp.is_blank());
    }

    #[test]
    fn test_project_link_alone_is_blank() {
        let p = Project {
            link: "https://example.com".to_string(),
            ..Default::default()
        };
        assert!(p.is_blank());
    }

    #[test]
    fn test_set_field_unknown_key() {
        let mut edu = Education::default();
        let err = edu.set_field("gpa", "4.0").unwrap_err();
        assert!(matches!(err, AppError::UnknownField(k) if k == "gpa"));
    }

    #[test]
    fn test_language_level_set_and_read() {
        let mut lang = Language::default();
        assert_eq!(lang.field("level"), Some("Dasar"));
        lang.set_field("level", "Lancar").unwrap();
        assert_eq!(lang.level, LanguageLevel::Lancar);
        assert!(lang.set_field("level", "Expert").is_err());
        assert_eq!(lang.level, LanguageLevel::Lancar);
    }

    #[test]
    fn test_fields_match_serialized_keys() {
        let json = serde_json::to_value(Reference::default()).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        for key in Reference::FIELDS {
            assert!(keys.contains(key), "missing {key}");
        }
    }
}
