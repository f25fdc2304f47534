pub mod collection;
pub mod profile;
pub mod sections;

pub use collection::{FieldValues, SectionList};
pub use profile::{Profile, ProfileField, Template, Theme};
pub use sections::{LanguageLevel, Section, SectionRecord};
