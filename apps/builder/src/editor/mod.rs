// List editor form painting. Mutations live on `state::ProfileStore`.
pub mod forms;

pub use forms::{photo_preview, section_form, skill_chips, SectionForm};
