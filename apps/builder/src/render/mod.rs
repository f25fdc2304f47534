// View rendering: escaping helpers and the full-document preview builder.

pub mod escape;
pub mod preview;

pub use preview::render_preview;
