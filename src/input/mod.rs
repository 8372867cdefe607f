//! Input processing module
//! Handles file detection, document decoding and skill taxonomy loading

pub mod file_detector;
pub mod manager;
pub mod taxonomy;
pub mod text_extractor;

pub use manager::{collect_documents, InputManager};
pub use taxonomy::SkillTaxonomy;
