//! Field extractors
//!
//! Each extractor reads either the normalised text or its analysis and
//! reports a miss as `None` or an empty collection, never as an error.

pub mod education;
pub mod email;
pub mod name;
pub mod phone;
pub mod skills;

pub use education::{EducationEntry, EducationExtractor};
pub use email::EmailExtractor;
pub use name::extract_name;
pub use phone::PhoneExtractor;
pub use skills::extract_skills;
