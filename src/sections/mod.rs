//! Password scoring sections
//!
//! Each section scores one aspect of password strength and explains any
//! points it withheld.

mod complexity;
mod entropy;
mod length;
mod variety;

pub use complexity::complexity_section;
pub use entropy::entropy_section;
pub use length::{MIN_LENGTH, length_section};
pub use variety::character_variety_section;

/// Points awarded by one section, plus the reasons points were withheld.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionScore {
    pub points: u32,
    pub reasons: Vec<String>,
}

impl SectionScore {
    fn new(points: u32) -> Self {
        Self {
            points,
            reasons: Vec::new(),
        }
    }

    fn with_reason(points: u32, reason: String) -> Self {
        Self {
            points,
            reasons: vec![reason],
        }
    }
}

/// Signature shared by all sections.
pub type Section = fn(&str) -> SectionScore;
