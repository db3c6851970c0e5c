//! Character variety section - rewards uppercase, lowercase, digits and specials.

use crate::charset::{CharClass, ClassCounts};

use super::SectionScore;

const POINTS_PER_CLASS: u32 = 5;
const MIXED_CASE_BONUS: u32 = 5;
const MIXED_TYPES_BONUS: u32 = 5;

/// Scores character variety from 0 to 30.
///
/// - 5 points per class present (max 20)
/// - 5 points when both cases are present
/// - 5 points when at least three classes are present
pub fn character_variety_section(password: &str) -> SectionScore {
    let counts = ClassCounts::of(password);
    let distinct = counts.distinct() as u32;

    let mut points = distinct * POINTS_PER_CLASS;
    if counts.has(CharClass::Uppercase) && counts.has(CharClass::Lowercase) {
        points += MIXED_CASE_BONUS;
    }
    if distinct >= 3 {
        points += MIXED_TYPES_BONUS;
    }

    let missing: Vec<&str> = [
        (CharClass::Uppercase, "uppercase"),
        (CharClass::Lowercase, "lowercase"),
        (CharClass::Digit, "numbers"),
        (CharClass::Special, "special characters"),
    ]
    .into_iter()
    .filter(|&(class, _)| !counts.has(class))
    .map(|(_, label)| label)
    .collect();

    if !missing.is_empty() {
        return SectionScore::with_reason(points, format!("Missing: {}", missing.join(", ")));
    }
    SectionScore::new(points)
}
