//! Complexity section - penalizes repeats, sequences and common words.

use crate::denylist::{
    contains_common_pattern, contains_common_word, has_repeated_characters,
    has_sequential_characters,
};

use super::SectionScore;

const POINTS_PER_CHECK: u32 = 5;

/// Scores complexity from 0 to 20, 5 points for each weakness absent.
pub fn complexity_section(password: &str) -> SectionScore {
    let checks: [(fn(&str) -> bool, &str); 4] = [
        (has_repeated_characters, "Password contains repetitive patterns"),
        (has_sequential_characters, "Password contains sequential patterns"),
        (contains_common_pattern, "Password contains a common password"),
        (contains_common_word, "Password contains a common word"),
    ];

    let mut result = SectionScore::default();
    for (is_weak, reason) in checks {
        if is_weak(password) {
            result.reasons.push(reason.to_string());
        } else {
            result.points += POINTS_PER_CHECK;
        }
    }
    result
}
