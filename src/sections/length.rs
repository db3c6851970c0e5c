//! Length section - linear credit between the length floor and ceiling.

use super::SectionScore;

pub const MIN_LENGTH: usize = 8;
pub const MAX_LENGTH: usize = 20;

const MAX_POINTS: usize = 30;

/// Scores length from 0 (at 8 characters) to 30 (at 20 or more).
pub fn length_section(password: &str) -> SectionScore {
    let length = password.chars().count();

    if length < MIN_LENGTH {
        return SectionScore::with_reason(
            0,
            format!("Password must be at least {} characters", MIN_LENGTH),
        );
    }
    if length >= MAX_LENGTH {
        return SectionScore::new(MAX_POINTS as u32);
    }

    let points = (length - MIN_LENGTH) * MAX_POINTS / (MAX_LENGTH - MIN_LENGTH);
    SectionScore::with_reason(
        points as u32,
        format!("Passwords of {} or more characters score best", MAX_LENGTH),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_section_too_short() {
        let result = length_section("Short1!");
        assert_eq!(result.points, 0);
        assert_eq!(
            result.reasons,
            vec!["Password must be at least 8 characters".to_string()]
        );
    }

    #[test]
    fn test_length_section_exactly_minimum() {
        assert_eq!(length_section("12345678").points, 0);
    }

    #[test]
    fn test_length_section_interpolates() {
        assert_eq!(length_section("aaaaaaaaaaaaa").points, 12);
        assert_eq!(length_section("abcdefghijklmnop").points, 20);
    }

    #[test]
    fn test_length_section_ceiling() {
        let result = length_section("LongEnoughPassword123!");
        assert_eq!(result.points, 30);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 8 characters, 16 bytes
        assert_eq!(length_section("éééééééé").reasons.len(), 1);
        assert_eq!(length_section("éééééééé").points, 0);
        assert_eq!(
            length_section("ééééééé").reasons[0],
            "Password must be at least 8 characters"
        );
    }
}
