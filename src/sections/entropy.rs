//! Entropy section - coarse `length * log2(charset)` estimate.

use crate::charset::{CharClass, ClassCounts};

use super::SectionScore;

const MAX_POINTS: f64 = 20.0;
const FULL_CREDIT_BITS: f64 = 100.0;

/// Sum of the nominal charset sizes of the classes present.
pub fn charset_size(password: &str) -> u32 {
    let counts = ClassCounts::of(password);
    CharClass::ALL
        .iter()
        .filter(|&&class| counts.has(class))
        .map(|class| class.charset_size())
        .sum()
}

/// Estimated entropy in bits; 0 for an empty password.
pub fn estimate_entropy(password: &str) -> f64 {
    let charset = charset_size(password);
    if charset == 0 {
        return 0.0;
    }
    password.chars().count() as f64 * (charset as f64).log2()
}

/// Scores entropy from 0 to 20; 100 bits or more earns full credit.
pub fn entropy_section(password: &str) -> SectionScore {
    let entropy = estimate_entropy(password);
    let points = (entropy / FULL_CREDIT_BITS * MAX_POINTS).min(MAX_POINTS) as u32;

    if entropy < FULL_CREDIT_BITS {
        return SectionScore::with_reason(
            points,
            format!("Estimated entropy is {:.0} bits", entropy),
        );
    }
    SectionScore::new(points)
}
