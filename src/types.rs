//! Strength score, level and evaluation result types.

use std::fmt;

/// Strength score clamped to `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrengthScore(u8);

impl StrengthScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN as u32, Self::MAX as u32) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for StrengthScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered strength labels derived from a [`StrengthScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StrengthLevel {
    NotEvaluated,
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    pub fn from_score(score: StrengthScore) -> Self {
        match score.value() {
            0..=19 => StrengthLevel::VeryWeak,
            20..=39 => StrengthLevel::Weak,
            40..=59 => StrengthLevel::Fair,
            60..=79 => StrengthLevel::Good,
            80..=89 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StrengthLevel::NotEvaluated => "Not Evaluated",
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Fair => "Fair",
            StrengthLevel::Good => "Good",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        }
    }
}

impl From<StrengthScore> for StrengthLevel {
    fn from(score: StrengthScore) -> Self {
        StrengthLevel::from_score(score)
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a strength evaluation.
///
/// `score` is `None` only when the evaluation was cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthEvaluation {
    pub score: Option<StrengthScore>,
    pub reasons: Vec<String>,
}

impl StrengthEvaluation {
    pub fn strength(&self) -> StrengthLevel {
        self.score
            .map(StrengthLevel::from_score)
            .unwrap_or(StrengthLevel::NotEvaluated)
    }
}
