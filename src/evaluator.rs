//! Password strength evaluator - main scoring logic.
//!
//! The score is the sum of four sections (length 0-30, variety 0-30,
//! complexity 0-20, entropy 0-20) clamped to `1..=100`. Passwords shorter
//! than the length floor short-circuit to 1.

use secrecy::{ExposeSecret, SecretString};

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::sections::{
    MIN_LENGTH, Section, character_variety_section, complexity_section, entropy_section,
    length_section,
};
use crate::types::{StrengthEvaluation, StrengthLevel, StrengthScore};

/// Policy-independent strength scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrengthChecker;

impl StrengthChecker {
    pub fn new() -> Self {
        Self
    }

    /// Scores a password from 1 to 100.
    pub fn score(&self, password: &str) -> u8 {
        score(password)
    }

    /// Label derived from [`StrengthChecker::score`].
    pub fn level(&self, password: &str) -> StrengthLevel {
        StrengthLevel::from_score(StrengthScore::new(self.score(password) as u32))
    }

    /// Scores a password and explains where points were lost.
    pub fn evaluate(&self, password: &str) -> StrengthEvaluation {
        run_sections(password, || false)
    }
}

/// Scores a password from 1 to 100. Empty and short passwords score 1.
pub fn score(password: &str) -> u8 {
    run_sections(password, || false)
        .score
        .map(|s| s.value())
        .unwrap_or(StrengthScore::MIN)
}

/// Evaluates password strength and returns a detailed evaluation.
///
/// # Arguments
/// * `password` - The password to evaluate
/// * `token` - Optional cancellation token (async feature only), checked
///   before each section
///
/// # Returns
/// A `StrengthEvaluation` containing score and reasons. The score is `None`
/// if the evaluation was cancelled.
pub fn evaluate_password_strength(
    password: &SecretString,
    #[cfg(feature = "async")] token: Option<CancellationToken>,
) -> StrengthEvaluation {
    #[cfg(feature = "async")]
    let is_cancelled = || token.as_ref().is_some_and(|t| t.is_cancelled());

    #[cfg(not(feature = "async"))]
    let is_cancelled = || false;

    run_sections(password.expose_secret(), is_cancelled)
}

fn run_sections(pwd: &str, is_cancelled: impl Fn() -> bool) -> StrengthEvaluation {
    if pwd.chars().count() < MIN_LENGTH {
        return StrengthEvaluation {
            score: Some(StrengthScore::new(StrengthScore::MIN as u32)),
            reasons: vec![format!("Password must be at least {} characters", MIN_LENGTH)],
        };
    }

    // Orchestrator: execute sections in sequence
    let sections: [(&str, Section); 4] = [
        ("length", length_section),
        ("variety", character_variety_section),
        ("complexity", complexity_section),
        ("entropy", entropy_section),
    ];

    let mut total = 0;
    let mut reasons = Vec::new();

    for (_section_name, section_fn) in sections {
        if is_cancelled() {
            reasons.push("Evaluation cancelled".to_string());
            return StrengthEvaluation {
                score: None,
                reasons,
            };
        }

        let section = section_fn(pwd);

        #[cfg(feature = "tracing")]
        tracing::trace!("Section {} awarded {} points", _section_name, section.points);

        total += section.points;
        reasons.extend(section.reasons);
    }

    StrengthEvaluation {
        score: Some(StrengthScore::new(total)),
        reasons,
    }
}

/// Async version that sends evaluation result via channel.
#[cfg(feature = "async")]
pub async fn evaluate_password_strength_tx(
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<StrengthEvaluation>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("evaluation is about to start...");

    let evaluation = evaluate_password_strength(password, Some(token));

    if let Err(_e) = tx.send(evaluation).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}
