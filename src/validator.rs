//! Validation of candidate passwords against a [`Policy`].

use std::fmt;

use crate::charset::ClassCounts;
use crate::denylist::{contains_common_pattern, has_repeated_characters, has_sequential_characters};
use crate::policy::Policy;

/// A single policy rule a password can violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    Length,
    Digits,
    Letters,
    Uppercase,
    Lowercase,
    SpecialChars,
    CharacterTypes,
    RepeatedCharacters,
    SequentialCharacters,
    CommonPatterns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every rule a candidate failed, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn violates(&self, rule: Rule) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

/// Stateless rule evaluator bound to one policy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validator {
    policy: Policy,
}

impl Validator {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Returns `true` if the password satisfies every rule of the policy.
    /// Never fails; an empty password is simply invalid (or valid, for a
    /// policy with no requirements).
    pub fn is_valid(&self, password: &str) -> bool {
        self.meets_length_requirement(password)
            && self.meets_character_count_requirements(password)
            && self.meets_character_type_requirement(password)
            && self.meets_complexity_requirements(password)
    }

    /// Evaluates every rule and reports all violations.
    pub fn validate(&self, password: &str) -> ValidationReport {
        let candidate = self.candidate(password);
        let mut violations = Vec::new();
        violations.extend(self.length_violation(candidate));
        violations.extend(self.count_violations(candidate));
        violations.extend(self.type_violation(candidate));
        violations.extend(self.complexity_violations(candidate));
        ValidationReport { violations }
    }

    pub fn meets_length_requirement(&self, password: &str) -> bool {
        self.length_violation(self.candidate(password)).is_none()
    }

    pub fn meets_character_count_requirements(&self, password: &str) -> bool {
        self.count_violations(self.candidate(password)).is_empty()
    }

    pub fn meets_character_type_requirement(&self, password: &str) -> bool {
        self.type_violation(self.candidate(password)).is_none()
    }

    pub fn meets_complexity_requirements(&self, password: &str) -> bool {
        self.complexity_violations(self.candidate(password)).is_empty()
    }

    fn candidate<'a>(&self, password: &'a str) -> &'a str {
        if self.policy.trim_whitespace() {
            password.trim()
        } else {
            password
        }
    }

    fn length_violation(&self, candidate: &str) -> Option<Violation> {
        let length = candidate.chars().count();
        let minimum = self.policy.minimum_length();

        if length < minimum {
            return Some(Violation {
                rule: Rule::Length,
                message: format!("Password must be at least {} characters", minimum),
            });
        }
        match self.policy.maximum_length() {
            Some(maximum) if length > maximum => Some(Violation {
                rule: Rule::Length,
                message: format!("Password must be at most {} characters", maximum),
            }),
            _ => None,
        }
    }

    fn count_violations(&self, candidate: &str) -> Vec<Violation> {
        let counts = ClassCounts::of(candidate);
        let checks = [
            (Rule::Digits, counts.digits, self.policy.minimum_digits(), "digits"),
            (Rule::Letters, counts.letters(), self.policy.minimum_letters(), "letters"),
            (
                Rule::Uppercase,
                counts.uppercase,
                self.policy.minimum_uppercase(),
                "uppercase letters",
            ),
            (
                Rule::Lowercase,
                counts.lowercase,
                self.policy.minimum_lowercase(),
                "lowercase letters",
            ),
            (
                Rule::SpecialChars,
                counts.special,
                self.policy.minimum_special_chars(),
                "special characters",
            ),
        ];

        checks
            .into_iter()
            .filter(|&(_, found, minimum, _)| found < minimum)
            .map(|(rule, _, minimum, label)| Violation {
                rule,
                message: format!("Password must contain at least {} {}", minimum, label),
            })
            .collect()
    }

    fn type_violation(&self, candidate: &str) -> Option<Violation> {
        let required = self.policy.minimum_character_types();
        if ClassCounts::of(candidate).distinct() < required {
            let classes = "uppercase, lowercase, digits and special characters";
            return Some(Violation {
                rule: Rule::CharacterTypes,
                message: format!("Password must mix at least {} of {}", required, classes),
            });
        }
        None
    }

    fn complexity_violations(&self, candidate: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        if !self.policy.allow_repeated_characters() && has_repeated_characters(candidate) {
            violations.push(Violation {
                rule: Rule::RepeatedCharacters,
                message: "Password contains repeated characters".to_string(),
            });
        }
        if !self.policy.allow_sequential_characters() && has_sequential_characters(candidate) {
            violations.push(Violation {
                rule: Rule::SequentialCharacters,
                message: "Password contains sequential characters".to_string(),
            });
        }
        if !self.policy.allow_common_patterns() && contains_common_pattern(candidate) {
            violations.push(Violation {
                rule: Rule::CommonPatterns,
                message: "Password contains a common password pattern".to_string(),
            });
        }

        violations
    }
}

/// Shorthand for `Validator::new(policy.clone()).is_valid(password)`.
pub fn is_valid(password: &str, policy: &Policy) -> bool {
    Validator::new(policy.clone()).is_valid(password)
}
