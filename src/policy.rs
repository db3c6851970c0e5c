//! Password policy: the normalized set of acceptance rules.
//!
//! Two configuration shapes feed one [`Policy`] type:
//!
//! - [`PolicyConfig`] (count-based, primary): per-class minimums plus the
//!   optional length cap, character-type count and complexity toggles.
//!   Never fails; contradictory values are normalized.
//! - [`CharacterTypesConfig`]: length bounds and a distinct-class count,
//!   validated eagerly by [`Policy::with_character_types`].

use serde::{Deserialize, Deserializer};

use crate::charset::CharClass;
use crate::error::{PasswordError, Result};

pub const DEFAULT_MINIMUM_DIGITS: i64 = 1;
pub const DEFAULT_MINIMUM_LENGTH: i64 = 10;
pub const DEFAULT_MINIMUM_LETTERS: i64 = 1;
pub const DEFAULT_MINIMUM_LOWERCASE: i64 = 1;
pub const DEFAULT_MINIMUM_SPECIAL_CHARS: i64 = 1;
pub const DEFAULT_MINIMUM_UPPERCASE: i64 = 1;

/// Shortest length a character-types policy may demand.
pub const CHARACTER_TYPES_LENGTH_FLOOR: usize = 8;

/// Count-based policy configuration.
///
/// Deserializes from a camelCase map (`minimumDigits`, `minimumLength`, ...).
/// Numeric options accept integers or floats; floats are truncated and signs
/// dropped during normalization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyConfig {
    #[serde(deserialize_with = "truncated")]
    pub minimum_digits: i64,
    #[serde(deserialize_with = "truncated")]
    pub minimum_lowercase: i64,
    #[serde(deserialize_with = "truncated")]
    pub minimum_uppercase: i64,
    #[serde(deserialize_with = "truncated")]
    pub minimum_special_chars: i64,
    #[serde(deserialize_with = "truncated")]
    pub minimum_letters: i64,
    #[serde(deserialize_with = "truncated")]
    pub minimum_length: i64,
    #[serde(deserialize_with = "truncated_opt")]
    pub maximum_length: Option<i64>,
    #[serde(deserialize_with = "truncated")]
    pub minimum_character_types: i64,
    pub allow_repeated_characters: bool,
    pub allow_sequential_characters: bool,
    pub allow_common_patterns: bool,
    pub trim_whitespace: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            minimum_digits: DEFAULT_MINIMUM_DIGITS,
            minimum_lowercase: DEFAULT_MINIMUM_LOWERCASE,
            minimum_uppercase: DEFAULT_MINIMUM_UPPERCASE,
            minimum_special_chars: DEFAULT_MINIMUM_SPECIAL_CHARS,
            minimum_letters: DEFAULT_MINIMUM_LETTERS,
            minimum_length: DEFAULT_MINIMUM_LENGTH,
            maximum_length: None,
            minimum_character_types: 0,
            allow_repeated_characters: true,
            allow_sequential_characters: true,
            allow_common_patterns: true,
            trim_whitespace: true,
        }
    }
}

/// Named-parameter policy configuration, validated rather than normalized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterTypesConfig {
    #[serde(deserialize_with = "truncated")]
    pub minimum_length: i64,
    #[serde(deserialize_with = "truncated")]
    pub maximum_length: i64,
    #[serde(deserialize_with = "truncated")]
    pub minimum_character_types: i64,
    pub allow_repeated_characters: bool,
    pub allow_sequential_characters: bool,
    pub allow_common_patterns: bool,
}

impl Default for CharacterTypesConfig {
    fn default() -> Self {
        Self {
            minimum_length: 10,
            maximum_length: 20,
            minimum_character_types: 3,
            allow_repeated_characters: false,
            allow_sequential_characters: false,
            allow_common_patterns: false,
        }
    }
}

fn truncated<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    Ok(f64::deserialize(deserializer)?.trunc() as i64)
}

fn truncated_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<i64>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.map(|v| v.trunc() as i64))
}

fn count(value: i64) -> usize {
    value.unsigned_abs() as usize
}

/// Immutable, normalized password policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    minimum_digits: usize,
    minimum_lowercase: usize,
    minimum_uppercase: usize,
    minimum_special_chars: usize,
    minimum_letters: usize,
    minimum_length: usize,
    maximum_length: Option<usize>,
    minimum_character_types: usize,
    allow_repeated_characters: bool,
    allow_sequential_characters: bool,
    allow_common_patterns: bool,
    trim_whitespace: bool,
}

impl Policy {
    /// Builds a count-based policy. Never fails.
    ///
    /// - `minimum_letters` is raised to `minimum_lowercase + minimum_uppercase`
    /// - `minimum_length` is raised to the sum of the class minimums, plus
    ///   one for each further class `minimum_character_types` (capped at 4)
    ///   demands
    /// - a `maximum_length` below the resulting minimum is raised to it
    ///
    /// Sums saturate at `usize::MAX`.
    pub fn new(config: PolicyConfig) -> Self {
        let minimum_digits = count(config.minimum_digits);
        let minimum_lowercase = count(config.minimum_lowercase);
        let minimum_uppercase = count(config.minimum_uppercase);
        let minimum_special_chars = count(config.minimum_special_chars);

        let minimum_letters =
            count(config.minimum_letters).max(minimum_lowercase.saturating_add(minimum_uppercase));
        let minimum_character_types = count(config.minimum_character_types).min(4);

        let distinct_required = [
            minimum_digits,
            minimum_lowercase,
            minimum_uppercase,
            minimum_special_chars,
        ]
        .iter()
        .filter(|&&n| n > 0)
        .count();
        // one character per class the type count demands beyond those with a minimum
        let padding = minimum_character_types.saturating_sub(distinct_required);

        let configured_length = count(config.minimum_length);
        let required = minimum_letters
            .saturating_add(minimum_digits)
            .saturating_add(minimum_special_chars)
            .saturating_add(padding);
        let minimum_length = configured_length.max(required);

        #[cfg(feature = "tracing")]
        {
            if minimum_length != configured_length {
                tracing::debug!(
                    "Policy minimum length raised from {} to {}",
                    configured_length,
                    minimum_length
                );
            }
        }

        let maximum_length = config
            .maximum_length
            .map(|max| count(max).max(minimum_length));

        Self {
            minimum_digits,
            minimum_lowercase,
            minimum_uppercase,
            minimum_special_chars,
            minimum_letters,
            minimum_length,
            maximum_length,
            minimum_character_types,
            allow_repeated_characters: config.allow_repeated_characters,
            allow_sequential_characters: config.allow_sequential_characters,
            allow_common_patterns: config.allow_common_patterns,
            trim_whitespace: config.trim_whitespace,
        }
    }

    /// Builds a character-types policy.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordError::InvalidPolicy`] if:
    /// - `minimum_length` is below 8
    /// - `maximum_length` is below `minimum_length`
    /// - `minimum_character_types` is outside `1..=4`
    pub fn with_character_types(config: CharacterTypesConfig) -> Result<Self> {
        if config.minimum_length < CHARACTER_TYPES_LENGTH_FLOOR as i64 {
            return Err(PasswordError::InvalidPolicy(format!(
                "Minimum length must be at least {} characters",
                CHARACTER_TYPES_LENGTH_FLOOR
            )));
        }
        if config.maximum_length < config.minimum_length {
            return Err(PasswordError::InvalidPolicy(
                "Maximum length must be greater than or equal to minimum length".to_string(),
            ));
        }
        if !(1..=4).contains(&config.minimum_character_types) {
            return Err(PasswordError::InvalidPolicy(
                "Minimum character types must be between 1 and 4".to_string(),
            ));
        }

        Ok(Self {
            minimum_digits: 0,
            minimum_lowercase: 0,
            minimum_uppercase: 0,
            minimum_special_chars: 0,
            minimum_letters: 0,
            minimum_length: config.minimum_length as usize,
            maximum_length: Some(config.maximum_length as usize),
            minimum_character_types: config.minimum_character_types as usize,
            allow_repeated_characters: config.allow_repeated_characters,
            allow_sequential_characters: config.allow_sequential_characters,
            allow_common_patterns: config.allow_common_patterns,
            trim_whitespace: false,
        })
    }

    pub fn minimum_digits(&self) -> usize {
        self.minimum_digits
    }

    pub fn minimum_lowercase(&self) -> usize {
        self.minimum_lowercase
    }

    pub fn minimum_uppercase(&self) -> usize {
        self.minimum_uppercase
    }

    pub fn minimum_special_chars(&self) -> usize {
        self.minimum_special_chars
    }

    /// Minimum total letters, never less than lowercase + uppercase minimums.
    pub fn minimum_letters(&self) -> usize {
        self.minimum_letters
    }

    pub fn minimum_length(&self) -> usize {
        self.minimum_length
    }

    /// Upper length bound; `None` means unbounded.
    pub fn maximum_length(&self) -> Option<usize> {
        self.maximum_length
    }

    pub fn minimum_character_types(&self) -> usize {
        self.minimum_character_types
    }

    pub fn allow_repeated_characters(&self) -> bool {
        self.allow_repeated_characters
    }

    pub fn allow_sequential_characters(&self) -> bool {
        self.allow_sequential_characters
    }

    pub fn allow_common_patterns(&self) -> bool {
        self.allow_common_patterns
    }

    pub fn trim_whitespace(&self) -> bool {
        self.trim_whitespace
    }

    /// Per-class minimum for a single class.
    pub fn minimum_for(&self, class: CharClass) -> usize {
        match class {
            CharClass::Uppercase => self.minimum_uppercase,
            CharClass::Lowercase => self.minimum_lowercase,
            CharClass::Digit => self.minimum_digits,
            CharClass::Special => self.minimum_special_chars,
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Policy::new(PolicyConfig::default())
    }
}

impl From<PolicyConfig> for Policy {
    fn from(config: PolicyConfig) -> Self {
        Policy::new(config)
    }
}

impl TryFrom<CharacterTypesConfig> for Policy {
    type Error = PasswordError;

    fn try_from(config: CharacterTypesConfig) -> Result<Self> {
        Policy::with_character_types(config)
    }
}
