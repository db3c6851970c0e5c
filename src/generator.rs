//! Policy-driven password generation.
//!
//! Passwords are built by construction: the required characters of every
//! class are emitted first, the remainder is filled from the full pool up to a
//! length drawn from the policy bounds, then the whole string is shuffled.
//! Complexity rules (repeats, sequences, denylisted patterns) cannot be
//! guaranteed by construction, so each candidate is re-checked by the
//! validator and rebuilt, up to a fixed number of attempts.
//!
//! Every random draw uses the operating system CSPRNG.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use secrecy::SecretString;
use secrecy::zeroize::Zeroize;

use crate::charset::CharClass;
use crate::error::{PasswordError, Result};
use crate::policy::Policy;
use crate::validator::Validator;

/// Attempts made before giving up with `GenerationExhausted`.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Upper length used when the policy sets no maximum.
pub const DEFAULT_UNBOUNDED_LENGTH: usize = 20;

/// Longest password the generator will build, whatever the policy maximum.
pub const MAX_GENERATED_LENGTH: usize = 4096;

/// Explicit choice of character classes, one flag per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSelection {
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub special: bool,
}

impl Default for ClassSelection {
    fn default() -> Self {
        Self {
            uppercase: true,
            lowercase: true,
            digits: true,
            special: true,
        }
    }
}

impl ClassSelection {
    pub fn contains(&self, class: CharClass) -> bool {
        match class {
            CharClass::Uppercase => self.uppercase,
            CharClass::Lowercase => self.lowercase,
            CharClass::Digit => self.digits,
            CharClass::Special => self.special,
        }
    }

    fn classes(&self) -> Vec<CharClass> {
        CharClass::ALL
            .into_iter()
            .filter(|&class| self.contains(class))
            .collect()
    }
}

/// Everything needed to construct one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Plan {
    pool: Vec<char>,
    quotas: Vec<(CharClass, usize)>,
    extra_letters: usize,
    min_length: usize,
    max_length: usize,
}

/// Generates passwords that satisfy a policy.
#[derive(Debug, Clone)]
pub struct Generator {
    validator: Validator,
    max_attempts: usize,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl Generator {
    pub fn new(policy: Policy) -> Self {
        Self::with_validator(Validator::new(policy))
    }

    pub fn with_validator(validator: Validator) -> Self {
        Self {
            validator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Caps the number of construct-and-validate rounds.
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn policy(&self) -> &Policy {
        self.validator.policy()
    }

    /// Generates a password using the classes the policy requires.
    ///
    /// # Errors
    ///
    /// - [`PasswordError::InvalidArgument`] if the policy requires no class
    /// - [`PasswordError::GenerationExhausted`] if no candidate passed
    ///   validation within the attempt budget
    pub fn generate(&self) -> Result<SecretString> {
        let plan = plan_for_policy(self.policy())?;
        self.generate_from(&plan)
    }

    /// Generates a password drawing only from the selected classes, with at
    /// least one character of each.
    ///
    /// # Errors
    ///
    /// [`PasswordError::InvalidArgument`] if nothing is selected or the
    /// selection leaves out a class the policy requires.
    pub fn generate_with(&self, selection: ClassSelection) -> Result<SecretString> {
        let plan = plan_for_selection(self.policy(), selection)?;
        self.generate_from(&plan)
    }

    fn generate_from(&self, plan: &Plan) -> Result<SecretString> {
        let mut rng = OsRng;

        for _attempt in 1..=self.max_attempts {
            let mut candidate = construct(plan, &mut rng)?;
            if self.validator.is_valid(&candidate) {
                return Ok(SecretString::from(candidate));
            }
            candidate.zeroize();

            #[cfg(feature = "tracing")]
            tracing::trace!("Generated candidate rejected by policy (attempt {})", _attempt);
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            "Password generation exhausted after {} attempts",
            self.max_attempts
        );

        Err(PasswordError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}

fn no_class_selected() -> PasswordError {
    PasswordError::InvalidArgument("At least one character type must be selected".to_string())
}

fn plan_for_policy(policy: &Policy) -> Result<Plan> {
    let classes: Vec<CharClass> = if policy.minimum_character_types() > 0 {
        CharClass::ALL.to_vec()
    } else {
        let case_minimums = policy
            .minimum_lowercase()
            .saturating_add(policy.minimum_uppercase());
        let needs_letters = policy.minimum_letters() > case_minimums;
        CharClass::ALL
            .into_iter()
            .filter(|&class| policy.minimum_for(class) > 0 || (needs_letters && class.is_letter()))
            .collect()
    };

    build_plan(policy, &classes, 0)
}

fn plan_for_selection(policy: &Policy, selection: ClassSelection) -> Result<Plan> {
    let classes = selection.classes();
    if classes.is_empty() {
        return Err(no_class_selected());
    }

    if let Some(missing) = CharClass::ALL
        .into_iter()
        .find(|&class| policy.minimum_for(class) > 0 && !selection.contains(class))
    {
        return Err(PasswordError::InvalidArgument(format!(
            "Policy requires {} characters",
            missing
        )));
    }
    if policy.minimum_letters() > 0 && !classes.iter().any(|class| class.is_letter()) {
        return Err(PasswordError::InvalidArgument(
            "Policy requires letters".to_string(),
        ));
    }
    if policy.minimum_character_types() > classes.len() {
        return Err(PasswordError::InvalidArgument(format!(
            "Policy requires {} character types",
            policy.minimum_character_types()
        )));
    }

    build_plan(policy, &classes, 1)
}

fn build_plan(policy: &Policy, classes: &[CharClass], floor: usize) -> Result<Plan> {
    if classes.is_empty() {
        return Err(no_class_selected());
    }

    let quotas = required_quotas(policy, classes, floor);
    let quota_letters: usize = quotas
        .iter()
        .filter(|(class, _)| class.is_letter())
        .map(|(_, n)| n)
        .sum();
    let extra_letters = policy.minimum_letters().saturating_sub(quota_letters);
    let required = quotas
        .iter()
        .fold(extra_letters, |total, (_, n)| total.saturating_add(*n));

    let min_length = policy.minimum_length().max(required);
    if min_length > MAX_GENERATED_LENGTH {
        return Err(PasswordError::InvalidArgument(format!(
            "Policy requires {} characters, more than the {} a generated password may hold",
            min_length, MAX_GENERATED_LENGTH
        )));
    }
    let max_length = policy
        .maximum_length()
        .unwrap_or_else(|| min_length.max(DEFAULT_UNBOUNDED_LENGTH))
        .min(MAX_GENERATED_LENGTH);
    if min_length > max_length {
        return Err(PasswordError::InvalidArgument(format!(
            "Required characters do not fit within {} characters",
            max_length
        )));
    }

    Ok(Plan {
        pool: build_character_pool(classes),
        quotas,
        extra_letters,
        min_length,
        max_length,
    })
}

/// Per-class counts to emit up front: the policy minimum (at least `floor`),
/// plus one character of further classes until the distinct-class count of
/// the policy is reached.
fn required_quotas(
    policy: &Policy,
    classes: &[CharClass],
    floor: usize,
) -> Vec<(CharClass, usize)> {
    let mut quotas: Vec<(CharClass, usize)> = classes
        .iter()
        .map(|&class| (class, policy.minimum_for(class).max(floor)))
        .collect();

    let mut distinct = quotas.iter().filter(|(_, n)| *n > 0).count();
    for quota in quotas.iter_mut() {
        if distinct >= policy.minimum_character_types() {
            break;
        }
        if quota.1 == 0 {
            quota.1 = 1;
            distinct += 1;
        }
    }
    quotas
}

fn construct<R: Rng + CryptoRng + ?Sized>(plan: &Plan, rng: &mut R) -> Result<String> {
    let length = rng.gen_range(plan.min_length..=plan.max_length);
    let required = generate_required_characters(&plan.quotas, plan.extra_letters, rng)?;
    let mut chars = fill_remaining_characters(required, &plan.pool, length, rng)?;
    chars.shuffle(rng);

    let password: String = chars.iter().collect();
    chars.fill('\0');
    Ok(password)
}

/// Union of the generation alphabets of `classes`.
pub(crate) fn build_character_pool(classes: &[CharClass]) -> Vec<char> {
    classes
        .iter()
        .flat_map(|class| class.alphabet().iter().copied())
        .collect()
}

/// Emits the quota of each class, then `extra_letters` letters drawn from the
/// letter classes among the quotas.
pub(crate) fn generate_required_characters<R: Rng + CryptoRng + ?Sized>(
    quotas: &[(CharClass, usize)],
    extra_letters: usize,
    rng: &mut R,
) -> Result<Vec<char>> {
    let mut chars = Vec::new();
    for &(class, count) in quotas {
        for _ in 0..count {
            chars.push(get_random_character(class.alphabet(), rng)?);
        }
    }

    if extra_letters > 0 {
        let letters: Vec<CharClass> = quotas
            .iter()
            .map(|&(class, _)| class)
            .filter(|class| class.is_letter())
            .collect();
        let alphabet = build_character_pool(&letters);
        for _ in 0..extra_letters {
            chars.push(get_random_character(&alphabet, rng)?);
        }
    }

    Ok(chars)
}

/// Appends random pool characters to `chars` until it holds `length` characters.
pub(crate) fn fill_remaining_characters<R: Rng + CryptoRng + ?Sized>(
    mut chars: Vec<char>,
    pool: &[char],
    length: usize,
    rng: &mut R,
) -> Result<Vec<char>> {
    while chars.len() < length {
        chars.push(get_random_character(pool, rng)?);
    }
    Ok(chars)
}

pub(crate) fn get_random_character<R: Rng + CryptoRng + ?Sized>(
    alphabet: &[char],
    rng: &mut R,
) -> Result<char> {
    alphabet.choose(rng).copied().ok_or_else(no_class_selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::{ClassCounts, DIGITS, LOWERCASE, SPECIAL, UPPERCASE};
    use crate::policy::{CharacterTypesConfig, PolicyConfig};
    use secrecy::ExposeSecret;

    fn character_types_policy() -> Policy {
        Policy::with_character_types(CharacterTypesConfig::default()).unwrap()
    }

    fn letters_and_digits_policy() -> Policy {
        Policy::new(PolicyConfig {
            minimum_lowercase: 0,
            minimum_special_chars: 0,
            minimum_letters: 0,
            ..PolicyConfig::default()
        })
    }

    #[test]
    fn test_get_random_character() {
        for alphabet in [DIGITS, SPECIAL, LOWERCASE, UPPERCASE] {
            let c = get_random_character(alphabet, &mut OsRng).unwrap();
            assert!(alphabet.contains(&c));
        }
    }

    #[test]
    fn test_get_random_character_empty_alphabet() {
        let result = get_random_character(&[], &mut OsRng);
        assert!(matches!(result, Err(PasswordError::InvalidArgument(_))));
    }

    #[test]
    fn test_build_character_pool() {
        let pool = build_character_pool(&CharClass::ALL);
        assert!(pool.contains(&'A'));
        assert!(pool.contains(&'a'));
        assert!(pool.contains(&'0'));
        assert!(pool.contains(&'!'));
        assert_eq!(pool.len(), 26 + 26 + 10 + SPECIAL.len());

        let pool = build_character_pool(&[CharClass::Uppercase, CharClass::Digit]);
        assert!(pool.contains(&'A'));
        assert!(!pool.contains(&'a'));
        assert!(pool.contains(&'0'));
        assert!(!pool.contains(&'!'));
    }

    #[test]
    fn test_generate_required_characters() {
        let quotas: Vec<_> = CharClass::ALL.into_iter().map(|c| (c, 1)).collect();
        let chars = generate_required_characters(&quotas, 0, &mut OsRng).unwrap();
        assert_eq!(chars.len(), 4);
        let counts = ClassCounts::of(&chars.iter().collect::<String>());
        assert_eq!(counts.distinct(), 4);

        let quotas = [(CharClass::Uppercase, 1), (CharClass::Digit, 1)];
        let chars = generate_required_characters(&quotas, 0, &mut OsRng).unwrap();
        let counts = ClassCounts::of(&chars.iter().collect::<String>());
        assert_eq!(chars.len(), 2);
        assert_eq!(counts.uppercase, 1);
        assert_eq!(counts.digits, 1);
    }

    #[test]
    fn test_generate_required_characters_extra_letters() {
        let quotas = [(CharClass::Lowercase, 0), (CharClass::Digit, 2)];
        let chars = generate_required_characters(&quotas, 3, &mut OsRng).unwrap();
        let counts = ClassCounts::of(&chars.iter().collect::<String>());
        assert_eq!(counts.lowercase, 3);
        assert_eq!(counts.digits, 2);
    }

    #[test]
    fn test_fill_remaining_characters() {
        let initial = vec!['A', 'b', '1', '!'];
        let pool = build_character_pool(&CharClass::ALL);
        let chars = fill_remaining_characters(initial.clone(), &pool, 8, &mut OsRng).unwrap();
        assert_eq!(chars.len(), 8);
        assert_eq!(&chars[..4], initial.as_slice());
        assert!(chars.iter().all(|c| pool.contains(c)));
    }

    #[test]
    fn test_fill_does_not_truncate() {
        let initial = vec!['a'; 5];
        let chars = fill_remaining_characters(initial, LOWERCASE, 3, &mut OsRng).unwrap();
        assert_eq!(chars.len(), 5);
    }

    #[test]
    fn test_generated_password_satisfies_default_policy() {
        let policy = Policy::default();
        let generator = Generator::new(policy.clone());
        for _ in 0..200 {
            let password = generator.generate().unwrap();
            let password = password.expose_secret();
            let length = password.chars().count();
            assert!(crate::validator::is_valid(password, &policy), "{}", password);
            assert!((10..=DEFAULT_UNBOUNDED_LENGTH).contains(&length));
        }
    }

    #[test]
    fn test_generated_password_satisfies_character_types_policy() {
        let policy = character_types_policy();
        let validator = Validator::new(policy.clone());
        let generator = Generator::with_validator(validator.clone());
        for _ in 0..200 {
            let password = generator.generate().unwrap();
            let password = password.expose_secret();
            let length = password.chars().count();
            assert!(validator.is_valid(password));
            assert!((10..=20).contains(&length));
        }
    }

    #[test]
    fn test_generated_password_respects_class_minimums() {
        let policy = Policy::new(PolicyConfig {
            minimum_digits: 4,
            minimum_uppercase: 3,
            minimum_special_chars: 2,
            minimum_letters: 8,
            minimum_length: 12,
            maximum_length: Some(14),
            ..PolicyConfig::default()
        });
        let generator = Generator::new(policy.clone());
        for _ in 0..100 {
            let password = generator.generate().unwrap();
            let counts = ClassCounts::of(password.expose_secret());
            assert!(counts.digits >= 4);
            assert!(counts.uppercase >= 3);
            assert!(counts.special >= 2);
            assert!(counts.letters() >= 8);
            assert!(password.expose_secret().chars().count() <= 14);
        }
    }

    #[test]
    fn test_generate_with_specific_types() {
        let generator = Generator::new(letters_and_digits_policy());
        let selection = ClassSelection {
            uppercase: true,
            lowercase: false,
            digits: true,
            special: false,
        };
        for _ in 0..50 {
            let password = generator.generate_with(selection).unwrap();
            let counts = ClassCounts::of(password.expose_secret());
            assert!(counts.uppercase > 0);
            assert_eq!(counts.lowercase, 0);
            assert!(counts.digits > 0);
            assert_eq!(counts.special, 0);
        }
    }

    #[test]
    fn test_generate_with_no_types() {
        let generator = Generator::default();
        let selection = ClassSelection {
            uppercase: false,
            lowercase: false,
            digits: false,
            special: false,
        };
        let result = generator.generate_with(selection);
        assert_eq!(
            result.err(),
            Some(PasswordError::InvalidArgument(
                "At least one character type must be selected".to_string()
            ))
        );
    }

    #[test]
    fn test_generate_with_selection_missing_required_class() {
        let generator = Generator::default();
        let selection = ClassSelection {
            special: false,
            ..ClassSelection::default()
        };
        let result = generator.generate_with(selection);
        assert!(matches!(result, Err(PasswordError::InvalidArgument(_))));
    }

    #[test]
    fn test_policy_without_classes_is_rejected() {
        let policy = Policy::new(PolicyConfig {
            minimum_digits: 0,
            minimum_lowercase: 0,
            minimum_uppercase: 0,
            minimum_special_chars: 0,
            minimum_letters: 0,
            ..PolicyConfig::default()
        });
        let result = Generator::new(policy).generate();
        assert!(matches!(result, Err(PasswordError::InvalidArgument(_))));
    }

    #[test]
    fn test_letters_only_policy_draws_both_cases() {
        let policy = Policy::new(PolicyConfig {
            minimum_digits: 0,
            minimum_lowercase: 0,
            minimum_uppercase: 0,
            minimum_special_chars: 0,
            minimum_letters: 12,
            ..PolicyConfig::default()
        });
        let password = Generator::new(policy.clone()).generate().unwrap();
        let counts = ClassCounts::of(password.expose_secret());
        assert!(counts.letters() >= 12);
        assert_eq!(counts.digits + counts.special, 0);
    }

    #[test]
    fn test_attempt_budget_is_enforced() {
        let result = Generator::new(Policy::default()).max_attempts(0).generate();
        assert_eq!(
            result.err(),
            Some(PasswordError::GenerationExhausted { attempts: 0 })
        );
    }

    #[test]
    fn test_rejected_candidates_exhaust_attempts() {
        // thousands of random digits always contain a run like "000" or "123"
        let policy = Policy::new(PolicyConfig {
            minimum_lowercase: 0,
            minimum_uppercase: 0,
            minimum_special_chars: 0,
            minimum_letters: 0,
            minimum_length: 2000,
            maximum_length: Some(2000),
            allow_repeated_characters: false,
            allow_sequential_characters: false,
            ..PolicyConfig::default()
        });
        let result = Generator::new(policy).max_attempts(3).generate();
        assert_eq!(
            result.err(),
            Some(PasswordError::GenerationExhausted { attempts: 3 })
        );
    }

    #[test]
    fn test_huge_maximum_is_capped() {
        let policy = Policy::with_character_types(CharacterTypesConfig {
            maximum_length: i64::MAX,
            ..CharacterTypesConfig::default()
        })
        .unwrap();
        let plan = plan_for_policy(&policy).unwrap();
        assert_eq!(plan.min_length, 10);
        assert_eq!(plan.max_length, MAX_GENERATED_LENGTH);
    }

    #[test]
    fn test_huge_minimum_is_rejected() {
        let policy = Policy::new(PolicyConfig {
            minimum_digits: i64::MIN,
            ..PolicyConfig::default()
        });
        let result = Generator::new(policy).generate();
        assert!(matches!(result, Err(PasswordError::InvalidArgument(_))));
    }

    #[test]
    fn test_required_quotas_pad_to_character_types() {
        let policy = Policy::new(PolicyConfig {
            minimum_lowercase: 0,
            minimum_uppercase: 0,
            minimum_special_chars: 0,
            minimum_letters: 0,
            minimum_digits: 2,
            minimum_character_types: 3,
            ..PolicyConfig::default()
        });
        let quotas = required_quotas(&policy, &CharClass::ALL, 0);
        assert_eq!(
            quotas,
            vec![
                (CharClass::Uppercase, 1),
                (CharClass::Lowercase, 1),
                (CharClass::Digit, 2),
                (CharClass::Special, 0),
            ]
        );
    }

    #[test]
    fn test_unbounded_policy_uses_default_upper_length() {
        let plan = plan_for_policy(&Policy::default()).unwrap();
        assert_eq!(plan.min_length, 10);
        assert_eq!(plan.max_length, DEFAULT_UNBOUNDED_LENGTH);

        let long = Policy::new(PolicyConfig {
            minimum_length: 32,
            ..PolicyConfig::default()
        });
        let plan = plan_for_policy(&long).unwrap();
        assert_eq!(plan.min_length, 32);
        assert_eq!(plan.max_length, 32);
    }
}
