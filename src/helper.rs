//! Facade tying a policy's validator, generator and the strength checker to
//! a hashing primitive.

use secrecy::SecretString;

use crate::error::Result;
use crate::evaluator::StrengthChecker;
use crate::generator::Generator;
use crate::hashing::{HashInfo, PasswordHashing};
use crate::policy::Policy;
use crate::types::StrengthLevel;
use crate::validator::Validator;

#[cfg(feature = "argon2")]
use crate::hashing::Argon2Hashing;
#[cfg(feature = "argon2")]
use crate::policy::PolicyConfig;

#[derive(Debug, Clone)]
pub struct PasswordHelper<H> {
    validator: Validator,
    generator: Generator,
    checker: StrengthChecker,
    hasher: H,
}

#[cfg(feature = "argon2")]
impl PasswordHelper<Argon2Hashing> {
    /// Helper for a count-based policy, hashing with Argon2id defaults.
    pub fn new(config: PolicyConfig) -> Self {
        Self::with_hasher(Policy::new(config), Argon2Hashing::new())
    }
}

impl<H: PasswordHashing> PasswordHelper<H> {
    pub fn with_hasher(policy: Policy, hasher: H) -> Self {
        let validator = Validator::new(policy);
        Self {
            generator: Generator::with_validator(validator.clone()),
            validator,
            checker: StrengthChecker::new(),
            hasher,
        }
    }

    pub fn policy(&self) -> &Policy {
        self.validator.policy()
    }

    /// Generates a password that satisfies the policy.
    pub fn generate(&self) -> Result<SecretString> {
        self.generator.generate()
    }

    /// Validates that a password satisfies the policy.
    pub fn validate_complexity(&self, password: &str) -> bool {
        self.validator.is_valid(password)
    }

    pub fn check_strength(&self, password: &str) -> u8 {
        self.checker.score(password)
    }

    pub fn strength_level(&self, password: &str) -> StrengthLevel {
        self.checker.level(password)
    }

    pub fn hash(&self, password: &SecretString) -> Result<String> {
        self.hasher.hash(password)
    }

    pub fn verify(&self, password: &SecretString, hash: &str) -> Result<bool> {
        self.hasher.verify(password, hash)
    }

    pub fn needs_rehash(&self, hash: &str) -> bool {
        self.hasher.needs_rehash(hash)
    }

    pub fn info(&self, hash: &str) -> Result<HashInfo> {
        self.hasher.info(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PasswordError;
    use secrecy::ExposeSecret;

    /// Reversible stand-in so facade tests do not pay for key stretching.
    struct PlainHashing;

    impl PasswordHashing for PlainHashing {
        fn hash(&self, password: &SecretString) -> Result<String> {
            Ok(format!("plain${}", password.expose_secret()))
        }

        fn verify(&self, password: &SecretString, hash: &str) -> Result<bool> {
            Ok(hash == format!("plain${}", password.expose_secret()))
        }

        fn needs_rehash(&self, hash: &str) -> bool {
            !hash.starts_with("plain$")
        }

        fn info(&self, hash: &str) -> Result<HashInfo> {
            match hash.strip_prefix("plain$") {
                Some(_) => Ok(HashInfo {
                    algorithm: "plain".to_string(),
                    version: None,
                    params: Vec::new(),
                }),
                None => Err(PasswordError::Hashing("unknown hash format".to_string())),
            }
        }
    }

    fn helper() -> PasswordHelper<PlainHashing> {
        PasswordHelper::with_hasher(Policy::default(), PlainHashing)
    }

    #[test]
    fn test_generated_password_validates() {
        let helper = helper();
        let password = helper.generate().unwrap();
        assert!(helper.validate_complexity(password.expose_secret()));
    }

    #[test]
    fn test_strength_passthrough() {
        let helper = helper();
        assert_eq!(helper.check_strength(""), 1);
        assert_eq!(helper.strength_level("Xk9#mT2$vLp&qR7!"), StrengthLevel::VeryStrong);
    }

    #[test]
    fn test_hashing_passthrough() {
        let helper = helper();
        let password = SecretString::new("a1!Aa1!Azz".to_string().into());
        let hash = helper.hash(&password).unwrap();
        assert!(helper.verify(&password, &hash).unwrap());
        assert!(!helper.needs_rehash(&hash));
        assert!(helper.needs_rehash("$2y$10$legacy"));
        assert_eq!(helper.info(&hash).unwrap().algorithm, "plain");
        assert!(helper.info("$2y$10$legacy").is_err());
    }

    #[cfg(feature = "argon2")]
    #[test]
    fn test_argon2_helper_uses_count_policy() {
        let helper = PasswordHelper::new(PolicyConfig {
            minimum_length: 14,
            ..PolicyConfig::default()
        });
        assert_eq!(helper.policy().minimum_length(), 14);
        assert!(!helper.validate_complexity("a1!Aa1!Azz"));
    }
}
