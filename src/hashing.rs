//! Password hashing seam.
//!
//! Hashing is delegated to a vetted primitive; this module only adapts it to
//! the [`PasswordHashing`] trait used by [`crate::PasswordHelper`].

use secrecy::SecretString;

use crate::error::Result;

#[cfg(feature = "argon2")]
pub use self::argon2_backend::Argon2Hashing;

/// Algorithm and settings recorded in a hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashInfo {
    pub algorithm: String,
    pub version: Option<u32>,
    /// Name/value pairs in the order the hash lists them, e.g. `("m", "19456")`.
    pub params: Vec<(String, String)>,
}

/// Hash, verify and rehash-check operations of a password hashing primitive.
pub trait PasswordHashing {
    /// Hashes a password into a self-describing (PHC) string.
    fn hash(&self, password: &SecretString) -> Result<String>;

    /// Checks a password against a hash produced by [`PasswordHashing::hash`].
    fn verify(&self, password: &SecretString, hash: &str) -> Result<bool>;

    /// True if the hash was produced with other settings than the current
    /// ones, or cannot be parsed at all.
    fn needs_rehash(&self, hash: &str) -> bool;

    /// Describes how a hash was produced without verifying anything.
    fn info(&self, hash: &str) -> Result<HashInfo>;
}

#[cfg(feature = "argon2")]
mod argon2_backend {
    use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
    use argon2::{Algorithm, Argon2, Params, Version};
    use rand::rngs::OsRng;
    use secrecy::{ExposeSecret, SecretString};

    use super::{HashInfo, PasswordHashing};
    use crate::error::{PasswordError, Result};

    /// Argon2id hashing with a random salt per hash.
    #[derive(Debug, Clone, Default)]
    pub struct Argon2Hashing {
        params: Params,
    }

    impl Argon2Hashing {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_params(params: Params) -> Self {
            Self { params }
        }

        fn argon2(&self) -> Argon2<'static> {
            Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
        }
    }

    fn hashing_error(e: impl std::fmt::Display) -> PasswordError {
        PasswordError::Hashing(e.to_string())
    }

    impl PasswordHashing for Argon2Hashing {
        fn hash(&self, password: &SecretString) -> Result<String> {
            let salt = SaltString::generate(&mut OsRng);
            let hash = self
                .argon2()
                .hash_password(password.expose_secret().as_bytes(), &salt)
                .map_err(hashing_error)?;
            Ok(hash.to_string())
        }

        fn verify(&self, password: &SecretString, hash: &str) -> Result<bool> {
            let parsed = PasswordHash::new(hash).map_err(hashing_error)?;
            Ok(self
                .argon2()
                .verify_password(password.expose_secret().as_bytes(), &parsed)
                .is_ok())
        }

        fn needs_rehash(&self, hash: &str) -> bool {
            let Ok(parsed) = PasswordHash::new(hash) else {
                return true;
            };
            if parsed.algorithm != Algorithm::Argon2id.ident()
                || parsed.version != Some(Version::V0x13 as u32)
            {
                return true;
            }
            match Params::try_from(&parsed) {
                Ok(params) => {
                    params.m_cost() != self.params.m_cost()
                        || params.t_cost() != self.params.t_cost()
                        || params.p_cost() != self.params.p_cost()
                }
                Err(_) => true,
            }
        }

        fn info(&self, hash: &str) -> Result<HashInfo> {
            let parsed = PasswordHash::new(hash).map_err(hashing_error)?;
            Ok(HashInfo {
                algorithm: parsed.algorithm.as_str().to_string(),
                version: parsed.version,
                params: parsed
                    .params
                    .iter()
                    .map(|(name, value)| (name.as_str().to_string(), value.as_str().to_string()))
                    .collect(),
            })
        }
    }

}
