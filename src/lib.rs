//! Password policy engine
//!
//! This library defines configurable password policies, validates passwords
//! against them, generates passwords that satisfy them and scores password
//! strength independently of any policy.
//!
//! # Features
//!
//! - `async` (default): Enables cancellable strength evaluation and channel delivery
//! - `argon2` (default): Argon2id backend for the [`PasswordHelper`] facade
//! - `tracing`: Enables logging via tracing crate
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_policy::{Generator, Policy, PolicyConfig, Validator, score};
//! use secrecy::ExposeSecret;
//!
//! let policy = Policy::new(PolicyConfig {
//!     minimum_length: 12,
//!     ..PolicyConfig::default()
//! });
//!
//! let password = Generator::new(policy.clone()).generate().expect("generation failed");
//! assert!(Validator::new(policy).is_valid(password.expose_secret()));
//!
//! println!("Score: {}", score(password.expose_secret()));
//! ```

// Internal modules
mod charset;
mod denylist;
mod error;
mod evaluator;
mod generator;
mod hashing;
mod helper;
mod policy;
mod sections;
mod types;
mod validator;

// Public API
pub use charset::{CharClass, ClassCounts};
pub use denylist::{COMMON_PATTERNS, COMMON_WORDS};
pub use error::{PasswordError, Result};
pub use evaluator::{StrengthChecker, evaluate_password_strength, score};
pub use generator::{ClassSelection, DEFAULT_MAX_ATTEMPTS, Generator, MAX_GENERATED_LENGTH};
pub use hashing::{HashInfo, PasswordHashing};
pub use helper::PasswordHelper;
pub use policy::{CharacterTypesConfig, Policy, PolicyConfig};
pub use types::{StrengthEvaluation, StrengthLevel, StrengthScore};
pub use validator::{Rule, ValidationReport, Validator, Violation, is_valid};

#[cfg(feature = "async")]
pub use evaluator::evaluate_password_strength_tx;

#[cfg(feature = "argon2")]
pub use hashing::Argon2Hashing;
