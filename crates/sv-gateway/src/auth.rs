//! Credential verification.
//!
//! Credentials are injected from the environment at startup; there is no
//! default pair baked into the binary. The stored secret is a salted
//! SHA-256 digest, and comparisons run in constant time so response
//! timing leaks nothing about how close a guess was.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::config::ConfigError;

/// The injected credential record the gateway verifies against.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    salt: String,
    /// Hex SHA-256 of `salt || password`.
    password_digest: String,
}

impl Credentials {
    /// Build from parts. `password_digest` must be the hex digest
    /// produced by [`Credentials::digest`] with the same salt.
    pub fn new(
        email: impl Into<String>,
        salt: impl Into<String>,
        password_digest: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            salt: salt.into(),
            password_digest: password_digest.into(),
        }
    }

    /// Load from `SV_AUTH_EMAIL`, `SV_AUTH_SALT`, and
    /// `SV_AUTH_PASSWORD_DIGEST`. All three are required; refusing to
    /// start beats falling back to a well-known pair.
    pub fn from_env() -> Result<Self, ConfigError> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| ConfigError::MissingCredential(name.to_string()))
        };
        Ok(Self::new(
            var("SV_AUTH_EMAIL")?,
            var("SV_AUTH_SALT")?,
            var("SV_AUTH_PASSWORD_DIGEST")?,
        ))
    }

    /// Hex SHA-256 of `salt || password`, for provisioning and tests.
    pub fn digest(salt: &str, password: &str) -> String {
        hex::encode(Sha256::digest(format!("{salt}{password}").as_bytes()))
    }

    /// Verify an email/password pair.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let candidate = Self::digest(&self.salt, password);
        // Both comparisons always run; no early exit on a wrong email.
        let email_ok = constant_time_compare(email, &self.email);
        let password_ok = constant_time_compare(&candidate, &self.password_digest);
        email_ok & password_ok
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the digest or salt.
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Constant-time string equality via `subtle::ConstantTimeEq`.
///
/// Length is compared first; `ct_eq` requires equal-length slices, and
/// length is not a secret here.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
