//! Password hashing and verification using Argon2id.
//!
//! Hashes are PHC-formatted strings carrying the salt and parameters, so
//! verification needs no separate salt storage. Verification uses the
//! library's constant-time comparison.

use argon2::password_hash::{PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;

use super::error::Error;
use super::user::PasswordHash;

/// Hash a raw password with a fresh random salt.
pub fn hash_password(raw: &str) -> Result<PasswordHash, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(raw.as_bytes(), &salt)
        .map(|hash| PasswordHash::from_phc_string(hash.to_string()))
        .map_err(|err| Error::internal(format!("failed to hash password: {err}")))
}

/// Verify a raw password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; an error only when the stored hash is not
/// a parseable PHC string.
pub fn verify_password(raw: &str, stored: &PasswordHash) -> Result<bool, Error> {
    let parsed = PhcHash::new(stored.as_phc_string())
        .map_err(|err| Error::internal(format!("invalid stored password hash: {err}")))?;

    Ok(Argon2::default()
        .verify_password(raw.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn round_trips_and_rejects_other_passwords() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing succeeds");

        assert!(hash.as_phc_string().starts_with("$argon2"));
        assert_ne!(hash.as_phc_string(), password);

        assert!(verify_password(password, &hash).expect("verify parses"));
        assert!(!verify_password("wrong-password", &hash).expect("verify parses"));
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let password = "same-password";
        let first = hash_password(password).expect("hashing succeeds");
        let second = hash_password(password).expect("hashing succeeds");

        assert_ne!(first.as_phc_string(), second.as_phc_string());
        assert!(verify_password(password, &first).expect("verify parses"));
        assert!(verify_password(password, &second).expect("verify parses"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let stored = PasswordHash::from_phc_string("not-a-valid-hash");
        assert!(verify_password("password", &stored).is_err());
    }
}
