use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

fn argon2_failure(step: &'static str, e: password_hash::Error) -> anyhow::Error {
    error!(error = %e, step, "argon2 failure");
    anyhow::anyhow!("argon2 {step}: {e}")
}

/// Salted Argon2id hash in PHC string form.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| argon2_failure("hash", e))
}

/// `Ok(false)` on a mismatch; `Err` only when `hash` is not a PHC string.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| argon2_failure("parse stored hash", e))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_phc_string() {
        let a = hash_password("cat").expect("hash");
        let b = hash_password("cat").expect("hash");
        assert!(a.starts_with("$argon2"));
        assert_ne!(a, b);
        assert!(!a.contains("cat"));
    }

    #[test]
    fn verify_accepts_right_and_rejects_wrong() {
        let hash = hash_password("blue-sky-42").expect("hash");
        assert!(verify_password("blue-sky-42", &hash).expect("verify"));
        assert!(!verify_password("blue-sky-43", &hash).expect("verify"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "plaintext-not-a-hash").unwrap_err();
        assert!(err.to_string().starts_with("argon2 parse stored hash"));
    }
}
