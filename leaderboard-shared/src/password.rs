/// Password credential hashing
///
/// Users are created with a plaintext password that is immediately turned
/// into an Argon2id PHC string. Only the hash is stored, and it is never
/// part of any response view.
///
/// # Parameters
///
/// - Memory: 64 MB (65536 KB)
/// - Iterations: 3
/// - Parallelism: 4 lanes
/// - Output: 32 bytes, random 16-byte salt per hash
///
/// # Example
///
/// ```
/// use leaderboard_shared::password::hash_password;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("correct horse battery staple")?;
/// assert!(hash.starts_with("$argon2id$"));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Error type for password hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Invalid Argon2 parameters
    #[error("Invalid hashing parameters: {0}")]
    Params(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Hashes a password with Argon2id
///
/// # Errors
///
/// Returns `PasswordError` if the parameters are rejected or hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::Params(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hash(e.to_string()))?;

    Ok(password_hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{password_hash::PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_verifies_only_matching_password() {
        let hash = hash_password("correct_password").expect("Hash should succeed");
        let parsed = PasswordHash::new(&hash).expect("Hash should parse");

        assert!(Argon2::default()
            .verify_password(b"correct_password", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong_password", &parsed)
            .is_err());
    }
}
