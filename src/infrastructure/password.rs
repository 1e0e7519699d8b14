use crate::domain::password::PasswordHashingService;
use anyhow::Result;
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;

/// Infrastructure service for password hashing and verification
///
/// Argon2id work runs on tokio's blocking pool so a slow hash never stalls
/// the request executor.
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
    decoy: String,
}

// 16 fixed salt bytes and an all-zero 32-byte output, unpadded base64
const DECOY_SALT: &str = "ZGVjb3lkZWNveWRlY295IQ";
const DECOY_OUTPUT: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

impl PasswordService {
    pub fn new(params: Params) -> Self {
        let decoy = format!(
            "$argon2id$v=19$m={},t={},p={}${}${}",
            params.m_cost(),
            params.t_cost(),
            params.p_cost(),
            DECOY_SALT,
            DECOY_OUTPUT
        );
        Self { params, decoy }
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

#[async_trait]
impl PasswordHashingService for PasswordService {
    /// Hash a plain text password using Argon2
    async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let argon2 = self.hasher();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password hashing task failed: {}", e))?
    }

    /// Verify a password against a hash
    async fn verify_password(&self, password: &str, hash: &str) -> bool {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let argon2 = self.hasher();

        let outcome = tokio::task::spawn_blocking(move || {
            let parsed_hash = match PasswordHash::new(&hash) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::debug!("Rejecting malformed password hash: {}", e);
                    return false;
                }
            };

            // Cost parameters come from the stored hash, not from `self.params`.
            argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .await;

        match outcome {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password verification task failed: {:?}", e);
                false
            }
        }
    }

    fn decoy_hash(&self) -> &str {
        &self.decoy
    }
}
