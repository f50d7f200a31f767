//! Argon2id password hashing.

use crate::config::HasherConfig;
use crate::error::SignupError;
use crate::protocols::PasswordHasher;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHasher as _, Version,
};
use async_trait::async_trait;
use rand::RngCore;

/// Salt length in bytes.
const SALT_LEN: usize = 16;

/// Hashes passwords into PHC strings (`$argon2id$v=19$m=...`).
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with explicit cost parameters.
    ///
    /// `memory_cost` is in KiB and must be at least `8 * parallelism`.
    pub fn new(memory_cost: u32, time_cost: u32, parallelism: u32) -> Result<Self, SignupError> {
        let params = Params::new(memory_cost, time_cost, parallelism, None)?;
        Ok(Self { params })
    }

    pub fn from_config(config: &HasherConfig) -> Result<Self, SignupError> {
        Self::new(config.memory_cost, config.time_cost, config.parallelism)
    }
}

fn hash_password(params: Params, plaintext: &str) -> Result<String, SignupError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
    let hash = argon2.hash_password(plaintext.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

#[async_trait]
impl PasswordHasher for Argon2Hasher {
    async fn encrypt(&self, plaintext: &str) -> Result<String, SignupError> {
        let params = self.params.clone();
        let plaintext = plaintext.to_owned();

        // Hashing is deliberately slow; keep it off the async workers
        tokio::task::spawn_blocking(move || hash_password(params, &plaintext)).await?
    }
}
