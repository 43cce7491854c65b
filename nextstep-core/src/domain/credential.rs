//! Password credential model
//!
//! Passwords are never stored. A credential keeps a random salt and the
//! Argon2id digest derived from it.

use base64::Engine;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Default Argon2id parameters for login credentials
pub const DEFAULT_TIME_COST: u32 = 2;
pub const DEFAULT_MEMORY_COST: u32 = 19456; // 19 MiB
pub const DEFAULT_PARALLELISM: u32 = 1;
pub const DEFAULT_HASH_LEN: u32 = 32;

/// Argon2id parameters used for key derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Params {
    pub time_cost: u32,
    pub memory_cost: u32,
    pub parallelism: u32,
    pub hash_len: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
            hash_len: DEFAULT_HASH_LEN,
        }
    }
}

/// Salted password digest stored on a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCredential {
    pub algorithm: String,
    /// Base64-encoded random salt
    pub salt: String,
    /// Hex-encoded derived digest
    pub hash: String,
    pub params: Argon2Params,
}

impl PasswordCredential {
    /// Hash a new password with a fresh 16-byte salt
    pub fn create(password: &str) -> Result<Self> {
        let salt: [u8; 16] = rand::thread_rng().gen();
        let params = Argon2Params::default();
        let digest = derive(password, &salt, &params)?;

        Ok(Self {
            algorithm: "argon2id".to_string(),
            salt: base64::engine::general_purpose::STANDARD.encode(salt),
            hash: hex::encode(digest),
            params,
        })
    }

    /// Check a candidate password against the stored digest
    pub fn verify(&self, password: &str) -> Result<bool> {
        let salt = base64::engine::general_purpose::STANDARD
            .decode(&self.salt)
            .map_err(|e| Error::storage(format!("Invalid credential salt: {}", e)))?;
        let expected = hex::decode(&self.hash)
            .map_err(|e| Error::storage(format!("Invalid credential hash: {}", e)))?;

        let actual = derive(password, &salt, &self.params)?;
        Ok(constant_time_eq(&actual, &expected))
    }
}

fn derive(password: &str, salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>> {
    let argon2_params = argon2::Params::new(
        params.memory_cost,
        params.time_cost,
        params.parallelism,
        Some(params.hash_len as usize),
    )
    .map_err(|e| Error::Other(format!("Failed to create argon2 params: {:?}", e)))?;

    let argon2 = argon2::Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2_params,
    );

    let mut key = vec![0u8; params.hash_len as usize];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| Error::Other(format!("Failed to derive key: {:?}", e)))?;

    Ok(key)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
