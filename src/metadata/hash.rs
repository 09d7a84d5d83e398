// envset-rs: Environment Loader and Command Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Value hashing.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::MetadataError;

/// Hex digests are cut to this many characters.
pub const MAX_HASH_LEN: usize = 50;

type HmacSha256 = Hmac<Sha256>;

/// Hash algorithm recorded in a metadata file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Sha256,
    Hmac,
}

impl Algorithm {
    /// `Hmac` when a secret is present, `Sha256` otherwise.
    #[must_use]
    pub const fn for_secret(secret: Option<&str>) -> Self {
        match secret {
            Some(_) => Self::Hmac,
            None => Self::Sha256,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
            Self::Hmac => write!(f, "hmac"),
        }
    }
}

/// Hashes `value`, keyed with `secret` when one is given.
///
/// # Errors
///
/// Returns `MetadataError::InvalidSecret` if the HMAC key is rejected.
pub fn hash_value(value: &str, secret: Option<&str>) -> Result<String, MetadataError> {
    let digest = match secret {
        Some(secret) => {
            let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
                .map_err(|_| MetadataError::InvalidSecret)?;
            mac.update(value.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        None => hex::encode(Sha256::digest(value.as_bytes())),
    };
    Ok(truncate(digest))
}

fn truncate(mut digest: String) -> String {
    digest.truncate(MAX_HASH_LEN);
    digest
}
