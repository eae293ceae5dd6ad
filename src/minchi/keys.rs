//! Hash keys derived from the molecules layer.
//!
//! Both keys are taken from the SHA-256 digest of the molecules layer text:
//! the long key is the full digest in uppercase hex, the short key is 14
//! letters (base 26) drawn from the first 16 bytes.

use crate::utils::sha256_digest;
use serde::Serialize;

/// Length of the short key in letters
pub const SHORT_KEY_LENGTH: usize = 14;

/// Long and short lookup keys for a canonical identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MInChIKeys {
    pub long: String,
    pub short: String,
}

impl MInChIKeys {
    /// Derive both keys from the molecules layer
    #[must_use]
    pub fn derive(molecules: &str) -> Self {
        let digest = sha256_digest(molecules.as_bytes());

        let long = digest.iter().map(|byte| format!("{byte:02X}")).collect();

        let mut head = [0u8; 16];
        head.copy_from_slice(&digest[..16]);
        let mut number = u128::from_be_bytes(head);
        let mut short = String::with_capacity(SHORT_KEY_LENGTH);
        for _ in 0..SHORT_KEY_LENGTH {
            short.push(char::from(b'A' + (number % 26) as u8));
            number /= 26;
        }

        Self { long, short }
    }
}
