//! Room code generation.
//!
//! Room codes are 6-character strings using Crockford's Base32 alphabet.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const ROOM_CODE_LEN: usize = 6;

/// Short shareable identifier of a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a random code from the thread-local CSPRNG (OS seeded).
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let s = (0..ROOM_CODE_LEN)
            .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
            .collect();
        Self(s)
    }

    /// Normalize a client-supplied code: surrounding whitespace is ignored
    /// and lookups are case-insensitive.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
