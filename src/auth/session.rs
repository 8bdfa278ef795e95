use std::collections::HashSet;

use rand::Rng;

/// Bearer tokens issued to the admin since process start.
///
/// Tokens never expire and are not persisted; a restart signs everyone out.
#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: HashSet<String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue and remember a fresh token.
    pub fn issue(&mut self) -> String {
        let token = generate_token();
        self.tokens.insert(token.clone());
        token
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Generate a cryptographically random 32-byte hex token.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}
