// src/application/security.rs
use sha2::{Digest, Sha256};

/// Yes/no check for the admin area. Credentials are held as SHA-256 digests
/// so comparisons always run over fixed-length values.
#[derive(Clone)]
pub struct AdminGate {
    username: [u8; 32],
    password: [u8; 32],
}

impl AdminGate {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: digest(username),
            password: digest(password),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = fixed_eq(&self.username, &digest(username));
        let pass_ok = fixed_eq(&self.password, &digest(password));
        user_ok & pass_ok
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate").finish_non_exhaustive()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

fn fixed_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
