// Pre-shared key used by both tunnels of a connection.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use secrecy::{ExposeSecret, SecretString};

/// A 64-character `[A-Za-z0-9]` pre-shared key.
///
/// Generated once per run and shared by both tunnels. `Debug` never
/// prints the value; call [`SharedSecret::expose`] for the report.
#[derive(Clone)]
pub struct SharedSecret(SecretString);

impl SharedSecret {
    pub const LEN: usize = 64;

    /// Draw a fresh secret from the thread-local RNG.
    pub fn generate() -> Self {
        Self::from_rng(&mut thread_rng())
    }

    /// Draw a secret from the given RNG (seeded RNGs make tests deterministic).
    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let value: String = rng
            .sample_iter(&Alphanumeric)
            .take(Self::LEN)
            .map(char::from)
            .collect();
        Self(SecretString::from(value))
    }

    /// Wrap a known value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for SharedSecret {}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn generated_secret_is_64_alphanumerics() {
        let secret = SharedSecret::generate();
        assert_eq!(secret.expose().len(), SharedSecret::LEN);
        assert!(secret.expose().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = SharedSecret::from_rng(&mut StdRng::seed_from_u64(7));
        let b = SharedSecret::from_rng(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn debug_is_redacted() {
        let secret = SharedSecret::new("hunter2");
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }
}
