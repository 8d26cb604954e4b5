//! Shared-secret check for private posts

use std::env;
use std::fmt;

/// Compares submitted secrets against the configured one
///
/// Plain string equality, not constant-time. Good enough to keep casual
/// readers out of a post, not to protect anything sensitive.
#[derive(Clone, Default)]
pub struct SecretGate {
    secret: Option<String>,
}

impl SecretGate {
    /// An empty secret counts as unset
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    /// Read the secret from an environment variable
    pub fn from_env(var: &str) -> Self {
        let gate = Self::new(env::var(var).ok());
        if !gate.is_configured() {
            tracing::debug!("{} is not set, private posts stay locked", var);
        }
        gate
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// True iff a secret is configured and equals `candidate` exactly
    pub fn verify(&self, candidate: &str) -> bool {
        self.secret.as_deref() == Some(candidate)
    }
}

// Keep the secret out of logs
impl fmt::Debug for SecretGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_secret_always_denies() {
        let gate = SecretGate::new(None);
        assert!(!gate.verify(""));
        assert!(!gate.verify("anything"));
    }

    #[test]
    fn test_empty_secret_always_denies() {
        let gate = SecretGate::new(Some(String::new()));
        assert!(!gate.is_configured());
        assert!(!gate.verify(""));
    }

    #[test]
    fn test_exact_match_only() {
        let gate = SecretGate::new(Some("Open Sesame".to_string()));
        assert!(gate.verify("Open Sesame"));
        assert!(!gate.verify("Open Sesame "));
        assert!(!gate.verify(" Open Sesame"));
        assert!(!gate.verify("open sesame"));
        assert!(!gate.verify(""));
    }

    #[test]
    fn test_from_env() {
        let var = "DEVBLOG_TEST_GATE_SECRET";
        env::set_var(var, "hunter2");
        let gate = SecretGate::from_env(var);
        env::remove_var(var);

        assert!(gate.verify("hunter2"));
        assert!(!SecretGate::from_env("DEVBLOG_TEST_GATE_SECRET_UNSET").verify(""));
    }

    #[test]
    fn test_debug_hides_secret() {
        let gate = SecretGate::new(Some("hunter2".to_string()));
        assert!(!format!("{:?}", gate).contains("hunter2"));
    }
}
